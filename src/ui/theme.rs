use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Explicit system hint, checked before `COLORFGBG`
pub const PREFERS_DARK_ENV: &str = "DEX_SEARCH_PREFERS_DARK";

/// Color theme for rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow::anyhow!("unknown theme {:?}", other)),
        }
    }
}

/// Reads and writes the theme preference file
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved preference, else the system preference, else light
    pub fn load(&self) -> Theme {
        self.saved()
            .or_else(|| system_theme(|key| env::var(key).ok()))
            .unwrap_or_default()
    }

    /// Preference stored on disk, if any and valid
    pub fn saved(&self) -> Option<Theme> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match contents.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!("Ignoring theme file {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create theme directory {:?}", parent))?;
            }
        }
        fs::write(&self.path, theme.as_str())
            .with_context(|| format!("Failed to write theme file {:?}", self.path))?;
        debug!("Saved theme {} to {:?}", theme, self.path);
        Ok(())
    }

    /// Flip the current theme and persist it
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}

/// System dark-mode preference from the environment, `None` when unknown
pub fn system_theme(lookup: impl Fn(&str) -> Option<String>) -> Option<Theme> {
    if let Some(value) = lookup(PREFERS_DARK_ENV) {
        return match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "dark" => Some(Theme::Dark),
            "0" | "false" | "no" | "light" => Some(Theme::Light),
            _ => None,
        };
    }

    // "fg;bg" or "fg;extra;bg"; ANSI backgrounds 0-6 and 8 are dark
    let colorfgbg = lookup("COLORFGBG")?;
    let background: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    if background <= 6 || background == 8 {
        Some(Theme::Dark)
    } else {
        Some(Theme::Light)
    }
}

/// ANSI styling for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: &'static str,
    pub accent: &'static str,
    pub muted: &'static str,
    pub positive: &'static str,
    pub negative: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                heading: "\x1b[1;30m",
                accent: "\x1b[34m",
                muted: "\x1b[90m",
                positive: "\x1b[32m",
                negative: "\x1b[31m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                heading: "\x1b[1;97m",
                accent: "\x1b[96m",
                muted: "\x1b[37m",
                positive: "\x1b[92m",
                negative: "\x1b[91m",
                reset: "\x1b[0m",
            },
        }
    }

    /// No escape codes at all
    pub fn plain() -> Self {
        Self {
            heading: "",
            accent: "",
            muted: "",
            positive: "",
            negative: "",
            reset: "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_saved_preference_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("nested").join("theme"));
        assert_eq!(store.saved(), None);

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.saved(), Some(Theme::Dark));
        assert_eq!(store.load(), Theme::Dark);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "dark");
    }

    #[test]
    fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        store.save(Theme::Light).unwrap();

        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.saved(), Some(Theme::Dark));
        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(store.saved(), Some(Theme::Light));
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "purple").unwrap();
        assert_eq!(ThemeStore::new(&path).saved(), None);
    }

    #[test]
    fn test_system_theme_fallbacks() {
        assert_eq!(system_theme(env_of(&[])), None);
        assert_eq!(system_theme(env_of(&[(PREFERS_DARK_ENV, "true")])), Some(Theme::Dark));
        assert_eq!(system_theme(env_of(&[(PREFERS_DARK_ENV, "0"), ("COLORFGBG", "15;0")])), Some(Theme::Light));
        assert_eq!(system_theme(env_of(&[("COLORFGBG", "15;0")])), Some(Theme::Dark));
        assert_eq!(system_theme(env_of(&[("COLORFGBG", "0;default;15")])), Some(Theme::Light));
        assert_eq!(system_theme(env_of(&[("COLORFGBG", "garbage")])), None);
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
