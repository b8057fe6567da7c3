use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ValidationError;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

#[derive(Debug, Error)]
#[error("unsupported locale {0:?} (expected \"en\" or \"fr\")")]
pub struct UnknownLocale(String);

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Name of the language in that language
    pub fn label(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            "fr" | "fr-fr" | "french" | "français" | "francais" => Ok(Locale::Fr),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// Every fixed string shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    AppTitle,
    AppDescription,
    SearchPrompt,
    Searching,
    ValidationRequired,
    ValidationMinLength,
    EmptyInitialTitle,
    EmptyInitialDescription,
    NoResultsTitle,
    NoResultsDescription,
    ErrorTitle,
    ErrorDefault,
    ErrorRetry,
    Price,
    PriceChange,
    Volume24h,
    Liquidity,
    MarketCap,
    ViewOn,
    First,
    Previous,
    Next,
    Last,
    ThemeLight,
    ThemeDark,
    ThemeToggled,
    LanguageSelected,
    Help,
    UnknownCommand,
}

/// Look up `msg` in the catalogue for `locale`
pub fn t(locale: Locale, msg: Msg) -> &'static str {
    match locale {
        Locale::En => en(msg),
        Locale::Fr => fr(msg),
    }
}

/// "Showing 1 to 10 of 50 results"
pub fn showing(locale: Locale, start: usize, end: usize, total: usize) -> String {
    match locale {
        Locale::En => format!("Showing {} to {} of {} results", start, end, total),
        Locale::Fr => format!("Affichage de {} à {} sur {} résultats", start, end, total),
    }
}

/// Localized message for a rejected query
pub fn validation_message(locale: Locale, error: &ValidationError) -> &'static str {
    match error {
        ValidationError::Required => t(locale, Msg::ValidationRequired),
        ValidationError::TooShort { .. } => t(locale, Msg::ValidationMinLength),
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::AppTitle => "DexScreener Pair Search",
        Msg::AppDescription => "Search trading pairs across every chain and DEX tracked by DexScreener",
        Msg::SearchPrompt => "Search by token name, symbol or address",
        Msg::Searching => "Searching...",
        Msg::ValidationRequired => "Please enter a search term",
        Msg::ValidationMinLength => "Search term must be at least 2 characters",
        Msg::EmptyInitialTitle => "Start searching",
        Msg::EmptyInitialDescription => "Enter a token name, symbol or pair address to find trading pairs",
        Msg::NoResultsTitle => "No results found",
        Msg::NoResultsDescription => "Try a different search term",
        Msg::ErrorTitle => "Something went wrong",
        Msg::ErrorDefault => "An unexpected error occurred while fetching pairs",
        Msg::ErrorRetry => "Type r to retry",
        Msg::Price => "Price",
        Msg::PriceChange => "24h change",
        Msg::Volume24h => "24h volume",
        Msg::Liquidity => "Liquidity",
        Msg::MarketCap => "Market cap",
        Msg::ViewOn => "View on DexScreener",
        Msg::First => "First page",
        Msg::Previous => "Previous page",
        Msg::Next => "Next page",
        Msg::Last => "Last page",
        Msg::ThemeLight => "Light mode",
        Msg::ThemeDark => "Dark mode",
        Msg::ThemeToggled => "Theme switched to",
        Msg::LanguageSelected => "Language",
        Msg::Help => "Commands: <text> search | n next | p previous | f first | l last | <number> go to page | r retry | /theme | /lang en|fr | q quit",
        Msg::UnknownCommand => "Unknown command",
    }
}

fn fr(msg: Msg) -> &'static str {
    match msg {
        Msg::AppTitle => "Recherche de paires DexScreener",
        Msg::AppDescription => "Recherchez des paires sur toutes les chaînes et DEX suivis par DexScreener",
        Msg::SearchPrompt => "Rechercher par nom, symbole ou adresse de token",
        Msg::Searching => "Recherche en cours...",
        Msg::ValidationRequired => "Veuillez saisir un terme de recherche",
        Msg::ValidationMinLength => "Le terme de recherche doit contenir au moins 2 caractères",
        Msg::EmptyInitialTitle => "Commencez votre recherche",
        Msg::EmptyInitialDescription => "Saisissez un nom, un symbole ou une adresse de paire pour trouver des paires",
        Msg::NoResultsTitle => "Aucun résultat",
        Msg::NoResultsDescription => "Essayez un autre terme de recherche",
        Msg::ErrorTitle => "Une erreur est survenue",
        Msg::ErrorDefault => "Une erreur inattendue est survenue lors de la récupération des paires",
        Msg::ErrorRetry => "Tapez r pour réessayer",
        Msg::Price => "Prix",
        Msg::PriceChange => "Variation 24h",
        Msg::Volume24h => "Volume 24h",
        Msg::Liquidity => "Liquidité",
        Msg::MarketCap => "Capitalisation",
        Msg::ViewOn => "Voir sur DexScreener",
        Msg::First => "Première page",
        Msg::Previous => "Page précédente",
        Msg::Next => "Page suivante",
        Msg::Last => "Dernière page",
        Msg::ThemeLight => "Mode clair",
        Msg::ThemeDark => "Mode sombre",
        Msg::ThemeToggled => "Thème changé en",
        Msg::LanguageSelected => "Langue",
        Msg::Help => "Commandes : <texte> rechercher | n suivante | p précédente | f première | l dernière | <numéro> aller à la page | r réessayer | /theme | /lang en|fr | q quitter",
        Msg::UnknownCommand => "Commande inconnue",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" FR ".parse::<Locale>().unwrap(), Locale::Fr);
        assert!("de".parse::<Locale>().is_err());
        assert_eq!(Locale::Fr.to_string(), "fr");
    }

    #[test]
    fn test_switching_locale_changes_strings() {
        assert_eq!(t(Locale::En, Msg::NoResultsTitle), "No results found");
        assert_eq!(t(Locale::Fr, Msg::NoResultsTitle), "Aucun résultat");
        assert_eq!(showing(Locale::En, 1, 10, 50), "Showing 1 to 10 of 50 results");
        assert_eq!(showing(Locale::Fr, 11, 20, 50), "Affichage de 11 à 20 sur 50 résultats");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(validation_message(Locale::En, &ValidationError::Required), "Please enter a search term");
        assert_eq!(
            validation_message(Locale::Fr, &ValidationError::TooShort { min: 2 }),
            "Le terme de recherche doit contenir au moins 2 caractères"
        );
    }
}
