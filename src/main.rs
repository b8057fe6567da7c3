use anyhow::{Result, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{info, debug};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use dex_pair_search::config::{self, Config};
use dex_pair_search::coordinator::{CoordinatorConfig, FetchOutcome, SearchCoordinator};
use dex_pair_search::dexscreener::DexScreenerClient;
use dex_pair_search::store::SearchStore;
use dex_pair_search::ui::i18n::{t, validation_message};
use dex_pair_search::ui::{
    render_page, validate_query, Locale, Msg, Palette, RenderContext, Theme, ThemeStore, ViewStatus,
};

#[derive(Parser)]
#[command(name = "dex-pair-search", version, about = "Search DexScreener trading pairs")]
struct Cli {
    /// Display language (en or fr)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one search and print a page of results
    Search {
        /// Token name, symbol, pair or token address
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Page to display
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Interactive search prompt with pagination commands
    Interactive,
    /// Show or toggle the saved color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

/// Presentation state around the shared store
struct App {
    coordinator: SearchCoordinator,
    store: Arc<SearchStore>,
    themes: ThemeStore,
    theme: Theme,
    locale: Locale,
    no_color: bool,
    status: ViewStatus,
    has_searched: bool,
}

impl App {
    fn new(config: &Config, locale: Locale, no_color: bool) -> Result<Self> {
        let timeout = config.request_timeout_seconds.map(Duration::from_secs);
        let client = DexScreenerClient::with_base_url(&config.api_url, timeout)
            .context("Failed to create DexScreener client")?;
        let store = Arc::new(SearchStore::new(config.page_size));
        let coordinator = SearchCoordinator::new(Arc::new(client), store.clone(), CoordinatorConfig::from(config));
        let themes = ThemeStore::new(&config.theme_file);
        let theme = themes.load();
        debug!("Using theme {} and locale {}", theme, locale);

        Ok(Self {
            coordinator,
            store,
            themes,
            theme,
            locale,
            no_color,
            status: ViewStatus::Idle,
            has_searched: false,
        })
    }

    fn ctx(&self) -> RenderContext {
        let palette = if self.no_color { Palette::plain() } else { Palette::for_theme(self.theme) };
        RenderContext::new(self.locale, palette)
    }

    fn render(&self) -> String {
        render_page(&self.store.snapshot(), &self.status, self.has_searched, &self.ctx())
    }

    /// Validate and run a search. Returns false when the query was rejected.
    async fn submit(&mut self, input: &str) -> bool {
        let query = match validate_query(input) {
            Ok(query) => query.to_string(),
            Err(e) => {
                println!("{}", validation_message(self.locale, &e));
                return false;
            }
        };
        self.store.set_search_query(query.clone());
        self.has_searched = true;
        self.show_loading();
        let result = self.coordinator.search(&query).await;
        self.finish(&query, result);
        true
    }

    /// Re-issue the current query, bypassing the cache
    async fn retry(&mut self) {
        let query = self.store.search_query();
        if query.is_empty() {
            return;
        }
        self.show_loading();
        let result = self.coordinator.refetch(&query).await;
        self.finish(&query, result);
    }

    fn show_loading(&mut self) {
        self.status = ViewStatus::Loading;
        print!("{}", self.render());
    }

    fn finish(&mut self, query: &str, result: Result<FetchOutcome, Arc<dex_pair_search::SearchError>>) {
        self.status = match result {
            Ok(outcome) => {
                info!("Search {:?}: {:?}", query, outcome);
                ViewStatus::Ready
            }
            Err(e) => {
                info!("Search {:?} failed: {}", query, e);
                ViewStatus::Failed(e.to_string())
            }
        };
    }

    fn toggle_theme(&mut self) -> Result<()> {
        self.theme = self.theme.toggled();
        self.themes.save(self.theme)?;
        let label = match self.theme {
            Theme::Light => t(self.locale, Msg::ThemeLight),
            Theme::Dark => t(self.locale, Msg::ThemeDark),
        };
        println!("{} {}", t(self.locale, Msg::ThemeToggled), label);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables
    dotenv().ok();

    // Initialize logging
    init_logger();

    let cli = Cli::parse();

    // Load configuration
    let mut config = config::load_config()?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    debug!("Configuration loaded: {:?}", config);

    match cli.command {
        Command::Search { query, page } => run_search(&config, cli.no_color, &query.join(" "), page).await,
        Command::Interactive => run_interactive(&config, cli.no_color).await,
        Command::Theme { action } => run_theme(&config, action),
    }
}

async fn run_search(config: &Config, no_color: bool, query: &str, page: usize) -> Result<()> {
    let mut app = App::new(config, config.locale, no_color)?;

    if !app.submit(query).await {
        anyhow::bail!("Invalid search query");
    }
    app.store.go_to_page(page);
    print!("{}", app.render());

    if let ViewStatus::Failed(message) = &app.status {
        anyhow::bail!("{}", message);
    }
    Ok(())
}

async fn run_interactive(config: &Config, no_color: bool) -> Result<()> {
    let mut app = App::new(config, config.locale, no_color)?;
    let mut revisions = app.store.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Starting interactive search");
    print!("{}", app.render());
    println!("{}", t(app.locale, Msg::Help));

    loop {
        println!("{} >", t(app.locale, Msg::SearchPrompt));
        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };
        let input = line.trim();

        // Layout changes (theme, language) re-render even when the store is untouched
        let mut rerender = false;
        match input {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "?" | "/help" => println!("{}", t(app.locale, Msg::Help)),
            "n" => app.store.next_page(),
            "p" => app.store.previous_page(),
            "f" => app.store.go_to_first_page(),
            "l" => app.store.go_to_last_page(),
            "r" => {
                app.retry().await;
                rerender = true;
            }
            "/theme" => {
                app.toggle_theme()?;
                rerender = true;
            }
            _ if input.starts_with("/lang") => {
                let code = input.trim_start_matches("/lang").trim();
                match code.parse::<Locale>() {
                    Ok(locale) => {
                        app.locale = locale;
                        println!("{}: {}", t(locale, Msg::LanguageSelected), locale.label());
                        rerender = true;
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ if input.starts_with("/search") => {
                let query = input.trim_start_matches("/search");
                rerender = app.submit(query).await;
            }
            _ if input.starts_with('/') => {
                println!("{}: {}", t(app.locale, Msg::UnknownCommand), input);
            }
            _ => match input.parse::<usize>() {
                Ok(page) => app.store.go_to_page(page),
                Err(_) => rerender = app.submit(input).await,
            },
        }

        let changed = revisions.has_changed().unwrap_or(false);
        if changed {
            let _ = revisions.borrow_and_update();
        }
        if changed || rerender {
            print!("{}", app.render());
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn run_theme(config: &Config, action: Option<ThemeAction>) -> Result<()> {
    let themes = ThemeStore::new(&config.theme_file);
    match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => println!("{}", themes.load()),
        ThemeAction::Toggle => {
            let theme = themes.toggle()?;
            info!("Theme saved to {:?}", themes.path());
            println!("{}", theme);
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config(dir: &std::path::Path) -> Config {
        Config {
            api_url: "http://127.0.0.1:1".to_string(),
            fetch_retries: 0,
            request_timeout_seconds: Some(2),
            theme_file: dir.join("theme"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_search_goes_through_loading_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&offline_config(dir.path()), Locale::En, true).unwrap();

        app.show_loading();
        assert_eq!(app.status, ViewStatus::Loading);
        assert!(app.render().contains("Searching..."));

        assert!(app.submit("SOL").await);
        assert!(matches!(app.status, ViewStatus::Failed(_)));
        assert!(!app.render().contains("Searching..."));
    }

    #[tokio::test]
    async fn test_rejected_query_keeps_idle_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&offline_config(dir.path()), Locale::En, true).unwrap();

        assert!(!app.submit(" a ").await);
        assert_eq!(app.status, ViewStatus::Idle);
    }
}
