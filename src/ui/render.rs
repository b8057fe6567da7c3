use std::fmt::Write;

use crate::models::PairToken;
use crate::pagination::{PageLink, Paginator, MAX_VISIBLE_PAGES};
use crate::store::SearchState;
use crate::ui::i18n::{showing, t, Locale, Msg};
use crate::ui::theme::Palette;
use crate::utils::{format_address, format_compact, format_percentage};

/// Language and colors used for one render pass
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub locale: Locale,
    pub palette: Palette,
}

impl RenderContext {
    pub fn new(locale: Locale, palette: Palette) -> Self {
        Self { locale, palette }
    }

    fn t(&self, msg: Msg) -> &'static str {
        t(self.locale, msg)
    }
}

/// Request status of the page, held by the caller alongside the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    /// Fetch failed; carries the error message
    Failed(String),
}

/// Whole search page for the current state
pub fn render_page(state: &SearchState, status: &ViewStatus, has_searched: bool, ctx: &RenderContext) -> String {
    let mut out = render_header(ctx);
    out.push('\n');

    match status {
        ViewStatus::Loading => out.push_str(&render_loading(ctx)),
        ViewStatus::Failed(message) => out.push_str(&render_error(message, ctx)),
        ViewStatus::Idle | ViewStatus::Ready => {
            let items = state.paginator.current_page_items();
            if items.is_empty() {
                out.push_str(&render_empty(has_searched, ctx));
            } else {
                for pair in items {
                    out.push_str(&render_pair_card(pair, ctx));
                    out.push('\n');
                }
                out.push_str(&render_pagination(&state.paginator, ctx));
            }
        }
    }
    out
}

pub fn render_header(ctx: &RenderContext) -> String {
    let p = &ctx.palette;
    format!(
        "{}{}{}\n{}{}{}\n",
        p.heading,
        ctx.t(Msg::AppTitle),
        p.reset,
        p.muted,
        ctx.t(Msg::AppDescription),
        p.reset
    )
}

pub fn render_loading(ctx: &RenderContext) -> String {
    format!("{}{}{}\n", ctx.palette.muted, ctx.t(Msg::Searching), ctx.palette.reset)
}

/// Initial prompt before any search, "no results" afterwards
pub fn render_empty(has_searched: bool, ctx: &RenderContext) -> String {
    let (title, description) = if has_searched {
        (Msg::NoResultsTitle, Msg::NoResultsDescription)
    } else {
        (Msg::EmptyInitialTitle, Msg::EmptyInitialDescription)
    };
    let p = &ctx.palette;
    format!(
        "{}{}{}\n{}{}{}\n",
        p.heading,
        ctx.t(title),
        p.reset,
        p.muted,
        ctx.t(description),
        p.reset
    )
}

pub fn render_error(message: &str, ctx: &RenderContext) -> String {
    let p = &ctx.palette;
    let message = if message.trim().is_empty() { ctx.t(Msg::ErrorDefault) } else { message };
    format!(
        "{}{}{}\n{}\n{}{}{}\n",
        p.negative,
        ctx.t(Msg::ErrorTitle),
        p.reset,
        message,
        p.muted,
        ctx.t(Msg::ErrorRetry),
        p.reset
    )
}

pub fn render_pair_card(pair: &PairToken, ctx: &RenderContext) -> String {
    let p = &ctx.palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}{}{} [{}] {}{}{}",
        p.heading,
        pair.pair_name(),
        p.reset,
        pair.chain_id(),
        p.muted,
        pair.dex_id(),
        p.reset
    );
    let _ = writeln!(out, "  {:<14} {}", ctx.t(Msg::Price), pair.formatted_price_usd());

    let (color, arrow) = if pair.is_price_increasing() {
        (p.positive, "▲")
    } else {
        (p.negative, "▼")
    };
    let _ = writeln!(
        out,
        "  {:<14} {}{} {}{}",
        ctx.t(Msg::PriceChange),
        color,
        arrow,
        format_percentage(pair.price_change_24h()),
        p.reset
    );
    let _ = writeln!(out, "  {:<14} ${}", ctx.t(Msg::Volume24h), format_compact(pair.volume_24h()));
    let _ = writeln!(out, "  {:<14} {}", ctx.t(Msg::Liquidity), pair.formatted_liquidity());
    if let Some(market_cap) = pair.market_cap().filter(|m| *m != 0.0) {
        let _ = writeln!(out, "  {:<14} ${}", ctx.t(Msg::MarketCap), format_compact(market_cap));
    }
    if !pair.labels().is_empty() {
        let _ = writeln!(out, "  {}{}{}", p.accent, pair.labels().join(" · "), p.reset);
    }
    let _ = writeln!(
        out,
        "  {}{}: {}{} ({})",
        p.muted,
        ctx.t(Msg::ViewOn),
        pair.url(),
        p.reset,
        format_address(pair.pair_address())
    );
    out
}

/// "Showing x to y of z" line plus the page selector; empty when there are no pages
pub fn render_pagination<T>(paginator: &Paginator<T>, ctx: &RenderContext) -> String {
    if paginator.total_pages() == 0 {
        return String::new();
    }
    let p = &ctx.palette;
    let range = paginator.page_range();
    let mut out = format!(
        "{}{}{}\n",
        p.muted,
        showing(ctx.locale, range.start, range.end, paginator.total_items()),
        p.reset
    );

    let control = |enabled: bool, symbol: &str| {
        if enabled {
            symbol.to_string()
        } else {
            format!("{}{}{}", p.muted, symbol, p.reset)
        }
    };

    let mut parts = vec![
        control(paginator.has_previous_page(), "«"),
        control(paginator.has_previous_page(), "‹"),
    ];
    for link in paginator.page_numbers(MAX_VISIBLE_PAGES) {
        parts.push(match link {
            PageLink::Page(page) if page == paginator.current_page() => {
                format!("{}[{}]{}", p.accent, page, p.reset)
            }
            PageLink::Page(page) => page.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        });
    }
    parts.push(control(paginator.has_next_page(), "›"));
    parts.push(control(paginator.has_next_page(), "»"));

    out.push_str(&parts.join(" "));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_record;
    use crate::store::SearchStore;
    use std::collections::BTreeMap;

    fn plain(locale: Locale) -> RenderContext {
        RenderContext::new(locale, Palette::plain())
    }

    fn token(address: &str) -> PairToken {
        let mut record = test_record(address);
        record.price_usd = Some("150.50".to_string());
        record.price_change = Some(BTreeMap::from([("h24".to_string(), -3.5)]));
        record.volume = Some(BTreeMap::from([("h24".to_string(), 1_000_000.0)]));
        record.labels = Some(vec!["v3".to_string(), "trending".to_string()]);
        PairToken::from_record(record)
    }

    #[test]
    fn test_pair_card_contents() {
        let card = render_pair_card(&token("abc"), &plain(Locale::En));
        assert!(card.contains("SOL/USDC [solana] raydium"));
        assert!(card.contains("$150.50"));
        assert!(card.contains("▼ -3.50%"));
        assert!(card.contains("$1.00M"));
        assert!(card.contains("N/A"));
        assert!(card.contains("v3 · trending"));
        assert!(card.contains("https://dexscreener.com/solana/abc"));
        assert!(!card.contains("Market cap"));
    }

    #[test]
    fn test_pagination_bar() {
        let mut paginator = Paginator::new((1..=50).collect::<Vec<_>>(), 10);
        let bar = render_pagination(&paginator, &plain(Locale::En));
        assert!(bar.starts_with("Showing 1 to 10 of 50 results"));
        assert!(bar.contains("« ‹ [1] 2 3 4 5 › »"));

        paginator.update_items((1..=100).collect());
        paginator.go_to_page(5);
        let bar = render_pagination(&paginator, &plain(Locale::Fr));
        assert!(bar.starts_with("Affichage de 41 à 50 sur 100 résultats"));
        assert!(bar.contains("1 ... 4 [5] 6 ... 10"));
    }

    #[test]
    fn test_pagination_hidden_without_pages() {
        let paginator: Paginator<u8> = Paginator::new(Vec::new(), 10);
        assert_eq!(render_pagination(&paginator, &plain(Locale::En)), "");
    }

    #[test]
    fn test_page_states() {
        let store = SearchStore::default();
        let ctx = plain(Locale::En);

        let page = render_page(&store.snapshot(), &ViewStatus::Idle, false, &ctx);
        assert!(page.contains("Start searching"));

        let page = render_page(&store.snapshot(), &ViewStatus::Ready, true, &ctx);
        assert!(page.contains("No results found"));

        let page = render_page(&store.snapshot(), &ViewStatus::Loading, true, &ctx);
        assert!(page.contains("Searching..."));

        let page = render_page(
            &store.snapshot(),
            &ViewStatus::Failed("Failed to fetch pairs: Bad Gateway".to_string()),
            true,
            &ctx,
        );
        assert!(page.contains("Something went wrong"));
        assert!(page.contains("Bad Gateway"));

        store.set_pairs((0..13).map(|i| token(&format!("pair{}", i))).collect());
        let page = render_page(&store.snapshot(), &ViewStatus::Ready, true, &ctx);
        assert_eq!(page.matches("SOL/USDC").count(), 12);
        assert!(page.contains("Showing 1 to 12 of 13 results"));
    }

    #[test]
    fn test_error_falls_back_to_default_message() {
        let out = render_error("", &plain(Locale::Fr));
        assert!(out.contains("Une erreur inattendue"));
    }
}
