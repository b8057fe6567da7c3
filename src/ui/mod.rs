pub mod i18n;
pub mod render;
pub mod theme;
mod validation;

pub use i18n::{Locale, Msg};
pub use render::{render_page, RenderContext, ViewStatus};
pub use theme::{Palette, Theme, ThemeStore};
pub use validation::{validate_query, MIN_QUERY_LENGTH};
