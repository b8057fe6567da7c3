mod paginator;

pub use paginator::PageLink;
pub use paginator::PageRange;
pub use paginator::Paginator;
pub use paginator::DEFAULT_PAGE_SIZE;
pub use paginator::MAX_VISIBLE_PAGES;
