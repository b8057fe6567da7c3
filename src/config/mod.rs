mod types;

pub use types::Config;
pub use types::load_config;
pub use types::load_config_from;
pub use types::DEFAULT_API_URL;
pub use types::DEFAULT_PAGE_SIZE;
