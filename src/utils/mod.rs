mod convert;
mod format;

pub use convert::millis_to_datetime;
pub use convert::millis_to_duration;
pub use format::format_address;
pub use format::format_compact;
pub use format::format_percentage;
pub use format::group_thousands;
