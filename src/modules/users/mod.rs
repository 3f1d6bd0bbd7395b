pub mod search;
pub mod service;

pub use search::{SearchDebouncer, filter_users};
pub use service::UserDirectory;
