pub mod service;

pub use service::AlertInbox;
