pub mod service;

pub use service::GroupDirectory;
