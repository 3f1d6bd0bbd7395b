pub mod alerts;
pub mod departments;
pub mod groups;
pub mod users;
