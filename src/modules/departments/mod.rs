pub mod model;
pub mod service;

pub use model::{DepartmentHierarchy, DetailState, TabCounts};
pub use service::{DepartmentDetail, DepartmentService};
