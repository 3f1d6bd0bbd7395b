pub mod bulk;
pub mod selection;

pub use bulk::{BulkActionReport, run_on_selection};
pub use selection::Selection;
