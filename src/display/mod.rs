//! Display formatting for terminal output

pub mod cases;
pub mod steps;
pub mod validation;

pub use cases::format_case_list;
pub use steps::format_step_list;
pub use validation::{format_finalization_error, format_step_errors};
