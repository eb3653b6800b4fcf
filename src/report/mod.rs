pub mod console;
pub mod error;
pub mod report_model;
