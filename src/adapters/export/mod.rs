//! Export adapters. Render admin data as CSV, JSON and Markdown.

pub mod csv_export;
pub mod report;

pub use csv_export::{matrix_to_csv, windows_to_json};
pub use report::windows_report;
