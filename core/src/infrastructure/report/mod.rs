pub mod pdf;

pub use pdf::{REPORT_FILE_NAME, RenderedReport, render_report_pdf};
