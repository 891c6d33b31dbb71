//! Presentation boundary: localized text and reports.

pub mod locale;
pub mod report;

pub use locale::Locale;
pub use report::{format_price, render_text_report};
