pub mod chapter_files;
pub mod report;

pub use chapter_files::TextFileSink;
pub use report::ReportWriter;
