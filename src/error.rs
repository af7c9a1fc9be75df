use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Year {0} is outside the supported calendar range")]
    YearError(i32),
    #[error("Failed to read font manifest: {0}")]
    ManifestError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
