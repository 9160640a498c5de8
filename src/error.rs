use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimsheetError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Workbook write error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ClaimsheetError>;
