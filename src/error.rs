use thiserror::Error;

pub type RateBookResult<T> = Result<T, RateBookError>;

#[derive(Error, Debug)]
pub enum RateBookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No backend workbook found: {0}")]
    BackendNotFound(String),

    #[error("Backend workbook is missing required sheet '{0}'")]
    MissingSheet(String),

    #[error("Workbook read error: {0}")]
    Workbook(String),

    #[error("Backend manifest error: {0}")]
    Manifest(String),

    #[error("Workbook write error: {0}")]
    Export(String),
}
