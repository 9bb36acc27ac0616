use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum IngestError {
    UnsupportedFormat(String),
    Csv(csv::Error),
    Spreadsheet(calamine::Error),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::UnsupportedFormat(kind) => write!(f, "unsupported file format: {kind}"),
            IngestError::Csv(e) => write!(f, "failed to parse CSV: {e}"),
            IngestError::Spreadsheet(e) => write!(f, "failed to parse workbook: {e}"),
        }
    }
}

impl Error for IngestError {}

impl From<csv::Error> for IngestError {
    fn from(value: csv::Error) -> Self {
        IngestError::Csv(value)
    }
}

impl From<calamine::Error> for IngestError {
    fn from(value: calamine::Error) -> Self {
        IngestError::Spreadsheet(value)
    }
}
