use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesInsightsError {
    #[error("Sales dataset is empty or missing. Check the dataset path and file contents.")]
    DatasetUnavailable,

    #[error("No records found for rep_id='{identifier}'")]
    IdentifierNotFound { identifier: String },

    #[error("Representative identifier must not be blank")]
    EmptyIdentifier,

    #[error("No 'dated' column found. Cannot compute trends.")]
    MissingDateColumn,

    #[error("Insight generation failed: {0}")]
    Collaborator(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SalesInsightsError>;
