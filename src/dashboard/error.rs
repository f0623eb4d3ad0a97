use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize dashboard")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to convert DataFrame for display")]
    DataFrame(#[from] PolarsError),

    #[error("Failed to write dashboard markup")]
    Format(#[from] std::fmt::Error),
}
