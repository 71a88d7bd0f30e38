use thiserror::Error;

/// Failures from a catalog source. The client logs these and degrades to
/// "no data"; they never reach the selection state.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Network(String),
    #[error("catalog responded with HTTP {status}")]
    Status { status: u16 },
    #[error("catalog response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog record {id} has an invalid {field}")]
    InvalidRecord { id: String, field: &'static str },
}

/// Custom-planet form rejection. Carries every offending field so the UI
/// can name them all at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("please fill in all required fields: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("please enter numbers for: {}", .0.join(", "))]
    NotNumeric(Vec<&'static str>),
    #[error("please enter positive numbers for: {}", .0.join(", "))]
    NotPositive(Vec<&'static str>),
}
