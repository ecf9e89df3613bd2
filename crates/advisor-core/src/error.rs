/// Error taxonomy shared across the advisor crates.
///
/// Every failure in the pipeline (document in, structured critique out)
/// maps onto exactly one of these variants, and each one renders as a
/// single human-readable message for the UI layer. None of them are
/// retried automatically; each is scoped to one user action.

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Bad or missing input (empty proposal text, wrong file type).
    #[error("validation error: {0}")]
    Validation(String),

    /// Required model credentials are absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The model call failed, or its response did not match the schema.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Transport failure between the client and our own backend.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// No extractable text in the source document.
    #[error("extraction error: {0}")]
    Extraction(String),
}
