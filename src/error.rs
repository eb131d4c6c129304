use thiserror::Error;

pub type Result<T> = std::result::Result<T, BillsError>;

/// Everything that can abort a run. The job is fail-fast: no variant is
/// recovered from, the next scheduled invocation simply tries again.
#[derive(Debug, Error)]
pub enum BillsError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("login against the billing portal failed during {stage}")]
    Authentication {
        stage: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("page structure changed, {0}")]
    PageStructure(String),

    #[error("balance text {text:?} is not a decimal amount: {reason}")]
    Parse { text: String, reason: String },

    #[error("could not deliver notification mail")]
    Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BillsError {
    /// A missing element in the portal's markup, named by the selector or
    /// id marker that failed to match.
    pub fn structure(context: impl Into<String>) -> Self {
        BillsError::PageStructure(context.into())
    }

    /// A network or HTTP-status failure in the login flow, named by the
    /// request or body read that failed (both requests hit the same URL,
    /// so the source error alone cannot tell them apart).
    pub fn authentication(stage: &'static str, source: reqwest::Error) -> Self {
        BillsError::Authentication { stage, source }
    }
}
