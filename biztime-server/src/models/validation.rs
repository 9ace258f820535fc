//! Request input errors, all reported as 400

/// Input rejected before it reaches the database
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("a company needs a name or a code")]
    MissingName,

    #[error("company code '{0}' must be 1-64 lowercase letters, digits, '-' or '_', starting with a letter or digit")]
    InvalidCode(String),

    /// Nothing alphanumeric is left after transliteration
    #[error("no company code can be derived from name '{0}'")]
    UnsluggableName(String),

    #[error("invoice id '{0}' is not an integer")]
    InvalidInvoiceId(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}
