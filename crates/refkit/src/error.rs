//! Error types

use refkit_dom::DomError;
use refkit_html::ParseError;

/// Result type for refkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// refkit errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A form, target or source element could not be resolved
    #[error("element not found: {0}")]
    NotFound(String),

    #[error("invalid selector: {0:?}")]
    InvalidSelector(String),

    #[error(transparent)]
    Dom(DomError),

    #[error("failed to parse markup: {0}")]
    Html(#[from] ParseError),

    /// Select-list helpers called on something other than a `<select>`
    #[error("element {0} is not a select list")]
    NotASelectList(String),

    #[error("unknown insert position {0:?}")]
    UnknownPosition(String),

    #[error("element {element} has no {attribute} attribute")]
    MissingAttribute { element: String, attribute: &'static str },

    /// Response status outside 200-299
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },
}

impl From<DomError> for Error {
    fn from(err: DomError) -> Self {
        match err {
            DomError::InvalidSelector(selector) => Error::InvalidSelector(selector),
            other => Error::Dom(other),
        }
    }
}
