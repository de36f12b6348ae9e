//! refkit HTML Parser
//!
//! HTML5 parsing built on html5ever, converting into refkit-dom documents.

mod parser;

pub use parser::HtmlParser;
pub use refkit_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Dom(#[from] refkit_dom::DomError),
}
