//! refkit
//!
//! Everyday page helpers over a [`refkit_dom::Document`]: selection,
//! declarative form validation, show/hide, string formatting, select
//! lists, request descriptions and attribute-driven partial loading.
//!
//! # Example
//! ```rust,ignore
//! use refkit::RefKit;
//!
//! let mut kit = RefKit::from_html(html)?;
//! let outcome = kit.validate_form("signup", None)?;
//! if outcome.is_valid() {
//!     let request = kit.submit_form_request("signup", None)?;
//! }
//! ```

mod config;
mod error;
mod kit;

pub mod display;
pub mod request;
pub mod select_list;
pub mod strings;
pub mod unobtrusive;
pub mod validation;

pub use config::{FetchCache, FetchMode, Options, ValidationOptions};
pub use error::{Error, Result};
pub use kit::RefKit;
pub use request::{FormData, Method, Request, RequestOptions};
pub use unobtrusive::{CallbackRegistry, PartialLoad};
pub use validation::{FormValidator, ValidationOutcome, ValidationRule};

// Re-export sub-crates for advanced usage
pub use refkit_dom as dom;
pub use refkit_html as html;
