//! Named callbacks and attribute-driven partial loading
//!
//! A trigger element carries its whole configuration in attributes:
//!
//! ```html
//! <a data-loadpartial data-url="/Orders/Edit" data-params="id=10"
//!    data-targetid="editor" data-success="app.editorLoaded"></a>
//! ```
//!
//! Callback names are resolved through a [`CallbackRegistry`] the caller
//! fills in up front.

use std::collections::HashMap;
use std::fmt;

use refkit_dom::{Document, DomMutator, ElementLookup, NodeId};
use refkit_html::HtmlParser;

use crate::config::Options;
use crate::request::Request;
use crate::strings::is_valid_value;
use crate::{Error, Result};

/// A registered callback
pub type Callback = Box<dyn Fn(&mut Document)>;

/// Callbacks addressable by name (`editorLoaded`, `app.editorLoaded`)
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<String, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a callback
    pub fn register<F>(&mut self, name: &str, callback: F)
    where
        F: Fn(&mut Document) + 'static,
    {
        self.callbacks.insert(name.to_string(), Box::new(callback));
    }

    pub fn get(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run a callback by name; returns whether one ran
    pub fn invoke(&self, name: &str, doc: &mut Document) -> bool {
        match self.callbacks.get(name) {
            Some(callback) => {
                tracing::debug!(callback = name, "invoking callback");
                callback(doc);
                true
            }
            None => {
                tracing::warn!(callback = name, "no callback registered under this name");
                false
            }
        }
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CallbackRegistry").field("callbacks", &names).finish()
    }
}

/// Partial-load configuration read from a trigger element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialLoad {
    pub url: String,
    pub target_id: String,
    /// Raw query string appended to the URL
    pub params: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl PartialLoad {
    /// Whether the element opts into partial loading
    pub fn is_trigger(doc: &Document, element: NodeId) -> bool {
        doc.has_attribute(element, "data-loadpartial")
    }

    /// Read `data-url`, `data-targetid`, `data-params`, `data-success` and `data-error`
    pub fn from_element(doc: &Document, element: NodeId) -> Result<Self> {
        let required = |attribute: &'static str| {
            doc.get_attribute(element, attribute)
                .map(str::to_string)
                .ok_or_else(|| Error::MissingAttribute {
                    element: element.to_string(),
                    attribute,
                })
        };
        let optional = |attribute: &str| {
            doc.get_attribute(element, attribute)
                .filter(|v| is_valid_value(Some(*v)))
                .map(str::to_string)
        };

        Ok(Self {
            url: required("data-url")?,
            target_id: required("data-targetid")?,
            params: doc.get_attribute(element, "data-params").map(str::to_string),
            success: optional("data-success"),
            error: optional("data-error"),
        })
    }

    /// URL with `data-params` appended verbatim
    pub fn full_url(&self) -> String {
        match &self.params {
            Some(params) => format!("{}?{params}", self.url),
            None => self.url.clone(),
        }
    }

    /// The GET that fetches the partial
    pub fn request(&self, options: &Options) -> Request {
        Request::get::<&str, &str>(&self.full_url(), &[], None, options)
    }

    /// Apply the outcome of the fetch
    ///
    /// On success the markup replaces the target's children and the success
    /// callback runs. A transport failure, or a target that no longer
    /// exists, runs the error callback instead; the missing target is also
    /// returned as an error.
    pub fn complete(
        &self,
        doc: &mut Document,
        result: std::result::Result<&str, Error>,
        registry: &CallbackRegistry,
    ) -> Result<()> {
        let html = match result {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(url = %self.full_url(), %err, "partial load failed");
                self.run(self.error.as_deref(), doc, registry);
                return Ok(());
            }
        };

        let target_id = self.target_id.strip_prefix('#').unwrap_or(&self.target_id);
        let Some(target) = doc.get_element_by_id(target_id) else {
            self.run(self.error.as_deref(), doc, registry);
            return Err(Error::NotFound(format!("#{target_id}")));
        };

        doc.remove_children(target)?;
        HtmlParser::new().parse_fragment_into(doc, target, html)?;
        tracing::debug!(target = target_id, "partial loaded");

        self.run(self.success.as_deref(), doc, registry);
        Ok(())
    }

    fn run(&self, name: Option<&str>, doc: &mut Document, registry: &CallbackRegistry) {
        if let Some(name) = name {
            registry.invoke(name, doc);
        }
    }
}
