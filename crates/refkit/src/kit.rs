//! The `RefKit` facade: one document, its options and its callbacks

use refkit_dom::{Document, ElementLookup, NodeId};

use crate::config::Options;
use crate::display::{self, InsertPosition};
use crate::request::{Request, RequestOptions};
use crate::unobtrusive::{CallbackRegistry, PartialLoad};
use crate::validation::{FormValidator, ValidationOutcome};
use crate::{Error, Result};

/// Document helpers bound to one document
#[derive(Debug)]
pub struct RefKit {
    document: Document,
    options: Options,
    callbacks: CallbackRegistry,
}

impl RefKit {
    pub fn new(document: Document) -> Self {
        Self::with_options(document, Options::default())
    }

    pub fn with_options(document: Document, options: Options) -> Self {
        Self {
            document,
            options,
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Parse markup into a new document
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self::new(refkit_html::parse(html)?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut CallbackRegistry {
        &mut self.callbacks
    }

    // ---- selection ----

    /// Resolve a query the cheapest way its shape allows
    ///
    /// `#id` goes through the id lookup, `.class` through the class lookup
    /// and a bare word through the tag lookup. Anything with a space, `=`,
    /// `[`, `,`, `>` or an `#id.class` shape is a full selector.
    pub fn find(&self, query: &str) -> Result<Vec<NodeId>> {
        let doc = &self.document;
        let by_id = query.starts_with('#');
        let complex = query.contains([' ', '=', '[', ',', '>']) || (by_id && query.contains('.'));

        let found = if complex {
            doc.query_selector_all(doc.root(), query)?
        } else if let Some(id) = query.strip_prefix('#') {
            doc.get_element_by_id(id).into_iter().collect()
        } else if let Some(class) = query.strip_prefix('.') {
            doc.get_elements_by_class_name(doc.root(), class)
        } else {
            doc.get_elements_by_tag_name(doc.root(), query)
        };
        Ok(found)
    }

    /// Element by id; a leading `#` is ignored
    pub fn id(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id.strip_prefix('#').unwrap_or(id))
    }

    /// First match of [`find`](Self::find), or `NotFound`
    pub fn find_one(&self, query: &str) -> Result<NodeId> {
        self.find(query)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(query.to_string()))
    }

    /// Descendants of the first match of `query` that match `selector`
    pub fn find_children(&self, query: &str, selector: &str) -> Result<Vec<NodeId>> {
        let parent = self.find_one(query)?;
        Ok(self.document.query_selector_all(parent, selector)?)
    }

    /// Nearest ancestor of `element` matching `selector`
    pub fn find_parent(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>> {
        display::find_parent(&self.document, element, selector)
    }

    // ---- validation ----

    /// Run the `data-val-*` rules of a form
    pub fn validate_form(&mut self, form_id: &str, mark_invalid: Option<bool>) -> Result<ValidationOutcome> {
        FormValidator::new(self.options.validation.clone()).validate(&mut self.document, form_id, mark_invalid)
    }

    // ---- requests ----

    pub fn get_request<K: AsRef<str>, V: AsRef<str>>(
        &self,
        url: &str,
        params: &[(K, V)],
        options: Option<RequestOptions>,
    ) -> Request {
        Request::get(url, params, options, &self.options)
    }

    pub fn get_json_request<K: AsRef<str>, V: AsRef<str>>(
        &self,
        url: &str,
        params: &[(K, V)],
        options: Option<RequestOptions>,
    ) -> Request {
        Request::get_json(url, params, options, &self.options)
    }

    /// POST of a form's controls to its `action`
    pub fn submit_form_request(&self, form_id: &str, options: Option<RequestOptions>) -> Result<Request> {
        Request::submit_form(&self.document, form_id, options, &self.options)
    }

    // ---- display ----

    pub fn show(&mut self, query: &str, is_show: bool) -> Result<()> {
        for target in self.find(query)? {
            display::show(&mut self.document, target, is_show)?;
        }
        Ok(())
    }

    /// Flip visibility of every match, each on its own state
    pub fn toggle(&mut self, query: &str) -> Result<()> {
        for target in self.find(query)? {
            display::toggle(&mut self.document, target)?;
        }
        Ok(())
    }

    pub fn is_hidden(&self, query: &str) -> Result<bool> {
        Ok(display::is_hidden(&self.document, self.find_one(query)?))
    }

    pub fn empty(&mut self, query: &str) -> Result<()> {
        for target in self.find(query)? {
            display::empty(&mut self.document, target)?;
        }
        Ok(())
    }

    /// Insert markup at `position` (default `beforeend`) of every match
    pub fn append_html(&mut self, query: &str, html: &str, position: Option<&str>) -> Result<()> {
        let position = match position {
            Some(p) => p.parse()?,
            None => InsertPosition::default(),
        };
        for target in self.find(query)? {
            display::append_html(&mut self.document, target, html, position)?;
        }
        Ok(())
    }

    /// Move the content of `#source_id` into every match of `target_query`
    pub fn move_html_to(&mut self, source_id: &str, target_query: &str) -> Result<()> {
        let targets = self.find(target_query)?;
        display::move_html_to(&mut self.document, source_id, &targets)
    }

    // ---- partial loading ----

    /// Read the partial-load configuration of a trigger element
    pub fn partial_load(&self, trigger: NodeId) -> Result<PartialLoad> {
        PartialLoad::from_element(&self.document, trigger)
    }

    /// Apply a fetched partial (or its failure) to the document
    pub fn complete_partial(&mut self, load: &PartialLoad, result: std::result::Result<&str, Error>) -> Result<()> {
        load.complete(&mut self.document, result, &self.callbacks)
    }
}
