//! Declarative form validation
//!
//! Fields opt in with `data-val="true"` and declare their rules through
//! `data-val-*` attributes:
//!
//! ```html
//! <form id="signup">
//!   <div data-valmsg-summary="true"><ul></ul></div>
//!   <input name="Email" data-val="true"
//!          data-val-required="Email is required."
//!          data-val-email="Email is not valid.">
//! </form>
//! ```
//!
//! [`FormValidator::validate`] collects the messages of every failing rule,
//! marks failing fields and rebuilds the summary list.

mod patterns;
mod rules;

pub use patterns::{is_date, is_email, is_url, parse_int};
pub use rules::{FieldDescriptor, Trigger, ValidationRule};

use refkit_dom::{DomMutator, ElementLookup};
use serde::Serialize;

use crate::config::ValidationOptions;
use crate::{Error, Result};

const FIELD_SELECTOR: &str = "[data-val=\"true\"]";
const SUMMARY_SELECTOR: &str = "[data-valmsg-summary=\"true\"]";

/// Result of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Messages in field order, then rule order within a field
    pub errors: Vec<String>,
    /// Whether a summary container was found and rebuilt
    pub summary_rendered: bool,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the `data-val-*` rules of a form
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    options: ValidationOptions,
}

impl FormValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate the form with the given id (a leading `#` is ignored)
    ///
    /// `mark_invalid` defaults to `true`: failing fields get the invalid
    /// class. The class is cleared from every field first, so repeated
    /// runs never stack it.
    pub fn validate<D>(&self, doc: &mut D, form_id: &str, mark_invalid: Option<bool>) -> Result<ValidationOutcome>
    where
        D: ElementLookup + DomMutator + ?Sized,
    {
        let form_id = form_id.strip_prefix('#').unwrap_or(form_id);
        let mark_invalid = mark_invalid.unwrap_or(true);

        let form = doc
            .get_element_by_id(form_id)
            .ok_or_else(|| Error::NotFound(format!("#{form_id}")))?;

        let fields = doc.query_selector_all(form, FIELD_SELECTOR)?;
        if fields.is_empty() {
            tracing::debug!(form = form_id, "no annotated fields");
            return Ok(ValidationOutcome::default());
        }
        tracing::debug!(form = form_id, fields = fields.len(), "validating form");

        let invalid_class = self.options.invalid_class.as_str();
        let mut outcome = ValidationOutcome::default();

        for node in fields {
            if doc.has_class(node, invalid_class) {
                doc.remove_class(node, invalid_class)?;
            }

            let field = FieldDescriptor::read(&*doc, node);
            for rule in &field.rules {
                if !rule.fires(&field) {
                    continue;
                }
                tracing::trace!(field = %field.name, ?rule, "rule failed");
                outcome.errors.push(rule.message(&*doc, &field));
                if mark_invalid {
                    doc.add_class(node, invalid_class)?;
                }
            }
        }

        let Some(summary) = doc.query_selector(form, SUMMARY_SELECTOR)? else {
            tracing::info!(
                form = form_id,
                "not displaying validation errors: no [data-valmsg-summary] container in form"
            );
            return Ok(outcome);
        };
        self.render_summary(doc, summary, &outcome.errors)?;
        outcome.summary_rendered = true;

        Ok(outcome)
    }

    /// Reset the summary container and list the messages in it
    fn render_summary<D>(&self, doc: &mut D, summary: refkit_dom::NodeId, errors: &[String]) -> Result<()>
    where
        D: ElementLookup + DomMutator + ?Sized,
    {
        let list = match doc.first_element_child(summary) {
            Some(list) => list,
            None => doc.append_element(summary, "ul")?,
        };

        doc.set_class_name(summary, "")?;
        doc.remove_children(list)?;

        if errors.is_empty() {
            doc.add_class(summary, &self.options.summary_valid_class)?;
            return Ok(());
        }

        doc.add_class(summary, &self.options.summary_errors_class)?;
        for message in errors {
            let item = doc.append_element(list, "li")?;
            doc.append_text(item, message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refkit_dom::{Document, NodeId};

    fn signup(summary: bool) -> (Document, NodeId) {
        let mut doc = Document::default();
        let form = doc.append_element(doc.body(), "form").unwrap();
        doc.set_attribute(form, "id", "signup").unwrap();
        if summary {
            let container = doc.append_element(form, "div").unwrap();
            doc.set_attribute(container, "data-valmsg-summary", "true").unwrap();
        }
        let input = doc.append_element(form, "input").unwrap();
        doc.set_attribute(input, "name", "Email").unwrap();
        doc.set_attribute(input, "data-val", "true").unwrap();
        doc.set_attribute(input, "data-val-required", "Email is required.").unwrap();
        (doc, input)
    }

    #[test]
    fn test_missing_form() {
        let mut doc = Document::default();
        let err = FormValidator::default().validate(&mut doc, "#nope", None).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref id) if id == "#nope"));
    }

    #[test]
    fn test_summary_list_created_when_missing() {
        let (mut doc, _) = signup(true);
        let outcome = FormValidator::default().validate(&mut doc, "signup", None).unwrap();
        assert!(outcome.summary_rendered);

        let summary = doc.query_selector(doc.root(), SUMMARY_SELECTOR).unwrap().unwrap();
        assert_eq!(
            doc.outer_html(summary),
            "<div data-valmsg-summary=\"true\" class=\"validation-summary-errors\">\
             <ul><li>Email is required.</li></ul></div>"
        );
    }

    #[test]
    fn test_no_summary_still_reports() {
        let (mut doc, input) = signup(false);
        let outcome = FormValidator::default().validate(&mut doc, "signup", Some(true)).unwrap();
        assert_eq!(outcome.errors, vec!["Email is required."]);
        assert!(!outcome.summary_rendered);
        assert!(doc.has_class(input, "input-has-error"));
    }

    #[test]
    fn test_custom_class_names() {
        let (mut doc, input) = signup(true);
        let validator = FormValidator::new(ValidationOptions {
            invalid_class: "bad".to_string(),
            ..Default::default()
        });
        validator.validate(&mut doc, "signup", None).unwrap();
        assert!(doc.has_class(input, "bad"));
        assert!(!doc.has_class(input, "input-has-error"));
    }
}
