//! Form control values
//!
//! Inputs keep their value in the `value` attribute, textareas in their
//! text content and selects in the `selected` flag of their options.

use crate::{Document, DomError, DomResult, ElementLookup, NodeId};

impl Document {
    /// Current value of an input, textarea, select or option
    pub(crate) fn control_value(&self, element: NodeId) -> String {
        let Some(elem) = self.tree().element(element) else {
            return String::new();
        };
        match elem.tag.as_str() {
            "textarea" => self.tree().text_content(element),
            "select" => self
                .selected_option(element)
                .map(|o| self.option_value(o))
                .unwrap_or_default(),
            "option" => self.option_value(element),
            _ => elem.get_attr("value").unwrap_or_default().to_string(),
        }
    }

    pub(crate) fn set_control_value(&mut self, element: NodeId, value: &str) -> DomResult<()> {
        let tag = self
            .tag_name(element)
            .ok_or(DomError::NotAnElement(element))?
            .to_string();
        match tag.as_str() {
            "textarea" => self.set_text_content(element, value),
            "select" => {
                let mut matched = false;
                for option in self.options(element) {
                    let selected = !matched && self.option_value(option) == value;
                    matched |= selected;
                    let elem = self.tree_mut().element_mut(option)?;
                    if selected {
                        elem.set_attr("selected", "");
                    } else {
                        elem.remove_attr("selected");
                    }
                }
                Ok(())
            }
            _ => {
                self.tree_mut().element_mut(element)?.set_attr("value", value);
                Ok(())
            }
        }
    }

    /// All `<option>` descendants of a select, optgroups included
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.get_elements_by_tag_name(select, "option")
    }

    /// The option a select currently reports: the first one flagged
    /// `selected`, otherwise the first option
    pub fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        let options = self.options(select);
        options
            .iter()
            .copied()
            .find(|&o| self.has_attribute(o, "selected"))
            .or_else(|| options.first().copied())
    }

    /// Index of [`selected_option`](Self::selected_option) within the options
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        let selected = self.selected_option(select)?;
        self.options(select).iter().position(|&o| o == selected)
    }

    /// An option's value, falling back to its trimmed text
    pub fn option_value(&self, option: NodeId) -> String {
        match self.get_attribute(option, "value") {
            Some(v) => v.to_string(),
            None => self.option_text(option),
        }
    }

    /// An option's label text
    pub fn option_text(&self, option: NodeId) -> String {
        self.tree().text_content(option).trim().to_string()
    }
}
