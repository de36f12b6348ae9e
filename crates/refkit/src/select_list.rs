//! `<select>` list helpers

use refkit_dom::{Document, DomMutator, ElementLookup, NodeId};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One option, shaped like the `{ "Text": .., "Value": .. }` JSON lists
/// servers return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectListItem {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl SelectListItem {
    pub fn new(text: &str, value: &str) -> Self {
        Self {
            text: text.to_string(),
            value: value.to_string(),
        }
    }
}

fn ensure_select(doc: &Document, select: NodeId) -> Result<()> {
    match doc.tag_name(select) {
        Some("select") => Ok(()),
        _ => Err(Error::NotASelectList(select.to_string())),
    }
}

/// Append `<option value="{value}">{text}</option>`
pub fn add_item(doc: &mut Document, select: NodeId, text: &str, value: &str) -> Result<NodeId> {
    ensure_select(doc, select)?;
    let option = doc.append_element(select, "option")?;
    doc.set_attribute(option, "value", value)?;
    doc.append_text(option, text)?;
    Ok(option)
}

/// Value of the selected option
pub fn value(doc: &Document, select: NodeId) -> Result<Option<String>> {
    ensure_select(doc, select)?;
    Ok(doc.selected_option(select).map(|o| doc.option_value(o)))
}

/// Label of the selected option
pub fn text(doc: &Document, select: NodeId) -> Result<Option<String>> {
    ensure_select(doc, select)?;
    Ok(doc.selected_option(select).map(|o| doc.option_text(o)))
}

/// Remove every option whose value matches; returns how many went
pub fn delete_item(doc: &mut Document, select: NodeId, value: &str) -> Result<usize> {
    ensure_select(doc, select)?;
    let doomed: Vec<NodeId> = doc
        .options(select)
        .into_iter()
        .filter(|&o| doc.option_value(o) == value)
        .collect();
    for &option in &doomed {
        doc.detach(option)?;
    }
    Ok(doomed.len())
}

/// Remove all options
pub fn clear(doc: &mut Document, select: NodeId) -> Result<()> {
    ensure_select(doc, select)?;
    for option in doc.options(select) {
        doc.detach(option)?;
    }
    Ok(())
}

/// Append items, optionally clearing the list first
pub fn populate(doc: &mut Document, select: NodeId, items: &[SelectListItem], clear_first: bool) -> Result<()> {
    if clear_first {
        clear(doc, select)?;
    }
    for item in items {
        add_item(doc, select, &item.text, &item.value)?;
    }
    tracing::debug!(%select, count = items.len(), "select list populated");
    Ok(())
}

/// Whether any option has the given value or the given label
pub fn contains(doc: &Document, select: NodeId, value: &str, text: &str) -> Result<bool> {
    ensure_select(doc, select)?;
    Ok(doc
        .options(select)
        .into_iter()
        .any(|o| doc.option_value(o) == value || doc.option_text(o) == text))
}

/// Value of the checked radio button in a group
pub fn radio_value_by_name(doc: &Document, name: &str) -> Result<Option<String>> {
    let radios = doc.query_selector_all(doc.root(), &format!("input[name=\"{name}\"]"))?;
    Ok(radios
        .into_iter()
        .find(|&r| doc.has_attribute(r, "checked"))
        .map(|r| doc.get_attribute(r, "value").unwrap_or("on").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> (Document, NodeId) {
        let mut doc = Document::default();
        let select = doc.append_element(doc.body(), "select").unwrap();
        populate(
            &mut doc,
            select,
            &[
                SelectListItem::new("Select", "select"),
                SelectListItem::new("Red", "r"),
                SelectListItem::new("Blue", "b"),
            ],
            false,
        )
        .unwrap();
        (doc, select)
    }

    #[test]
    fn test_value_and_text() {
        let (mut doc, select) = colors();
        assert_eq!(value(&doc, select).unwrap().as_deref(), Some("select"));

        doc.set_value(select, "b").unwrap();
        assert_eq!(value(&doc, select).unwrap().as_deref(), Some("b"));
        assert_eq!(text(&doc, select).unwrap().as_deref(), Some("Blue"));
    }

    #[test]
    fn test_delete_and_clear() {
        let (mut doc, select) = colors();
        assert_eq!(delete_item(&mut doc, select, "r").unwrap(), 1);
        assert_eq!(delete_item(&mut doc, select, "r").unwrap(), 0);
        assert!(!contains(&doc, select, "r", "Red").unwrap());
        assert!(contains(&doc, select, "zzz", "Blue").unwrap());

        clear(&mut doc, select).unwrap();
        assert!(doc.options(select).is_empty());
        assert_eq!(value(&doc, select).unwrap(), None);
    }

    #[test]
    fn test_populate_clearing() {
        let (mut doc, select) = colors();
        populate(&mut doc, select, &[SelectListItem::new("Green", "g")], true).unwrap();
        assert_eq!(
            doc.inner_html(select),
            "<option value=\"g\">Green</option>"
        );
    }

    #[test]
    fn test_items_from_json() {
        let items: Vec<SelectListItem> =
            serde_json::from_str(r#"[{"Text":"One","Value":"1"}]"#).unwrap();
        assert_eq!(items, vec![SelectListItem::new("One", "1")]);
    }

    #[test]
    fn test_not_a_select() {
        let mut doc = Document::default();
        let div = doc.append_element(doc.body(), "div").unwrap();
        assert!(matches!(add_item(&mut doc, div, "a", "b"), Err(Error::NotASelectList(_))));
    }

    #[test]
    fn test_radio_value() {
        let mut doc = Document::default();
        for (value, checked) in [("s", false), ("m", true), ("l", false)] {
            let radio = doc.append_element(doc.body(), "input").unwrap();
            doc.set_attribute(radio, "type", "radio").unwrap();
            doc.set_attribute(radio, "name", "size").unwrap();
            doc.set_attribute(radio, "value", value).unwrap();
            if checked {
                doc.set_attribute(radio, "checked", "").unwrap();
            }
        }
        assert_eq!(radio_value_by_name(&doc, "size").unwrap().as_deref(), Some("m"));
        assert_eq!(radio_value_by_name(&doc, "color").unwrap(), None);
    }
}
