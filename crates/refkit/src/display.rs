//! Show/hide state and markup insertion
//!
//! Visibility is recorded the way a page script records it: a `hidden`
//! class and the `display` property of the inline `style` attribute.

use std::str::FromStr;

use refkit_dom::{Document, DomMutator, ElementLookup, NodeId};
use refkit_html::HtmlParser;

use crate::{Error, Result};

const HIDDEN_CLASS: &str = "hidden";

/// Read one property from an element's inline style
pub fn style_property(doc: &Document, element: NodeId, property: &str) -> Option<String> {
    let style = doc.get_attribute(element, "style")?;
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().to_string())
        .last()
}

/// Set one property of an element's inline style, keeping the others
pub fn set_style_property(doc: &mut Document, element: NodeId, property: &str, value: &str) -> Result<()> {
    let current = doc.get_attribute(element, "style").unwrap_or_default();
    let mut declarations: Vec<String> = current
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split_once(':')
                .is_none_or(|(name, _)| !name.trim().eq_ignore_ascii_case(property))
        })
        .map(str::to_string)
        .collect();
    declarations.push(format!("{property}: {value}"));

    doc.set_attribute(element, "style", &format!("{};", declarations.join("; ")))?;
    Ok(())
}

/// Show (drop `hidden`, `display: block`) or hide (`display: none`)
pub fn show(doc: &mut Document, target: NodeId, is_show: bool) -> Result<()> {
    if is_show {
        doc.remove_class(target, HIDDEN_CLASS)?;
        set_style_property(doc, target, "display", "block")
    } else {
        set_style_property(doc, target, "display", "none")
    }
}

/// Hidden through `display: none` or the `hidden` class
pub fn is_hidden(doc: &Document, target: NodeId) -> bool {
    style_property(doc, target, "display").is_some_and(|d| d.eq_ignore_ascii_case("none"))
        || doc.has_class(target, HIDDEN_CLASS)
}

/// Flip visibility; returns whether the element is now shown
pub fn toggle(doc: &mut Document, target: NodeId) -> Result<bool> {
    let make_visible = is_hidden(doc, target);
    show(doc, target, make_visible)?;
    Ok(make_visible)
}

/// Remove every child
pub fn empty(doc: &mut Document, target: NodeId) -> Result<()> {
    doc.remove_children(target)?;
    Ok(())
}

/// Where [`append_html`] places new markup relative to the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the target, as a sibling
    BeforeBegin,
    /// Before the target's first child
    AfterBegin,
    /// After the target's last child
    #[default]
    BeforeEnd,
    /// After the target, as a sibling
    AfterEnd,
}

impl FromStr for InsertPosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "beforebegin" => Ok(InsertPosition::BeforeBegin),
            "afterbegin" => Ok(InsertPosition::AfterBegin),
            "beforeend" => Ok(InsertPosition::BeforeEnd),
            "afterend" => Ok(InsertPosition::AfterEnd),
            _ => Err(Error::UnknownPosition(s.to_string())),
        }
    }
}

/// Parse `html` and insert the resulting nodes around or inside `target`
pub fn append_html(
    doc: &mut Document,
    target: NodeId,
    html: &str,
    position: InsertPosition,
) -> Result<Vec<NodeId>> {
    if doc.tree().get(target).is_none() {
        return Err(Error::NotFound(target.to_string()));
    }

    let (parent, reference) = match position {
        InsertPosition::AfterBegin => (target, first_child(doc, target)),
        InsertPosition::BeforeEnd => (target, None),
        InsertPosition::BeforeBegin | InsertPosition::AfterEnd => {
            let parent = doc
                .tree()
                .parent(target)
                .ok_or_else(|| Error::NotFound(format!("parent of {target}")))?;
            let reference = match position {
                InsertPosition::BeforeBegin => Some(target),
                _ => next_sibling(doc, target),
            };
            (parent, reference)
        }
    };

    let nodes = HtmlParser::new().parse_fragment(doc, html)?;
    for &node in &nodes {
        doc.tree_mut().insert_before(parent, node, reference)?;
    }
    Ok(nodes)
}

fn first_child(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.tree().children(node).next().map(|(id, _)| id)
}

fn next_sibling(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.tree()
        .get(node)
        .map(|n| n.next_sibling)
        .filter(|id| id.is_valid())
}

/// Move the content of `#source_id` into every target, replacing theirs
pub fn move_html_to(doc: &mut Document, source_id: &str, targets: &[NodeId]) -> Result<()> {
    let source_id = source_id.strip_prefix('#').unwrap_or(source_id);
    let source = doc
        .get_element_by_id(source_id)
        .ok_or_else(|| Error::NotFound(format!("#{source_id}")))?;

    let html = doc.inner_html(source);
    doc.remove_children(source)?;
    for &target in targets {
        doc.remove_children(target)?;
        HtmlParser::new().parse_fragment_into(doc, target, &html)?;
    }
    Ok(())
}

/// Nearest ancestor matching a selector
pub fn find_parent(doc: &Document, element: NodeId, selector: &str) -> Result<Option<NodeId>> {
    Ok(doc.find_ancestor(element, selector)?)
}
