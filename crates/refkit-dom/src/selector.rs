//! CSS Selector Matching
//!
//! Supports the subset the form tools rely on: type, `*`, `#id`, `.class`,
//! `[attr]`, `[attr=value]`, compound selectors, descendant (` `) and child
//! (`>`) combinators, and comma-separated selector lists.

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// Combinator joining two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Attribute condition inside `[...]`
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrSelector {
    name: String,
    value: Option<String>,
}

impl AttrSelector {
    fn parse(inner: &str, source: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(source.to_string());
        let (name, value) = match inner.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let unquoted = ['"', '\'']
                    .iter()
                    .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
                    .unwrap_or(value);
                (name.trim(), Some(unquoted.to_string()))
            }
            None => (inner.trim(), None),
        };
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return Err(invalid());
        }
        Ok(Self {
            name: name.to_ascii_lowercase(),
            value,
        })
    }

    fn matches(&self, elem: &ElementData) -> bool {
        match (&self.value, elem.get_attr(&self.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        }
    }
}

/// A sequence of simple selectors with no combinator (`input.a[b]`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

impl CompoundSelector {
    fn parse(text: &str, source: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(source.to_string());
        let mut compound = Self::default();
        let mut rest = text;

        if let Some(after) = rest.strip_prefix('*') {
            rest = after;
        } else {
            let (tag, after) = take_ident(rest);
            if !tag.is_empty() {
                compound.tag = Some(tag.to_ascii_lowercase());
            }
            rest = after;
        }

        while let Some(c) = rest.chars().next() {
            match c {
                '#' | '.' => {
                    let (ident, after) = take_ident(&rest[1..]);
                    if ident.is_empty() {
                        return Err(invalid());
                    }
                    if c == '#' {
                        compound.id = Some(ident.to_string());
                    } else {
                        compound.classes.push(ident.to_string());
                    }
                    rest = after;
                }
                '[' => {
                    let close = find_closing_bracket(rest).ok_or_else(invalid)?;
                    compound.attrs.push(AttrSelector::parse(&rest[1..close], source)?);
                    rest = &rest[close + 1..];
                }
                _ => return Err(invalid()),
            }
        }
        Ok(compound)
    }

    /// Check a single element against this compound
    pub fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !elem.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| elem.has_class(c)) && self.attrs.iter().all(|a| a.matches(elem))
    }
}

/// One complex selector: compounds joined by combinators, left to right
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    /// The combinator of the first part is unused
    parts: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    fn parse(text: &str, source: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(source.to_string());
        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;
        let mut buf = String::new();
        let mut depth = 0usize;
        let mut quote: Option<char> = None;

        for c in text.trim().chars() {
            if let Some(q) = quote {
                buf.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '\'' if depth > 0 => {
                    quote = Some(c);
                    buf.push(c);
                }
                '[' => {
                    depth += 1;
                    buf.push(c);
                }
                ']' => {
                    depth = depth.saturating_sub(1);
                    buf.push(c);
                }
                c if depth == 0 && (c.is_whitespace() || c == '>') => {
                    if !buf.is_empty() {
                        parts.push((combinator, CompoundSelector::parse(&buf, source)?));
                        buf.clear();
                        combinator = Combinator::Descendant;
                    }
                    if c == '>' {
                        if parts.is_empty() || combinator == Combinator::Child {
                            return Err(invalid());
                        }
                        combinator = Combinator::Child;
                    }
                }
                _ => buf.push(c),
            }
        }

        if quote.is_some() || depth > 0 {
            return Err(invalid());
        }
        if buf.is_empty() {
            if combinator == Combinator::Child || parts.is_empty() {
                return Err(invalid());
            }
        } else {
            parts.push((combinator, CompoundSelector::parse(&buf, source)?));
        }
        Ok(Self { parts })
    }

    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.matches_at(tree, id, self.parts.len() - 1)
    }

    fn matches_at(&self, tree: &DomTree, id: NodeId, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        let Some(elem) = tree.element(id) else {
            return false;
        };
        if !compound.matches(elem) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match combinator {
            Combinator::Child => tree
                .parent(id)
                .is_some_and(|p| self.matches_at(tree, p, index - 1)),
            Combinator::Descendant => tree
                .ancestors(id)
                .any(|a| self.matches_at(tree, a, index - 1)),
        }
    }
}

/// Parsed, comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse selector text
    pub fn parse(text: &str) -> DomResult<Self> {
        let selectors = split_top_level(text)
            .into_iter()
            .map(|part| {
                if part.trim().is_empty() {
                    return Err(DomError::InvalidSelector(text.to_string()));
                }
                ComplexSelector::parse(part, text)
            })
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Check whether an element matches any selector in the list
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, id))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// Byte index of the `]` closing the `[` at the start of `s`
fn find_closing_bracket(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split on commas outside brackets and quotes; blank segments are kept
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
