//! Validation rules and the per-field descriptor they run against

use refkit_dom::{ElementLookup, NodeId};

use super::patterns;

/// One check a field opted into through its attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// `data-val-required`
    Required,
    /// `data-val-email`
    EmailFormat,
    /// `data-val-length-min`; lengths are UTF-16 code units
    MinLength(Option<i64>),
    /// `data-val-length-max`
    MaxLength(Option<i64>),
    /// `data-val-minlength-min`
    MinLengthAlt(Option<i64>),
    /// `data-val-maxlength-max`
    MaxLengthAlt(Option<i64>),
    /// `type="date"`
    DateFormat,
    /// `type="url"`
    UrlFormat,
}

/// What makes a rule apply to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The attribute is present; its value (if any) is the threshold
    Attribute(&'static str),
    /// The `type` attribute equals this value
    InputType(&'static str),
}

struct RuleEntry {
    trigger: Trigger,
    build: fn(Option<i64>) -> ValidationRule,
    /// Whether the trigger attribute carries a numeric threshold
    threshold: bool,
}

/// Evaluation order of every rule kind
static RULE_TABLE: &[RuleEntry] = &[
    RuleEntry {
        trigger: Trigger::Attribute("data-val-required"),
        build: |_| ValidationRule::Required,
        threshold: false,
    },
    RuleEntry {
        trigger: Trigger::Attribute("data-val-email"),
        build: |_| ValidationRule::EmailFormat,
        threshold: false,
    },
    RuleEntry {
        trigger: Trigger::Attribute("data-val-length-min"),
        build: ValidationRule::MinLength,
        threshold: true,
    },
    RuleEntry {
        trigger: Trigger::Attribute("data-val-length-max"),
        build: ValidationRule::MaxLength,
        threshold: true,
    },
    RuleEntry {
        trigger: Trigger::Attribute("data-val-minlength-min"),
        build: ValidationRule::MinLengthAlt,
        threshold: true,
    },
    RuleEntry {
        trigger: Trigger::Attribute("data-val-maxlength-max"),
        build: ValidationRule::MaxLengthAlt,
        threshold: true,
    },
    RuleEntry {
        trigger: Trigger::InputType("date"),
        build: |_| ValidationRule::DateFormat,
        threshold: false,
    },
    RuleEntry {
        trigger: Trigger::InputType("url"),
        build: |_| ValidationRule::UrlFormat,
        threshold: false,
    },
];

impl ValidationRule {
    /// Attribute holding the message, for rules whose message is authored
    pub fn message_attribute(&self) -> Option<&'static str> {
        match self {
            ValidationRule::Required => Some("data-val-required"),
            ValidationRule::EmailFormat => Some("data-val-email"),
            ValidationRule::MinLength(_) | ValidationRule::MaxLength(_) => Some("data-val-length"),
            ValidationRule::MinLengthAlt(_) => Some("data-val-minlength"),
            ValidationRule::MaxLengthAlt(_) => Some("data-val-maxlength"),
            ValidationRule::DateFormat | ValidationRule::UrlFormat => None,
        }
    }

    /// Whether this rule fails for the field
    pub fn fires(&self, field: &FieldDescriptor) -> bool {
        if let ValidationRule::Required = self {
            return field.value.trim().is_empty() || field.value.eq_ignore_ascii_case("select");
        }

        // Shape and length rules only look at fields that are required or filled in
        if !(field.is_required || field.has_value()) {
            return false;
        }
        // Browser string length: UTF-16 code units
        let length = field.value.encode_utf16().count() as i64;
        match *self {
            ValidationRule::Required => false,
            ValidationRule::EmailFormat => !patterns::is_email(&field.value),
            ValidationRule::MinLength(min) | ValidationRule::MinLengthAlt(min) => {
                min.is_some_and(|min| length < min)
            }
            ValidationRule::MaxLength(max) | ValidationRule::MaxLengthAlt(max) => {
                max.is_some_and(|max| length > max)
            }
            ValidationRule::DateFormat => !patterns::is_date(&field.value),
            ValidationRule::UrlFormat => !patterns::is_url(&field.value),
        }
    }

    /// Message reported when the rule fires
    pub fn message<D: ElementLookup + ?Sized>(&self, doc: &D, field: &FieldDescriptor) -> String {
        match self {
            ValidationRule::DateFormat => format!("{} must be a proper date value.", field.name),
            ValidationRule::UrlFormat => format!("{} must be a proper url value.", field.name),
            rule => rule
                .message_attribute()
                .and_then(|attr| doc.get_attribute(field.node, attr))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Snapshot of one annotated input taken at validation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub node: NodeId,
    pub value: String,
    pub is_required: bool,
    pub name: String,
    pub input_type: Option<String>,
    /// Applicable rules in evaluation order
    pub rules: Vec<ValidationRule>,
}

impl FieldDescriptor {
    /// Read a field's value and rule set from its attributes
    pub fn read<D: ElementLookup + ?Sized>(doc: &D, node: NodeId) -> Self {
        let input_type = doc.get_attribute(node, "type").map(str::to_string);
        let mut rules = Vec::new();

        for entry in RULE_TABLE {
            match entry.trigger {
                Trigger::Attribute(attr) => {
                    let Some(raw) = doc.get_attribute(node, attr) else {
                        continue;
                    };
                    let threshold = if entry.threshold {
                        let parsed = patterns::parse_int(raw);
                        if parsed.is_none() {
                            tracing::debug!(%node, attr, raw, "threshold is not a number; rule never fires");
                        }
                        parsed
                    } else {
                        None
                    };
                    rules.push((entry.build)(threshold));
                }
                Trigger::InputType(kind) => {
                    if input_type.as_deref().is_some_and(|t| t.eq_ignore_ascii_case(kind)) {
                        rules.push((entry.build)(None));
                    }
                }
            }
        }

        Self {
            node,
            value: doc.value(node),
            is_required: doc.has_attribute(node, "data-val-required"),
            name: doc.get_attribute(node, "name").unwrap_or_default().to_string(),
            input_type,
            rules,
        }
    }

    /// Trimmed value is non-empty
    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refkit_dom::{Document, DomMutator};

    fn field(attrs: &[(&str, &str)]) -> (Document, FieldDescriptor) {
        let mut doc = Document::default();
        let input = doc.append_element(doc.body(), "input").unwrap();
        for (name, value) in attrs {
            doc.set_attribute(input, name, value).unwrap();
        }
        let descriptor = FieldDescriptor::read(&doc, input);
        (doc, descriptor)
    }

    #[test]
    fn test_rule_order_follows_table() {
        let (_, f) = field(&[
            ("type", "url"),
            ("data-val-length-max", "10"),
            ("data-val-email", "bad"),
            ("data-val-required", "req"),
        ]);
        assert_eq!(
            f.rules,
            vec![
                ValidationRule::Required,
                ValidationRule::EmailFormat,
                ValidationRule::MaxLength(Some(10)),
                ValidationRule::UrlFormat,
            ]
        );
        assert!(f.is_required);
    }

    #[test]
    fn test_malformed_threshold_never_fires() {
        let (_, f) = field(&[("data-val-length-min", "many"), ("value", "a")]);
        assert_eq!(f.rules, vec![ValidationRule::MinLength(None)]);
        assert!(!f.rules[0].fires(&f));
    }

    #[test]
    fn test_length_boundaries() {
        let (_, f) = field(&[("value", "abc")]);
        assert!(!ValidationRule::MinLength(Some(3)).fires(&f));
        assert!(!ValidationRule::MaxLength(Some(3)).fires(&f));
        assert!(ValidationRule::MinLength(Some(4)).fires(&f));
        assert!(ValidationRule::MaxLengthAlt(Some(2)).fires(&f));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let (_, f) = field(&[("value", "héllo")]);
        assert!(!ValidationRule::MaxLength(Some(5)).fires(&f));

        // Astral characters take two units
        let (_, f) = field(&[("value", "😀")]);
        assert!(ValidationRule::MaxLengthAlt(Some(1)).fires(&f));
        assert!(!ValidationRule::MaxLengthAlt(Some(2)).fires(&f));
        assert!(!ValidationRule::MinLength(Some(2)).fires(&f));
    }

    #[test]
    fn test_optional_empty_field_skips_shape_rules() {
        let (_, f) = field(&[("value", "   ")]);
        assert!(!f.has_value());
        assert!(!ValidationRule::EmailFormat.fires(&f));
        assert!(!ValidationRule::MinLength(Some(5)).fires(&f));
        assert!(!ValidationRule::DateFormat.fires(&f));
    }

    #[test]
    fn test_required_select_placeholder() {
        let (_, f) = field(&[("data-val-required", "Pick one"), ("value", "SELECT")]);
        assert!(ValidationRule::Required.fires(&f));
    }

    #[test]
    fn test_messages() {
        let (doc, f) = field(&[
            ("name", "Homepage"),
            ("data-val-length", "Too long"),
            ("data-val-minlength-min", "2"),
        ]);
        assert_eq!(ValidationRule::MaxLength(Some(1)).message(&doc, &f), "Too long");
        assert_eq!(ValidationRule::MinLengthAlt(Some(2)).message(&doc, &f), "");
        assert_eq!(
            ValidationRule::UrlFormat.message(&doc, &f),
            "Homepage must be a proper url value."
        );
    }

    #[test]
    fn test_input_type_is_case_insensitive() {
        let (_, f) = field(&[("type", "DATE")]);
        assert_eq!(f.rules, vec![ValidationRule::DateFormat]);
    }
}
