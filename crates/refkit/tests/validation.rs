//! Form validation tests
//!
//! Documents are built from markup the way a server-rendered page would
//! send them.

use refkit::dom::{DomMutator, ElementLookup, NodeId};
use refkit::{Error, FormValidator, RefKit};

fn kit(fields: &str) -> RefKit {
    RefKit::from_html(&format!(
        r#"<form id="signup" action="/Account/Register">
             <div data-valmsg-summary="true"><ul></ul></div>
             {fields}
           </form>"#
    ))
    .unwrap()
}

fn summary(kit: &RefKit) -> NodeId {
    let doc = kit.document();
    doc.query_selector(doc.root(), "[data-valmsg-summary=true]")
        .unwrap()
        .unwrap()
}

fn marked(kit: &RefKit, id: &str) -> bool {
    let node = kit.id(id).unwrap();
    kit.document().has_class(node, "input-has-error")
}

// ============================================================================
// BASIC OUTCOMES
// ============================================================================

#[test]
fn test_no_annotated_fields_is_valid() {
    let mut kit = kit(r#"<input name="Plain" value="">"#);
    let outcome = kit.validate_form("signup", None).unwrap();
    assert!(outcome.is_valid());
    assert!(outcome.errors.is_empty());
    // Nothing is touched, not even the summary
    assert_eq!(kit.document().get_attribute(summary(&kit), "class"), None);
}

#[test]
fn test_missing_form() {
    let mut kit = kit("");
    assert!(matches!(
        kit.validate_form("#nope", None),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_hash_prefix_is_stripped() {
    let mut kit = kit(r#"<input id="n" name="Name" data-val="true" data-val-required="Name is required.">"#);
    let outcome = kit.validate_form("#signup", None).unwrap();
    assert_eq!(outcome.errors, vec!["Name is required."]);
}

#[test]
fn test_empty_required_field() {
    let html = r#"<input id="n" name="Name" data-val="true" data-val-required="Name is required.">"#;

    let mut with_marks = kit(html);
    let outcome = with_marks.validate_form("signup", Some(true)).unwrap();
    assert_eq!(outcome.errors, vec!["Name is required."]);
    assert!(marked(&with_marks, "n"));

    let mut without_marks = kit(html);
    let outcome = without_marks.validate_form("signup", Some(false)).unwrap();
    assert_eq!(outcome.errors, vec!["Name is required."]);
    assert!(!marked(&without_marks, "n"));
}

#[test]
fn test_whitespace_only_is_empty() {
    let mut kit = kit(r#"<input name="Name" value="   " data-val="true" data-val-required="Required">"#);
    assert_eq!(kit.validate_form("signup", None).unwrap().errors, vec!["Required"]);
}

#[test]
fn test_required_select_placeholder() {
    let mut kit = kit(
        r#"<select id="c" name="Color" data-val="true" data-val-required="Pick a color.">
             <option value="Select">-- Select --</option>
             <option value="red">Red</option>
           </select>"#,
    );
    assert_eq!(kit.validate_form("signup", None).unwrap().errors, vec!["Pick a color."]);

    let select = kit.id("c").unwrap();
    kit.document_mut().set_value(select, "red").unwrap();
    assert!(kit.validate_form("signup", None).unwrap().is_valid());
}

#[test]
fn test_required_and_email_both_fire_on_empty() {
    let mut kit = kit(
        r#"<input name="Email" data-val="true"
                  data-val-required="Email is required."
                  data-val-email="Email is not valid.">"#,
    );
    let outcome = kit.validate_form("signup", None).unwrap();
    assert_eq!(outcome.errors, vec!["Email is required.", "Email is not valid."]);
}

#[test]
fn test_optional_email_only_checked_when_filled() {
    let html = |value: &str| {
        format!(r#"<input name="Email" value="{value}" data-val="true" data-val-email="Bad email.">"#)
    };
    assert!(kit(&html("")).validate_form("signup", None).unwrap().is_valid());
    assert!(kit(&html("ann@example.com")).validate_form("signup", None).unwrap().is_valid());
    assert_eq!(
        kit(&html("ann@")).validate_form("signup", None).unwrap().errors,
        vec!["Bad email."]
    );
}

// ============================================================================
// LENGTH RULES
// ============================================================================

fn length_kit(value: &str) -> RefKit {
    kit(&format!(
        r#"<input name="Code" value="{value}" data-val="true"
                  data-val-length="Code must be 3 to 5 characters."
                  data-val-length-min="3" data-val-length-max="5">"#
    ))
}

#[test]
fn test_length_boundaries_never_fire() {
    assert!(length_kit("abc").validate_form("signup", None).unwrap().is_valid());
    assert!(length_kit("abcde").validate_form("signup", None).unwrap().is_valid());
}

#[test]
fn test_length_outside_bounds() {
    let short = length_kit("ab").validate_form("signup", None).unwrap();
    assert_eq!(short.errors, vec!["Code must be 3 to 5 characters."]);
    let long = length_kit("abcdef").validate_form("signup", None).unwrap();
    assert_eq!(long.errors, vec!["Code must be 3 to 5 characters."]);
}

#[test]
fn test_alt_length_rules() {
    let mut kit = kit(
        r#"<input name="Pin" value="12345678" data-val="true"
                  data-val-minlength="Too short." data-val-minlength-min="4"
                  data-val-maxlength="Too long." data-val-maxlength-max="6">"#,
    );
    assert_eq!(kit.validate_form("signup", None).unwrap().errors, vec!["Too long."]);
}

#[test]
fn test_malformed_threshold_never_fires() {
    let mut kit = kit(
        r#"<input name="Code" value="a" data-val="true"
                  data-val-length="Bad length." data-val-length-min="three">"#,
    );
    assert!(kit.validate_form("signup", None).unwrap().is_valid());
}

// ============================================================================
// TYPE RULES
// ============================================================================

#[test]
fn test_date_field() {
    let mut kit = kit(r#"<input type="date" name="BirthDate" value="not-a-date" data-val="true">"#);
    let outcome = kit.validate_form("signup", None).unwrap();
    assert_eq!(outcome.errors, vec!["BirthDate must be a proper date value."]);

    let mut kit = self::kit(r#"<input type="date" name="BirthDate" value="1990-04-01" data-val="true">"#);
    assert!(kit.validate_form("signup", None).unwrap().is_valid());
}

#[test]
fn test_url_field() {
    let mut kit = kit(r#"<input type="url" name="Homepage" value="http://192.168.0.1" data-val="true">"#);
    assert_eq!(
        kit.validate_form("signup", None).unwrap().errors,
        vec!["Homepage must be a proper url value."]
    );

    let mut kit = self::kit(r#"<input type="url" name="Homepage" value="https://example.org/me" data-val="true">"#);
    assert!(kit.validate_form("signup", None).unwrap().is_valid());
}

// ============================================================================
// ORDERING, SUMMARY, IDEMPOTENCE
// ============================================================================

#[test]
fn test_messages_in_field_then_rule_order() {
    let mut kit = kit(
        r#"<input name="A" data-val="true" data-val-required="A required."
                  data-val-length="A length." data-val-length-min="2">
           <input name="B" value="x" data-val="true" data-val-email="B email."
                  data-val-maxlength="B max." data-val-maxlength-max="0">"#,
    );
    let outcome = kit.validate_form("signup", None).unwrap();
    assert_eq!(
        outcome.errors,
        vec!["A required.", "A length.", "B email.", "B max."]
    );
}

#[test]
fn test_summary_rendering() {
    let mut kit = kit(r#"<input name="Name" data-val="true" data-val-required="Name is <required>.">"#);
    kit.validate_form("signup", None).unwrap();
    assert_eq!(
        kit.document().outer_html(summary(&kit)),
        "<div data-valmsg-summary=\"true\" class=\"validation-summary-errors\">\
         <ul><li>Name is &lt;required&gt;.</li></ul></div>"
    );

    let name = kit.find_one("input[name=Name]").unwrap();
    kit.document_mut().set_value(name, "Ann").unwrap();
    let outcome = kit.validate_form("signup", None).unwrap();
    assert!(outcome.is_valid());
    assert!(outcome.summary_rendered);
    assert_eq!(
        kit.document().outer_html(summary(&kit)),
        "<div data-valmsg-summary=\"true\" class=\"validation-summary-valid\"><ul></ul></div>"
    );
    assert!(!kit.document().has_class(name, "input-has-error"));
}

#[test]
fn test_summary_class_is_reset() {
    let mut kit = RefKit::from_html(
        r#"<form id="f">
             <div class="alert stale" data-valmsg-summary="true"><ul><li>old</li></ul></div>
             <input name="X" value="ok" data-val="true" data-val-required="X">
           </form>"#,
    )
    .unwrap();
    kit.validate_form("f", None).unwrap();
    let doc = kit.document();
    let summary = doc.query_selector(doc.root(), "[data-valmsg-summary=true]").unwrap().unwrap();
    assert_eq!(doc.get_attribute(summary, "class"), Some("validation-summary-valid"));
    assert_eq!(doc.inner_html(summary), "<ul></ul>");
}

#[test]
fn test_missing_summary_still_returns_outcome() {
    let mut kit = RefKit::from_html(
        r#"<form id="f"><input id="x" name="X" data-val="true" data-val-required="X required"></form>"#,
    )
    .unwrap();
    let outcome = kit.validate_form("f", None).unwrap();
    assert_eq!(outcome.errors, vec!["X required"]);
    assert!(!outcome.summary_rendered);
    assert!(marked(&kit, "x"));
}

#[test]
fn test_rerun_keeps_single_marker() {
    let mut kit = kit(
        r#"<input id="e" class="form-control" name="Email" value="bad" data-val="true"
                  data-val-email="Bad." data-val-length="Len." data-val-length-min="10">"#,
    );
    kit.validate_form("signup", None).unwrap();
    kit.validate_form("signup", None).unwrap();
    let e = kit.id("e").unwrap();
    assert_eq!(
        kit.document().get_attribute(e, "class"),
        Some("form-control input-has-error")
    );
}

#[test]
fn test_idempotent_runs() {
    let mut kit = kit(
        r#"<input name="A" data-val="true" data-val-required="A required.">
           <input name="B" value="b@" data-val="true" data-val-email="B email.">"#,
    );
    let first = kit.validate_form("signup", None).unwrap();
    let first_html = kit.document().outer_html(kit.document().root());
    let second = kit.validate_form("signup", None).unwrap();
    let second_html = kit.document().outer_html(kit.document().root());
    assert_eq!(first, second);
    assert_eq!(first_html, second_html);
}

#[test]
fn test_marker_cleared_when_not_marking() {
    let mut kit = kit(r#"<input id="n" name="N" data-val="true" data-val-required="N">"#);
    kit.validate_form("signup", Some(true)).unwrap();
    assert!(marked(&kit, "n"));
    kit.validate_form("signup", Some(false)).unwrap();
    assert!(!marked(&kit, "n"));
}

#[test]
fn test_fields_outside_form_ignored() {
    let mut kit = RefKit::from_html(
        r#"<input name="Outside" data-val="true" data-val-required="Outside">
           <form id="f"><input name="Inside" value="ok" data-val="true" data-val-required="Inside"></form>"#,
    )
    .unwrap();
    assert!(kit.validate_form("f", None).unwrap().is_valid());
}

#[test]
fn test_validator_over_plain_document() {
    let mut doc = refkit::html::parse(
        r#"<form id="f"><textarea name="Bio" data-val="true"
              data-val-maxlength="Bio too long." data-val-maxlength-max="5">far too long</textarea></form>"#,
    )
    .unwrap();
    let outcome = FormValidator::default().validate(&mut doc, "f", None).unwrap();
    assert_eq!(outcome.errors, vec!["Bio too long."]);
}
