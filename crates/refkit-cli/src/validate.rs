use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use refkit::dom::ElementLookup;
use refkit::{Options, RefKit, ValidationOutcome};
use serde::Serialize;

pub struct Args {
    pub file: PathBuf,
    pub form: String,
    pub mark_invalid: bool,
    pub json: bool,
    pub options: Option<PathBuf>,
    pub print_summary: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    form: &'a str,
    valid: bool,
    #[serde(flatten)]
    outcome: &'a ValidationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary_html: Option<String>,
}

/// Validate the form; `Ok(false)` when it has errors
pub fn run(args: &Args) -> Result<bool> {
    let options = match &args.options {
        Some(path) => load_options(path)?,
        None => Options::default(),
    };

    let html = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let document = refkit::html::HtmlParser::new()
        .parse_with_url(&html, &format!("file://{}", args.file.display()))
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let mut kit = RefKit::with_options(document, options);
    let outcome = kit
        .validate_form(&args.form, Some(args.mark_invalid))
        .with_context(|| format!("failed to validate form {:?}", args.form))?;
    tracing::debug!(errors = outcome.errors.len(), "validation finished");

    let summary_html = if args.print_summary {
        summary_markup(&kit, &args.form)?
    } else {
        None
    };

    if args.json {
        let report = Report {
            form: &args.form,
            valid: outcome.is_valid(),
            outcome: &outcome,
            summary_html,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if outcome.is_valid() {
            println!("{}: valid", args.form);
        } else {
            println!("{}: {} error(s)", args.form, outcome.errors.len());
            for message in &outcome.errors {
                println!("  - {message}");
            }
        }
        if let Some(markup) = summary_html {
            println!("{markup}");
        }
    }

    Ok(outcome.is_valid())
}

fn load_options(path: &Path) -> Result<Options> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid options file {}", path.display()))
}

fn summary_markup(kit: &RefKit, form_id: &str) -> Result<Option<String>> {
    let form = kit
        .id(form_id)
        .with_context(|| format!("form {form_id:?} disappeared"))?;
    let doc = kit.document();
    let summary = doc.query_selector(form, "[data-valmsg-summary=\"true\"]")?;
    if summary.is_none() {
        tracing::warn!(form = form_id, "no summary container to print");
    }
    Ok(summary.map(|s| doc.outer_html(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_page(name: &str, html: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("refkit-cli-{}-{name}.html", std::process::id()));
        fs::write(&path, html).unwrap();
        path
    }

    fn args(file: PathBuf) -> Args {
        Args {
            file,
            form: "f".to_string(),
            mark_invalid: true,
            json: true,
            options: None,
            print_summary: true,
        }
    }

    #[test]
    fn test_invalid_form_reports_false() {
        let path = write_page(
            "invalid",
            r#"<form id="f"><div data-valmsg-summary="true"></div>
               <input name="N" data-val="true" data-val-required="N is required."></form>"#,
        );
        assert!(!run(&args(path.clone())).unwrap());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_valid_form_reports_true() {
        let path = write_page(
            "valid",
            r#"<form id="f"><input name="N" value="ok" data-val="true" data-val-required="N"></form>"#,
        );
        assert!(run(&args(path.clone())).unwrap());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_form_is_an_error() {
        let path = write_page("missing", "<p>no form</p>");
        let err = run(&args(path.clone())).unwrap_err();
        assert!(format!("{err:#}").contains("element not found: #f"));
        fs::remove_file(path).unwrap();
    }
}
