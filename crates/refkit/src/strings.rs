//! String helpers

use regex::{NoExpand, RegexBuilder};

/// Replace `{0}`, `{1}`, ... with the matching argument
///
/// Placeholders are substituted in argument order, so an argument that
/// itself contains a later placeholder gets expanded too.
pub fn string_format(format: &str, args: &[&str]) -> String {
    let mut out = format.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// Case-insensitive equality
pub fn string_equals(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test
pub fn string_contains(full: &str, term: &str) -> bool {
    full.to_lowercase().contains(&term.to_lowercase())
}

/// Replace every literal occurrence of `from` with `to`
pub fn replace_all(haystack: &str, from: &str, to: &str, ignore_case: bool) -> String {
    match RegexBuilder::new(&regex::escape(from))
        .case_insensitive(ignore_case)
        .build()
    {
        Ok(re) => re.replace_all(haystack, NoExpand(to)).into_owned(),
        Err(err) => {
            tracing::debug!(%err, "replace pattern rejected");
            haystack.to_string()
        }
    }
}

/// English digit grouping with at most three fraction digits (`1234.5` -> `1,234.5`)
pub fn comma_format(num: f64) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = format!("{:.3}", num.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if num < 0.0 && rounded.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Whether the text is a finite number
pub fn is_numeric(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Keep only digits and `.`
pub fn filter_decimal(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Present, non-empty and not the literal `"undefined"`
pub fn is_valid_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != "undefined")
}
