//! Value shape checks used by the format rules

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// `\w` is ASCII-only here
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,6})+$",
    )
    .expect("email pattern compiles")
});

// Public-unicast IPv4 or a dotted hostname with an alphabetic TLD. The
// private ranges are rejected in `is_url` since the engine has no lookahead.
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?:(?:https?|ftp):)?//)",
        r"(?:\S+(?::\S*)?@)?",
        r"(?:",
        r"(?P<ip>(?:[1-9][0-9]?|1[0-9][0-9]|2[01][0-9]|22[0-3])",
        r"(?:\.(?:1?[0-9]{1,2}|2[0-4][0-9]|25[0-5])){2}",
        r"(?:\.(?:[1-9][0-9]?|1[0-9][0-9]|2[0-4][0-9]|25[0-4])))",
        r"|",
        r"(?:(?:[a-z\x{00a1}-\x{ffff}0-9]-*)*[a-z\x{00a1}-\x{ffff}0-9]+)",
        r"(?:\.(?:[a-z\x{00a1}-\x{ffff}0-9]-*)*[a-z\x{00a1}-\x{ffff}0-9]+)*",
        r"(?:\.(?:[a-z\x{00a1}-\x{ffff}]{2,})).?",
        r")",
        r"(?::[0-9]{2,5})?",
        r"(?:[/?#]\S*)?$",
    ))
    .expect("url pattern compiles")
});

/// Email address shape
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Absolute (or protocol-relative) URL with a public host
pub fn is_url(value: &str) -> bool {
    let Some(caps) = URL_REGEX.captures(value) else {
        return false;
    };
    match caps.name("ip") {
        Some(ip) => !is_private_ipv4(ip.as_str()),
        None => true,
    }
}

/// Loopback, link-local and RFC 1918 ranges
fn is_private_ipv4(host: &str) -> bool {
    let octets: Vec<u16> = host.split('.').filter_map(|o| o.parse().ok()).collect();
    match octets.as_slice() {
        [10, ..] | [127, ..] => true,
        [169, 254, ..] | [192, 168, ..] => true,
        [172, b, ..] => (16..=31).contains(b),
        _ => false,
    }
}

/// Date-only layouts accepted besides the ISO and RFC forms
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d %Y", "%b %d, %Y"];

/// Whether a value parses as a calendar date or date-time
pub fn is_date(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
}

/// Integer prefix of a string, read the way `parseInt` reads it
///
/// Leading whitespace and a sign are skipped, `0x` switches to hex, and
/// parsing stops at the first non-digit. `None` when no digit was read.
pub fn parse_int(text: &str) -> Option<i64> {
    let mut rest = text.trim_start();
    let negative = match rest.chars().next() {
        Some('-') => {
            rest = &rest[1..];
            true
        }
        Some('+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = match rest.get(..2) {
        Some("0x" | "0X") => {
            rest = &rest[2..];
            16
        }
        _ => 10,
    };

    let mut value: i64 = 0;
    let mut digits = 0;
    for c in rest.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
        digits += 1;
    }

    (digits > 0).then(|| if negative { -value } else { value })
}
