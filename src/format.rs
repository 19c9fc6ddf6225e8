//! Pluggable string-format checks for the `format` keyword.
//!
//! An unrecognised format name is accepted: this table only ever narrows what
//! already passed the `string` type check, it never introduces an unknown-format failure.
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::net::IpAddr;
use std::str::FromStr;

lazy_static::lazy_static! {
    static ref HOSTNAME_LABEL_RE: Regex = Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap();
    static ref URI_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s]*$").unwrap();
    static ref URI_REFERENCE_RE: Regex = Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?$").unwrap();
    static ref JSON_POINTER_RE: Regex = Regex::new(r"^(/(([^/~])|(~[01]))*)*$").unwrap();
    static ref RELATIVE_JSON_POINTER_RE: Regex =
        Regex::new(r"^(?:0|[1-9][0-9]*)(?:#|(?:/(?:[^~/]|~0|~1)*)*)$").unwrap();
    static ref TIME_RE: Regex = Regex::new(
        r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])(\.[0-9]+)?(([Zz])|([+\-]([01][0-9]|2[0-3]):[0-5][0-9]))$",
    ).unwrap();
}

pub(crate) fn check(format: &str, instance: &str) -> bool {
    match format {
        "date" => date(instance),
        "date-time" => date_time(instance),
        "email" | "idn-email" => email(instance),
        "hostname" | "idn-hostname" => hostname(instance),
        "ipv4" => ipv4(instance),
        "ipv6" => ipv6(instance),
        "json-pointer" => JSON_POINTER_RE.is_match(instance),
        "relative-json-pointer" => RELATIVE_JSON_POINTER_RE.is_match(instance),
        "regex" => Regex::new(instance).is_ok(),
        "time" => TIME_RE.is_match(instance),
        "uri" => URI_RE.is_match(instance),
        "uri-reference" | "iri-reference" => URI_REFERENCE_RE.is_match(instance),
        // Unknown formats (including ones this table doesn't model, like
        // `uri-template`) are accepted rather than rejected.
        _ => true,
    }
}

fn date(instance: &str) -> bool {
    NaiveDate::parse_from_str(instance, "%Y-%m-%d").is_ok()
}

fn date_time(instance: &str) -> bool {
    DateTime::parse_from_rfc3339(instance).is_ok()
}

fn email(instance: &str) -> bool {
    match instance.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && domain.contains('.'),
        None => false,
    }
}

fn hostname(instance: &str) -> bool {
    !instance.is_empty()
        && instance.chars().count() <= 255
        && instance
            .split('.')
            .all(|label| label.chars().count() <= 63 && HOSTNAME_LABEL_RE.is_match(label))
}

fn ipv4(instance: &str) -> bool {
    matches!(IpAddr::from_str(instance), Ok(IpAddr::V4(_)))
}

fn ipv6(instance: &str) -> bool {
    matches!(IpAddr::from_str(instance), Ok(IpAddr::V6(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("date", "2020-01-02", true)]
    #[test_case("date", "not-a-date", false)]
    #[test_case("date-time", "2020-01-02T03:04:05Z", true)]
    #[test_case("date-time", "2020-01-02", false)]
    #[test_case("email", "a@b.com", true)]
    #[test_case("email", "not-an-email", false)]
    #[test_case("hostname", "example.com", true)]
    #[test_case("hostname", "-bad.com", false)]
    #[test_case("ipv4", "127.0.0.1", true)]
    #[test_case("ipv4", "::1", false)]
    #[test_case("ipv6", "::1", true)]
    #[test_case("ipv6", "127.0.0.1", false)]
    #[test_case("regex", "^[a-z]+$", true)]
    #[test_case("regex", "(unterminated", false)]
    #[test_case("made-up-format", "anything", true)]
    fn format_checks(format: &str, instance: &str, expected: bool) {
        assert_eq!(check(format, instance), expected);
    }
}
