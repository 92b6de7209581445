use crate::Issued;
use crate::regex::Regex;
use chrono::{Datelike, Month, NaiveDateTime};
use std::sync::LazyLock;

static MARKUP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

const DOI_URL_PREFIX: &str = "https://doi.org/";

/// Creation timestamp format shared by both registries.
const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Removes the `https://doi.org/` resolver prefix from a DOI, if present.
///
/// # Arguments
///
/// * `doi_str` - The DOI string to format
pub fn strip_doi_prefix(doi_str: &str) -> String {
    doi_str
        .strip_prefix(DOI_URL_PREFIX)
        .unwrap_or(doi_str)
        .to_string()
}

/// Removes anything that looks like a markup tag (`<...>`) from a piece of text.
pub fn strip_markup(text: &str) -> String {
    MARKUP_REGEX.replace_all(text, "").into_owned()
}

/// Parses a registry creation timestamp into `(year, month)`.
///
/// Accepts `YYYY-MM-DDTHH:MM:SSZ` with optional fractional seconds; anything else is
/// treated as unknown.
pub fn parse_created(created: &str) -> Option<(i32, u32)> {
    let created = created.trim();
    if created.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(created, CREATED_FORMAT)
        .ok()
        .map(|date| (date.year(), date.month()))
}

/// English name of a month, `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Builds the issued block of a publication from an optional creation timestamp.
///
/// # Arguments
///
/// * `created` - The raw timestamp, if the registry provided one
/// * `unknown_label` - Label used when not even the year is known
pub fn issued_from_created(created: Option<&str>, unknown_label: &str) -> Issued {
    let Some((year, month)) = created.and_then(parse_created) else {
        return Issued {
            year: None,
            month_year: unknown_label.to_string(),
            month_year_numeric: None,
        };
    };

    let month_year = match month_name(month) {
        Some(name) => format!("{name} {year}"),
        None => year.to_string(),
    };
    let month_year_numeric = u32::try_from(year)
        .ok()
        .filter(|_| (1..=12).contains(&month))
        .map(|y| y * 100 + month);

    Issued {
        year: Some(year),
        month_year,
        month_year_numeric,
    }
}

/// Helper function to parse free-text author names into `(family, given)`.
///
/// Handles "Family, Given" and "Given Middle Family". A single token is taken as the
/// family name with an empty given name.
pub fn parse_author_name(name: &str) -> (String, String) {
    if let Some((family, given)) = name.split_once(',') {
        return (family.trim().to_string(), given.trim().to_string());
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.split_last() {
        None => (String::new(), String::new()),
        Some((family, [])) => (family.to_string(), String::new()),
        Some((family, given)) => (family.to_string(), given.join(" ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[test]
    fn test_strip_doi_prefix() {
        let test_cases = vec![
            ("10.1000/test", "10.1000/test"),
            ("https://doi.org/10.1000/test", "10.1000/test"),
            ("https://doi.org/10.1000/TEST", "10.1000/TEST"),
            ("http://dx.doi.org/10.1000/test", "http://dx.doi.org/10.1000/test"),
            ("", ""),
        ];

        for (input, expected) in test_cases {
            assert_eq!(strip_doi_prefix(input), expected);
        }
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<jats:p>Deep <jats:italic>models</jats:italic> work.</jats:p>"),
            "Deep models work."
        );
        assert_eq!(strip_markup("a < b and c > d"), "a  d");
        assert_eq!(strip_markup("plain text"), "plain text");
    }

    #[rstest]
    #[case("2023-03-14T09:26:53Z", Some((2023, 3)))]
    #[case("1999-12-31T23:59:59Z", Some((1999, 12)))]
    #[case("2021-03-04T12:34:56.000Z", Some((2021, 3)))]
    #[case("2021-03-04T12:34:56.123456Z", Some((2021, 3)))]
    #[case("", None)]
    #[case("2023-03-14", None)]
    #[case("2023-13-14T09:26:53Z", None)]
    #[case("yesterday", None)]
    fn test_parse_created(#[case] input: &str, #[case] expected: Option<(i32, u32)>) {
        assert_eq!(parse_created(input), expected);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(9), Some("September"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_issued_from_created() {
        let issued = issued_from_created(Some("2022-07-01T00:00:00Z"), "Unknown");
        assert_eq!(issued.year, Some(2022));
        assert_eq!(issued.month_year, "July 2022");
        assert_eq!(issued.month_year_numeric, Some(202207));

        let unknown = issued_from_created(None, "Unknown");
        assert_eq!(unknown.year, None);
        assert_eq!(unknown.month_year, "Unknown");
        assert_eq!(unknown.month_year_numeric, None);

        let malformed = issued_from_created(Some("July 2022"), "");
        assert_eq!(malformed.month_year, "");
        assert_eq!(malformed.month_year_numeric, None);
    }

    #[test]
    fn test_parse_author_name() {
        // Test standard format "LastName, FirstName"
        let (family, given) = parse_author_name("Smith, John");
        assert_eq!(family, "Smith");
        assert_eq!(given, "John");

        // Only the first comma splits
        let (family, given) = parse_author_name("Smith, John, Jr.");
        assert_eq!(family, "Smith");
        assert_eq!(given, "John, Jr.");

        // Test format without comma "FirstName LastName"
        let (family, given) = parse_author_name("John Smith");
        assert_eq!(family, "Smith");
        assert_eq!(given, "John");

        // Middle names stay with the given name
        let (family, given) = parse_author_name("Kiet Bennema ten Brinke");
        assert_eq!(family, "Brinke");
        assert_eq!(given, "Kiet Bennema ten");

        // Test single name
        let (family, given) = parse_author_name("Consortium");
        assert_eq!(family, "Consortium");
        assert_eq!(given, "");

        // Test empty string
        let (family, given) = parse_author_name("");
        assert_eq!(family, "");
        assert_eq!(given, "");

        // Test with multiple spaces
        let (family, given) = parse_author_name("John    von   Neumann");
        assert_eq!(family, "Neumann");
        assert_eq!(given, "John von");
    }
}
