//! Crossref works parser implementation.
//!
//! Provides functionality to read a Crossref `/works` response page into raw records.
//!
//! # Example
//!
//! ```
//! use publist::{CrossrefParser, RawRecord, RegistryParser};
//!
//! let input = r#"{"message": {"items": [
//!     {"title": ["Example Title"], "DOI": "10.1000/example"}
//! ]}}"#;
//!
//! let parser = CrossrefParser::new();
//!
//! let records = parser.parse(input).unwrap();
//! match &records[0] {
//!     RawRecord::Crossref(work) => assert_eq!(work.title[0], "Example Title"),
//!     RawRecord::DataCite(_) => unreachable!(),
//! }
//! ```

mod structure;

pub use structure::{CrossrefAuthor, CrossrefDate, CrossrefWork};

use crate::crossref::structure::CrossrefPage;
use crate::{RawRecord, RegistryParser, Result};

/// Parser for Crossref works API responses.
///
/// Accepts either the full response envelope (`{"message": {"items": [...]}}`) or a bare
/// JSON array of work items.
#[derive(Debug, Clone, Default)]
pub struct CrossrefParser {}

impl CrossrefParser {
    /// Creates a new Crossref parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use publist::CrossrefParser;
    /// let parser = CrossrefParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryParser for CrossrefParser {
    /// Parses a Crossref response page.
    ///
    /// # Errors
    ///
    /// Returns `PublistError::InvalidFormat` if the input is not a works page
    fn parse(&self, input: &str) -> Result<Vec<RawRecord>> {
        let page: CrossrefPage = serde_json::from_str(input)?;
        Ok(page.into_items().into_iter().map(RawRecord::Crossref).collect())
    }
}
