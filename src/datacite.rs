//! DataCite DOIs parser implementation.
//!
//! Provides functionality to read a DataCite `/dois` response page into raw records.
//!
//! # Example
//!
//! ```
//! use publist::{DataCiteParser, RawRecord, RegistryParser};
//!
//! let input = r#"{"data": [
//!     {"id": "10.5281/zenodo.1", "attributes": {"titles": [{"title": "Example Dataset"}]}}
//! ]}"#;
//!
//! let records = DataCiteParser::new().parse(input).unwrap();
//! assert!(matches!(records[0], RawRecord::DataCite(_)));
//! ```

mod structure;

pub use structure::{DataCiteAttributes, DataCiteCreator, DataCiteTitle, DataCiteWork};

use crate::datacite::structure::DataCitePage;
use crate::{RawRecord, RegistryParser, Result};

/// Parser for DataCite DOIs API responses.
///
/// Accepts either the JSON:API envelope (`{"data": [...]}`) or a bare JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct DataCiteParser {}

impl DataCiteParser {
    /// Creates a new DataCite parser instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistryParser for DataCiteParser {
    fn parse(&self, input: &str) -> Result<Vec<RawRecord>> {
        let page: DataCitePage = serde_json::from_str(input)?;
        Ok(page.into_items().into_iter().map(RawRecord::DataCite).collect())
    }
}
