//! A library for building a research group's publication list from bibliographic registries.
//!
//! `publist` takes the raw work records returned by two registries, keeps the ones written by
//! a subject researcher together with at least one member of their group, reconciles records
//! that describe the same publication, and emits a normalized list sorted newest first.
//!
//! # Key Features
//!
//! - **Two Registry Schemas**: Normalize records from:
//!   - Crossref (citation-graph style works API)
//!   - DataCite (research-data repository API)
//!
//! - **Authorship Filtering**:
//!   - Subject researcher must be an author
//!   - At least one co-author must be on the group roster
//!   - Roster is plain configuration, loadable from TOML
//!
//! - **Deterministic Deduplication**:
//!   - DOI matching (case-insensitive, URL prefix stripped)
//!   - Normalized title matching
//!   - Newest year wins, then records with a DOI, then Crossref
//!
//! # Basic Usage
//!
//! ```rust
//! use publist::{CrossrefParser, RegistryParser};
//! use publist::normalize::Normalizer;
//! use publist::roster::{PersonName, Roster};
//!
//! let roster = Roster::new(
//!     PersonName::new("Ada", "Lovelace"),
//!     vec!["Charles Babbage".to_string()],
//! )
//! .unwrap();
//!
//! let input = r#"{"message": {"items": [{
//!     "title": ["Notes on the Analytical Engine"],
//!     "author": [
//!         {"given": "Ada", "family": "Lovelace"},
//!         {"given": "Charles", "family": "Babbage"}
//!     ],
//!     "DOI": "10.1000/engine",
//!     "created": {"date-time": "2023-03-01T10:00:00Z"}
//! }]}}"#;
//!
//! let records = CrossrefParser::new().parse(input).unwrap();
//! let normalizer = Normalizer::new(roster);
//! let publication = normalizer.normalize(&records[0]).unwrap();
//! assert_eq!(publication.issued.month_year, "March 2023");
//! ```
//!
//! # Full Pipeline
//!
//! ```rust
//! use publist::dedupe::Deduplicator;
//! use publist::normalize::Normalizer;
//! use publist::pipeline::Pipeline;
//! use publist::roster::{PersonName, Roster};
//!
//! let roster = Roster::new(PersonName::new("Ada", "Lovelace"), vec![]).unwrap();
//! let pipeline = Pipeline::new(Normalizer::new(roster), Deduplicator::new());
//! let output = pipeline.run(Vec::new());
//! assert!(output.publications.is_empty());
//! ```
//!
//! # Error Handling
//!
//! Normalization, deduplication and ordering never fail. Errors only come from reading
//! registry payloads, configuration and writing output, and use the crate [`Result`] type
//! wrapping [`PublistError`]:
//!
//! ```rust
//! use publist::{DataCiteParser, PublistError, RegistryParser};
//!
//! match DataCiteParser::new().parse("not json") {
//!     Ok(records) => println!("Parsed {} records", records.len()),
//!     Err(PublistError::InvalidFormat(msg)) => eprintln!("Parse error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod crossref;
pub mod datacite;
pub mod dedupe;
pub mod normalize;
pub mod output;
pub mod pipeline;
mod regex;
pub mod roster;
mod utils;

// Reexports
pub use crossref::CrossrefParser;
pub use datacite::DataCiteParser;
pub use dedupe::normalize_title;
pub use normalize::RawRecord;

/// A specialized Result type for publication list operations.
pub type Result<T> = std::result::Result<T, PublistError>;

/// Represents errors that can occur while reading registry data, configuration or writing output.
#[derive(Error, Debug)]
pub enum PublistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PublistError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            PublistError::Io(err.into())
        } else {
            PublistError::InvalidFormat(err.to_string())
        }
    }
}

impl From<toml::de::Error> for PublistError {
    fn from(err: toml::de::Error) -> Self {
        PublistError::InvalidConfig(err.to_string())
    }
}

/// Represents an author of a publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// The author's given name (first name)
    pub given: String,
    /// The author's family name (surname)
    pub family: String,
}

impl Author {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }
}

/// When a publication record was created upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issued {
    /// Creation year, if known
    pub year: Option<i32>,
    /// Human readable label, e.g. "March 2023"
    pub month_year: String,
    /// `YYYYMM` sort key, set only when both year and month are known
    pub month_year_numeric: Option<u32>,
}

impl Issued {
    /// Year used for comparisons; unknown years compare as `0`.
    pub fn year_or_zero(&self) -> i32 {
        self.year.unwrap_or(0)
    }
}

/// Registry a publication record came from.
///
/// Crossref is the preferred source when two otherwise equal records compete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Crossref,
    DataCite,
}

impl Source {
    pub fn is_preferred(self) -> bool {
        self == Source::Crossref
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Crossref => f.write_str("crossref"),
            Source::DataCite => f.write_str("datacite"),
        }
    }
}

/// A publication in the common schema shared by both registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Title of the work
    pub title: String,
    /// Authors in the order given by the registry
    pub authors: Vec<Author>,
    /// Journal, conference or repository name
    pub venue: String,
    /// Digital Object Identifier without URL prefix, possibly empty
    pub doi: String,
    pub issued: Issued,
    pub source: Source,
    /// Abstract text without markup
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl Publication {
    /// Lower-cased DOI used as an identity key, `None` when the record has no DOI.
    pub fn doi_key(&self) -> Option<String> {
        if self.doi.is_empty() {
            None
        } else {
            Some(self.doi.to_lowercase())
        }
    }

    pub fn has_doi(&self) -> bool {
        !self.doi.is_empty()
    }
}

/// Trait for implementing registry response parsers.
pub trait RegistryParser {
    /// Parse one registry response page into raw records.
    ///
    /// # Arguments
    ///
    /// * `input` - The JSON body returned by the registry
    ///
    /// # Errors
    ///
    /// Returns `PublistError` if the page as a whole is malformed. Records inside a
    /// well-formed page never cause an error; missing fields take their defaults.
    fn parse(&self, input: &str) -> Result<Vec<RawRecord>>;
}
