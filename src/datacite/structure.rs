//! DataCite DOI data structures.
//!
//! Raw shapes of the DataCite `/dois` API. Fields whose JSON type varies between
//! repositories (`container`, `publisher`, `description`) are kept as [`Value`] and read
//! only when they have the expected shape.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::roster::{PrimaryMatch, Roster};
use crate::utils::{issued_from_created, parse_author_name, strip_doi_prefix};
use crate::{Author, Publication, Source};

/// A single page returned by the DOIs API, or a bare list of DOI records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DataCitePage {
    Items(Vec<DataCiteWork>),
    Envelope {
        #[serde(default)]
        data: Vec<DataCiteWork>,
    },
}

impl DataCitePage {
    pub(crate) fn into_items(self) -> Vec<DataCiteWork> {
        match self {
            DataCitePage::Envelope { data } => data,
            DataCitePage::Items(items) => items,
        }
    }
}

/// One DataCite DOI record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataCiteWork {
    pub id: Option<String>,
    pub attributes: DataCiteAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataCiteAttributes {
    pub doi: Option<String>,
    pub titles: Vec<DataCiteTitle>,
    pub creators: Vec<DataCiteCreator>,
    pub created: Option<String>,
    pub container: Option<Value>,
    pub publisher: Option<Value>,
    pub description: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataCiteTitle {
    pub title: Option<String>,
}

/// Creator entry, with structured name parts or only a free-text name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataCiteCreator {
    pub name: Option<String>,
    #[serde(rename = "givenName")]
    pub given_name: Option<String>,
    #[serde(rename = "familyName")]
    pub family_name: Option<String>,
}

impl From<&DataCiteCreator> for Author {
    fn from(creator: &DataCiteCreator) -> Self {
        let given = creator.given_name.clone().unwrap_or_default();
        let family = creator.family_name.clone().unwrap_or_default();

        match creator.name.as_deref() {
            Some(name) if given.is_empty() && family.is_empty() && !name.is_empty() => {
                let (family, given) = parse_author_name(name);
                Author { given, family }
            }
            _ => Author { given, family },
        }
    }
}

impl DataCiteAttributes {
    fn title(&self) -> String {
        self.titles
            .first()
            .and_then(|t| t.title.clone())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Container title, falling back to the publisher name.
    fn venue(&self) -> String {
        let container = self
            .container
            .as_ref()
            .and_then(|c| c.as_object())
            .and_then(|c| c.get("title"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !container.is_empty() {
            return container.to_string();
        }

        match &self.publisher {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Object(publisher)) => publisher
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }
}

impl DataCiteWork {
    pub fn authors(&self) -> Vec<Author> {
        self.attributes.creators.iter().map(Author::from).collect()
    }

    /// Converts the record into a [`Publication`], or `None` when it fails the authorship filter.
    pub(crate) fn to_publication(&self, roster: &Roster) -> Option<Publication> {
        let attributes = &self.attributes;
        let authors = self.authors();
        if !roster.accepts(&authors, PrimaryMatch::Contains) {
            debug!(id = ?self.id, "datacite record excluded by authorship filter");
            return None;
        }

        Some(Publication {
            title: attributes.title(),
            authors,
            venue: attributes.venue(),
            doi: attributes
                .doi
                .as_deref()
                .map(strip_doi_prefix)
                .unwrap_or_default(),
            issued: issued_from_created(attributes.created.as_deref(), "Unknown"),
            source: Source::DataCite,
            abstract_text: attributes
                .description
                .as_ref()
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}
