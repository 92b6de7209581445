//! Crossref works data structures.
//!
//! Raw shapes of the Crossref `/works` API, deserialized leniently: every field the
//! normalizer does not strictly need is optional, and unknown fields are ignored.

use serde::Deserialize;
use tracing::debug;

use crate::roster::{PrimaryMatch, Roster};
use crate::utils::{issued_from_created, strip_markup};
use crate::{Author, Publication, Source};

/// A single page returned by the works API, or a bare list of works.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CrossrefPage {
    Items(Vec<CrossrefWork>),
    Envelope { message: CrossrefMessage },
}

impl CrossrefPage {
    pub(crate) fn into_items(self) -> Vec<CrossrefWork> {
        match self {
            CrossrefPage::Envelope { message } => message.items,
            CrossrefPage::Items(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CrossrefMessage {
    #[serde(default)]
    pub(crate) items: Vec<CrossrefWork>,
}

/// One Crossref work record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrossrefWork {
    pub title: Vec<String>,
    pub author: Vec<CrossrefAuthor>,
    #[serde(rename = "container-title")]
    pub container_title: Vec<String>,
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    pub created: Option<CrossrefDate>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// Author entry with structured name parts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrossrefAuthor {
    pub given: Option<String>,
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrossrefDate {
    #[serde(rename = "date-time")]
    pub date_time: Option<String>,
}

impl From<&CrossrefAuthor> for Author {
    fn from(author: &CrossrefAuthor) -> Self {
        Author {
            given: author.given.clone().unwrap_or_default(),
            family: author.family.clone().unwrap_or_default(),
        }
    }
}

impl CrossrefWork {
    pub fn authors(&self) -> Vec<Author> {
        self.author.iter().map(Author::from).collect()
    }

    /// Converts the work into a [`Publication`], or `None` when it fails the authorship filter.
    pub(crate) fn to_publication(&self, roster: &Roster) -> Option<Publication> {
        let authors = self.authors();
        if !roster.accepts(&authors, PrimaryMatch::Exact) {
            debug!(title = ?self.title.first(), "crossref work excluded by authorship filter");
            return None;
        }

        let created = self.created.as_ref().and_then(|c| c.date_time.as_deref());

        Some(Publication {
            title: self
                .title
                .first()
                .cloned()
                .unwrap_or_else(|| "Untitled".to_string()),
            authors,
            venue: self.container_title.first().cloned().unwrap_or_default(),
            doi: self.doi.clone().unwrap_or_default(),
            issued: issued_from_created(created, ""),
            source: Source::Crossref,
            abstract_text: self
                .abstract_text
                .as_deref()
                .map(|text| strip_markup(text).trim().to_string())
                .filter(|text| !text.is_empty()),
        })
    }
}
