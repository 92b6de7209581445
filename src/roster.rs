//! Authorship configuration.
//!
//! A [`Roster`] names the subject researcher whose publications are collected and the
//! members of their group. A record is only kept when the subject researcher is one of its
//! authors and at least one other author is on the roster.
//!
//! # Example
//!
//! ```
//! use publist::roster::Roster;
//!
//! let roster = Roster::from_toml_str(r#"
//! members = ["Charles Babbage", "Mary Somerville"]
//!
//! [primary]
//! given = "Ada"
//! family = "Lovelace"
//! "#).unwrap();
//!
//! assert_eq!(roster.members.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Author, PublistError, Result};

/// A person identified by given and family name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

impl PersonName {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }
}

/// How strictly an author has to match the subject researcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryMatch {
    /// Given and family names must be equal.
    Exact,
    /// Given and family names must contain the configured names.
    Contains,
}

/// Subject researcher and group roster used to filter registry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// The researcher whose publications are collected
    pub primary: PersonName,
    /// Full names of group members, e.g. "Given Family"
    #[serde(default)]
    pub members: Vec<String>,
}

impl Roster {
    /// Builds a roster from a subject researcher and the group members' full names.
    ///
    /// # Errors
    ///
    /// Returns `PublistError::InvalidConfig` if the subject researcher's given or family
    /// name is empty.
    pub fn new(primary: PersonName, members: Vec<String>) -> Result<Self> {
        let roster = Self { primary, members };
        roster.validate()?;
        Ok(roster)
    }

    /// Parses a roster from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `PublistError::InvalidConfig` if the text is not valid TOML, does not describe a
    /// roster, or leaves the subject researcher's name empty.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let roster: Roster = toml::from_str(input)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Reads a roster from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.primary.given.trim().is_empty() || self.primary.family.trim().is_empty() {
            return Err(PublistError::InvalidConfig(
                "primary author needs both a given and a family name".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks whether an author is the subject researcher.
    pub fn is_primary(&self, author: &Author, mode: PrimaryMatch) -> bool {
        match mode {
            PrimaryMatch::Exact => {
                author.given == self.primary.given && author.family == self.primary.family
            }
            PrimaryMatch::Contains => {
                author.given.contains(self.primary.given.as_str())
                    && author.family.contains(self.primary.family.as_str())
            }
        }
    }

    /// Checks whether an author's given and family names are both tokens of the same
    /// roster member's full name.
    pub fn is_member(&self, author: &Author) -> bool {
        self.members.iter().any(|member| {
            let mut tokens = member.split_whitespace();
            let has_given = tokens.clone().any(|t| t == author.given);
            has_given && tokens.any(|t| t == author.family)
        })
    }

    /// Applies the authorship filter to an author list.
    ///
    /// Passes when the subject researcher is present and at least one other author is on
    /// the roster.
    pub fn accepts(&self, authors: &[Author], mode: PrimaryMatch) -> bool {
        let mut has_primary = false;
        let mut has_member = false;

        for author in authors {
            if self.is_primary(author, mode) {
                has_primary = true;
            } else if self.is_member(author) {
                has_member = true;
            }
        }

        has_primary && has_member
    }
}
