//! Record normalization.
//!
//! Maps raw registry records of either schema onto the common [`Publication`] shape,
//! dropping records that fail the roster's authorship filter.

use crate::crossref::CrossrefWork;
use crate::datacite::DataCiteWork;
use crate::roster::Roster;
use crate::Publication;

/// A raw record tagged with the registry schema it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Crossref(CrossrefWork),
    DataCite(DataCiteWork),
}

impl From<CrossrefWork> for RawRecord {
    fn from(work: CrossrefWork) -> Self {
        RawRecord::Crossref(work)
    }
}

impl From<DataCiteWork> for RawRecord {
    fn from(work: DataCiteWork) -> Self {
        RawRecord::DataCite(work)
    }
}

/// Turns raw registry records into publications for one roster.
#[derive(Debug, Clone)]
pub struct Normalizer {
    roster: Roster,
}

impl Normalizer {
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Normalizes one raw record.
    ///
    /// Returns `None` when the record is not authored by the subject researcher together
    /// with at least one roster member. Never fails: missing or malformed fields fall back
    /// to their defaults.
    pub fn normalize(&self, record: &RawRecord) -> Option<Publication> {
        match record {
            RawRecord::Crossref(work) => work.to_publication(&self.roster),
            RawRecord::DataCite(work) => work.to_publication(&self.roster),
        }
    }

    /// Normalizes a sequence of raw records, keeping input order and skipping excluded ones.
    pub fn normalize_all<'a, I>(&self, records: I) -> Vec<Publication>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| self.normalize(record))
            .collect()
    }
}
