//! Ordering and assembly of the final publication list.
//!
//! [`Pipeline`] runs the whole reconciliation: normalize every raw record, resolve duplicates,
//! then sort newest first with [`finalize`].

use std::cmp::Reverse;
use tracing::info;

use crate::dedupe::Deduplicator;
use crate::normalize::{Normalizer, RawRecord};
use crate::{Publication, Source};

/// Sorts publications newest first by their `YYYYMM` key.
///
/// Publications without a key sort last. The sort is stable, so publications with equal
/// keys keep their relative order.
pub fn finalize(mut publications: Vec<Publication>) -> Vec<Publication> {
    publications.sort_by_key(|p| Reverse(p.issued.month_year_numeric.unwrap_or(0)));
    publications
}

/// Counts describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Raw records received
    pub records: usize,
    /// Raw records dropped by the authorship filter
    pub excluded: usize,
    /// Publications entering deduplication
    pub candidates: usize,
    /// Publications in the final list
    pub published: usize,
    pub from_crossref: usize,
    pub from_datacite: usize,
    /// Candidates merged into another publication
    pub duplicates_removed: usize,
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub publications: Vec<Publication>,
    pub summary: Summary,
}

/// Normalize, deduplicate and order registry records.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    deduplicator: Deduplicator,
}

impl Pipeline {
    #[must_use]
    pub fn new(normalizer: Normalizer, deduplicator: Deduplicator) -> Self {
        Self {
            normalizer,
            deduplicator,
        }
    }

    /// Runs the pipeline over raw records in the given order.
    pub fn run<I>(&self, records: I) -> PipelineOutput
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let records: Vec<RawRecord> = records.into_iter().collect();
        let candidates = self.normalizer.normalize_all(&records);
        info!(
            records = records.len(),
            candidates = candidates.len(),
            "publications before deduplication"
        );

        let candidate_count = candidates.len();
        let publications = finalize(self.deduplicator.resolve(candidates));

        let count_from = |source: Source| {
            publications
                .iter()
                .filter(|p| p.source == source)
                .count()
        };
        let summary = Summary {
            records: records.len(),
            excluded: records.len() - candidate_count,
            candidates: candidate_count,
            published: publications.len(),
            from_crossref: count_from(Source::Crossref),
            from_datacite: count_from(Source::DataCite),
            duplicates_removed: candidate_count - publications.len(),
        };
        info!(
            published = summary.published,
            from_crossref = summary.from_crossref,
            from_datacite = summary.from_datacite,
            duplicates_removed = summary.duplicates_removed,
            "publications after deduplication"
        );

        PipelineOutput {
            publications,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{PersonName, Roster};
    use crate::{CrossrefParser, DataCiteParser, Issued, RegistryParser};
    use pretty_assertions::assert_eq;

    fn keyed(title: &str, key: Option<u32>) -> Publication {
        Publication {
            title: title.to_string(),
            authors: vec![],
            venue: String::new(),
            doi: String::new(),
            issued: Issued {
                year: key.map(|k| (k / 100) as i32),
                month_year: String::new(),
                month_year_numeric: key,
            },
            source: Source::Crossref,
            abstract_text: None,
        }
    }

    fn pipeline() -> Pipeline {
        let roster = Roster::new(
            PersonName::new("Vlado", "Menkovski"),
            vec!["Rachna Ramesh".to_string(), "Mahdi Mehmanchi".to_string()],
        )
        .unwrap();
        Pipeline::new(Normalizer::new(roster), Deduplicator::new())
    }

    #[test]
    fn test_finalize_stable_descending() {
        let publications = vec![
            keyed("a", Some(202303)),
            keyed("b", Some(202301)),
            keyed("c", None),
            keyed("d", Some(202303)),
        ];

        let ordered = finalize(publications);
        let titles: Vec<&str> = ordered.iter().map(|p| p.title.as_str()).collect();
        let keys: Vec<Option<u32>> = ordered.iter().map(|p| p.issued.month_year_numeric).collect();
        assert_eq!(keys, vec![Some(202303), Some(202303), Some(202301), None]);
        assert_eq!(titles, vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_finalize_unknown_keys_keep_order() {
        let ordered = finalize(vec![keyed("x", None), keyed("y", None), keyed("z", Some(190001))]);
        let titles: Vec<&str> = ordered.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["z", "x", "y"]);
    }

    #[test]
    fn test_same_doi_across_registries() {
        let crossref = r#"{"message": {"items": [{
            "title": ["Learning Dynamics"],
            "author": [
                {"given": "Vlado", "family": "Menkovski"},
                {"given": "Rachna", "family": "Ramesh"}
            ],
            "DOI": "10.1/ABC",
            "created": {"date-time": "2022-06-10T08:00:00Z"}
        }]}}"#;
        let datacite = r#"{"data": [{"attributes": {
            "doi": "https://doi.org/10.1/abc",
            "titles": [{"title": "Learning dynamics (preprint)"}],
            "creators": [{"name": "Ramesh, Rachna"}, {"name": "Menkovski, Vlado"}],
            "created": "2022-02-01T08:00:00Z"
        }}]}"#;

        let mut records = CrossrefParser::new().parse(crossref).unwrap();
        records.extend(DataCiteParser::new().parse(datacite).unwrap());

        let output = pipeline().run(records);
        assert_eq!(output.publications.len(), 1);
        let publication = &output.publications[0];
        assert!(publication.doi.eq_ignore_ascii_case("10.1/abc"));
        assert_eq!(publication.source, Source::Crossref);
        assert_eq!(output.summary.duplicates_removed, 1);
    }

    #[test]
    fn test_run_summary_and_order() {
        let crossref = r#"[
            {
                "title": ["Old Paper"],
                "author": [
                    {"given": "Vlado", "family": "Menkovski"},
                    {"given": "Mahdi", "family": "Mehmanchi"}
                ],
                "DOI": "10.1/old",
                "created": {"date-time": "2019-04-01T00:00:00Z"}
            },
            {
                "title": ["Someone Else"],
                "author": [{"given": "Jane", "family": "Doe"}],
                "DOI": "10.1/else",
                "created": {"date-time": "2024-04-01T00:00:00Z"}
            }
        ]"#;
        let datacite = r#"[
            {"attributes": {
                "titles": [{"title": "New Dataset"}],
                "creators": [{"name": "Vlado Menkovski"}, {"name": "Rachna Ramesh"}],
                "publisher": "Zenodo",
                "created": "2023-09-15T00:00:00Z"
            }},
            {"attributes": {
                "titles": [{"title": "Undated Notes"}],
                "creators": [{"name": "Menkovski, Vlado"}, {"name": "Mehmanchi, Mahdi"}]
            }},
            {"attributes": {
                "titles": [{"title": "old paper"}],
                "creators": [{"name": "Menkovski, Vlado"}, {"name": "Mehmanchi, Mahdi"}],
                "created": "2019-01-01T00:00:00Z"
            }}
        ]"#;

        let mut records = CrossrefParser::new().parse(crossref).unwrap();
        records.extend(DataCiteParser::new().parse(datacite).unwrap());

        let output = pipeline().run(records);
        let titles: Vec<&str> = output.publications.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New Dataset", "Old Paper", "Undated Notes"]);
        assert_eq!(
            output.summary,
            Summary {
                records: 5,
                excluded: 1,
                candidates: 4,
                published: 3,
                from_crossref: 1,
                from_datacite: 2,
                duplicates_removed: 1,
            }
        );
    }
}
