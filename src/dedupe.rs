//! Publication deduplicator implementation.
//!
//! Reconciles publications that describe the same work, either because both registries
//! returned it or because one registry returned it twice. Identity is decided by exact
//! equality of the lower-cased DOI or of the normalized title; there is no fuzzy matching.
//!
//! ## Precedence
//!
//! When two records collide, the surviving record is chosen by:
//!
//! 1. DOI collisions: the newer year wins; on equal years a Crossref record replaces the
//!    existing one.
//! 2. Title collisions: the newer year wins; on equal years a record with a DOI beats one
//!    without, and a Crossref record beats a DataCite record. Otherwise the first record
//!    seen is kept.
//!
//! Unknown years compare as `0`.
//!
//! ## Usage
//!
//! ```rust
//! use publist::dedupe::Deduplicator;
//! use publist::{Issued, Publication, Source};
//!
//! let publication = |title: &str, doi: &str, source| Publication {
//!     title: title.to_string(),
//!     authors: vec![],
//!     venue: String::new(),
//!     doi: doi.to_string(),
//!     issued: Issued {
//!         year: Some(2022),
//!         month_year: "May 2022".to_string(),
//!         month_year_numeric: Some(202205),
//!     },
//!     source,
//!     abstract_text: None,
//! };
//!
//! let candidates = vec![
//!     publication("Deep Learning: A Primer!", "", Source::DataCite),
//!     publication("deep learning a primer", "10.1000/primer", Source::DataCite),
//! ];
//!
//! let unique = Deduplicator::new().resolve(candidates);
//! assert_eq!(unique.len(), 1);
//! assert_eq!(unique[0].doi, "10.1000/primer");
//! ```
//!
//! ## Strategies
//!
//! The default [`ResolutionStrategy::SinglePass`] walks the candidates once with a DOI map and
//! a title map. A record that loses or wins a DOI collision never takes part in a title
//! comparison, so two records linked only through a chain of DOI and title matches may both
//! survive. [`ResolutionStrategy::Transitive`] instead merges every connected group of
//! records sharing a DOI or a normalized title and keeps one winner per group.

use itertools::Itertools;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

use crate::Publication;

/// How duplicate publications are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// One pass over the candidates with separate DOI and title maps.
    #[default]
    SinglePass,
    /// Union of all records connected by a shared DOI or normalized title.
    Transitive,
}

/// Configuration options for controlling the deduplication process.
///
/// # Examples
///
/// ```
/// use publist::dedupe::{Deduplicator, DeduplicatorConfig, ResolutionStrategy};
///
/// let config = DeduplicatorConfig {
///     strategy: ResolutionStrategy::Transitive,
/// };
/// let deduplicator = Deduplicator::new().with_config(config);
/// ```
#[derive(Debug, Default, Clone)]
pub struct DeduplicatorConfig {
    pub strategy: ResolutionStrategy,
}

/// Deduplication engine for publications.
#[derive(Debug, Default, Clone)]
pub struct Deduplicator {
    config: DeduplicatorConfig,
}

/// Canonicalizes a title into an equality key.
///
/// Lower-cases, drops every character that is neither alphanumeric nor whitespace, and
/// collapses whitespace runs into single spaces. Applying it twice gives the same result as
/// applying it once.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

impl Deduplicator {
    /// Creates a new Deduplicator using the single-pass strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: DeduplicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Reduces the candidates to one publication per identity.
    ///
    /// The result keeps the order in which each identity was first seen.
    pub fn resolve(&self, candidates: Vec<Publication>) -> Vec<Publication> {
        match self.config.strategy {
            ResolutionStrategy::SinglePass => Self::resolve_single_pass(candidates),
            ResolutionStrategy::Transitive => Self::resolve_transitive(candidates),
        }
    }

    fn resolve_single_pass(candidates: Vec<Publication>) -> Vec<Publication> {
        let mut by_doi: HashMap<String, usize> = HashMap::new();
        let mut by_title: HashMap<String, usize> = HashMap::new();
        let mut title_order: Vec<String> = Vec::new();

        for (idx, candidate) in candidates.iter().enumerate() {
            let title_key = normalize_title(&candidate.title);

            if let Some(doi_key) = candidate.doi_key() {
                match by_doi.entry(doi_key) {
                    Entry::Occupied(mut entry) => {
                        let existing = &candidates[*entry.get()];
                        if Self::wins_doi_collision(candidate, existing) {
                            debug!(
                                doi = %candidate.doi,
                                source = %candidate.source,
                                "replacing record with the same DOI"
                            );
                            // Title entry still holding the displaced DOI follows the replacement
                            if let Some(slot) = by_title.get_mut(&title_key)
                                && candidates[*slot].doi == existing.doi
                            {
                                *slot = idx;
                            }
                            entry.insert(idx);
                        }
                        continue;
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(idx);
                    }
                }
            }

            match by_title.entry(title_key) {
                Entry::Vacant(entry) => {
                    title_order.push(entry.key().clone());
                    entry.insert(idx);
                }
                Entry::Occupied(mut entry) => {
                    if Self::wins_title_collision(candidate, &candidates[*entry.get()]) {
                        debug!(
                            title = %candidate.title,
                            source = %candidate.source,
                            "replacing record with the same title"
                        );
                        entry.insert(idx);
                    }
                }
            }
        }

        let survivors: Vec<usize> = title_order
            .iter()
            .filter_map(|title| by_title.get(title).copied())
            .collect();
        Self::take_in_order(candidates, &survivors)
    }

    fn resolve_transitive(candidates: Vec<Publication>) -> Vec<Publication> {
        let mut dsu = DisjointSet::new(candidates.len());
        let mut first_by_doi: HashMap<String, usize> = HashMap::new();
        let mut first_by_title: HashMap<String, usize> = HashMap::new();

        for (idx, candidate) in candidates.iter().enumerate() {
            if let Some(doi_key) = candidate.doi_key() {
                let first = *first_by_doi.entry(doi_key).or_insert(idx);
                dsu.union(first, idx);
            }
            let first = *first_by_title
                .entry(normalize_title(&candidate.title))
                .or_insert(idx);
            dsu.union(first, idx);
        }

        // Components in order of their first member; a winner is only replaced by a
        // strictly better record
        let mut winners: Vec<usize> = Vec::new();
        let mut slot_by_root: HashMap<usize, usize> = HashMap::new();
        for idx in 0..candidates.len() {
            let root = dsu.find(idx);
            match slot_by_root.entry(root) {
                Entry::Vacant(entry) => {
                    entry.insert(winners.len());
                    winners.push(idx);
                }
                Entry::Occupied(entry) => {
                    let winner = &mut winners[*entry.get()];
                    if Self::wins_title_collision(&candidates[idx], &candidates[*winner]) {
                        *winner = idx;
                    }
                }
            }
        }

        Self::take_in_order(candidates, &winners)
    }

    /// Newer year wins; on equal years Crossref replaces the existing record.
    fn wins_doi_collision(candidate: &Publication, existing: &Publication) -> bool {
        let year = candidate.issued.year_or_zero();
        let existing_year = existing.issued.year_or_zero();

        year > existing_year || (year == existing_year && candidate.source.is_preferred())
    }

    /// Newer year wins; on equal years having a DOI or coming from Crossref wins.
    fn wins_title_collision(candidate: &Publication, existing: &Publication) -> bool {
        let year = candidate.issued.year_or_zero();
        let existing_year = existing.issued.year_or_zero();

        year > existing_year
            || (year == existing_year && candidate.has_doi() && !existing.has_doi())
            || (year == existing_year
                && candidate.source.is_preferred()
                && !existing.source.is_preferred())
    }

    fn take_in_order(candidates: Vec<Publication>, indices: &[usize]) -> Vec<Publication> {
        let mut slots: Vec<Option<Publication>> = candidates.into_iter().map(Some).collect();
        indices
            .iter()
            .filter_map(|&idx| slots.get_mut(idx).and_then(Option::take))
            .collect()
    }
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, left: usize, right: usize) {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return;
        }

        match self.rank[left_root].cmp(&self.rank[right_root]) {
            std::cmp::Ordering::Less => self.parent[left_root] = right_root,
            std::cmp::Ordering::Greater => self.parent[right_root] = left_root,
            std::cmp::Ordering::Equal => {
                self.parent[right_root] = left_root;
                self.rank[left_root] += 1;
            }
        }
    }
}
