use std::fmt::Display;

use booru_common::Booru;

use crate::error::ImportError;

/// What happened to a single post.
#[derive(Debug)]
pub enum ImportOutcome {
    Imported,
    Skipped(ImportError),
}

impl ImportOutcome {
    #[inline]
    #[must_use]
    pub const fn is_imported(&self) -> bool {
        matches!(self, Self::Imported)
    }
}

/// Everything that happened while importing from one imageboard.
#[derive(Debug)]
pub struct BackendReport {
    pub booru: Booru,
    /// Number of posts the search yielded.
    pub total: u64,
    /// One entry per post, in the order the imageboard returned them.
    pub outcomes: Vec<ImportOutcome>,
    /// Set when the search itself failed, in which case `outcomes` is empty.
    pub failure: Option<String>,
}

impl BackendReport {
    #[must_use]
    pub const fn new(booru: Booru, total: u64) -> Self {
        Self {
            booru,
            total,
            outcomes: Vec::new(),
            failure: None,
        }
    }

    #[must_use]
    pub fn failed(booru: Booru, reason: String) -> Self {
        Self {
            booru,
            total: 0,
            outcomes: Vec::new(),
            failure: Some(reason),
        }
    }

    pub fn imported(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_imported()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.imported()
    }
}

/// Per imageboard reports of a whole run, in dispatch order.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub reports: Vec<BackendReport>,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.reports.iter().map(BackendReport::imported).sum()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().map(BackendReport::skipped).sum()
    }

    pub fn failed_backends(&self) -> usize {
        self.reports.iter().filter(|r| r.failure.is_some()).count()
    }
}

impl Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "imported {}, skipped {}", self.imported(), self.skipped())
    }
}
