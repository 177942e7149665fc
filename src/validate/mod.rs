//! Invariant checks over a loaded search table.
//!
//! A well-formed table has unique keys, at least one anchor per entry,
//! non-empty links and owner descriptions, and keys that agree with their
//! labels under the generator's normalization rules.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::index::{key, SearchEntry};
use crate::script::entities;

/// Kind of table defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueKind {
    DuplicateKey,
    EmptyLabel,
    EmptyTargets,
    EmptyHref,
    EmptyOwner,
    MalformedKey,
    KeyLabelMismatch,
}

impl IssueKind {
    fn describe(&self) -> &'static str {
        match self {
            IssueKind::DuplicateKey => "duplicate key",
            IssueKind::EmptyLabel => "empty label",
            IssueKind::EmptyTargets => "no targets",
            IssueKind::EmptyHref => "empty anchor link",
            IssueKind::EmptyOwner => "empty owner description",
            IssueKind::MalformedKey => "malformed key",
            IssueKind::KeyLabelMismatch => "key does not match label",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One defect found in the table.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Key of the offending entry
    pub key: String,
    pub detail: String,
}

/// All defects found in one validation pass.
#[derive(Debug)]
pub struct ValidationReport {
    pub entries_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Issue counts grouped by kind, in a stable order.
    pub fn by_kind(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Print a grouped summary with a few examples per kind.
    pub fn print_summary(&self) {
        if self.is_clean() {
            println!(
                "✓ All {} entries satisfy the table invariants",
                self.entries_checked
            );
            return;
        }

        println!(
            "⚠️  Found {} issues across {} entries",
            self.issue_count(),
            self.entries_checked
        );
        println!();

        for (kind, count) in self.by_kind() {
            println!("  {}: {}", kind, count);

            for issue in self.issues.iter().filter(|i| i.kind == kind).take(5) {
                println!("    - {}: {}", issue.key, issue.detail);
            }
            if count > 5 {
                println!("    ... and {} more", count - 5);
            }
        }
    }
}

/// Check every table invariant over a flat entry list.
///
/// Runs on raw entries rather than a merged index so duplicate keys are
/// still observable.
pub fn validate_entries(entries: &[SearchEntry]) -> ValidationReport {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in entries {
        if !seen.insert(entry.key.as_str()) {
            issues.push(ValidationIssue {
                kind: IssueKind::DuplicateKey,
                key: entry.key.clone(),
                detail: "key appears more than once in the table".to_string(),
            });
        }

        if entry.label.is_empty() {
            issues.push(ValidationIssue {
                kind: IssueKind::EmptyLabel,
                key: entry.key.clone(),
                detail: "entry has no display label".to_string(),
            });
        }

        if entry.targets.is_empty() {
            issues.push(ValidationIssue {
                kind: IssueKind::EmptyTargets,
                key: entry.key.clone(),
                detail: "entry has no documentation anchors".to_string(),
            });
        }

        for (i, target) in entry.targets.iter().enumerate() {
            if target.href.is_empty() {
                issues.push(ValidationIssue {
                    kind: IssueKind::EmptyHref,
                    key: entry.key.clone(),
                    detail: format!("target {} has an empty link", i),
                });
            }
            if target.owner.is_empty() {
                issues.push(ValidationIssue {
                    kind: IssueKind::EmptyOwner,
                    key: entry.key.clone(),
                    detail: format!("target {} has an empty owner description", i),
                });
            }
        }

        match key::split_key(&entry.key) {
            None => {
                issues.push(ValidationIssue {
                    kind: IssueKind::MalformedKey,
                    key: entry.key.clone(),
                    detail: "key is missing its numeric uniqueness suffix".to_string(),
                });
            }
            Some((stem, _)) => {
                if !entry.label.is_empty() {
                    let expected = key::normalize_label(&entities::decode(&entry.label));
                    if stem != expected {
                        issues.push(ValidationIssue {
                            kind: IssueKind::KeyLabelMismatch,
                            key: entry.key.clone(),
                            detail: format!(
                                "stem `{}` does not match the label (expected `{}`)",
                                stem, expected
                            ),
                        });
                    }
                }
            }
        }
    }

    ValidationReport {
        entries_checked: entries.len(),
        issues,
    }
}
