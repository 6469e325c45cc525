//! Human-readable not-found diagnostics.

use serde::Serialize;
use std::fmt;

use crate::outcome::{FailureDetails, MissingPredicate, PartialFind};
use crate::semantics::{SemanticLocator, SemanticNode};
use crate::tree::AccessibilityTree;

/// Elements listed by name before the message switches to a count
const MAX_LISTED_ELEMENTS: usize = 5;

/// Raised when a single-element lookup matches nothing.
///
/// Carries the structured failure plus the matches found when hidden or
/// presentational elements are included, so the message can say why an
/// element that exists was not matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundError {
    /// Canonical form of the locator
    pub locator: String,
    /// Longest satisfied predicate prefix
    pub closest_find: Vec<SemanticNode>,
    /// Predicate that eliminated every candidate
    pub not_found: MissingPredicate,
    /// Role and attributes already matched at the failing node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_find: Option<PartialFind>,
    /// Candidates at the point of failure
    pub elements_found: Vec<String>,
    /// Matches when hidden elements are included
    pub hidden_matches: Vec<String>,
    /// Matches when presentational elements are included
    pub presentational_matches: Vec<String>,
    /// Closest match rendered in locator syntax (empty when nothing matched)
    pub closest_match: String,
}

impl NotFoundError {
    /// Build the error from a failed search and the two diagnostic retries
    pub fn from_failure<T>(
        tree: &T,
        locator: &SemanticLocator,
        failure: FailureDetails<T::Element>,
        hidden_matches: &[T::Element],
        presentational_matches: &[T::Element],
    ) -> Self
    where
        T: AccessibilityTree + ?Sized,
    {
        let closest_match =
            render_closest(locator, &failure.closest_find, failure.partial_find.as_ref());
        let describe = |elements: &[T::Element]| -> Vec<String> {
            elements.iter().map(|e| tree.describe(e)).collect()
        };
        Self {
            locator: locator.to_string(),
            elements_found: describe(&failure.elements_found),
            closest_find: failure.closest_find,
            not_found: failure.not_found,
            partial_find: failure.partial_find,
            hidden_matches: describe(hidden_matches),
            presentational_matches: describe(presentational_matches),
            closest_match,
        }
    }

    /// Whether the element exists but is hidden
    #[must_use]
    pub fn found_when_hidden_included(&self) -> bool {
        !self.hidden_matches.is_empty()
    }

    /// Whether the element exists but is presentational
    #[must_use]
    pub fn found_when_presentational_included(&self) -> bool {
        !self.presentational_matches.is_empty()
    }
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Didn't find any elements matching semantic locator {}.",
            self.locator
        )?;

        if self.closest_match.is_empty() {
            write!(f, " No element has {}.", self.not_found)?;
        } else {
            write!(
                f,
                " The closest match was {}: found {} matching {}, but none with {}.",
                self.closest_match,
                self.elements_found.len(),
                plural(self.elements_found.len(), "element", "elements"),
                self.not_found
            )?;
            if !self.elements_found.is_empty() {
                write!(f, " Candidates: {}.", list(&self.elements_found))?;
            }
        }

        if self.found_when_hidden_included() {
            write!(
                f,
                " {} matching {} hidden from the accessibility tree: {}.",
                self.hidden_matches.len(),
                plural(self.hidden_matches.len(), "element is", "elements are"),
                list(&self.hidden_matches)
            )?;
        }
        if self.found_when_presentational_included() {
            write!(
                f,
                " {} matching {} a presentational role: {}.",
                self.presentational_matches.len(),
                plural(self.presentational_matches.len(), "element has", "elements have"),
                list(&self.presentational_matches)
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for NotFoundError {}

/// Closest match in locator syntax, with `outer` where the locator had it
fn render_closest(
    locator: &SemanticLocator,
    closest_find: &[SemanticNode],
    partial_find: Option<&PartialFind>,
) -> String {
    let mut nodes = closest_find.to_vec();
    if let Some(partial) = partial_find {
        nodes.push(partial.to_node());
    }
    let outer_at = locator
        .has_outer()
        .then_some(locator.pre_outer.len())
        .filter(|&split| split < nodes.len());

    let mut parts = Vec::with_capacity(nodes.len() + 1);
    for (index, node) in nodes.iter().enumerate() {
        if outer_at == Some(index) {
            parts.push("outer".to_string());
        }
        parts.push(node.to_string());
    }
    parts.join(" ")
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn list(items: &[String]) -> String {
    let shown = items
        .iter()
        .take(MAX_LISTED_ELEMENTS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > MAX_LISTED_ELEMENTS {
        format!("{shown} and {} more", items.len() - MAX_LISTED_ELEMENTS)
    } else {
        shown
    }
}
