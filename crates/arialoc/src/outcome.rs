//! Search outcomes threaded through every resolution layer.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::semantics::{NameMatcher, SemanticNode};

/// The predicate stage that eliminated every candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPredicate {
    /// No element had the role
    Role(String),
    /// No candidate had the attribute value
    Attribute {
        /// Attribute name
        name: String,
        /// Required value
        value: String,
    },
    /// No candidate had a matching accessible name
    Name(NameMatcher),
}

impl fmt::Display for MissingPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(role) => write!(f, "role {role}"),
            Self::Attribute { name, value } => write!(f, "{name}:{value}"),
            Self::Name(name) => write!(f, "name {name}"),
        }
    }
}

/// Role and attributes already satisfied when a node failed part way
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialFind {
    /// The matched role
    pub role: String,
    /// Attributes matched before the failure
    pub attributes: BTreeMap<String, String>,
}

impl PartialFind {
    /// Render as a node, e.g. `{checkbox checked:true}`
    #[must_use]
    pub fn to_node(&self) -> SemanticNode {
        SemanticNode {
            role: self.role.clone(),
            attributes: self.attributes.clone(),
            name: None,
        }
    }
}

/// Why a search found nothing, and how close it came
#[derive(Debug, Clone, PartialEq)]
pub struct FailureDetails<E> {
    /// Longest prefix of predicates that was fully satisfied
    pub closest_find: Vec<SemanticNode>,
    /// Candidates at the point of failure
    pub elements_found: Vec<E>,
    /// The predicate that eliminated every candidate
    pub not_found: MissingPredicate,
    /// Present when the role matched but an attribute or the name did not
    pub partial_find: Option<PartialFind>,
}

/// Result of a search: matches in document order, or a diagnostic
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<E> {
    /// Non-empty, duplicate-free matches in document order
    Found(Vec<E>),
    /// Nothing matched
    NotFound(FailureDetails<E>),
}

impl<E> SearchOutcome<E> {
    /// Whether the search found anything
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Matches, or an empty vector on failure
    #[must_use]
    pub fn into_elements(self) -> Vec<E> {
        match self {
            Self::Found(elements) => elements,
            Self::NotFound(_) => Vec::new(),
        }
    }

    /// Failure details, if nothing was found
    #[must_use]
    pub const fn failure(&self) -> Option<&FailureDetails<E>> {
        match self {
            Self::Found(_) => None,
            Self::NotFound(details) => Some(details),
        }
    }
}
