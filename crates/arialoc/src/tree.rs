//! Tree collaborator contract.
//!
//! The resolution engine never touches a concrete DOM. Anything that can
//! order its elements, answer ancestor queries and enumerate elements by role
//! can be searched with semantic locators.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Which normally-excluded elements the role finder should consider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Visibility {
    /// Include elements hidden from the accessibility tree
    pub include_hidden: bool,
    /// Include elements whose role is suppressed as presentational
    pub include_presentational: bool,
}

impl Visibility {
    /// Default visibility: hidden and presentational elements excluded
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_hidden: false,
            include_presentational: false,
        }
    }

    /// Set whether hidden elements are included
    #[must_use]
    pub const fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set whether presentational elements are included
    #[must_use]
    pub const fn with_presentational(mut self, include: bool) -> Self {
        self.include_presentational = include;
        self
    }
}

/// A tree of UI elements that semantic locators can be resolved against.
///
/// Implementations must keep `find_by_role` results in document order and
/// confined to strict descendants of the base element. The engine checks the
/// ordering and reports a violation as [`crate::LocatorError::InvariantViolation`].
pub trait AccessibilityTree {
    /// Opaque element handle
    type Element: Clone + PartialEq + fmt::Debug;

    /// Total order of two elements by document position
    fn compare_document_position(&self, a: &Self::Element, b: &Self::Element) -> Ordering;

    /// Whether `ancestor` strictly contains `descendant`
    fn is_ancestor(&self, ancestor: &Self::Element, descendant: &Self::Element) -> bool;

    /// Elements with the given role below `base`, in document order
    fn find_by_role(
        &self,
        role: &str,
        base: &Self::Element,
        visibility: Visibility,
    ) -> Vec<Self::Element>;

    /// Computed accessible name of an element
    fn accessible_name(&self, element: &Self::Element) -> String;

    /// Resolved value of an ARIA attribute, if the element has one
    fn attribute_value(&self, element: &Self::Element, attribute: &str) -> Option<String>;

    /// Short human-readable description, used in diagnostics
    fn describe(&self, element: &Self::Element) -> String {
        format!("{element:?}")
    }
}
