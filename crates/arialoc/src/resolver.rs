//! Public resolution API.
//!
//! `find_elements` never fails for "nothing matched"; it returns an empty
//! vector. `find_element` turns a failed search into a [`NotFoundError`]
//! after re-running it with hidden and with presentational elements included,
//! so the message can point at elements that exist but are not exposed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::NotFoundError;
use crate::outcome::SearchOutcome;
use crate::parser::parse_locator;
use crate::result::{LocatorError, LocatorResult};
use crate::search::find_by_semantic_locator;
use crate::semantics::SemanticLocator;
use crate::tree::{AccessibilityTree, Visibility};

/// Options for a [`Resolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Which normally-excluded elements are searched
    pub visibility: Visibility,
    /// Whether `find_one` rejects locators matching more than one element
    pub strict: bool,
}

impl ResolverOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visibility
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Enable or disable strict single-element matching
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Resolves semantic locators against one tree
#[derive(Debug)]
pub struct Resolver<'t, T: ?Sized> {
    tree: &'t T,
    options: ResolverOptions,
}

impl<'t, T> Resolver<'t, T>
where
    T: AccessibilityTree + ?Sized,
{
    /// Create a resolver with default options
    #[must_use]
    pub fn new(tree: &'t T) -> Self {
        Self {
            tree,
            options: ResolverOptions::default(),
        }
    }

    /// Replace the options
    #[must_use]
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options
    #[must_use]
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Run a parsed locator and return the raw outcome
    pub fn search(
        &self,
        locator: &SemanticLocator,
        root: &T::Element,
    ) -> LocatorResult<SearchOutcome<T::Element>> {
        find_by_semantic_locator(self.tree, locator, root, self.options.visibility)
    }

    /// All matches of a locator string, in document order
    pub fn find_all(&self, locator: &str, root: &T::Element) -> LocatorResult<Vec<T::Element>> {
        let locator = parse_locator(locator)?;
        self.find_all_parsed(&locator, root)
    }

    /// All matches of a parsed locator, in document order
    pub fn find_all_parsed(
        &self,
        locator: &SemanticLocator,
        root: &T::Element,
    ) -> LocatorResult<Vec<T::Element>> {
        let elements = self.search(locator, root)?.into_elements();
        debug!(%locator, matches = elements.len(), "find all");
        Ok(elements)
    }

    /// First match of a locator string in document order
    pub fn find_one(&self, locator: &str, root: &T::Element) -> LocatorResult<T::Element> {
        let locator = parse_locator(locator)?;
        self.find_one_parsed(&locator, root)
    }

    /// First match of a locator string, failing if it is not the only one
    pub fn find_unique(&self, locator: &str, root: &T::Element) -> LocatorResult<T::Element> {
        let locator = parse_locator(locator)?;
        self.find_one_with(&locator, root, true)
    }

    /// First match of a parsed locator in document order
    pub fn find_one_parsed(
        &self,
        locator: &SemanticLocator,
        root: &T::Element,
    ) -> LocatorResult<T::Element> {
        self.find_one_with(locator, root, self.options.strict)
    }

    fn find_one_with(
        &self,
        locator: &SemanticLocator,
        root: &T::Element,
        strict: bool,
    ) -> LocatorResult<T::Element> {
        let failure = match self.search(locator, root)? {
            SearchOutcome::Found(elements) => {
                if strict && elements.len() > 1 {
                    return Err(LocatorError::Ambiguous {
                        locator: locator.to_string(),
                        count: elements.len(),
                    });
                }
                return elements.into_iter().next().ok_or_else(|| {
                    LocatorError::invariant(format!("empty match set for {locator}"))
                });
            }
            SearchOutcome::NotFound(failure) => failure,
        };

        debug!(%locator, "no match, retrying with hidden and presentational elements");
        let visibility = self.options.visibility;
        let hidden = find_by_semantic_locator(self.tree, locator, root, visibility.with_hidden(true))?
            .into_elements();
        let presentational = find_by_semantic_locator(
            self.tree,
            locator,
            root,
            visibility.with_presentational(true),
        )?
        .into_elements();

        Err(NotFoundError::from_failure(self.tree, locator, failure, &hidden, &presentational).into())
    }
}

/// All elements matching `locator` below `root`; empty if none match.
///
/// Hidden and presentational elements are excluded.
///
/// # Errors
///
/// Returns [`LocatorError::Parse`] for malformed locators and
/// [`LocatorError::InvariantViolation`] if the tree breaks its contract.
pub fn find_elements<T>(locator: &str, tree: &T, root: &T::Element) -> LocatorResult<Vec<T::Element>>
where
    T: AccessibilityTree + ?Sized,
{
    Resolver::new(tree).find_all(locator, root)
}

/// The first element in document order matching `locator` below `root`.
///
/// # Errors
///
/// Returns [`LocatorError::NotFound`] when nothing matches, in addition to
/// the errors of [`find_elements`].
pub fn find_element<T>(locator: &str, tree: &T, root: &T::Element) -> LocatorResult<T::Element>
where
    T: AccessibilityTree + ?Sized,
{
    Resolver::new(tree).find_one(locator, root)
}
