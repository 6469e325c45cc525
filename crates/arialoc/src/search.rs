//! Segment searching and the `outer` combiner.
//!
//! A locator such as `{list} outer {listitem}` is resolved in two passes:
//! the pre-outer segment runs once from the root, then the post-outer segment
//! runs separately under every outermost pre-outer match. Successful per-base
//! results are merged and reduced to outermost matches; failed ones compete
//! for the most specific diagnostic.

use tracing::debug;

use crate::matcher::find_by_semantic_node;
use crate::order::outer_nodes_only;
use crate::outcome::{FailureDetails, SearchOutcome};
use crate::result::{LocatorError, LocatorResult};
use crate::semantics::{SemanticLocator, SemanticNode};
use crate::tree::{AccessibilityTree, Visibility};

/// Apply a chain of nodes, each searching below the previous node's matches.
///
/// An empty chain returns `bases` unchanged. On failure at node `i`,
/// `closest_find` holds `nodes[..i]`.
pub fn find_by_semantic_nodes<T>(
    tree: &T,
    nodes: &[SemanticNode],
    bases: Vec<T::Element>,
    visibility: Visibility,
) -> LocatorResult<SearchOutcome<T::Element>>
where
    T: AccessibilityTree + ?Sized,
{
    let mut current = bases;
    for (index, node) in nodes.iter().enumerate() {
        // A role search already covers the whole subtree of each base.
        let search_bases = outer_nodes_only(tree, current);
        match find_by_semantic_node(tree, node, &search_bases, visibility)? {
            SearchOutcome::Found(found) => current = found,
            SearchOutcome::NotFound(mut details) => {
                details.closest_find = nodes[..index].to_vec();
                return Ok(SearchOutcome::NotFound(details));
            }
        }
    }
    Ok(SearchOutcome::Found(current))
}

/// Resolve a full locator below `root`.
///
/// # Errors
///
/// Propagates invariant violations from the node matcher.
pub fn find_by_semantic_locator<T>(
    tree: &T,
    locator: &SemanticLocator,
    root: &T::Element,
    visibility: Visibility,
) -> LocatorResult<SearchOutcome<T::Element>>
where
    T: AccessibilityTree + ?Sized,
{
    let pre_outer =
        find_by_semantic_nodes(tree, &locator.pre_outer, vec![root.clone()], visibility)?;
    if locator.post_outer.is_empty() {
        return Ok(pre_outer);
    }

    let bases = match pre_outer {
        SearchOutcome::Found(found) => outer_nodes_only(tree, found),
        failed @ SearchOutcome::NotFound(_) => return Ok(failed),
    };
    debug!(bases = bases.len(), "searching post-outer segment under each base");

    let mut found = Vec::new();
    let mut failures = Vec::new();
    for base in bases {
        match find_by_semantic_nodes(tree, &locator.post_outer, vec![base], visibility)? {
            SearchOutcome::Found(elements) => found.extend(elements),
            SearchOutcome::NotFound(details) => failures.push(details),
        }
    }

    if !found.is_empty() {
        // Overlapping bases can rediscover the same element or one nested in
        // another base's match.
        return Ok(SearchOutcome::Found(outer_nodes_only(tree, found)));
    }

    combine_failures(&locator.pre_outer, failures)
        .map(SearchOutcome::NotFound)
        .ok_or_else(|| LocatorError::invariant("outer search ran without any base"))
}

/// Pick the most specific per-base failure and prefix it with the pre-outer nodes.
///
/// The failure with the longest `closest_find` wins; ties go to the earliest
/// base. Returns `None` when there are no failures.
pub fn combine_failures<E>(
    pre_outer: &[SemanticNode],
    failures: Vec<FailureDetails<E>>,
) -> Option<FailureDetails<E>> {
    let mut best: Option<FailureDetails<E>> = None;
    for failure in failures {
        let better = best
            .as_ref()
            .map_or(true, |b| failure.closest_find.len() > b.closest_find.len());
        if better {
            best = Some(failure);
        }
    }
    best.map(|mut failure| {
        let mut closest_find = pre_outer.to_vec();
        closest_find.append(&mut failure.closest_find);
        failure.closest_find = closest_find;
        failure
    })
}
