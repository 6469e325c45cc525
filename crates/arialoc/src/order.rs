//! Document order and containment utilities.
//!
//! Pure sequence operations over elements of one [`AccessibilityTree`]. They
//! are used both to prepare search bases and to normalize merged results.

use std::cmp::Ordering;

use crate::tree::AccessibilityTree;

/// Document order of two elements
pub fn compare_nodes<T>(tree: &T, a: &T::Element, b: &T::Element) -> Ordering
where
    T: AccessibilityTree + ?Sized,
{
    tree.compare_document_position(a, b)
}

/// Whether `node` is strictly contained by `container`
pub fn is_contained<T>(tree: &T, node: &T::Element, container: &T::Element) -> bool
where
    T: AccessibilityTree + ?Sized,
{
    tree.is_ancestor(container, node)
}

/// Sort elements in place by document order
pub fn sort_document_order<T>(tree: &T, elements: &mut [T::Element])
where
    T: AccessibilityTree + ?Sized,
{
    elements.sort_by(|a, b| compare_nodes(tree, a, b));
}

/// Whether a sequence is already in document order
pub fn is_document_ordered<T>(tree: &T, elements: &[T::Element]) -> bool
where
    T: AccessibilityTree + ?Sized,
{
    elements
        .windows(2)
        .all(|pair| compare_nodes(tree, &pair[0], &pair[1]) != Ordering::Greater)
}

/// Sort by document order and drop repeated elements.
///
/// Idempotent: the output is already sorted and duplicate free.
pub fn remove_duplicates<T>(tree: &T, mut elements: Vec<T::Element>) -> Vec<T::Element>
where
    T: AccessibilityTree + ?Sized,
{
    sort_document_order(tree, &mut elements);
    elements.dedup();
    elements
}

/// Keep only elements with no ancestor in the same set.
///
/// The result is sorted, duplicate free and pairwise disjoint.
pub fn outer_nodes_only<T>(tree: &T, elements: Vec<T::Element>) -> Vec<T::Element>
where
    T: AccessibilityTree + ?Sized,
{
    let sorted = remove_duplicates(tree, elements);
    let mut outer: Vec<T::Element> = Vec::with_capacity(sorted.len());
    for element in sorted {
        // In document order, a descendant of a kept element always follows it
        // before any later kept element.
        let covered = outer
            .last()
            .is_some_and(|last| is_contained(tree, &element, last));
        if !covered {
            outer.push(element);
        }
    }
    outer
}
