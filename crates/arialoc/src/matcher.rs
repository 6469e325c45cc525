//! Resolution of a single semantic node against a candidate set.

use std::collections::BTreeMap;
use tracing::trace;

use crate::order::is_document_ordered;
use crate::outcome::{FailureDetails, MissingPredicate, PartialFind, SearchOutcome};
use crate::result::{LocatorError, LocatorResult};
use crate::semantics::SemanticNode;
use crate::tree::{AccessibilityTree, Visibility};

/// Narrow `bases` to the elements matching one node.
///
/// `bases` must be in document order and outermost-only. Stages run in a
/// fixed order (role, then each attribute, then name) and the first stage
/// that leaves no candidate produces the failure. The returned
/// `closest_find` is always empty; the segment searcher fills it in.
///
/// # Errors
///
/// Returns [`LocatorError::InvariantViolation`] if the tree's role finder
/// returned elements out of document order.
pub fn find_by_semantic_node<T>(
    tree: &T,
    node: &SemanticNode,
    bases: &[T::Element],
    visibility: Visibility,
) -> LocatorResult<SearchOutcome<T::Element>>
where
    T: AccessibilityTree + ?Sized,
{
    let mut candidates: Vec<T::Element> = bases
        .iter()
        .flat_map(|base| tree.find_by_role(&node.role, base, visibility))
        .collect();
    trace!(role = %node.role, bases = bases.len(), candidates = candidates.len(), "role stage");

    if candidates.is_empty() {
        return Ok(SearchOutcome::NotFound(FailureDetails {
            closest_find: Vec::new(),
            elements_found: bases.to_vec(),
            not_found: MissingPredicate::Role(node.role.clone()),
            partial_find: None,
        }));
    }

    let mut matched_attributes = BTreeMap::new();
    for (name, value) in &node.attributes {
        let filtered: Vec<T::Element> = candidates
            .iter()
            .filter(|element| tree.attribute_value(element, name).as_deref() == Some(value.as_str()))
            .cloned()
            .collect();
        trace!(attribute = %name, %value, candidates = filtered.len(), "attribute stage");

        if filtered.is_empty() {
            return Ok(SearchOutcome::NotFound(FailureDetails {
                closest_find: Vec::new(),
                elements_found: candidates,
                not_found: MissingPredicate::Attribute {
                    name: name.clone(),
                    value: value.clone(),
                },
                partial_find: Some(PartialFind {
                    role: node.role.clone(),
                    attributes: matched_attributes,
                }),
            }));
        }
        matched_attributes.insert(name.clone(), value.clone());
        candidates = filtered;
    }

    if let Some(matcher) = &node.name {
        let filtered: Vec<T::Element> = candidates
            .iter()
            .filter(|element| matcher.matches(&tree.accessible_name(element)))
            .cloned()
            .collect();
        trace!(name = %matcher, candidates = filtered.len(), "name stage");

        if filtered.is_empty() {
            return Ok(SearchOutcome::NotFound(FailureDetails {
                closest_find: Vec::new(),
                elements_found: candidates,
                not_found: MissingPredicate::Name(matcher.clone()),
                partial_find: Some(PartialFind {
                    role: node.role.clone(),
                    attributes: matched_attributes,
                }),
            }));
        }
        candidates = filtered;
    }

    if !is_document_ordered(tree, &candidates) {
        return Err(LocatorError::invariant(format!(
            "role finder returned {} out of document order",
            node
        )));
    }

    Ok(SearchOutcome::Found(candidates))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::snapshot::{NodeId, UiNodeSpec, UiTree};
    use std::cmp::Ordering;

    fn form() -> UiTree {
        UiTree::new(UiNodeSpec::new("form").with_id("form").with_children(vec![
            UiNodeSpec::new("checkbox")
                .with_id("news")
                .with_name("Newsletter")
                .with_attribute("checked", "false")
                .with_attribute("disabled", "false"),
            UiNodeSpec::new("checkbox")
                .with_id("terms")
                .with_name("Accept terms")
                .with_attribute("checked", "true")
                .with_attribute("disabled", "false"),
            UiNodeSpec::new("button").with_id("submit").with_name("Submit"),
        ]))
    }

    fn id(tree: &UiTree, name: &str) -> NodeId {
        tree.by_id(name).unwrap()
    }

    fn failure(outcome: SearchOutcome<NodeId>) -> FailureDetails<NodeId> {
        match outcome {
            SearchOutcome::NotFound(details) => details,
            SearchOutcome::Found(found) => panic!("expected failure, found {found:?}"),
        }
    }

    mod success_tests {
        use super::*;

        #[test]
        fn test_role_only() {
            let tree = form();
            let node = SemanticNode::new("checkbox");
            let outcome =
                find_by_semantic_node(&tree, &node, &[tree.root()], Visibility::new()).unwrap();
            assert_eq!(
                outcome,
                SearchOutcome::Found(vec![id(&tree, "news"), id(&tree, "terms")])
            );
        }

        #[test]
        fn test_role_attributes_and_name() {
            let tree = form();
            let node = SemanticNode::new("checkbox")
                .with_attribute("checked", "true")
                .with_attribute("disabled", "false")
                .with_name("Accept terms");
            let outcome =
                find_by_semantic_node(&tree, &node, &[tree.root()], Visibility::new()).unwrap();
            assert_eq!(outcome, SearchOutcome::Found(vec![id(&tree, "terms")]));
        }
    }

    mod failure_tests {
        use super::*;

        #[test]
        fn test_role_failure_has_no_partial_find() {
            let tree = form();
            let node = SemanticNode::new("slider");
            let details = failure(
                find_by_semantic_node(&tree, &node, &[tree.root()], Visibility::new()).unwrap(),
            );
            assert_eq!(details.not_found, MissingPredicate::Role("slider".to_string()));
            assert_eq!(details.partial_find, None);
            assert_eq!(details.elements_found, vec![tree.root()]);
            assert!(details.closest_find.is_empty());
        }

        #[test]
        fn test_attribute_failure_reports_resolved_prefix() {
            let tree = form();
            // "checked" iterates before "disabled" and passes; "disabled" fails.
            let node = SemanticNode::new("checkbox")
                .with_attribute("checked", "true")
                .with_attribute("disabled", "true");
            let details = failure(
                find_by_semantic_node(&tree, &node, &[tree.root()], Visibility::new()).unwrap(),
            );
            assert_eq!(
                details.not_found,
                MissingPredicate::Attribute {
                    name: "disabled".to_string(),
                    value: "true".to_string()
                }
            );
            let partial = details.partial_find.unwrap();
            assert_eq!(partial.role, "checkbox");
            assert_eq!(
                partial.attributes,
                BTreeMap::from([("checked".to_string(), "true".to_string())])
            );
            assert_eq!(details.elements_found, vec![id(&tree, "terms")]);
        }

        #[test]
        fn test_first_attribute_failure_has_empty_partial_attributes() {
            let tree = form();
            let node = SemanticNode::new("checkbox").with_attribute("checked", "mixed");
            let details = failure(
                find_by_semantic_node(&tree, &node, &[tree.root()], Visibility::new()).unwrap(),
            );
            let partial = details.partial_find.unwrap();
            assert_eq!(partial.role, "checkbox");
            assert!(partial.attributes.is_empty());
            assert_eq!(details.elements_found.len(), 2);
        }

        #[test]
        fn test_name_failure_reports_all_attributes() {
            let tree = form();
            let node = SemanticNode::new("checkbox")
                .with_attribute("checked", "true")
                .with_name("Newsletter");
            let details = failure(
                find_by_semantic_node(&tree, &node, &[tree.root()], Visibility::new()).unwrap(),
            );
            assert!(matches!(details.not_found, MissingPredicate::Name(_)));
            let partial = details.partial_find.unwrap();
            assert_eq!(partial.attributes.len(), 1);
            assert_eq!(details.elements_found, vec![id(&tree, "terms")]);
        }
    }

    mod invariant_tests {
        use super::*;

        /// Role finder that breaks the document order contract
        struct ReversingTree(UiTree);

        impl AccessibilityTree for ReversingTree {
            type Element = NodeId;

            fn compare_document_position(&self, a: &NodeId, b: &NodeId) -> Ordering {
                self.0.compare_document_position(a, b)
            }

            fn is_ancestor(&self, ancestor: &NodeId, descendant: &NodeId) -> bool {
                self.0.is_ancestor(ancestor, descendant)
            }

            fn find_by_role(&self, role: &str, base: &NodeId, visibility: Visibility) -> Vec<NodeId> {
                let mut found = self.0.find_by_role(role, base, visibility);
                found.reverse();
                found
            }

            fn accessible_name(&self, element: &NodeId) -> String {
                self.0.accessible_name(element)
            }

            fn attribute_value(&self, element: &NodeId, attribute: &str) -> Option<String> {
                self.0.attribute_value(element, attribute)
            }
        }

        #[test]
        fn test_out_of_order_role_finder_is_an_error() {
            let tree = ReversingTree(form());
            let node = SemanticNode::new("checkbox");
            let err = find_by_semantic_node(&tree, &node, &[NodeId(0)], Visibility::new())
                .unwrap_err();
            assert!(matches!(err, LocatorError::InvariantViolation { .. }));
        }
    }
}
