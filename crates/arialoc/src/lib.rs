//! arialoc: Semantic Locators for UI Trees
//!
//! Locate UI elements by what they mean to assistive technology (ARIA role,
//! ARIA attributes, accessible name) instead of by fragile structural
//! selectors.
//!
//! ```text
//! {button 'Save'}                    button named "Save"
//! {checkbox checked:true}            any checked checkbox
//! {dialog} {button 'OK*'}            button in a dialog, name starting with "OK"
//! {list} outer {listitem}            outermost list items inside lists
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ parser   │──►│ search       │──►│ matcher      │──►│ order        │
//! │ (string) │   │ outer/segment│   │ role/attr/   │   │ sort, dedup, │
//! │          │   │ combiner     │   │ name stages  │   │ outermost    │
//! └──────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!                       │
//!                       ▼
//!              AccessibilityTree (UiTree or your own)
//! ```
//!
//! # Example
//!
//! ```
//! use arialoc::prelude::*;
//!
//! let tree = UiTree::new(UiNodeSpec::new("list").with_children(vec![
//!     UiNodeSpec::new("listitem").with_name("Apple"),
//!     UiNodeSpec::new("listitem").with_name("Pear"),
//! ]));
//!
//! let pear = find_element("{listitem 'Pear'}", &tree, &tree.root()).unwrap();
//! assert_eq!(tree.accessible_name(&pear), "Pear");
//!
//! let none = find_elements("{button}", &tree, &tree.root()).unwrap();
//! assert!(none.is_empty());
//! ```

#![warn(missing_docs)]

mod diagnostics;
mod matcher;
pub mod order;
mod outcome;
mod parser;
mod resolver;
mod result;
mod search;
mod semantics;
mod snapshot;
mod tree;

pub use diagnostics::NotFoundError;
pub use matcher::find_by_semantic_node;
pub use outcome::{FailureDetails, MissingPredicate, PartialFind, SearchOutcome};
pub use parser::parse_locator;
pub use resolver::{find_element, find_elements, Resolver, ResolverOptions};
pub use result::{LocatorError, LocatorResult};
pub use search::{combine_failures, find_by_semantic_locator, find_by_semantic_nodes};
pub use semantics::{
    chain_to_string, is_aria_role, is_supported_attribute, NameMatcher, SemanticLocator,
    SemanticNode, WildcardPattern, ARIA_ROLES, SUPPORTED_ATTRIBUTES,
};
pub use snapshot::{NodeId, UiNodeSpec, UiTree};
pub use tree::{AccessibilityTree, Visibility};

/// Commonly used types
pub mod prelude {
    pub use super::order::{outer_nodes_only, remove_duplicates};
    pub use super::{
        find_element, find_elements, parse_locator, AccessibilityTree, LocatorError,
        LocatorResult, NodeId, NotFoundError, Resolver, ResolverOptions, SearchOutcome,
        SemanticLocator, SemanticNode, UiNodeSpec, UiTree, Visibility,
    };
}
