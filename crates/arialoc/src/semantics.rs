//! Parsed semantic locator model.
//!
//! A semantic locator is a chain of [`SemanticNode`] predicates, each naming an
//! ARIA role, optional ARIA attribute values and an optional accessible name.
//! The chain may be split once by the `outer` operator into a
//! [`SemanticLocator`] with a pre-outer and a post-outer segment.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::result::{LocatorError, LocatorResult};

/// ARIA roles accepted by the parser
pub const ARIA_ROLES: &[&str] = &[
    "alert",
    "alertdialog",
    "application",
    "article",
    "banner",
    "blockquote",
    "button",
    "caption",
    "cell",
    "checkbox",
    "code",
    "columnheader",
    "combobox",
    "complementary",
    "contentinfo",
    "definition",
    "deletion",
    "dialog",
    "directory",
    "document",
    "emphasis",
    "feed",
    "figure",
    "form",
    "generic",
    "grid",
    "gridcell",
    "group",
    "heading",
    "img",
    "insertion",
    "link",
    "list",
    "listbox",
    "listitem",
    "log",
    "main",
    "marquee",
    "math",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "meter",
    "navigation",
    "none",
    "note",
    "option",
    "paragraph",
    "presentation",
    "progressbar",
    "radio",
    "radiogroup",
    "region",
    "row",
    "rowgroup",
    "rowheader",
    "scrollbar",
    "search",
    "searchbox",
    "separator",
    "slider",
    "spinbutton",
    "status",
    "strong",
    "subscript",
    "superscript",
    "switch",
    "tab",
    "table",
    "tablist",
    "tabpanel",
    "term",
    "textbox",
    "time",
    "timer",
    "toolbar",
    "tooltip",
    "tree",
    "treegrid",
    "treeitem",
];

/// ARIA attributes that may be constrained in a locator
pub const SUPPORTED_ATTRIBUTES: &[&str] = &[
    "checked", "current", "disabled", "expanded", "level", "pressed", "selected",
];

/// Check if a role token is a known ARIA role
#[must_use]
pub fn is_aria_role(role: &str) -> bool {
    ARIA_ROLES.contains(&role)
}

/// Check if an attribute may be used in a locator
#[must_use]
pub fn is_supported_attribute(name: &str) -> bool {
    SUPPORTED_ATTRIBUTES.contains(&name)
}

/// Accessible name containing `*` wildcards, compiled to an anchored regex
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile a wildcard pattern. Each `*` matches any run of characters.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the pattern exceeds the regex size limits
    pub fn new(source: impl Into<String>) -> LocatorResult<Self> {
        let source = source.into();
        let body = source
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^(?s:{body})$"))
            .map_err(|e| LocatorError::parse(format!("invalid name pattern: {e}"), 0))?;
        Ok(Self { source, regex })
    }

    /// The pattern as written in the locator
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check if a name matches the pattern
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for WildcardPattern {}

impl Serialize for WildcardPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// How a node's accessible name is matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum NameMatcher {
    /// Whole-name, case-sensitive equality
    Exact(String),
    /// Wildcard pattern (`*` matches any run of characters)
    Pattern(WildcardPattern),
}

impl NameMatcher {
    /// Exact name matcher
    #[must_use]
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    /// Build a matcher from a locator name, choosing a pattern when it has wildcards
    ///
    /// # Errors
    ///
    /// Returns an error if the wildcard pattern cannot be compiled
    pub fn from_name(name: impl Into<String>) -> LocatorResult<Self> {
        let name = name.into();
        if name.contains('*') {
            Ok(Self::Pattern(WildcardPattern::new(name)?))
        } else {
            Ok(Self::Exact(name))
        }
    }

    /// The name as written in the locator
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(name) => name,
            Self::Pattern(pattern) => pattern.as_str(),
        }
    }

    /// Check if a computed accessible name satisfies this matcher
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == name,
            Self::Pattern(pattern) => pattern.is_match(name),
        }
    }
}

impl fmt::Display for NameMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("'")?;
        for c in self.as_str().chars() {
            if c == '\'' || c == '\\' {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("'")
    }
}

/// One predicate of a semantic locator: `{role 'name' attr:value}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticNode {
    /// ARIA role token
    pub role: String,
    /// Required ARIA attribute values keyed by attribute name
    pub attributes: BTreeMap<String, String>,
    /// Optional accessible name matcher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NameMatcher>,
}

impl SemanticNode {
    /// Create a node matching only a role
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            attributes: BTreeMap::new(),
            name: None,
        }
    }

    /// Require an exact accessible name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(NameMatcher::exact(name));
        self
    }

    /// Set the name matcher
    #[must_use]
    pub fn with_name_matcher(mut self, matcher: NameMatcher) -> Self {
        self.name = Some(matcher);
        self
    }

    /// Require an ARIA attribute value
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl fmt::Display for SemanticNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}", self.role)?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        for (key, value) in &self.attributes {
            write!(f, " {key}:{value}")?;
        }
        f.write_str("}")
    }
}

/// Write a chain of nodes separated by spaces
pub(crate) fn write_chain(f: &mut fmt::Formatter<'_>, nodes: &[SemanticNode]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

/// Render a chain of nodes in locator syntax
#[must_use]
pub fn chain_to_string(nodes: &[SemanticNode]) -> String {
    struct Chain<'a>(&'a [SemanticNode]);
    impl fmt::Display for Chain<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_chain(f, self.0)
        }
    }
    Chain(nodes).to_string()
}

/// A parsed locator, split at the optional `outer` operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticLocator {
    /// Nodes before `outer` (the whole chain when there is no `outer`)
    pub pre_outer: Vec<SemanticNode>,
    /// Nodes after `outer`
    pub post_outer: Vec<SemanticNode>,
}

impl SemanticLocator {
    /// Create a locator from both segments
    #[must_use]
    pub fn new(pre_outer: Vec<SemanticNode>, post_outer: Vec<SemanticNode>) -> Self {
        Self {
            pre_outer,
            post_outer,
        }
    }

    /// Create a locator without an `outer` operator
    #[must_use]
    pub fn chain(nodes: Vec<SemanticNode>) -> Self {
        Self::new(nodes, Vec::new())
    }

    /// Whether the locator uses the `outer` operator
    #[must_use]
    pub fn has_outer(&self) -> bool {
        !self.post_outer.is_empty()
    }

    /// Total number of predicates across both segments
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.pre_outer.len() + self.post_outer.len()
    }

    /// All predicates in order
    pub fn nodes(&self) -> impl Iterator<Item = &SemanticNode> {
        self.pre_outer.iter().chain(self.post_outer.iter())
    }
}

impl fmt::Display for SemanticLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, &self.pre_outer)?;
        if self.has_outer() {
            if !self.pre_outer.is_empty() {
                f.write_str(" ")?;
            }
            f.write_str("outer ")?;
            write_chain(f, &self.post_outer)?;
        }
        Ok(())
    }
}
