//! Output formatting and status reporting

use arialoc::{AccessibilityTree, NodeId, NotFoundError, SemanticLocator, UiTree};
use console::{style, Term};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// One matched element in JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Pre-order index of the node in the snapshot
    pub index: usize,
    /// ARIA role, if the node has one
    pub role: Option<String>,
    /// Snapshot id, if the node has one
    pub id: Option<String>,
    /// Accessible name
    pub name: String,
}

impl MatchRecord {
    /// Build a record for a snapshot node
    #[must_use]
    pub fn new(tree: &UiTree, node: NodeId) -> Self {
        Self {
            index: node.0,
            role: tree.role(node).map(str::to_string),
            id: tree.id(node).map(str::to_string),
            name: tree.accessible_name(&node),
        }
    }
}

#[derive(Serialize)]
struct FindReport<'a> {
    locator: String,
    count: usize,
    matches: &'a [MatchRecord],
}

/// Render the matches of a locator
pub fn render_matches(
    tree: &UiTree,
    locator: &SemanticLocator,
    matches: &[NodeId],
    format: OutputFormat,
    use_color: bool,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            let records: Vec<MatchRecord> =
                matches.iter().map(|&node| MatchRecord::new(tree, node)).collect();
            let report = FindReport {
                locator: locator.to_string(),
                count: records.len(),
                matches: &records,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (position, node) in matches.iter().enumerate() {
                let description = tree.describe(node);
                let description = if use_color {
                    style(description).cyan().to_string()
                } else {
                    description
                };
                out.push_str(&format!("{:>3}. {description}\n", position + 1));
            }
            Ok(out)
        }
    }
}

/// Render a parsed locator
pub fn render_locator(locator: &SemanticLocator, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(locator)?),
        OutputFormat::Text => Ok(format!("{locator}\n")),
    }
}

/// Render a not-found diagnostic
pub fn render_not_found(error: &NotFoundError, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(error)?),
        OutputFormat::Text => Ok(format!("{error}\n")),
    }
}

/// Status line reporter writing to stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        self.status("✓", message, |s| style(s).green().bold().to_string());
    }

    /// Print failure message (shown even in quiet mode)
    pub fn failure(&self, message: &str) {
        let icon = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "✗".to_string()
        };
        let _ = self.term.write_line(&format!("{icon} {message}"));
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        self.status("ℹ", message, |s| style(s).blue().bold().to_string());
    }

    fn status(&self, icon: &str, message: &str, paint: impl Fn(&str) -> String) {
        if self.quiet {
            return;
        }
        let icon = if self.use_color {
            paint(icon)
        } else {
            icon.to_string()
        };
        let _ = self.term.write_line(&format!("{icon} {message}"));
    }
}
