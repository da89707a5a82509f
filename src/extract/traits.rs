//! Core traits for declaration extraction.

use super::SourceUnit;
use crate::error::ParseError;

/// Holds a parsed tree-sitter tree and the text it was parsed from.
///
/// Kept separate from `SourceUnit` so the tree can be walked without
/// re-parsing.
pub struct ParsedSource<'a> {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// Source text the tree was parsed from.
    pub source: &'a str,
}

impl<'a> ParsedSource<'a> {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Turns source text into a declaration tree.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser per
/// call and hold no mutable state.
pub trait DeclarationExtractor: Send + Sync {
    /// Returns the language identifier (e.g., "csharp").
    fn language_id(&self) -> &'static str;

    /// Parse source text into a syntax tree.
    ///
    /// Fails if the tree contains any error node; no partial tree is returned.
    fn parse<'a>(&self, source: &'a str) -> Result<ParsedSource<'a>, ParseError>;

    /// Walk a parsed tree and collect namespaces, classes and imports.
    fn collect(&self, parsed: &ParsedSource) -> Result<SourceUnit, ParseError>;

    /// Parse and collect in one step.
    fn extract(&self, source: &str) -> Result<SourceUnit, ParseError> {
        let parsed = self.parse(source)?;
        self.collect(&parsed)
    }
}
