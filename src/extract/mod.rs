//! Declaration extraction.
//!
//! Parses one C# compilation unit with tree-sitter and keeps only what test
//! generation needs:
//! - Unit-level `using` directives, in source order
//! - Namespace blocks and the classes/interfaces declared directly in them
//! - For each class: its first instance constructor and its public methods
//! - A name-indexed table of every declared type (`TypeIndex`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────┐
//! │ Source text │────▶│ CSharpExtractor │────▶│ SourceUnit   │
//! └─────────────┘     │ parse + collect │     │ (Namespaces, │
//!                     └─────────────────┘     │  Imports,    │
//!                                             │  TypeIndex)  │
//!                                             └──────────────┘
//! ```
//!
//! Non-public members, fields, properties, nested types and non-class
//! declarations (structs, enums, records, delegates) are discarded.

mod csharp;
mod facts;
mod traits;

pub use csharp::CSharpExtractor;
pub use facts::{
    ClassDecl, ConstructorDecl, Import, MethodDecl, Namespace, Parameter, SourceUnit, Span,
    TypeIndex, TypeKind,
};
pub use traits::{DeclarationExtractor, ParsedSource};

use crate::error::ParseError;

/// Extract the declaration tree of a C# compilation unit.
///
/// Fails with `ParseError` if the text is not valid C#. No partial result is
/// returned.
pub fn extract(source: &str) -> Result<SourceUnit, ParseError> {
    CSharpExtractor::new().extract(source)
}
