//! testgen - unit-test skeleton generator for C#.
//!
//! testgen reads one C# compilation unit and produces, for each top-level
//! class, a companion test fixture: fields for the subject and its
//! interface-typed dependencies, a setup routine that wires them, and one
//! stub test per public method. Every stub ends in a failing assertion so
//! the skeleton fails loudly until a developer completes it.
//!
//! # Architecture
//!
//! - `extract`: tree-sitter based declaration extractor (`SourceUnit`)
//! - `generate`: fixture synthesis, document tree and renderer
//! - `config`: YAML-backed settings for the emitted test dialect
//! - `error`: `ParseError`
//!
//! Both stages are pure functions over immutable values and may be called
//! concurrently for independent documents. Reading sources and writing
//! results is left to the caller.
//!
//! ```no_run
//! let source = std::fs::read_to_string("Widget.cs").unwrap();
//! for unit in testgen::generate_tests(&source).unwrap() {
//!     std::fs::write(unit.file_path("tests"), &unit.content).unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod generate;

pub use config::GeneratorConfig;
pub use error::ParseError;
pub use extract::{
    extract, ClassDecl, ConstructorDecl, Import, MethodDecl, Namespace, Parameter, SourceUnit,
    TypeIndex, TypeKind,
};
pub use generate::{synthesize, synthesize_with, GeneratedUnit};

/// Extract and synthesize in one call with the default configuration.
pub fn generate_tests(source: &str) -> Result<Vec<GeneratedUnit>, ParseError> {
    let unit = extract(source)?;
    Ok(synthesize(&unit))
}

/// Extract and synthesize in one call with an explicit configuration.
pub fn generate_tests_with(
    source: &str,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedUnit>, ParseError> {
    let unit = extract(source)?;
    Ok(synthesize_with(&unit, config))
}
