//! Test fixture synthesis.
//!
//! For every top-level class of a `SourceUnit` this module produces one
//! `GeneratedUnit`: a C# test fixture with a field for the subject under
//! test, one mock field per interface-typed constructor parameter, a setup
//! routine that wires them, and one failing stub test per public method.
//!
//! # Pipeline
//!
//! ```text
//! SourceUnit ──▶ fixture::build_fixture ──▶ CodeDocument ──▶ render ──▶ GeneratedUnit
//!                (naming, classify)         (tree)           (text)
//! ```
//!
//! Naming and structure rules live in `naming`, `classify` and `fixture`;
//! formatting rules live only in `render`.

pub mod classify;
pub mod document;
mod fixture;
pub mod naming;
pub mod render;

pub use classify::{classify, default_literal, ParameterRole};
pub use document::{ClassNode, CodeDocument, Expr, FieldNode, MethodNode, NamespaceNode, Statement};
pub use fixture::build_fixture;
pub use naming::FixtureNames;

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::extract::SourceUnit;

/// Configuration used by `synthesize`.
static DEFAULT_CONFIG: Lazy<GeneratorConfig> = Lazy::new(GeneratorConfig::default);

/// One synthesized test document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Suggested file name without extension (`{Class}Tests`).
    pub file_name: String,
    /// Complete C# source text.
    pub content: String,
}

impl GeneratedUnit {
    /// Extension for files written from generated units.
    pub const FILE_EXTENSION: &'static str = "cs";

    /// Destination path of this unit inside `dir`.
    pub fn file_path<P: AsRef<Path>>(&self, dir: P) -> PathBuf {
        dir.as_ref()
            .join(format!("{}.{}", self.file_name, Self::FILE_EXTENSION))
    }
}

/// Synthesize fixtures with the default NUnit + Moq configuration.
pub fn synthesize(unit: &SourceUnit) -> Vec<GeneratedUnit> {
    synthesize_with(unit, &DEFAULT_CONFIG)
}

/// Synthesize one fixture per top-level class, in first-seen order.
///
/// Interfaces produce no output. A class without public methods still gets
/// a fixture containing only the setup routine.
pub fn synthesize_with(unit: &SourceUnit, config: &GeneratorConfig) -> Vec<GeneratedUnit> {
    let indent = config.indent();
    let units: Vec<GeneratedUnit> = unit
        .testable_classes()
        .map(|(namespace, class)| {
            let doc = build_fixture(unit, namespace, class, config);
            GeneratedUnit {
                file_name: FixtureNames::for_class(&class.name).file_name,
                content: render::render(&doc, &indent),
            }
        })
        .collect();

    debug!(units = units.len(), "synthesized test fixtures");
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;

    #[test]
    fn test_interfaces_produce_nothing() {
        let unit = extract(
            r#"
namespace Acme
{
    public interface IOnly {}
}
"#,
        )
        .unwrap();
        assert!(synthesize(&unit).is_empty());
    }

    #[test]
    fn test_file_path() {
        let unit = GeneratedUnit {
            file_name: "WidgetTests".to_string(),
            content: String::new(),
        };
        assert_eq!(
            unit.file_path("out"),
            PathBuf::from("out").join("WidgetTests.cs")
        );
    }

    #[test]
    fn test_custom_dialect() {
        let unit = extract(
            r#"
namespace Acme
{
    public class Widget
    {
        public void Spin() {}
    }
}
"#,
        )
        .unwrap();
        let config = GeneratorConfig {
            test_attribute: "TestMethod".to_string(),
            setup_attribute: "TestInitialize".to_string(),
            fixture_attribute: "TestClass".to_string(),
            failure_message: "fill in".to_string(),
            ..Default::default()
        };
        let generated = synthesize_with(&unit, &config);
        let content = &generated[0].content;
        assert!(content.contains("[TestClass]"));
        assert!(content.contains("[TestInitialize]"));
        assert!(content.contains("[TestMethod]"));
        assert!(content.contains("Assert.Fail(\"fill in\");"));
    }
}
