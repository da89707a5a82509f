//! Generator configuration.
//!
//! Controls the test dialect of generated fixtures. The defaults emit NUnit
//! fixtures with Moq doubles; a YAML file can override any field.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Widest accepted indentation level.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Placeholders substituted in `equality_assertion`.
const ACTUAL_PLACEHOLDER: &str = "{actual}";
const EXPECTED_PLACEHOLDER: &str = "{expected}";

lazy_static! {
    /// A plain C# identifier (no generics, no qualification).
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();

    /// A dotted namespace path.
    static ref NAMESPACE_PATH: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
}

/// Settings for the emitted test fixtures.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Attribute placed on the generated class (default: "TestFixture").
    #[serde(default = "default_fixture_attribute")]
    pub fixture_attribute: String,
    /// Attribute marking the initialization routine (default: "SetUp").
    #[serde(default = "default_setup_attribute")]
    pub setup_attribute: String,
    /// Name of the initialization routine (default: "SetUp").
    #[serde(default = "default_setup_method")]
    pub setup_method: String,
    /// Attribute marking each stub test (default: "Test").
    #[serde(default = "default_test_attribute")]
    pub test_attribute: String,
    /// Generic mock wrapper type (default: "Mock", rendered as `Mock<IFoo>`).
    #[serde(default = "default_mock_type")]
    pub mock_type: String,
    /// Property exposing the mocked instance (default: "Object").
    #[serde(default = "default_mock_object_property")]
    pub mock_object_property: String,
    /// Equality check emitted for value-returning methods, with `{actual}`
    /// and `{expected}` placeholders. MSTest: `Assert.AreEqual({expected}, {actual})`.
    #[serde(default = "default_equality_assertion")]
    pub equality_assertion: String,
    /// Message of the always-failing assertion closing each stub.
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
    /// Imports appended after the source imports when not already present.
    #[serde(default = "default_framework_imports")]
    pub framework_imports: Vec<String>,
    /// Spaces per indentation level (default: 4).
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_fixture_attribute() -> String {
    "TestFixture".to_string()
}

fn default_setup_attribute() -> String {
    "SetUp".to_string()
}

fn default_setup_method() -> String {
    "SetUp".to_string()
}

fn default_test_attribute() -> String {
    "Test".to_string()
}

fn default_mock_type() -> String {
    "Mock".to_string()
}

fn default_mock_object_property() -> String {
    "Object".to_string()
}

fn default_equality_assertion() -> String {
    "Assert.That({actual}, Is.EqualTo({expected}))".to_string()
}

fn default_failure_message() -> String {
    "autogenerated".to_string()
}

fn default_framework_imports() -> Vec<String> {
    vec!["NUnit.Framework".to_string(), "Moq".to_string()]
}

fn default_indent_width() -> usize {
    4
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fixture_attribute: default_fixture_attribute(),
            setup_attribute: default_setup_attribute(),
            setup_method: default_setup_method(),
            test_attribute: default_test_attribute(),
            mock_type: default_mock_type(),
            mock_object_property: default_mock_object_property(),
            equality_assertion: default_equality_assertion(),
            failure_message: default_failure_message(),
            framework_imports: default_framework_imports(),
            indent_width: default_indent_width(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from a YAML file and validate it.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::parse_str(&content)?;
        Ok(config)
    }

    /// Parse a configuration from YAML text and validate it.
    ///
    /// An empty document yields the defaults.
    pub fn parse_str(yaml: &str) -> anyhow::Result<Self> {
        let config: GeneratorConfig = if yaml.trim().is_empty() {
            GeneratorConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        validate(&config)?;
        Ok(config)
    }

    /// The indentation unit for one nesting level.
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// The equality assertion comparing the locals `actual` and `expected`.
    pub fn render_equality(&self, actual: &str, expected: &str) -> String {
        self.equality_assertion
            .replace(ACTUAL_PLACEHOLDER, actual)
            .replace(EXPECTED_PLACEHOLDER, expected)
    }
}

/// Validate a configuration for correctness.
pub fn validate(config: &GeneratorConfig) -> anyhow::Result<()> {
    let identifiers = [
        ("fixture_attribute", &config.fixture_attribute),
        ("setup_attribute", &config.setup_attribute),
        ("setup_method", &config.setup_method),
        ("test_attribute", &config.test_attribute),
        ("mock_type", &config.mock_type),
        ("mock_object_property", &config.mock_object_property),
    ];
    for (field, value) in identifiers {
        if !IDENTIFIER.is_match(value) {
            anyhow::bail!("invalid {} {:?}, must be a C# identifier", field, value);
        }
    }

    for import in &config.framework_imports {
        if !NAMESPACE_PATH.is_match(import) {
            anyhow::bail!("invalid framework import {:?}", import);
        }
    }

    if config.failure_message.contains('"') || config.failure_message.contains('\n') {
        anyhow::bail!(
            "invalid failure_message {:?}, must not contain quotes or newlines",
            config.failure_message
        );
    }

    let assertion = &config.equality_assertion;
    if !assertion.contains(ACTUAL_PLACEHOLDER) || !assertion.contains(EXPECTED_PLACEHOLDER) {
        anyhow::bail!(
            "invalid equality_assertion {:?}, must reference {} and {}",
            assertion,
            ACTUAL_PLACEHOLDER,
            EXPECTED_PLACEHOLDER
        );
    }
    if assertion.contains('\n') || assertion.contains(';') {
        anyhow::bail!(
            "invalid equality_assertion {:?}, must be a single expression",
            assertion
        );
    }

    if !(1..=MAX_INDENT_WIDTH).contains(&config.indent_width) {
        anyhow::bail!(
            "indent_width must be between 1 and {}, got {}",
            MAX_INDENT_WIDTH,
            config.indent_width
        );
    }

    Ok(())
}
