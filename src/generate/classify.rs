//! Constructor dependency classification and the literal-default policy.
//!
//! Only parameters typed by an interface declared in the same unit are
//! treated as dependencies needing a test double. Everything else gets a
//! cheap placeholder so the subject can be constructed without wiring a
//! full object graph. Resolution is by name, not by type checking.

use phf::phf_map;
use tracing::trace;

use crate::extract::{Parameter, TypeIndex};

/// Placeholder literals for built-in types, keyed by keyword or `System` name.
static BUILTIN_DEFAULTS: phf::Map<&'static str, &'static str> = phf_map! {
    "bool" => "false",
    "Boolean" => "false",
    "byte" => "0",
    "Byte" => "0",
    "sbyte" => "0",
    "SByte" => "0",
    "short" => "0",
    "Int16" => "0",
    "ushort" => "0",
    "UInt16" => "0",
    "int" => "0",
    "Int32" => "0",
    "uint" => "0u",
    "UInt32" => "0u",
    "long" => "0L",
    "Int64" => "0L",
    "ulong" => "0UL",
    "UInt64" => "0UL",
    "nint" => "0",
    "nuint" => "0",
    "float" => "0f",
    "Single" => "0f",
    "double" => "0d",
    "Double" => "0d",
    "decimal" => "0m",
    "Decimal" => "0m",
    "char" => "'\\0'",
    "Char" => "'\\0'",
    "string" => "null",
    "String" => "null",
    "object" => "null",
    "Object" => "null",
    "dynamic" => "null",
};

/// How a constructor parameter is satisfied in the generated setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterRole {
    /// Typed by a declared interface: gets a mock field.
    Mockable,
    /// Anything else: gets a local initialized with this literal.
    LiteralDefault(&'static str),
}

/// Classify a constructor parameter against the unit's declared types.
///
/// Never fails; unknown types fall back to the literal-default policy.
pub fn classify(parameter: &Parameter, types: &TypeIndex) -> ParameterRole {
    let role = if types.is_interface(&parameter.type_name) {
        ParameterRole::Mockable
    } else {
        ParameterRole::LiteralDefault(default_literal(&parameter.type_name))
    };
    trace!(
        parameter = %parameter.name,
        type_name = %parameter.type_name,
        ?role,
        "classified constructor parameter"
    );
    role
}

/// Placeholder literal for a value of the given type.
///
/// Numeric built-ins get zero, `bool` gets `false`, `char` gets `'\0'`.
/// Strings, `object`, arrays and nullable types get `null`. Everything
/// else gets `default`.
pub fn default_literal(type_name: &str) -> &'static str {
    let name = type_name.trim();
    if name.ends_with('?') || name.ends_with(']') {
        return "null";
    }
    let name = name.strip_prefix("System.").unwrap_or(name);
    BUILTIN_DEFAULTS.get(name).copied().unwrap_or("default")
}
