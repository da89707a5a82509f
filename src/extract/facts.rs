//! Declaration structures extracted from a C# compilation unit.

use std::collections::HashMap;
use std::fmt;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Kind of top-level type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `using` directive at the compilation-unit level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The dotted namespace or type path (e.g., "System.Collections.Generic").
    pub path: String,
    /// Alias for `using Alias = Path;` directives.
    pub alias: Option<String>,
    /// Whether this is a `using static` directive.
    pub is_static: bool,
}

impl Import {
    /// Plain `using Path;` directive.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            is_static: false,
        }
    }
}

/// A named, typed parameter of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// The type exactly as written in source (e.g., "int", "IFoo", "List<string>").
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// The instance constructor used to build the class under test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub parameters: Vec<Parameter>,
}

/// A public method declared on a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Return type as written; "void" for procedures.
    pub return_type: String,
    /// Static methods are invoked through the type, not the instance.
    pub is_static: bool,
}

impl MethodDecl {
    /// Whether the method returns a value worth capturing.
    pub fn returns_value(&self) -> bool {
        self.return_type != "void"
    }
}

/// A top-level class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub kind: TypeKind,
    /// First declared instance constructor, if any.
    pub constructor: Option<ConstructorDecl>,
    /// Public methods in declaration order.
    pub methods: Vec<MethodDecl>,
    /// Static classes have no instances to construct.
    pub is_static: bool,
    pub span: Span,
}

impl ClassDecl {
    /// Whether this declaration gets a generated test fixture.
    pub fn is_testable(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Constructor parameters; empty for an implicit default constructor.
    pub fn constructor_parameters(&self) -> &[Parameter] {
        self.constructor
            .as_ref()
            .map(|c| c.parameters.as_slice())
            .unwrap_or(&[])
    }
}

/// A namespace block and the types declared directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Dotted name; empty for the global namespace.
    pub name: String,
    pub classes: Vec<ClassDecl>,
}

impl Namespace {
    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }
}

/// Name-indexed lookup of every top-level type declared in a unit.
///
/// Lookups are by simple name only. Two types sharing a simple name in
/// different namespaces resolve to the first one declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeIndex {
    kinds: HashMap<String, TypeKind>,
}

impl TypeIndex {
    /// Record a declaration. Keeps the first kind seen for a name.
    pub fn insert(&mut self, name: &str, kind: TypeKind) {
        self.kinds.entry(name.to_string()).or_insert(kind);
    }

    /// Resolve a type as written in source.
    ///
    /// Namespace qualifiers and generic argument lists are stripped, so
    /// `Acme.IFoo` and `IRepository<User>` resolve by `IFoo` and `IRepository`.
    pub fn resolve(&self, type_name: &str) -> Option<TypeKind> {
        let base = type_name.split('<').next().unwrap_or(type_name).trim();
        let simple = base.rsplit('.').next().unwrap_or(base);
        self.kinds.get(simple).copied()
    }

    pub fn is_interface(&self, type_name: &str) -> bool {
        self.resolve(type_name) == Some(TypeKind::Interface)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Everything extracted from one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    /// Unit-level `using` directives in source order.
    pub imports: Vec<Import>,
    /// Namespaces in document order.
    pub namespaces: Vec<Namespace>,
    pub types: TypeIndex,
}

impl SourceUnit {
    /// Iterate over top-level classes that get a fixture, paired with their namespace.
    pub fn testable_classes(&self) -> impl Iterator<Item = (&Namespace, &ClassDecl)> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.classes.iter().map(move |c| (ns, c)))
            .filter(|(_, c)| c.is_testable())
    }

    /// Find a top-level declaration by name.
    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.classes.iter())
            .find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TypeIndex {
        let mut types = TypeIndex::default();
        types.insert("IFoo", TypeKind::Interface);
        types.insert("Widget", TypeKind::Class);
        types.insert("IRepository", TypeKind::Interface);
        types
    }

    #[test]
    fn test_resolve_simple_and_qualified() {
        let types = index();
        assert_eq!(types.resolve("IFoo"), Some(TypeKind::Interface));
        assert_eq!(types.resolve("Acme.Core.IFoo"), Some(TypeKind::Interface));
        assert_eq!(types.resolve("Widget"), Some(TypeKind::Class));
        assert_eq!(types.resolve("int"), None);
    }

    #[test]
    fn test_resolve_generic() {
        let types = index();
        assert!(types.is_interface("IRepository<User>"));
        assert!(!types.is_interface("List<IFoo>"));
    }

    #[test]
    fn test_first_kind_wins() {
        let mut types = index();
        types.insert("IFoo", TypeKind::Class);
        assert!(types.is_interface("IFoo"));
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn test_constructor_parameters_default_empty() {
        let class = ClassDecl {
            name: "Plain".to_string(),
            kind: TypeKind::Class,
            constructor: None,
            methods: vec![],
            is_static: false,
            span: Span {
                start_byte: 0,
                end_byte: 0,
                start_line: 1,
                start_col: 1,
            },
        };
        assert!(class.constructor_parameters().is_empty());
        assert!(class.is_testable());
    }

    #[test]
    fn test_returns_value() {
        let method = MethodDecl {
            name: "Run".to_string(),
            parameters: vec![],
            return_type: "void".to_string(),
            is_static: false,
        };
        assert!(!method.returns_value());
    }
}
