//! Abstract tree of a generated test document.
//!
//! Nodes carry structure and names only; `render` owns every formatting
//! decision (braces, indentation, separators, quoting).

use crate::extract::Import;

/// An expression inside a generated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare name: a local, field or type.
    Ident(String),
    /// Literal source text emitted verbatim (`0`, `null`, `'\0'`).
    Literal(String),
    /// A string literal; quoted on render.
    Str(String),
    /// The `default` literal.
    Default,
    /// `target.name`
    Member { target: Box<Expr>, name: String },
    /// `target.method(args)`
    Call {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `new Type(args)`
    New { type_name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Self {
        Expr::Member {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: Box::new(target),
            method: method.into(),
            args,
        }
    }

    pub fn new_object(type_name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::New {
            type_name: type_name.into(),
            args,
        }
    }
}

/// A statement in a generated method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `Type name = value;`
    Local {
        type_name: String,
        name: String,
        value: Expr,
    },
    /// `target = value;`
    Assign { target: Expr, value: Expr },
    /// `expr;`
    Expr(Expr),
}

/// A private field of the test class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub type_name: String,
    pub name: String,
}

/// A public, parameterless, void method of the test class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNode {
    pub attributes: Vec<String>,
    pub name: String,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub attributes: Vec<String>,
    pub name: String,
    pub fields: Vec<FieldNode>,
    pub methods: Vec<MethodNode>,
}

impl ClassNode {
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceNode {
    pub name: String,
    pub class: ClassNode,
}

/// A complete generated document: imports and one namespace with one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDocument {
    pub imports: Vec<Import>,
    pub namespace: NamespaceNode,
}
