//! Text rendering for generated documents.
//!
//! The single place that knows the output layout: Allman braces, one
//! indentation unit per nesting level, a blank line after the imports and
//! between class members, `\n` line endings and one trailing newline.

use crate::extract::Import;

use super::document::{ClassNode, CodeDocument, Expr, FieldNode, MethodNode, Statement};

/// Line-oriented writer tracking the current nesting level.
struct Writer<'a> {
    out: String,
    indent: &'a str,
    level: usize,
}

impl<'a> Writer<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            out: String::new(),
            indent,
            level: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.out.push_str(self.indent);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.level += 1;
    }

    fn close(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Render a document to source text using `indent` for each nesting level.
pub fn render(doc: &CodeDocument, indent: &str) -> String {
    let mut w = Writer::new(indent);

    for import in &doc.imports {
        w.line(&render_import(import));
    }
    if !doc.imports.is_empty() {
        w.blank();
    }

    w.line(&format!("namespace {}", doc.namespace.name));
    w.open();
    render_class(&mut w, &doc.namespace.class);
    w.close();

    w.finish()
}

fn render_class(w: &mut Writer, class: &ClassNode) {
    for attribute in &class.attributes {
        w.line(&format!("[{}]", attribute));
    }
    w.line(&format!("public class {}", class.name));
    w.open();

    for field in &class.fields {
        w.line(&render_field(field));
    }

    for (i, method) in class.methods.iter().enumerate() {
        if i > 0 || !class.fields.is_empty() {
            w.blank();
        }
        render_method(w, method);
    }

    w.close();
}

fn render_field(field: &FieldNode) -> String {
    format!("private {} {};", field.type_name, field.name)
}

fn render_method(w: &mut Writer, method: &MethodNode) {
    for attribute in &method.attributes {
        w.line(&format!("[{}]", attribute));
    }
    w.line(&format!("public void {}()", method.name));
    w.open();
    for statement in &method.body {
        w.line(&render_statement(statement));
    }
    w.close();
}

pub fn render_import(import: &Import) -> String {
    match (&import.alias, import.is_static) {
        (Some(alias), _) => format!("using {} = {};", alias, import.path),
        (None, true) => format!("using static {};", import.path),
        (None, false) => format!("using {};", import.path),
    }
}

pub fn render_statement(statement: &Statement) -> String {
    match statement {
        Statement::Local {
            type_name,
            name,
            value,
        } => format!("{} {} = {};", type_name, name, render_expr(value)),
        Statement::Assign { target, value } => {
            format!("{} = {};", render_expr(target), render_expr(value))
        }
        Statement::Expr(expr) => format!("{};", render_expr(expr)),
    }
}

pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Literal(text) => text.clone(),
        Expr::Str(text) => format!("\"{}\"", escape_string(text)),
        Expr::Default => "default".to_string(),
        Expr::Member { target, name } => format!("{}.{}", render_expr(target), name),
        Expr::Call {
            target,
            method,
            args,
        } => format!("{}.{}({})", render_expr(target), method, render_args(args)),
        Expr::New { type_name, args } => format!("new {}({})", type_name, render_args(args)),
    }
}

fn render_args(args: &[Expr]) -> String {
    args.iter().map(render_expr).collect::<Vec<_>>().join(", ")
}

fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::document::NamespaceNode;

    #[test]
    fn test_render_imports() {
        assert_eq!(render_import(&Import::new("System")), "using System;");
        let alias = Import {
            path: "Newtonsoft.Json".to_string(),
            alias: Some("Json".to_string()),
            is_static: false,
        };
        assert_eq!(render_import(&alias), "using Json = Newtonsoft.Json;");
        let stat = Import {
            path: "System.Math".to_string(),
            alias: None,
            is_static: true,
        };
        assert_eq!(render_import(&stat), "using static System.Math;");
    }

    #[test]
    fn test_render_expressions() {
        let ctor = Expr::new_object(
            "Custom1",
            vec![
                Expr::ident("a"),
                Expr::member(Expr::ident("_cDependency"), "Object"),
            ],
        );
        assert_eq!(render_expr(&ctor), "new Custom1(a, _cDependency.Object)");

        let fail = Expr::call(Expr::ident("Assert"), "Fail", vec![Expr::Str("a \"b\"".into())]);
        assert_eq!(render_expr(&fail), "Assert.Fail(\"a \\\"b\\\"\")");
    }

    #[test]
    fn test_render_document_layout() {
        let doc = CodeDocument {
            imports: vec![Import::new("Acme")],
            namespace: NamespaceNode {
                name: "WidgetUnitTests".to_string(),
                class: ClassNode {
                    attributes: vec!["TestFixture".to_string()],
                    name: "WidgetTests".to_string(),
                    fields: vec![FieldNode {
                        type_name: "Widget".to_string(),
                        name: "_WidgetInstance".to_string(),
                    }],
                    methods: vec![MethodNode {
                        attributes: vec!["SetUp".to_string()],
                        name: "SetUp".to_string(),
                        body: vec![Statement::Assign {
                            target: Expr::ident("_WidgetInstance"),
                            value: Expr::new_object("Widget", vec![]),
                        }],
                    }],
                },
            },
        };

        let expected = "\
using Acme;

namespace WidgetUnitTests
{
  [TestFixture]
  public class WidgetTests
  {
    private Widget _WidgetInstance;

    [SetUp]
    public void SetUp()
    {
      _WidgetInstance = new Widget();
    }
  }
}
";
        assert_eq!(render(&doc, "  "), expected);
    }
}
