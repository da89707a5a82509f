//! C# declaration extractor using tree-sitter.

use streaming_iterator::StreamingIterator;
use tracing::{debug, trace};
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::error::ParseError;
use crate::extract::{
    ClassDecl, ConstructorDecl, DeclarationExtractor, Import, MethodDecl, Namespace, Parameter,
    ParsedSource, SourceUnit, Span, TypeKind,
};

/// Tree-sitter query for `using` directives.
///
/// Directives nested inside namespace blocks also match; only the ones
/// whose parent is the compilation unit are kept.
const USING_QUERY: &str = r#"
(using_directive) @using
"#;

/// Node kinds that can sit in front of a member's type but are not the type.
const NON_TYPE_KINDS: &[&str] = &[
    "modifier",
    "attribute_list",
    "explicit_interface_specifier",
    "type_parameter_list",
];

pub struct CSharpExtractor {
    language: Language,
}

impl CSharpExtractor {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    fn extract_imports(&self, parsed: &ParsedSource) -> Result<Vec<Import>, ParseError> {
        let query = Query::new(&self.language, USING_QUERY)?;
        let mut cursor = QueryCursor::new();
        let root = parsed.tree.root_node();
        let mut matches = cursor.matches(&query, root, parsed.source.as_bytes());

        let mut imports = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let at_unit_level = node
                    .parent()
                    .map(|p| p.kind() == "compilation_unit")
                    .unwrap_or(false);
                if !at_unit_level {
                    continue;
                }
                if let Some(import) = parse_using(parsed.node_text(node)) {
                    imports.push(import);
                }
            }
        }

        Ok(imports)
    }

    /// Walk a namespace block, including nested blocks, in document order.
    fn collect_namespace(
        &self,
        parsed: &ParsedSource,
        node: Node,
        outer: &str,
        unit: &mut SourceUnit,
    ) {
        let own = namespace_name(parsed, node);
        let name = if outer.is_empty() {
            own.to_string()
        } else {
            format!("{}.{}", outer, own)
        };

        unit.namespaces.push(Namespace {
            name: name.clone(),
            classes: Vec::new(),
        });

        let body = node.child_by_field_name("body").or_else(|| {
            node.children(&mut node.walk())
                .find(|c| c.kind() == "declaration_list")
        });
        if let Some(body) = body {
            self.collect_members(parsed, body, &name, unit);
        }
    }

    /// Collect the type declarations and namespace blocks directly inside `container`.
    fn collect_members(
        &self,
        parsed: &ParsedSource,
        container: Node,
        namespace: &str,
        unit: &mut SourceUnit,
    ) {
        let mut cursor = container.walk();
        for child in container.children(&mut cursor) {
            match child.kind() {
                "namespace_declaration" => self.collect_namespace(parsed, child, namespace, unit),
                "class_declaration" | "interface_declaration" => {
                    self.push_type(parsed, child, namespace, unit)
                }
                _ => {}
            }
        }
    }

    fn push_type(&self, parsed: &ParsedSource, node: Node, namespace: &str, unit: &mut SourceUnit) {
        let Some(decl) = self.extract_type(parsed, node) else {
            return;
        };

        unit.types.insert(&decl.name, decl.kind);

        // Keep first-seen order: a type after a nested block opens a new entry.
        match unit.namespaces.last_mut() {
            Some(ns) if ns.name == namespace => ns.classes.push(decl),
            _ => unit.namespaces.push(Namespace {
                name: namespace.to_string(),
                classes: vec![decl],
            }),
        }
    }

    fn extract_type(&self, parsed: &ParsedSource, node: Node) -> Option<ClassDecl> {
        let kind = match node.kind() {
            "class_declaration" => TypeKind::Class,
            "interface_declaration" => TypeKind::Interface,
            _ => return None,
        };

        let name_node = node.child_by_field_name("name").or_else(|| {
            node.children(&mut node.walk())
                .find(|c| c.kind() == "identifier")
        })?;
        let name = parsed.node_text(name_node).to_string();

        let mut decl = ClassDecl {
            name,
            kind,
            constructor: None,
            methods: Vec::new(),
            is_static: has_modifier(parsed, node, "static"),
            span: Span::from_node(node),
        };

        // Interfaces only feed the type index.
        if kind == TypeKind::Interface {
            return Some(decl);
        }

        let body = node.child_by_field_name("body").or_else(|| {
            node.children(&mut node.walk())
                .find(|c| c.kind() == "declaration_list")
        });
        let Some(body) = body else {
            return Some(decl);
        };

        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            match member.kind() {
                "constructor_declaration" => {
                    if has_modifier(parsed, member, "static") {
                        continue;
                    }
                    if decl.constructor.is_some() {
                        trace!(class = %decl.name, "ignoring additional constructor");
                        continue;
                    }
                    decl.constructor = Some(ConstructorDecl {
                        parameters: self.extract_parameters(parsed, member),
                    });
                }
                "method_declaration" if has_modifier(parsed, member, "public") => {
                    if let Some(method) = self.extract_method(parsed, member) {
                        decl.methods.push(method);
                    }
                }
                _ => {}
            }
        }

        Some(decl)
    }

    fn extract_method(&self, parsed: &ParsedSource, node: Node) -> Option<MethodDecl> {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        let param_list_index = children.iter().position(|c| c.kind() == "parameter_list")?;

        // The method name is the last identifier before the parameter list
        let name_node = node.child_by_field_name("name").or_else(|| {
            children[..param_list_index]
                .iter()
                .rev()
                .find(|c| c.kind() == "identifier")
                .copied()
        })?;
        let name_index = children.iter().position(|c| c.id() == name_node.id())?;

        let return_type = node
            .child_by_field_name("returns")
            .or_else(|| node.child_by_field_name("type"))
            .or_else(|| {
                children[..name_index]
                    .iter()
                    .rev()
                    .find(|c| c.is_named() && !NON_TYPE_KINDS.contains(&c.kind()))
                    .copied()
            })
            .map(|n| normalize_type(parsed.node_text(n)))
            .unwrap_or_else(|| "void".to_string());

        Some(MethodDecl {
            name: parsed.node_text(name_node).to_string(),
            parameters: self.extract_parameters(parsed, node),
            return_type,
            is_static: has_modifier(parsed, node, "static"),
        })
    }

    fn extract_parameters(&self, parsed: &ParsedSource, member: Node) -> Vec<Parameter> {
        let list = member.child_by_field_name("parameters").or_else(|| {
            member
                .children(&mut member.walk())
                .find(|c| c.kind() == "parameter_list")
        });
        let Some(list) = list else {
            return Vec::new();
        };

        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|c| matches!(c.kind(), "parameter" | "parameter_array"))
            .filter_map(|p| extract_parameter(parsed, p))
            .collect()
    }
}

impl Default for CSharpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationExtractor for CSharpExtractor {
    fn language_id(&self) -> &'static str {
        "csharp"
    }

    fn parse<'a>(&self, source: &'a str) -> Result<ParsedSource<'a>, ParseError> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

        if let Some(node) = first_error(tree.root_node()) {
            let pos = node.start_position();
            debug!(
                line = pos.row + 1,
                column = pos.column + 1,
                kind = node.kind(),
                "rejecting source with syntax error"
            );
            return Err(ParseError::Syntax {
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }

        Ok(ParsedSource { tree, source })
    }

    fn collect(&self, parsed: &ParsedSource) -> Result<SourceUnit, ParseError> {
        let mut unit = SourceUnit {
            imports: self.extract_imports(parsed)?,
            ..Default::default()
        };

        let root = parsed.tree.root_node();
        // File-scoped `namespace X;` applies to every declaration after it.
        let mut scope = String::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "namespace_declaration" => self.collect_namespace(parsed, child, "", &mut unit),
                "file_scoped_namespace_declaration" => {
                    scope = namespace_name(parsed, child).to_string();
                    unit.namespaces.push(Namespace {
                        name: scope.clone(),
                        classes: Vec::new(),
                    });
                    self.collect_members(parsed, child, &scope, &mut unit);
                }
                "class_declaration" | "interface_declaration" => {
                    self.push_type(parsed, child, &scope, &mut unit)
                }
                _ => {}
            }
        }

        debug!(
            language = self.language_id(),
            imports = unit.imports.len(),
            namespaces = unit.namespaces.len(),
            types = unit.types.len(),
            "extracted source unit"
        );
        Ok(unit)
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn namespace_name<'a>(parsed: &ParsedSource<'a>, node: Node) -> &'a str {
    node.child_by_field_name("name")
        .or_else(|| {
            node.children(&mut node.walk())
                .find(|c| matches!(c.kind(), "qualified_name" | "identifier"))
        })
        .map(|n| parsed.node_text(n))
        .unwrap_or("")
}

fn has_modifier(parsed: &ParsedSource, node: Node, keyword: &str) -> bool {
    node.children(&mut node.walk())
        .any(|c| c.kind() == "modifier" && parsed.node_text(c) == keyword)
}

fn extract_parameter(parsed: &ParsedSource, node: Node) -> Option<Parameter> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    let name_node = node.child_by_field_name("name").or_else(|| {
        children
            .iter()
            .rev()
            .find(|c| c.kind() == "identifier")
            .copied()
    })?;
    let name_index = children.iter().position(|c| c.id() == name_node.id())?;

    let type_name = node
        .child_by_field_name("type")
        .or_else(|| {
            children[..name_index]
                .iter()
                .rev()
                .find(|c| c.is_named() && !NON_TYPE_KINDS.contains(&c.kind()))
                .copied()
        })
        .map(|n| normalize_type(parsed.node_text(n)))
        .unwrap_or_else(|| "object".to_string());

    Some(Parameter::new(parsed.node_text(name_node), type_name))
}

/// Collapse whitespace inside a type as written (`Dictionary<string,\n int>`).
fn normalize_type(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the text of a `using` directive.
///
/// Handles `using X;`, `global using X;`, `using static X;` and `using A = X;`.
fn parse_using(text: &str) -> Option<Import> {
    let body = text.trim().trim_end_matches(';');
    let mut tokens = body.split_whitespace().peekable();

    if tokens.peek() == Some(&"global") {
        tokens.next();
    }
    if tokens.next() != Some("using") {
        return None;
    }
    let is_static = tokens.peek() == Some(&"static");
    if is_static {
        tokens.next();
    }

    let rest = tokens.collect::<Vec<_>>().join(" ");
    let (alias, path) = match rest.split_once('=') {
        Some((alias, path)) => (Some(alias.trim().to_string()), path),
        None => (None, rest.as_str()),
    };
    let path = normalize_type(path);
    if path.is_empty() {
        return None;
    }

    Some(Import {
        path,
        alias,
        is_static,
    })
}
