//! Builds the document tree of one test fixture.

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::extract::{ClassDecl, Import, MethodDecl, Namespace, Parameter, SourceUnit};

use super::classify::{classify, default_literal, ParameterRole};
use super::document::{ClassNode, CodeDocument, Expr, FieldNode, MethodNode, NamespaceNode, Statement};
use super::naming::{dependency_field, unique_test_methods, FixtureNames};

/// Locals capturing the result of a value-returning call.
const ACTUAL_LOCAL: &str = "actual";
const EXPECTED_LOCAL: &str = "expected";

/// Build the fixture document for `class`, declared in `namespace` of `unit`.
pub fn build_fixture(
    unit: &SourceUnit,
    namespace: &Namespace,
    class: &ClassDecl,
    config: &GeneratorConfig,
) -> CodeDocument {
    let names = FixtureNames::for_class(&class.name);

    // Static classes are never instantiated.
    let mut fields = Vec::new();
    if !class.is_static {
        fields.push(FieldNode {
            type_name: class.name.clone(),
            name: names.instance_field.clone(),
        });
    }
    let setup = build_setup(unit, class, &names, config, &mut fields);

    let mut methods = vec![setup];
    for (method, test_name) in class.methods.iter().zip(unique_test_methods(&class.methods)) {
        methods.push(build_stub(class, method, test_name, &names, config));
    }

    debug!(
        class = %class.name,
        at = %class.span,
        fields = fields.len(),
        stubs = class.methods.len(),
        "built test fixture"
    );

    CodeDocument {
        imports: fixture_imports(unit, namespace, config),
        namespace: NamespaceNode {
            name: names.namespace,
            class: ClassNode {
                attributes: vec![config.fixture_attribute.clone()],
                name: names.class,
                fields,
                methods,
            },
        },
    }
}

/// `[Ns] + unit imports`, then framework imports not already present.
fn fixture_imports(unit: &SourceUnit, namespace: &Namespace, config: &GeneratorConfig) -> Vec<Import> {
    let mut imports = Vec::with_capacity(unit.imports.len() + config.framework_imports.len() + 1);
    if !namespace.is_global() {
        imports.push(Import::new(namespace.name.as_str()));
    }
    imports.extend(unit.imports.iter().cloned());

    for framework in &config.framework_imports {
        let present = imports
            .iter()
            .any(|i| i.alias.is_none() && !i.is_static && &i.path == framework);
        if !present {
            imports.push(Import::new(framework.as_str()));
        }
    }
    imports
}

/// The setup routine: create doubles, then default locals, then the subject.
///
/// Adds one dependency field per mockable constructor parameter to `fields`.
fn build_setup(
    unit: &SourceUnit,
    class: &ClassDecl,
    names: &FixtureNames,
    config: &GeneratorConfig,
    fields: &mut Vec<FieldNode>,
) -> MethodNode {
    let mut doubles = Vec::new();
    let mut locals = Vec::new();
    let mut args = Vec::new();

    for parameter in class.constructor_parameters() {
        match classify(parameter, &unit.types) {
            ParameterRole::Mockable => {
                let field = dependency_field(&parameter.name);
                let mock_type = format!("{}<{}>", config.mock_type, parameter.type_name);
                fields.push(FieldNode {
                    type_name: mock_type.clone(),
                    name: field.clone(),
                });
                doubles.push(Statement::Assign {
                    target: Expr::ident(field.as_str()),
                    value: Expr::new_object(mock_type, vec![]),
                });
                args.push(Expr::member(
                    Expr::ident(field),
                    config.mock_object_property.as_str(),
                ));
            }
            ParameterRole::LiteralDefault(literal) => {
                locals.push(Statement::Local {
                    type_name: parameter.type_name.clone(),
                    name: parameter.name.clone(),
                    value: Expr::Literal(literal.to_string()),
                });
                args.push(Expr::ident(parameter.name.as_str()));
            }
        }
    }

    let mut body = doubles;
    body.append(&mut locals);
    if !class.is_static {
        body.push(Statement::Assign {
            target: Expr::ident(names.instance_field.as_str()),
            value: Expr::new_object(class.name.as_str(), args),
        });
    }

    MethodNode {
        attributes: vec![config.setup_attribute.clone()],
        name: config.setup_method.clone(),
        body,
    }
}

/// One stub test: default arguments, the call, then an always-failing assertion.
fn build_stub(
    class: &ClassDecl,
    method: &MethodDecl,
    test_name: String,
    names: &FixtureNames,
    config: &GeneratorConfig,
) -> MethodNode {
    let mut body: Vec<Statement> = method
        .parameters
        .iter()
        .map(|p| Statement::Local {
            type_name: p.type_name.clone(),
            name: p.name.clone(),
            value: Expr::Literal(default_literal(&p.type_name).to_string()),
        })
        .collect();

    let receiver = if method.is_static || class.is_static {
        Expr::ident(class.name.as_str())
    } else {
        Expr::ident(names.instance_field.as_str())
    };
    let args = method
        .parameters
        .iter()
        .map(|p| Expr::ident(p.name.as_str()))
        .collect();
    let call = Expr::call(receiver, method.name.as_str(), args);

    if method.returns_value() {
        let actual = capture_local(ACTUAL_LOCAL, &method.parameters);
        let expected = capture_local(EXPECTED_LOCAL, &method.parameters);
        let assertion = config.render_equality(&actual, &expected);
        body.push(Statement::Local {
            type_name: method.return_type.clone(),
            name: actual,
            value: call,
        });
        body.push(Statement::Local {
            type_name: method.return_type.clone(),
            name: expected,
            value: Expr::Default,
        });
        body.push(Statement::Expr(Expr::Literal(assertion)));
    } else {
        body.push(Statement::Expr(call));
    }

    body.push(Statement::Expr(Expr::call(
        Expr::ident("Assert"),
        "Fail",
        vec![Expr::Str(config.failure_message.clone())],
    )));

    MethodNode {
        attributes: vec![config.test_attribute.clone()],
        name: test_name,
        body,
    }
}

/// A capture local named `base`, suffixed when a parameter already uses it.
fn capture_local(base: &str, parameters: &[Parameter]) -> String {
    let taken = |name: &str| parameters.iter().any(|p| p.name == name);
    let mut name = base.to_string();
    let mut suffix = 1;
    while taken(&name) {
        name = format!("{}{}", base, suffix);
        suffix += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{ConstructorDecl, Parameter, Span, TypeKind};

    fn span() -> Span {
        Span {
            start_byte: 0,
            end_byte: 0,
            start_line: 1,
            start_col: 1,
        }
    }

    fn unit_with(class: ClassDecl, interfaces: &[&str]) -> SourceUnit {
        let mut unit = SourceUnit {
            imports: vec![Import::new("System")],
            ..Default::default()
        };
        for name in interfaces {
            unit.types.insert(name, TypeKind::Interface);
        }
        unit.types.insert(&class.name, TypeKind::Class);
        unit.namespaces.push(Namespace {
            name: "Acme".to_string(),
            classes: vec![class],
        });
        unit
    }

    fn build(unit: &SourceUnit) -> CodeDocument {
        let ns = &unit.namespaces[0];
        build_fixture(unit, ns, &ns.classes[0], &GeneratorConfig::default())
    }

    #[test]
    fn test_setup_wires_mocks_and_defaults() {
        let class = ClassDecl {
            name: "Billing".to_string(),
            kind: TypeKind::Class,
            constructor: Some(ConstructorDecl {
                parameters: vec![
                    Parameter::new("gateway", "IGateway"),
                    Parameter::new("retries", "int"),
                    Parameter::new("clock", "IClock"),
                ],
            }),
            methods: vec![],
            is_static: false,
            span: span(),
        };
        let unit = unit_with(class, &["IGateway", "IClock"]);
        let doc = build(&unit);
        let fixture = &doc.namespace.class;

        assert_eq!(
            fixture.field_names(),
            vec!["_BillingInstance", "_gatewayDependency", "_clockDependency"]
        );
        assert_eq!(fixture.fields[1].type_name, "Mock<IGateway>");

        let setup = &fixture.methods[0];
        assert_eq!(setup.name, "SetUp");
        assert_eq!(setup.body.len(), 4);
        assert_eq!(
            setup.body[3],
            Statement::Assign {
                target: Expr::ident("_BillingInstance"),
                value: Expr::new_object(
                    "Billing",
                    vec![
                        Expr::member(Expr::ident("_gatewayDependency"), "Object"),
                        Expr::ident("retries"),
                        Expr::member(Expr::ident("_clockDependency"), "Object"),
                    ],
                ),
            }
        );
    }

    #[test]
    fn test_stub_for_static_method_uses_type() {
        let class = ClassDecl {
            name: "Parser".to_string(),
            kind: TypeKind::Class,
            constructor: None,
            methods: vec![MethodDecl {
                name: "Parse".to_string(),
                parameters: vec![Parameter::new("text", "string")],
                return_type: "int".to_string(),
                is_static: true,
            }],
            is_static: false,
            span: span(),
        };
        let unit = unit_with(class, &[]);
        let doc = build(&unit);
        let stub = &doc.namespace.class.methods[1];

        assert_eq!(stub.name, "ParseTest");
        assert_eq!(stub.attributes, vec!["Test"]);
        assert_eq!(
            stub.body[1],
            Statement::Local {
                type_name: "int".to_string(),
                name: "actual".to_string(),
                value: Expr::call(Expr::ident("Parser"), "Parse", vec![Expr::ident("text")]),
            }
        );
        assert_eq!(stub.body.len(), 5);
    }

    #[test]
    fn test_imports_namespace_first_then_framework() {
        let class = ClassDecl {
            name: "Plain".to_string(),
            kind: TypeKind::Class,
            constructor: None,
            methods: vec![],
            is_static: false,
            span: span(),
        };
        let mut unit = unit_with(class, &[]);
        unit.imports.push(Import::new("Moq"));
        let doc = build(&unit);
        let paths: Vec<_> = doc.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["Acme", "System", "Moq", "NUnit.Framework"]);
    }

    fn getter(parameters: Vec<Parameter>) -> ClassDecl {
        ClassDecl {
            name: "Widget".to_string(),
            kind: TypeKind::Class,
            constructor: None,
            methods: vec![MethodDecl {
                name: "Get".to_string(),
                parameters,
                return_type: "int".to_string(),
                is_static: false,
            }],
            is_static: false,
            span: span(),
        }
    }

    fn local_names(method: &MethodNode) -> Vec<&str> {
        method
            .body
            .iter()
            .filter_map(|s| match s {
                Statement::Local { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_capture_locals_avoid_parameter_names() {
        let unit = unit_with(
            getter(vec![
                Parameter::new("actual", "int"),
                Parameter::new("actual1", "int"),
                Parameter::new("expected", "int"),
            ]),
            &[],
        );
        let doc = build(&unit);
        let stub = &doc.namespace.class.methods[1];

        assert_eq!(
            local_names(stub),
            vec!["actual", "actual1", "expected", "actual2", "expected1"]
        );
        assert_eq!(
            stub.body[5],
            Statement::Expr(Expr::Literal(
                "Assert.That(actual2, Is.EqualTo(expected1))".to_string()
            ))
        );
    }

    #[test]
    fn test_capture_locals_keep_plain_names() {
        let unit = unit_with(getter(vec![Parameter::new("id", "int")]), &[]);
        let doc = build(&unit);
        let stub = &doc.namespace.class.methods[1];
        assert_eq!(local_names(stub), vec!["id", "actual", "expected"]);
    }

    #[test]
    fn test_equality_assertion_follows_config() {
        let unit = unit_with(getter(vec![]), &[]);
        let ns = &unit.namespaces[0];
        let config = GeneratorConfig {
            test_attribute: "TestMethod".to_string(),
            equality_assertion: "Assert.AreEqual({expected}, {actual})".to_string(),
            ..Default::default()
        };
        let doc = build_fixture(&unit, ns, &ns.classes[0], &config);
        let stub = &doc.namespace.class.methods[1];

        assert_eq!(stub.attributes, vec!["TestMethod"]);
        assert_eq!(
            stub.body[2],
            Statement::Expr(Expr::Literal(
                "Assert.AreEqual(expected, actual)".to_string()
            ))
        );
    }

    #[test]
    fn test_static_class_has_no_instance() {
        let class = ClassDecl {
            name: "Guard".to_string(),
            kind: TypeKind::Class,
            constructor: None,
            methods: vec![MethodDecl {
                name: "NotNull".to_string(),
                parameters: vec![Parameter::new("value", "object")],
                return_type: "void".to_string(),
                is_static: true,
            }],
            is_static: true,
            span: span(),
        };
        let unit = unit_with(class, &[]);
        let doc = build(&unit);
        let fixture = &doc.namespace.class;

        assert!(fixture.fields.is_empty());
        assert!(fixture.methods[0].body.is_empty());
        assert_eq!(
            fixture.methods[1].body[1],
            Statement::Expr(Expr::call(
                Expr::ident("Guard"),
                "NotNull",
                vec![Expr::ident("value")]
            ))
        );
    }
}
