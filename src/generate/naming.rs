//! Naming rules for generated fixtures.

use std::collections::HashSet;

use crate::extract::MethodDecl;

/// Names derived from the class under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureNames {
    /// Namespace of the generated document (`{C}UnitTests`).
    pub namespace: String,
    /// Generated test class (`{C}Tests`).
    pub class: String,
    /// Suggested file name without extension (`{C}Tests`).
    pub file_name: String,
    /// Field holding the subject under test (`_{C}Instance`).
    pub instance_field: String,
}

impl FixtureNames {
    pub fn for_class(class_name: &str) -> Self {
        Self {
            namespace: format!("{}UnitTests", class_name),
            class: format!("{}Tests", class_name),
            file_name: format!("{}Tests", class_name),
            instance_field: format!("_{}Instance", class_name),
        }
    }
}

/// Field holding the double for a mockable constructor parameter.
pub fn dependency_field(parameter_name: &str) -> String {
    format!("_{}Dependency", parameter_name)
}

/// Stub test name for a method.
pub fn test_method(method_name: &str) -> String {
    format!("{}Test", method_name)
}

/// Stub test names for a class's methods, in order.
///
/// Overloads would collide, so repeats get a numeric suffix starting at 2
/// (`RunTest`, `RunTest2`).
pub fn unique_test_methods(methods: &[MethodDecl]) -> Vec<String> {
    let mut used = HashSet::new();
    methods
        .iter()
        .map(|m| {
            let base = test_method(&m.name);
            let mut candidate = base.clone();
            let mut n = 2;
            while used.contains(&candidate) {
                candidate = format!("{}{}", base, n);
                n += 1;
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> MethodDecl {
        MethodDecl {
            name: name.to_string(),
            parameters: vec![],
            return_type: "void".to_string(),
            is_static: false,
        }
    }

    #[test]
    fn test_fixture_names() {
        let names = FixtureNames::for_class("Custom1");
        assert_eq!(names.namespace, "Custom1UnitTests");
        assert_eq!(names.class, "Custom1Tests");
        assert_eq!(names.file_name, "Custom1Tests");
        assert_eq!(names.instance_field, "_Custom1Instance");
    }

    #[test]
    fn test_dependency_field() {
        assert_eq!(dependency_field("c"), "_cDependency");
    }

    #[test]
    fn test_overloads_get_suffix() {
        let methods = vec![method("Run"), method("Stop"), method("Run"), method("Run")];
        assert_eq!(
            unique_test_methods(&methods),
            vec!["RunTest", "StopTest", "RunTest2", "RunTest3"]
        );
    }
}
