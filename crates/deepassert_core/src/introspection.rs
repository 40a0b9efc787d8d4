//! Child enumeration for struct nodes.

use std::collections::HashSet;

use deepassert_reflect::{Shape, Struct, TypeName, Value};
use tracing::warn;

/// A child of a node, as produced by an [`IntrospectionStrategy`].
#[derive(Debug, Clone)]
pub struct ChildNode {
    pub name: String,
    pub value: Value,
    pub declared_type: TypeName,
}

/// Enumerates the children of struct nodes.
///
/// Containers (sequences, arrays, maps and optionals) are handled by the
/// driver itself and never reach the strategy through the default walk.
pub trait IntrospectionStrategy: Send + Sync {
    /// Returns the children of `node` in traversal order.
    fn child_nodes(&self, node: &Value) -> Vec<ChildNode>;

    /// Describes the strategy for configuration reports.
    fn description(&self) -> String;
}

/// Walks declared members, then the members of each base in turn.
///
/// A name shadowed by a more derived declaration is reported once, with the
/// most derived value. Synthetic members are skipped, and so are members
/// that cannot be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIntrospectionStrategy;

impl IntrospectionStrategy for DefaultIntrospectionStrategy {
    fn child_nodes(&self, node: &Value) -> Vec<ChildNode> {
        let Some(object) = node.as_object() else {
            return Vec::new();
        };
        let Shape::Struct(declared) = object.shape() else {
            return Vec::new();
        };

        let mut children = Vec::new();
        let mut seen = HashSet::new();
        let mut current: Option<&dyn Struct> = Some(declared);

        while let Some(layer) = current {
            for field in layer.fields() {
                if field.synthetic || !seen.insert(field.name.clone()) {
                    continue;
                }
                match field.value {
                    Ok(value) => children.push(ChildNode {
                        name: field.name.into_owned(),
                        value,
                        declared_type: field.declared_type,
                    }),
                    Err(error) => {
                        warn!(
                            owner = %object.type_name(),
                            field = %field.name,
                            error = %error,
                            "Skipping unreadable field"
                        );
                    }
                }
            }
            current = layer.base();
        }

        children
    }

    fn description(&self) -> String {
        "DefaultIntrospectionStrategy (all fields including inherited ones, synthetic fields skipped)"
            .to_string()
    }
}
