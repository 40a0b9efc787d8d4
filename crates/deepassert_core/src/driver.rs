//! Object graph traversal.
//!
//! The driver walks a graph depth-first from a root [`Value`], tests the
//! nodes selected by its [`RecursiveAssertionConfig`] and reports the paths
//! of the nodes that fail.
//!
//! ## Per-node rules
//!
//! Each node reached from its parent goes through, in order:
//!
//! 1. type exclusion: a declared or runtime type listed as ignored drops
//!    the node and everything below it (the root included)
//! 2. null exclusion, when all null fields are ignored
//! 3. cycle check: an object already reached in this run is dropped, unless
//!    its test was skipped only because of an ignored field path
//! 4. the test, unless the node is the root, its rules path is an ignored
//!    field or matches an ignored pattern, it is an ignored primitive, or it
//!    is a container whose policy leaves the container itself out
//! 5. child enumeration: containers per their policy, structs through the
//!    introspection strategy unless they are standard library types and
//!    library recursion is off
//!
//! Ignoring a field by name or pattern only skips its test; its children
//! are still reached. An object first reached through an ignored field is
//! tested when it is reached again through a path that is not ignored, but
//! its children are not walked a second time.

use std::convert::Infallible;

use deepassert_reflect::{Shape, TypeName, Value};
use tracing::{debug, trace};

use crate::config::RecursiveAssertionConfig;
use crate::visited::VisitedNodes;
use crate::FieldPath;

/// Walks object graphs with a fixed configuration.
///
/// A driver keeps no state between calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RecursiveAssertionDriver {
    config: RecursiveAssertionConfig,
}

/// A node waiting on the walk stack.
struct Pending {
    path: FieldPath,
    value: Value,
    /// `None` when only the runtime type is known.
    declared_type: Option<TypeName>,
}

impl Pending {
    fn new(path: FieldPath, value: Value, declared_type: Option<TypeName>) -> Self {
        Self {
            path,
            value,
            declared_type,
        }
    }
}

impl RecursiveAssertionDriver {
    pub fn new(config: RecursiveAssertionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecursiveAssertionConfig {
        &self.config
    }

    /// Tests every selected descendant of `root` and returns the paths for
    /// which `predicate` returned `false`, in discovery order.
    ///
    /// The root itself is never tested.
    pub fn assert_over_object_graph<P>(&self, mut predicate: P, root: &Value) -> Vec<FieldPath>
    where
        P: FnMut(&Value) -> bool,
    {
        match self.try_assert_over_object_graph(|value| Ok::<_, Infallible>(predicate(value)), root)
        {
            Ok(failures) => failures,
            Err(never) => match never {},
        }
    }

    /// Like [`assert_over_object_graph`](Self::assert_over_object_graph),
    /// with a fallible predicate.
    ///
    /// # Errors
    ///
    /// The first error returned by `predicate` stops the walk and is
    /// returned as is.
    pub fn try_assert_over_object_graph<P, E>(
        &self,
        mut predicate: P,
        root: &Value,
    ) -> Result<Vec<FieldPath>, E>
    where
        P: FnMut(&Value) -> Result<bool, E>,
    {
        let mut visited = VisitedNodes::new();
        let mut failures = Vec::new();
        let mut stack = vec![Pending::new(
            FieldPath::root(),
            root.clone(),
            root.runtime_type(),
        )];

        while let Some(node) = stack.pop() {
            if self.is_ignored_type(&node) {
                trace!(path = %node.path, "Skipping node of ignored type");
                continue;
            }
            if node.value.is_null() && self.config.ignore_all_null_fields() {
                trace!(path = %node.path, "Skipping null node");
                continue;
            }
            let first_visit = visited.mark(&node.value);
            if !first_visit && !visited.is_test_deferred(&node.value) {
                trace!(path = %node.path, "Skipping already visited node");
                continue;
            }

            let shape = node.value.as_object().map(|object| object.shape());

            let ignored_field = self.is_ignored_field(&node.path);
            if !ignored_field && self.should_test(&node, shape.as_ref()) {
                visited.complete_test(&node.value);
                if !predicate(&node.value)? {
                    failures.push(node.path.clone());
                }
            } else if ignored_field && first_visit {
                trace!(path = %node.path, "Not testing ignored field");
                visited.defer_test(&node.value);
            }

            // A revisited node only gets its deferred test; its children were
            // reached on the first visit.
            if !first_visit {
                continue;
            }

            let children = match shape {
                Some(shape) => self.children_of(&node, shape),
                None => Vec::new(),
            };
            stack.extend(children.into_iter().rev());
        }

        debug!(
            visited = visited.len(),
            failures = failures.len(),
            "Recursive assertion completed"
        );
        Ok(failures)
    }

    fn is_ignored_type(&self, node: &Pending) -> bool {
        if self.config.ignored_types().is_empty() {
            return false;
        }
        let declared = node
            .declared_type
            .as_ref()
            .is_some_and(|declared| self.config.is_ignored_type(declared));
        declared
            || node
                .value
                .runtime_type()
                .is_some_and(|runtime| self.config.is_ignored_type(&runtime))
    }

    fn is_ignored_field(&self, path: &FieldPath) -> bool {
        !path.is_root()
            && (self.config.matches_ignored_field(path)
                || self.config.matches_ignored_field_regex(path))
    }

    fn should_test(&self, node: &Pending, shape: Option<&Shape<'_>>) -> bool {
        if node.path.is_root() {
            return false;
        }
        if node.value.is_primitive() && self.config.ignore_primitive_fields() {
            return false;
        }
        match shape {
            Some(Shape::Sequence(_) | Shape::Array { .. }) => {
                self.config.collection_policy().tests_container()
            }
            Some(Shape::Map(_)) => self.config.map_policy().tests_container(),
            Some(Shape::Optional(_)) => self.config.optional_policy().tests_container(),
            _ => true,
        }
    }

    fn children_of(&self, node: &Pending, shape: Shape<'_>) -> Vec<Pending> {
        let path = &node.path;
        match shape {
            Shape::Sequence(elements) => {
                if !self.config.collection_policy().visits_elements() {
                    return Vec::new();
                }
                elements
                    .into_iter()
                    .enumerate()
                    .map(|(index, element)| Pending::new(path.array_index(index), element, None))
                    .collect()
            }
            Shape::Array {
                elements,
                element_type,
            } => {
                if !self.config.collection_policy().visits_elements() {
                    return Vec::new();
                }
                elements
                    .into_iter()
                    .enumerate()
                    .map(|(index, element)| {
                        Pending::new(path.array_index(index), element, Some(element_type.clone()))
                    })
                    .collect()
            }
            Shape::Map(entries) => {
                let policy = self.config.map_policy();
                let mut children = Vec::new();
                if policy.visits_values() {
                    children.extend(entries.iter().map(|(_, value)| {
                        Pending::new(path.map_value(value.repr()), value.clone(), None)
                    }));
                }
                if policy.visits_keys() {
                    children.extend(entries.into_iter().map(|(key, _)| {
                        Pending::new(path.map_key(key.repr()), key, None)
                    }));
                }
                children
            }
            Shape::Optional(value) => {
                if !self.config.optional_policy().visits_value() {
                    return Vec::new();
                }
                value
                    .map(|value| Pending::new(path.field("value"), value, None))
                    .into_iter()
                    .collect()
            }
            Shape::Struct(_) => {
                if self.is_gated_library_type(&node.value) {
                    trace!(path = %path, "Not recursing into standard library type");
                    return Vec::new();
                }
                self.config
                    .introspection_strategy()
                    .child_nodes(&node.value)
                    .into_iter()
                    .map(|child| {
                        Pending::new(path.field(child.name), child.value, Some(child.declared_type))
                    })
                    .collect()
            }
            Shape::Opaque => Vec::new(),
        }
    }

    fn is_gated_library_type(&self, value: &Value) -> bool {
        !self.config.recurse_into_library_types()
            && value
                .runtime_type()
                .is_some_and(|runtime| runtime.is_library())
    }
}
