//! Pass/fail checks over an object graph.

use deepassert_reflect::Value;

use crate::config::RecursiveAssertionConfig;
use crate::driver::RecursiveAssertionDriver;
use crate::RecursiveAssertionError;

/// Runs a predicate over a graph and turns failures into an error report.
///
/// # Example
///
/// ```rust
/// use deepassert_core::RecursiveAssertion;
/// use deepassert_reflect::{reflect_struct, Value};
///
/// struct Author {
///     name: String,
///     email: Option<String>,
/// }
///
/// reflect_struct!(Author { name, email });
///
/// let author = Value::object(Author { name: "Kent Beck".into(), email: None });
/// let error = RecursiveAssertion::default()
///     .all_fields_satisfy(&author, |value| value.repr().len() < 5)
///     .unwrap_err();
/// assert_eq!(error.failed_fields()[0].render(), "name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecursiveAssertion {
    driver: RecursiveAssertionDriver,
}

impl RecursiveAssertion {
    pub fn new(config: RecursiveAssertionConfig) -> Self {
        Self {
            driver: RecursiveAssertionDriver::new(config),
        }
    }

    pub fn driver(&self) -> &RecursiveAssertionDriver {
        &self.driver
    }

    /// Checks that every selected field of `root` satisfies `predicate`.
    pub fn all_fields_satisfy<P>(&self, root: &Value, predicate: P) -> Result<(), RecursiveAssertionError>
    where
        P: FnMut(&Value) -> bool,
    {
        let fields = self.driver.assert_over_object_graph(predicate, root);
        if fields.is_empty() {
            return Ok(());
        }
        Err(RecursiveAssertionError::FieldsFailed {
            fields,
            configuration: self.driver.config().to_string(),
        })
    }

    /// Checks that no selected field of `root` is null.
    pub fn has_no_null_fields(&self, root: &Value) -> Result<(), RecursiveAssertionError> {
        self.all_fields_satisfy(root, |value| !value.is_null())
    }
}
