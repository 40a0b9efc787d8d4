//! Reflection traits.
//!
//! A type takes part in an object graph by implementing [`Reflect`]. The
//! [`Shape`] it reports tells a traversal how to reach its children:
//! plain structs expose named members through [`Struct`], while containers
//! hand out their elements directly.

use std::any::Any;
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Weak;

use crate::{AccessError, TypeName, Value};

/// A node that can be inspected at runtime.
pub trait Reflect: Any {
    /// Returns the concrete type of this node.
    fn type_name(&self) -> TypeName {
        TypeName::of::<Self>()
    }

    /// Returns how the children of this node are reached.
    fn shape(&self) -> Shape<'_>;

    /// Returns the textual rendering of this node.
    ///
    /// Used for map key and value segments of a field path. Must not
    /// recurse into object children, since graphs may be cyclic.
    fn repr(&self) -> String {
        self.type_name().short_name().to_owned()
    }
}

/// Classification of a node for traversal.
pub enum Shape<'a> {
    /// A plain object whose members are reached through introspection.
    Struct(&'a dyn Struct),
    /// An ordered, growable collection.
    Sequence(Vec<Value>),
    /// A fixed-size array; elements are declared as `element_type`.
    Array {
        elements: Vec<Value>,
        element_type: TypeName,
    },
    /// Key/value entries in iteration order.
    Map(Vec<(Value, Value)>),
    /// An optional wrapper, possibly empty.
    Optional(Option<Value>),
    /// A leaf without children.
    Opaque,
}

/// A node made of named members.
pub trait Struct {
    /// Members declared directly on this type, in declaration order.
    fn fields(&self) -> Vec<Field>;

    /// The embedded ancestor whose members this type inherits.
    fn base(&self) -> Option<&dyn Struct> {
        None
    }
}

/// A member of a [`Struct`].
#[derive(Debug, Clone)]
pub struct Field {
    pub name: Cow<'static, str>,
    pub value: Result<Value, AccessError>,
    pub declared_type: TypeName,
    /// Generated members, such as back-references to an enclosing owner.
    pub synthetic: bool,
}

impl Field {
    pub fn new(name: impl Into<Cow<'static, str>>, value: Value, declared_type: TypeName) -> Self {
        Self {
            name: name.into(),
            value: Ok(value),
            declared_type,
            synthetic: false,
        }
    }

    /// Creates a member from a Rust value, declared as `T`.
    pub fn of<T: ToValue + ?Sized>(name: impl Into<Cow<'static, str>>, value: &T) -> Self {
        Self::new(name, value.to_value(), T::declared_type())
    }

    /// Creates a nullable member: `None` becomes [`Value::Null`].
    pub fn nullable<T: ToValue + ?Sized>(
        name: impl Into<Cow<'static, str>>,
        value: Option<&T>,
    ) -> Self {
        Self::new(name, Value::nullable(value), T::declared_type())
    }

    /// Creates a member held in a `RefCell`.
    ///
    /// The member is unreadable while the cell is mutably borrowed.
    pub fn borrowed<T: ToValue>(name: impl Into<Cow<'static, str>>, cell: &RefCell<T>) -> Self {
        match cell.try_borrow() {
            Ok(value) => Self::new(name, value.to_value(), T::declared_type()),
            Err(_) => Self::unreadable(name, T::declared_type(), AccessError::Borrowed),
        }
    }

    /// Creates a member held through a weak reference.
    ///
    /// The member is unreadable once the target has been dropped.
    pub fn weak<T: Reflect>(name: impl Into<Cow<'static, str>>, weak: &Weak<T>) -> Self {
        match weak.upgrade() {
            Some(target) => Self::new(name, Value::from_rc(target), TypeName::of::<T>()),
            None => Self::unreadable(name, TypeName::of::<T>(), AccessError::Dangling),
        }
    }

    pub fn unreadable(
        name: impl Into<Cow<'static, str>>,
        declared_type: TypeName,
        error: AccessError,
    ) -> Self {
        Self {
            name: name.into(),
            value: Err(error),
            declared_type,
            synthetic: false,
        }
    }

    /// Marks this member as generated rather than declared.
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }
}

/// Conversion of a member's Rust value into a graph node.
pub trait ToValue {
    /// The type reported as the declared type of a member holding `Self`.
    fn declared_type() -> TypeName {
        TypeName::of::<Self>()
    }

    fn to_value(&self) -> Value;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn declared_type() -> TypeName {
        T::declared_type()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    struct Leaf;

    impl Reflect for Leaf {
        fn shape(&self) -> Shape<'_> {
            Shape::Opaque
        }
    }

    #[test]
    fn test_default_type_name_and_repr() {
        let leaf = Leaf;
        assert!(leaf.type_name().as_str().ends_with("::Leaf"));
        assert_eq!(leaf.repr(), "Leaf");
    }

    #[test]
    fn test_field_of_uses_declared_type() {
        let field = Field::of("age", &42u32);
        assert_eq!(field.name, "age");
        assert_eq!(field.declared_type, TypeName::of::<u32>());
        assert!(!field.synthetic);
        assert!(matches!(field.value, Ok(Value::Primitive(_))));
    }

    #[test]
    fn test_field_of_reference_uses_referent_type() {
        let name: &str = "static";
        let field = Field::of("name", &name);
        assert_eq!(field.declared_type, TypeName::of::<str>());
    }

    #[test]
    fn test_field_nullable() {
        let field = Field::nullable::<String>("nickname", None);
        assert!(matches!(field.value, Ok(Value::Null)));
        assert_eq!(field.declared_type, TypeName::of::<String>());
    }

    #[test]
    fn test_field_borrowed() {
        let cell = RefCell::new(5i32);
        assert!(Field::borrowed("count", &cell).value.is_ok());

        let _guard = cell.borrow_mut();
        let field = Field::borrowed("count", &cell);
        assert_eq!(field.value.unwrap_err(), AccessError::Borrowed);
        assert_eq!(field.declared_type, TypeName::of::<i32>());
    }

    #[test]
    fn test_field_weak() {
        let target = Rc::new(Leaf);
        let weak = Rc::downgrade(&target);
        let field = Field::weak("leaf", &weak);
        assert_eq!(
            field.value.as_ref().ok().and_then(Value::identity),
            Value::from_rc(Rc::clone(&target)).identity()
        );

        drop(field);
        drop(target);
        let field = Field::weak("leaf", &weak);
        assert_eq!(field.value.unwrap_err(), AccessError::Dangling);
    }

    #[test]
    fn test_field_synthetic() {
        let field = Field::of("owner", &1u8).synthetic();
        assert!(field.synthetic);
    }
}
