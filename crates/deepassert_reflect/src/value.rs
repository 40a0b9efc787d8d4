//! Graph node handles.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::{Reflect, ToValue, TypeName};

/// Identity of an object node within one traversal.
///
/// Derived from the address of the node's `Rc` allocation, so two handles
/// to the same allocation share an id while equal-valued copies do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw address this id was derived from.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

/// An unboxed scalar value.
///
/// Primitives have no identity and no children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
}

macro_rules! primitive_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        impl Primitive {
            /// Returns the name of the Rust type this scalar was taken from.
            pub fn type_name(&self) -> TypeName {
                match self {
                    $(Primitive::$variant(_) => TypeName::of::<$ty>(),)*
                }
            }
        }

        impl fmt::Display for Primitive {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Primitive::$variant(value) => fmt::Display::fmt(value, f),)*
                }
            }
        }

        $(
            impl From<$ty> for Primitive {
                #[inline]
                fn from(value: $ty) -> Self {
                    Primitive::$variant(value)
                }
            }

            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Primitive(Primitive::$variant(value))
                }
            }

            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::Primitive(Primitive::$variant(*self))
                }
            }
        )*
    };
}

primitive_conversions! {
    Bool => bool,
    Char => char,
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
}

/// A handle to a node of an object graph.
///
/// Cloning a `Value` is cheap: object nodes are reference counted and the
/// clone shares the node's identity.
///
/// # Example
///
/// ```rust
/// use deepassert_reflect::Value;
///
/// let name = Value::object(String::from("Kent Beck"));
/// assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some("Kent Beck"));
/// assert_eq!(name.identity(), name.clone().identity());
///
/// let missing = Value::nullable::<String>(None);
/// assert!(missing.is_null());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// An absent reference.
    #[default]
    Null,
    /// An unboxed scalar.
    Primitive(Primitive),
    /// Any other node.
    Object(Rc<dyn Reflect>),
}

impl Value {
    /// Moves `value` into a new object node.
    pub fn object<T: Reflect>(value: T) -> Self {
        Value::Object(Rc::new(value))
    }

    /// Wraps an existing allocation, preserving its identity.
    pub fn from_rc<T: Reflect>(value: Rc<T>) -> Self {
        Value::Object(value)
    }

    /// Maps `None` to [`Value::Null`] and `Some` to the referenced value.
    pub fn nullable<T: ToValue + ?Sized>(value: Option<&T>) -> Self {
        value.map_or(Value::Null, ToValue::to_value)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Value::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<dyn Reflect>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the object node as `T` if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let object = self.as_object()?;
        let any: &dyn Any = &**object;
        any.downcast_ref::<T>()
    }

    /// Returns the concrete type of the node, or `None` for null.
    pub fn runtime_type(&self) -> Option<TypeName> {
        match self {
            Value::Null => None,
            Value::Primitive(primitive) => Some(primitive.type_name()),
            Value::Object(object) => Some(object.type_name()),
        }
    }

    /// Returns the identity of an object node.
    ///
    /// Null and primitives have no identity.
    pub fn identity(&self) -> Option<NodeId> {
        match self {
            Value::Object(object) => Some(NodeId(Rc::as_ptr(object).cast::<()>() as usize)),
            _ => None,
        }
    }

    /// Returns the textual rendering of the node.
    pub fn repr(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Primitive(primitive) => primitive.to_string(),
            Value::Object(object) => object.repr(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Primitive(primitive) => write!(f, "Primitive({:?})", primitive),
            Value::Object(object) => write!(
                f,
                "Object({}: {})",
                object.type_name().short_name(),
                object.repr()
            ),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::object(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::object(value.to_owned())
    }
}

impl<T: Reflect> From<Rc<T>> for Value {
    fn from(value: Rc<T>) -> Self {
        Value::Object(value)
    }
}

impl From<Rc<dyn Reflect>> for Value {
    fn from(value: Rc<dyn Reflect>) -> Self {
        Value::Object(value)
    }
}
