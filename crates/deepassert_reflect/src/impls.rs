//! Reflection for standard library types.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;

use crate::{Field, Reflect, Shape, Struct, ToValue, TypeName, Value};

fn join_repr<'a>(values: impl IntoIterator<Item = &'a Value>) -> String {
    values
        .into_iter()
        .map(Value::repr)
        .collect::<Vec<_>>()
        .join(", ")
}

fn in_iteration_order<T>(items: Vec<T>) -> Vec<T> {
    items
}

/// Hash containers iterate in an arbitrary order, so their elements are
/// reported sorted by `repr`. Elements with equal `repr` keep their
/// iteration order.
fn sorted_by_repr(mut elements: Vec<Value>) -> Vec<Value> {
    elements.sort_by_cached_key(Value::repr);
    elements
}

fn sorted_by_key_repr(mut entries: Vec<(Value, Value)>) -> Vec<(Value, Value)> {
    entries.sort_by_cached_key(|(key, _)| key.repr());
    entries
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(self)
    }

    fn repr(&self) -> String {
        self.clone()
    }
}

/// A string exposes its byte buffer, mirroring its in-memory layout.
impl Struct for String {
    fn fields(&self) -> Vec<Field> {
        vec![Field::of("vec", &self.as_bytes().to_vec())]
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::object(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::object(self.to_owned())
    }
}

impl<T: Reflect> ToValue for Rc<T> {
    fn declared_type() -> TypeName {
        TypeName::of::<T>()
    }

    fn to_value(&self) -> Value {
        Value::from_rc(Rc::clone(self))
    }
}

impl ToValue for Rc<dyn Reflect> {
    fn declared_type() -> TypeName {
        TypeName::of::<dyn Reflect>()
    }

    fn to_value(&self) -> Value {
        Value::Object(Rc::clone(self))
    }
}

/// An unset cell reads as null.
impl<T: ToValue> ToValue for OnceCell<T> {
    fn declared_type() -> TypeName {
        T::declared_type()
    }

    fn to_value(&self) -> Value {
        Value::nullable(self.get())
    }
}

impl<T: ToValue + 'static> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Optional(self.as_ref().map(ToValue::to_value))
    }

    fn repr(&self) -> String {
        match self {
            Some(value) => format!("Some({})", value.to_value().repr()),
            None => "None".to_string(),
        }
    }
}

impl<T: ToValue + Clone + 'static> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::object(self.clone())
    }
}

macro_rules! reflect_sequence {
    ($($collection:ident $(: $bound:ident)? => $order:ident),* $(,)?) => {
        $(
            impl<T: ToValue + 'static $(+ $bound)?> Reflect for $collection<T> {
                fn shape(&self) -> Shape<'_> {
                    Shape::Sequence($order(self.iter().map(ToValue::to_value).collect::<Vec<_>>()))
                }

                fn repr(&self) -> String {
                    let elements = $order(self.iter().map(ToValue::to_value).collect::<Vec<_>>());
                    format!("[{}]", join_repr(&elements))
                }
            }

            impl<T: ToValue + Clone + 'static $(+ $bound)?> ToValue for $collection<T> {
                fn to_value(&self) -> Value {
                    Value::object(self.clone())
                }
            }
        )*
    };
}

reflect_sequence! {
    Vec => in_iteration_order,
    VecDeque => in_iteration_order,
    BTreeSet: Ord => in_iteration_order,
    HashSet: Hash => sorted_by_repr,
}

impl<T: ToValue + 'static, const N: usize> Reflect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Array {
            elements: self.iter().map(ToValue::to_value).collect(),
            element_type: T::declared_type(),
        }
    }

    fn repr(&self) -> String {
        let elements: Vec<Value> = self.iter().map(ToValue::to_value).collect();
        format!("[{}]", join_repr(&elements))
    }
}

impl<T: ToValue + Clone + 'static, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::object(self.clone())
    }
}

impl<T: ToValue + 'static> Reflect for Box<[T]> {
    fn shape(&self) -> Shape<'_> {
        Shape::Array {
            elements: self.iter().map(ToValue::to_value).collect(),
            element_type: T::declared_type(),
        }
    }

    fn repr(&self) -> String {
        let elements: Vec<Value> = self.iter().map(ToValue::to_value).collect();
        format!("[{}]", join_repr(&elements))
    }
}

impl<T: ToValue + Clone + 'static> ToValue for Box<[T]> {
    fn to_value(&self) -> Value {
        Value::object(self.clone())
    }
}

macro_rules! reflect_map {
    ($($map:ident $(: $bound:ident)? => $order:ident),* $(,)?) => {
        $(
            impl<K, V> Reflect for $map<K, V>
            where
                K: ToValue + 'static $(+ $bound)?,
                V: ToValue + 'static,
            {
                fn shape(&self) -> Shape<'_> {
                    Shape::Map($order(
                        self.iter()
                            .map(|(key, value)| (key.to_value(), value.to_value()))
                            .collect::<Vec<_>>(),
                    ))
                }

                fn repr(&self) -> String {
                    let entries: Vec<String> = $order(
                        self.iter()
                            .map(|(key, value)| (key.to_value(), value.to_value()))
                            .collect::<Vec<_>>(),
                    )
                    .iter()
                    .map(|(key, value)| format!("{}={}", key.repr(), value.repr()))
                    .collect();
                    format!("{{{}}}", entries.join(", "))
                }
            }

            impl<K, V> ToValue for $map<K, V>
            where
                K: ToValue + Clone + 'static $(+ $bound)?,
                V: ToValue + Clone + 'static,
            {
                fn to_value(&self) -> Value {
                    Value::object(self.clone())
                }
            }
        )*
    };
}

reflect_map! {
    BTreeMap: Ord => in_iteration_order,
    HashMap: Hash => sorted_by_key_repr,
}
