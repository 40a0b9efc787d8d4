//! # deepassert_reflect
//!
//! Runtime object model for deepassert.
//!
//! Rust has no runtime reflection, so types that take part in a recursive
//! assertion describe themselves through the traits in this crate. A graph
//! is a set of [`Value`] handles: object nodes are reference counted, which
//! gives every node a stable identity and allows cycles through `Rc`,
//! `Weak`, `OnceCell` or `RefCell` links.
//!
//! ## Architecture
//!
//! - [`Reflect`] reports a node's [`Shape`]: struct, sequence, array, map,
//!   optional wrapper or opaque leaf
//! - [`Struct`] exposes named members as [`Field`]s, including an inherited
//!   base and generated (synthetic) members
//! - [`ToValue`] turns a member's Rust value into a [`Value`]
//! - Standard library strings, collections and `Option` are reflected out of
//!   the box
//!
//! ## Example
//!
//! ```rust
//! use deepassert_reflect::{reflect_struct, Reflect, Shape, Value};
//!
//! struct Author {
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! reflect_struct!(Author { name, email });
//!
//! let author = Value::object(Author { name: "Kent Beck".into(), email: None });
//! let shape = author.as_object().map(|node| node.shape());
//! assert!(matches!(shape, Some(Shape::Struct(_))));
//! ```

mod error;
mod impls;
mod macros;
mod reflect;
mod type_name;
mod value;

pub use error::AccessError;
pub use reflect::{Field, Reflect, Shape, Struct, ToValue};
pub use type_name::TypeName;
pub use value::{NodeId, Primitive, Value};
