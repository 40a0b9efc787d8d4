//! # deepassert_core
//!
//! Recursive assertion engine for deepassert.
//!
//! This crate provides:
//! - [`FieldPath`], the location of a node relative to the traversal root
//! - [`RecursiveAssertionConfig`] and its builder, with JSON options files
//! - The pluggable [`IntrospectionStrategy`] for struct nodes
//! - [`RecursiveAssertionDriver`], which walks possibly cyclic object graphs
//!   and collects the paths that fail a predicate
//! - [`RecursiveAssertion`], which turns those paths into an error report
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use deepassert_core::{MapPolicy, RecursiveAssertionConfig, RecursiveAssertionDriver};
//! use deepassert_reflect::{reflect_struct, Value};
//!
//! struct Inventory {
//!     stock: BTreeMap<String, u32>,
//! }
//!
//! reflect_struct!(Inventory { stock });
//!
//! let inventory = Value::object(Inventory {
//!     stock: BTreeMap::from([("apple".to_string(), 3)]),
//! });
//! let config = RecursiveAssertionConfig::builder()
//!     .map_policy(MapPolicy::MapObjectAndEntries)
//!     .build()?;
//!
//! let failures = RecursiveAssertionDriver::new(config).assert_over_object_graph(|_| false, &inventory);
//! let rendered: Vec<String> = failures.iter().map(|path| path.render()).collect();
//! assert_eq!(rendered, ["stock", "stock.VAL[3]", "stock.KEY[apple]"]);
//! # Ok::<(), deepassert_core::ConfigError>(())
//! ```

mod assertion;
mod config;
mod driver;
mod error;
mod introspection;
mod options;
mod path;
mod policy;
mod visited;

pub use assertion::RecursiveAssertion;
pub use config::{RecursiveAssertionConfig, RecursiveAssertionConfigBuilder};
pub use driver::RecursiveAssertionDriver;
pub use error::{ConfigError, RecursiveAssertionError};
pub use introspection::{ChildNode, DefaultIntrospectionStrategy, IntrospectionStrategy};
pub use options::RecursiveAssertionOptions;
pub use path::{FIELD_SEPARATOR, FieldPath, Segment};
pub use policy::{CollectionPolicy, MapPolicy, OptionalPolicy};
pub use visited::VisitedNodes;

pub use deepassert_reflect::{TypeName, Value};
