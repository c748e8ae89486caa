//! Per-test-run parameter registry.
//!
//! A setup phase registers named or type-keyed values once; every later
//! consumer looks them up through a read-only view.
//!
//! - [`Registry`]: insertion-once store with one namespace for names and
//!   canonical type keys
//! - [`AccessController`]: owns the registry and hands out [`ParamsView`]s
//! - [`resolve`]: the name-over-type resolution policy for [`ParamRequest`]s

pub mod error;
pub mod key;
pub mod registry;
pub mod resolve;
pub mod value;
pub mod view;

pub use error::{
	ConfigError, DuplicateKeyError, ParamsError, ResolveError, UnsupportedOperationError,
};
pub use key::{KeyKind, TypeKey};
pub use registry::{Entry, Registry};
pub use resolve::{ParamRequest, Phase, Resolved};
pub use value::ParamValue;
pub use view::{AccessController, ParamsView, ReadOnlyRegistry};
