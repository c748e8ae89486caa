//! Capability-scoped handles onto a [`Registry`].
//!
//! The [`AccessController`] owns the registry for one test-run. The setup
//! phase borrows it mutably through [`ParamsView::Full`]; every consumer
//! borrows it shared through [`ReadOnlyRegistry`], which rejects mutation at
//! runtime instead of silently ignoring it.

use std::any::Any;
use std::sync::Arc;

use crate::error::{ParamsError, UnsupportedOperationError};
use crate::key::TypeKey;
use crate::registry::Registry;
use crate::resolve::Phase;
use crate::value::ParamValue;


/// Owner of the registry for a single test-run.
#[derive(Debug, Default)]
pub struct AccessController {
	registry: Registry,
}

impl AccessController {
	/// Creates a controller over a fresh, empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_label(label: &'static str) -> Self {
		Self {
			registry: Registry::with_label(label),
		}
	}

	/// Full access; hand this only to the setup phase.
	pub fn writable_view(&mut self) -> &mut Registry {
		&mut self.registry
	}

	/// Lookup-only access for consumers.
	pub fn read_only_view(&self) -> ReadOnlyRegistry<'_> {
		ReadOnlyRegistry {
			registry: &self.registry,
		}
	}

	/// Returns the view matching `phase`.
	pub fn view(&mut self, phase: Phase) -> ParamsView<'_> {
		match phase {
			Phase::Setup => ParamsView::Full(&mut self.registry),
			Phase::Consumption => ParamsView::ReadOnly(self.read_only_view()),
		}
	}
}

/// Registry wrapper that only permits lookups.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyRegistry<'r> {
	registry: &'r Registry,
}

impl<'r> ReadOnlyRegistry<'r> {
	pub fn new(registry: &'r Registry) -> Self {
		Self { registry }
	}

	/// Always fails; the registry is left unchanged.
	pub fn register_named<T: Any + Send + Sync>(
		&self,
		name: impl Into<String>,
		_value: T,
	) -> Result<&Self, UnsupportedOperationError> {
		Err(self.reject("register_named", Some(name.into())))
	}

	/// Always fails; the registry is left unchanged.
	pub fn register<T: Any + Send + Sync>(&self, _value: T) -> Result<&Self, UnsupportedOperationError> {
		Err(self.reject("register", None))
	}

	fn reject(&self, operation: &'static str, name: Option<String>) -> UnsupportedOperationError {
		tracing::warn!(
			registry = self.registry.label(),
			operation,
			name = name.as_deref(),
			"mutation through read-only parameters rejected",
		);
		UnsupportedOperationError { operation }
	}

	pub fn lookup_by_name(&self, name: &str) -> Option<&'r ParamValue> {
		self.registry.lookup_by_name(name)
	}

	pub fn lookup_by_type(&self, ty: &TypeKey) -> Option<&'r ParamValue> {
		self.registry.lookup_by_type(ty)
	}

	pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		self.registry.get::<T>()
	}

	pub fn get_named<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
		self.registry.get_named::<T>(name)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.registry.contains(key)
	}

	pub fn len(&self) -> usize {
		self.registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}

	/// The wrapped registry, shared.
	pub fn registry(&self) -> &'r Registry {
		self.registry
	}
}

/// The registry as handed to setup hooks and test bodies.
///
/// Both variants close over the same registry owned by an
/// [`AccessController`].
#[derive(Debug)]
pub enum ParamsView<'r> {
	Full(&'r mut Registry),
	ReadOnly(ReadOnlyRegistry<'r>),
}

impl ParamsView<'_> {
	/// Key under which requests for the view itself are recognised.
	pub fn type_key() -> TypeKey {
		TypeKey::of::<ParamsView<'static>>()
	}

	pub fn is_writable(&self) -> bool {
		matches!(self, Self::Full(_))
	}

	pub fn register_named<T: Any + Send + Sync>(
		&mut self,
		name: impl Into<String>,
		value: T,
	) -> Result<&mut Self, ParamsError> {
		match self {
			Self::Full(registry) => {
				registry.register_named(name, value)?;
			}
			Self::ReadOnly(ro) => {
				ro.register_named(name, value)?;
			}
		}
		Ok(self)
	}

	pub fn register<T: Any + Send + Sync>(&mut self, value: T) -> Result<&mut Self, ParamsError> {
		match self {
			Self::Full(registry) => {
				registry.register(value)?;
			}
			Self::ReadOnly(ro) => {
				ro.register(value)?;
			}
		}
		Ok(self)
	}

	fn registry(&self) -> &Registry {
		match self {
			Self::Full(registry) => &**registry,
			Self::ReadOnly(ro) => ro.registry(),
		}
	}

	pub fn lookup_by_name(&self, name: &str) -> Option<&ParamValue> {
		self.registry().lookup_by_name(name)
	}

	pub fn lookup_by_type(&self, ty: &TypeKey) -> Option<&ParamValue> {
		self.registry().lookup_by_type(ty)
	}

	pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		self.registry().get::<T>()
	}

	pub fn get_named<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
		self.registry().get_named::<T>(name)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.registry().contains(key)
	}

	pub fn len(&self) -> usize {
		self.registry().len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry().is_empty()
	}
}
