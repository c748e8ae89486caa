//! Decides which registered value, if any, satisfies a parameter request.
//!
//! [`check`] is the only decision procedure: [`supports`] reports whether it
//! passes and the resolvers fetch only after it passed, so the pre-check and
//! the resolution can never disagree.

use std::any::Any;
use std::sync::Arc;

use crate::error::{ParamsError, ResolveError};
use crate::key::{KeyKind, TypeKey};
use crate::registry::Registry;
use crate::value::ParamValue;
use crate::view::{AccessController, ParamsView, ReadOnlyRegistry};

#[cfg(test)]
mod tests;

/// Which side of the mutability boundary a request comes from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Phase {
	/// The single privileged step that populates the registry.
	Setup,
	/// Any later step; reads only.
	#[default]
	Consumption,
}

/// One parameter a callable asks for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamRequest {
	/// Declared parameter type.
	pub ty: TypeKey,
	/// Explicit name, if the parameter carries one.
	pub name: Option<String>,
	pub phase: Phase,
}

impl ParamRequest {
	/// Requests a `T` by type.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			ty: TypeKey::of::<T>(),
			name: None,
			phase: Phase::Consumption,
		}
	}

	/// Requests the `T` registered under `name`.
	pub fn named<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::of::<T>()
		}
	}

	/// Requests the registry view itself.
	pub fn view() -> Self {
		Self {
			ty: ParamsView::type_key(),
			name: None,
			phase: Phase::Consumption,
		}
	}

	pub fn in_phase(mut self, phase: Phase) -> Self {
		self.phase = phase;
		self
	}

	/// Returns true if this asks for the registry view rather than a value.
	pub fn wants_view(&self) -> bool {
		self.ty == ParamsView::type_key()
	}
}

impl std::fmt::Display for ParamRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.name {
			Some(name) => write!(f, "{name:?}: {}", self.ty),
			None => write!(f, "{}", self.ty),
		}
	}
}

/// What a request resolved to.
#[derive(Debug)]
pub enum Resolved<'r> {
	Value(ParamValue),
	View(ParamsView<'r>),
}

impl<'r> Resolved<'r> {
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		match self {
			Self::Value(value) => value.downcast::<T>(),
			Self::View(_) => None,
		}
	}

	pub fn into_value(self) -> Option<ParamValue> {
		match self {
			Self::Value(value) => Some(value),
			Self::View(_) => None,
		}
	}

	pub fn into_view(self) -> Option<ParamsView<'r>> {
		match self {
			Self::View(view) => Some(view),
			Self::Value(_) => None,
		}
	}
}

/// Applies the resolution policy without fetching anything.
///
/// An explicit name always wins over the declared type; a named value must
/// have exactly the declared type. Requests for the view itself always pass.
pub fn check(registry: &Registry, request: &ParamRequest) -> Result<(), ParamsError> {
	if request.wants_view() {
		return Ok(());
	}
	lookup(registry, request).map(|_| ())
}

/// Returns true if `request` can be satisfied from `registry`.
pub fn supports(registry: &Registry, request: &ParamRequest) -> bool {
	let ok = check(registry, request).is_ok();
	tracing::trace!(registry = registry.label(), %request, supported = ok, "parameter support check");
	ok
}

/// Resolves a value request; view requests are handled by the callers that
/// can produce a view.
fn lookup<'r>(registry: &'r Registry, request: &ParamRequest) -> Result<&'r ParamValue, ParamsError> {
	match &request.name {
		Some(name) => {
			let value = registry.lookup_by_name(name).ok_or_else(|| ResolveError::Unresolved {
				kind: KeyKind::Name,
				key: name.clone(),
			})?;
			if value.type_key() != request.ty {
				tracing::warn!(
					registry = registry.label(),
					name = name.as_str(),
					expected = request.ty.name(),
					found = value.type_key().name(),
					"named parameter type mismatch",
				);
				return Err(ResolveError::TypeMismatch {
					name: name.clone(),
					expected: request.ty.name(),
					found: value.type_key().name(),
				}
				.into());
			}
			Ok(value)
		}
		None => registry.lookup_by_type(&request.ty).ok_or_else(|| {
			ResolveError::Unresolved {
				kind: KeyKind::Type,
				key: request.ty.name().to_owned(),
			}
			.into()
		}),
	}
}

impl AccessController {
	/// Resolves a consumption-phase request.
	///
	/// A view request yields the read-only view regardless of the request's
	/// phase; only [`AccessController::resolve_mut`] can hand out write access.
	pub fn resolve(&self, request: &ParamRequest) -> Result<Resolved<'_>, ParamsError> {
		let view = self.read_only_view();
		if request.wants_view() {
			tracing::trace!(registry = view.registry().label(), "resolved read-only parameters view");
			return Ok(Resolved::View(ParamsView::ReadOnly(view)));
		}
		resolve_value(view, request)
	}

	/// Resolves a request, granting the writable view to setup-phase requests.
	pub fn resolve_mut(&mut self, request: &ParamRequest) -> Result<Resolved<'_>, ParamsError> {
		if request.wants_view() {
			return Ok(Resolved::View(self.view(request.phase)));
		}
		resolve_value(self.read_only_view(), request)
	}
}

fn resolve_value<'r>(view: ReadOnlyRegistry<'r>, request: &ParamRequest) -> Result<Resolved<'r>, ParamsError> {
	let registry = view.registry();
	let value = lookup(registry, request)?;
	tracing::trace!(registry = registry.label(), %request, "parameter resolved");
	Ok(Resolved::Value(value.clone()))
}
