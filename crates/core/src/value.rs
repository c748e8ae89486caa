use std::any::Any;
use std::sync::Arc;

use crate::key::TypeKey;

/// Type-erased registered value.
///
/// Clones share the same allocation, so handing a value to several consumers
/// never copies it and every consumer observes the same instance.
#[derive(Clone)]
pub struct ParamValue {
	inner: Arc<dyn Any + Send + Sync>,
	type_key: TypeKey,
}

impl ParamValue {
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self::from_arc(Arc::new(value))
	}

	/// Wraps an already shared value without re-allocating.
	pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
		Self {
			inner: value,
			type_key: TypeKey::of::<T>(),
		}
	}

	/// Type the value was created from.
	#[inline]
	pub fn type_key(&self) -> TypeKey {
		self.type_key
	}

	#[inline]
	pub fn is<T: Any>(&self) -> bool {
		self.type_key == TypeKey::of::<T>()
	}

	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		Arc::clone(&self.inner).downcast::<T>().ok()
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.downcast_ref::<T>()
	}

	/// Returns true if both handles point at the same instance.
	pub fn ptr_eq(&self, other: &ParamValue) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl std::fmt::Debug for ParamValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ParamValue").field(&self.type_key.name()).finish()
	}
}
