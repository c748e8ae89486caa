use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Distinguishes how a registry key was produced.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyKind {
	/// An explicit name supplied by the caller.
	Name,
	/// The canonical name of the value's type.
	Type,
}

impl std::fmt::Display for KeyKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			KeyKind::Name => write!(f, "name"),
			KeyKind::Type => write!(f, "type"),
		}
	}
}

/// Exact runtime type identity plus its canonical key string.
///
/// Equality and hashing only consider the [`TypeId`]; the name is the string
/// under which type-keyed entries are stored.
#[derive(Copy, Clone, Debug)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Returns the key for `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	/// Canonical key string (fully-qualified type name).
	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn id(&self) -> TypeId {
		self.id
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl std::fmt::Display for TypeKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}
