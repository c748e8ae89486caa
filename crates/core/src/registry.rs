//! Write-once parameter storage.
//!
//! Named and type-keyed entries share a single namespace: a value registered
//! by type lives under its canonical type name, so an explicit name spelling
//! the same string collides with it.

use std::any::Any;
use std::collections::hash_map::Entry as MapEntry;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::DuplicateKeyError;
use crate::key::{KeyKind, TypeKey};
use crate::value::ParamValue;


/// Default label used in log fields.
pub const DEFAULT_LABEL: &str = "params";

/// A bound key/value pair.
#[derive(Debug, Clone)]
pub struct Entry {
	pub key: String,
	pub value: ParamValue,
	/// How `key` was produced.
	pub kind: KeyKind,
}

/// Insertion-once key/value store for one test-run.
#[derive(Debug)]
pub struct Registry {
	label: &'static str,
	entries: FxHashMap<String, Entry>,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::with_label(DEFAULT_LABEL)
	}

	/// Creates an empty registry whose log events carry `label`.
	pub fn with_label(label: &'static str) -> Self {
		Self {
			label,
			entries: FxHashMap::default(),
		}
	}

	#[inline]
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Binds `value` under `name`.
	///
	/// Fails if `name` is already bound; the existing binding is kept.
	pub fn register_named<T: Any + Send + Sync>(
		&mut self,
		name: impl Into<String>,
		value: T,
	) -> Result<&mut Self, DuplicateKeyError> {
		self.insert(name.into(), KeyKind::Name, ParamValue::new(value))?;
		Ok(self)
	}

	/// Binds `value` under the canonical name of its type.
	///
	/// At most one value per type can be registered this way.
	pub fn register<T: Any + Send + Sync>(&mut self, value: T) -> Result<&mut Self, DuplicateKeyError> {
		let value = ParamValue::new(value);
		self.insert(value.type_key().name().to_owned(), KeyKind::Type, value)?;
		Ok(self)
	}

	/// Binds an already type-erased value, by `name` if given, else by its type.
	pub fn register_value(
		&mut self,
		name: Option<String>,
		value: ParamValue,
	) -> Result<&mut Self, DuplicateKeyError> {
		match name {
			Some(name) => self.insert(name, KeyKind::Name, value)?,
			None => self.insert(value.type_key().name().to_owned(), KeyKind::Type, value)?,
		}
		Ok(self)
	}

	fn insert(&mut self, key: String, kind: KeyKind, value: ParamValue) -> Result<(), DuplicateKeyError> {
		match self.entries.entry(key) {
			MapEntry::Occupied(o) => {
				tracing::warn!(
					registry = self.label,
					key = %o.key(),
					%kind,
					existing = %o.get().kind,
					"duplicate parameter registration rejected",
				);
				Err(DuplicateKeyError {
					key: o.key().clone(),
					kind,
				})
			}
			MapEntry::Vacant(v) => {
				tracing::debug!(
					registry = self.label,
					key = %v.key(),
					%kind,
					ty = value.type_key().name(),
					"parameter registered",
				);
				let key = v.key().clone();
				v.insert(Entry { key, value, kind });
				Ok(())
			}
		}
	}

	/// Returns the value bound under `name`, whichever way it was registered.
	pub fn lookup_by_name(&self, name: &str) -> Option<&ParamValue> {
		let found = self.entries.get(name).map(|e| &e.value);
		tracing::trace!(registry = self.label, name, found = found.is_some(), "lookup by name");
		found
	}

	/// Returns the value bound under the canonical key of `ty`.
	///
	/// Only a value of exactly that type matches; a named entry that happens
	/// to spell the type name but holds something else does not.
	pub fn lookup_by_type(&self, ty: &TypeKey) -> Option<&ParamValue> {
		let found = self
			.entries
			.get(ty.name())
			.map(|e| &e.value)
			.filter(|v| v.type_key() == *ty);
		tracing::trace!(registry = self.label, ty = ty.name(), found = found.is_some(), "lookup by type");
		found
	}

	/// Typed lookup by type.
	pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		self.lookup_by_type(&TypeKey::of::<T>())?.downcast::<T>()
	}

	/// Typed lookup by name; `None` if absent or of another type.
	pub fn get_named<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
		self.lookup_by_name(name)?.downcast::<T>()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Returns the full entry bound under `key`.
	pub fn entry(&self, key: &str) -> Option<&Entry> {
		self.entries.get(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns all bound keys, sorted.
	pub fn keys(&self) -> Vec<&str> {
		let mut keys: Vec<_> = self.entries.keys().map(String::as_str).collect();
		keys.sort_unstable();
		keys
	}
}
