use thiserror::Error;

use crate::key::KeyKind;

/// A key was bound a second time.
///
/// The existing binding is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parameter already registered under {kind} {key:?}")]
pub struct DuplicateKeyError {
	pub key: String,
	pub kind: KeyKind,
}

/// A read-only view was asked to mutate the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot {operation}: parameters are read-only outside setup")]
pub struct UnsupportedOperationError {
	pub operation: &'static str,
}

/// A lookup request could not be satisfied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
	/// Nothing is registered under the requested name or type.
	#[error("no value registered for {kind} {key:?}")]
	Unresolved { kind: KeyKind, key: String },
	/// A value exists under the requested name but has another type.
	#[error("parameter {name:?} is of type {found}, requested {expected}")]
	TypeMismatch {
		name: String,
		expected: &'static str,
		found: &'static str,
	},
}

/// Fatal misconfiguration of a test suite, reported before any test runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	#[error("suite {suite} declares no parameter setup hook")]
	MissingSetupHook { suite: &'static str },
	#[error("suite {suite} declares more than one parameter setup hook: {hooks:?}")]
	DuplicateSetupHook {
		suite: &'static str,
		hooks: Vec<&'static str>,
	},
	#[error("parameter setup for suite {suite} already ran")]
	SetupAlreadyRan { suite: &'static str },
}

/// Any failure surfaced by the parameter registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
	#[error(transparent)]
	DuplicateKey(#[from] DuplicateKeyError),
	#[error(transparent)]
	Unsupported(#[from] UnsupportedOperationError),
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The setup hook itself returned an error.
	#[error("parameter setup for suite {suite} failed: {source}")]
	Setup {
		suite: &'static str,
		source: Box<ParamsError>,
	},
}

impl ParamsError {
	/// Returns true for errors that abort the whole suite rather than one test.
	pub fn is_fatal_to_suite(&self) -> bool {
		matches!(self, Self::Config(_) | Self::Setup { .. } | Self::DuplicateKey(_))
	}
}
