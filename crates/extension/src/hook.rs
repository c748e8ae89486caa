//! Setup hook declaration via `inventory`.
//!
//! Each [`setup_hook!`](crate::setup_hook) invocation creates a static
//! [`SetupHookDef`] and submits it with `inventory::submit!`. Discovery
//! collects every submitted hook and picks the single one declared for a
//! suite.

use paramset_core::{ConfigError, ParamsError, ParamsView};

/// Function signature every setup hook must have.
///
/// The single parameter is always the registry view, so a hook with another
/// signature does not compile.
pub type SetupHook = fn(&mut ParamsView<'_>) -> Result<(), ParamsError>;

/// Identifies a test suite; conventionally `module_path!()` of its module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuiteId(pub &'static str);

impl SuiteId {
	#[inline]
	pub const fn as_str(self) -> &'static str {
		self.0
	}
}

impl std::fmt::Display for SuiteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0)
	}
}

/// A declared setup hook.
pub struct SetupHookDef {
	/// Suite the hook populates parameters for.
	pub suite: &'static str,
	/// Hook function name, for diagnostics.
	pub name: &'static str,
	pub hook: SetupHook,
}

impl std::fmt::Debug for SetupHookDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SetupHookDef")
			.field("suite", &self.suite)
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Wrapper for `inventory::collect!`.
pub struct SetupHookReg(pub &'static SetupHookDef);

inventory::collect!(SetupHookReg);

/// Finds the single setup hook submitted for `suite`.
pub fn discover_setup_hook(suite: SuiteId) -> Result<&'static SetupHookDef, ConfigError> {
	discover_setup_hook_in(inventory::iter::<SetupHookReg>.into_iter().map(|r| r.0), suite)
}

/// Finds the single setup hook for `suite` among `hooks`.
pub fn discover_setup_hook_in<I>(hooks: I, suite: SuiteId) -> Result<&'static SetupHookDef, ConfigError>
where
	I: IntoIterator<Item = &'static SetupHookDef>,
{
	let mut matching: Vec<&'static SetupHookDef> = hooks.into_iter().filter(|h| h.suite == suite.0).collect();

	match matching.len() {
		0 => Err(ConfigError::MissingSetupHook { suite: suite.0 }),
		1 => {
			let def = matching.remove(0);
			tracing::info!(suite = suite.0, hook = def.name, "parameter setup hook discovered");
			Ok(def)
		}
		_ => {
			let mut hooks: Vec<_> = matching.iter().map(|h| h.name).collect();
			hooks.sort_unstable();
			Err(ConfigError::DuplicateSetupHook { suite: suite.0, hooks })
		}
	}
}

/// Declares a parameter setup hook for the enclosing module's suite.
///
/// ```ignore
/// fn setup(params: &mut ParamsView<'_>) -> Result<(), ParamsError> {
///     params.register(Config::default())?;
///     Ok(())
/// }
/// paramset_extension::setup_hook!(setup);
/// ```
#[macro_export]
macro_rules! setup_hook {
	($name:ident) => {
		$crate::setup_hook!($name, suite: module_path!());
	};
	($name:ident, suite: $suite:expr) => {
		$crate::__private::paste::paste! {
			#[allow(non_upper_case_globals)]
			static [<__PARAMSET_SETUP_HOOK_ $name>]: $crate::hook::SetupHookDef = $crate::hook::SetupHookDef {
				suite: $suite,
				name: stringify!($name),
				hook: $name,
			};

			$crate::__private::inventory::submit! {
				$crate::hook::SetupHookReg(&[<__PARAMSET_SETUP_HOOK_ $name>])
			}
		}
	};
}
