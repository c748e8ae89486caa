//! Test-runner boundary for the parameter registry.
//!
//! Suites declare one setup hook with [`setup_hook!`]; a [`ParamsExtension`]
//! discovers it, runs it once with write access, then serves every test
//! parameter from the read-only registry.

pub mod extension;
pub mod hook;
pub mod run;

pub use extension::ParamsExtension;
pub use hook::{SetupHook, SetupHookDef, SuiteId, discover_setup_hook, discover_setup_hook_in};
pub use paramset_core::*;
pub use run::TestRun;

#[doc(hidden)]
pub mod __private {
	pub use {inventory, paste};
}
