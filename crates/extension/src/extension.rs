use paramset_core::resolve;
use paramset_core::{
	AccessController, ConfigError, ParamRequest, ParamsError, Phase, ReadOnlyRegistry, Resolved,
};

use crate::hook::{SetupHookDef, SuiteId, discover_setup_hook};

/// Parameter registry driver for one test-run of one suite.
///
/// The host calls [`before_all`](Self::before_all) once before any test,
/// then [`supports_parameter`](Self::supports_parameter) and
/// [`resolve_parameter`](Self::resolve_parameter) for each test parameter.
#[derive(Debug)]
pub struct ParamsExtension {
	suite: SuiteId,
	hook: Option<&'static SetupHookDef>,
	controller: AccessController,
	set_up: bool,
}

impl ParamsExtension {
	/// Creates an extension that discovers its hook through `inventory`.
	pub fn new(suite: SuiteId) -> Self {
		Self {
			suite,
			hook: None,
			controller: AccessController::with_label(suite.as_str()),
			set_up: false,
		}
	}

	/// Creates an extension with an already discovered hook.
	pub fn with_hook(suite: SuiteId, hook: &'static SetupHookDef) -> Self {
		Self {
			hook: Some(hook),
			..Self::new(suite)
		}
	}

	pub fn suite(&self) -> SuiteId {
		self.suite
	}

	/// Returns true once the setup hook has been invoked.
	pub fn is_set_up(&self) -> bool {
		self.set_up
	}

	/// Discovers and runs the suite's setup hook with the writable view.
	///
	/// Runs at most once per extension; a hook failure aborts the run.
	pub fn before_all(&mut self) -> Result<(), ParamsError> {
		if self.set_up {
			return Err(ConfigError::SetupAlreadyRan {
				suite: self.suite.as_str(),
			}
			.into());
		}
		let def = match self.hook {
			Some(def) => def,
			None => discover_setup_hook(self.suite)?,
		};
		self.set_up = true;
		self.invoke_setup_hook(def)
	}

	fn invoke_setup_hook(&mut self, def: &'static SetupHookDef) -> Result<(), ParamsError> {
		let suite = self.suite.as_str();
		let mut view = self.controller.view(Phase::Setup);
		(def.hook)(&mut view).map_err(|source| ParamsError::Setup {
			suite,
			source: Box::new(source),
		})?;

		tracing::info!(
			suite,
			hook = def.name,
			entries = self.controller.read_only_view().len(),
			"parameter setup complete",
		);
		Ok(())
	}

	/// Reports whether `request` can be resolved.
	pub fn supports_parameter(&self, request: &ParamRequest) -> bool {
		resolve::supports(self.controller.read_only_view().registry(), request)
	}

	/// Resolves a test parameter.
	///
	/// Requests for the registry view always yield the read-only view; write
	/// access is only ever handed to the setup hook.
	pub fn resolve_parameter(&self, request: &ParamRequest) -> Result<Resolved<'_>, ParamsError> {
		self.controller.resolve(request)
	}

	/// Read-only access to everything the setup hook registered.
	pub fn parameters(&self) -> ReadOnlyRegistry<'_> {
		self.controller.read_only_view()
	}
}
