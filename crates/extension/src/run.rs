use paramset_core::{ParamRequest, ParamsError, Resolved};

use crate::extension::ParamsExtension;
use crate::hook::SuiteId;

/// Minimal host runner: one fresh registry per run, set up before any test.
#[derive(Debug)]
pub struct TestRun {
	extension: ParamsExtension,
}

impl TestRun {
	/// Starts a run for `suite`, discovering and invoking its setup hook.
	pub fn start(suite: SuiteId) -> Result<Self, ParamsError> {
		Self::with_extension(ParamsExtension::new(suite))
	}

	/// Starts a run with a prepared extension.
	pub fn with_extension(mut extension: ParamsExtension) -> Result<Self, ParamsError> {
		extension.before_all()?;
		Ok(Self { extension })
	}

	pub fn extension(&self) -> &ParamsExtension {
		&self.extension
	}

	/// Resolves every parameter of one test, stopping at the first failure.
	pub fn resolve_all(&self, requests: &[ParamRequest]) -> Result<Vec<Resolved<'_>>, ParamsError> {
		requests.iter().map(|r| self.extension.resolve_parameter(r)).collect()
	}

	/// Resolves `requests` and runs `body` with them.
	///
	/// A parameter that cannot be resolved fails this test only; `body` is
	/// not called.
	pub fn run_test<F, R>(&self, name: &str, requests: &[ParamRequest], body: F) -> Result<R, ParamsError>
	where
		F: FnOnce(Vec<Resolved<'_>>) -> R,
	{
		let _span = tracing::debug_span!("test", suite = %self.extension.suite(), name).entered();
		let params = self.resolve_all(requests).inspect_err(|e| {
			tracing::warn!(error = %e, "test parameters unresolved");
		})?;
		tracing::debug!(count = params.len(), "test parameters resolved");
		Ok(body(params))
	}
}
