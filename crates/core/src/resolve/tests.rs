use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;

#[derive(Debug, PartialEq)]
struct First(&'static str);

#[derive(Debug, PartialEq)]
struct Second(&'static str);

#[fixture]
fn controller() -> AccessController {
	let mut controller = AccessController::with_label("resolve-tests");
	controller
		.writable_view()
		.register(First("Hello"))
		.unwrap()
		.register(Second("World"))
		.unwrap()
		.register_named("Welcome", First("Welcome"))
		.unwrap()
		.register_named("Again", Second("Again"))
		.unwrap();
	controller
}

#[rstest]
fn test_resolve_by_type(controller: AccessController) {
	let first = controller.resolve(&ParamRequest::of::<First>()).unwrap();
	assert_eq!(*first.downcast::<First>().unwrap(), First("Hello"));

	let second = controller.resolve(&ParamRequest::of::<Second>()).unwrap();
	assert_eq!(*second.downcast::<Second>().unwrap(), Second("World"));
}

#[rstest]
fn test_name_takes_precedence_over_type(controller: AccessController) {
	let request = ParamRequest::named::<First>("Welcome");
	assert!(supports(controller.read_only_view().registry(), &request));

	let resolved = controller.resolve(&request).unwrap();
	assert_eq!(*resolved.downcast::<First>().unwrap(), First("Welcome"));
}

#[rstest]
fn test_named_type_mismatch(controller: AccessController) {
	let request = ParamRequest::named::<Second>("Welcome");
	assert!(!supports(controller.read_only_view().registry(), &request));

	let err = controller.resolve(&request).unwrap_err();
	assert_eq!(
		err,
		ParamsError::Resolve(ResolveError::TypeMismatch {
			name: "Welcome".into(),
			expected: std::any::type_name::<Second>(),
			found: std::any::type_name::<First>(),
		})
	);
}

#[rstest]
fn test_missing_name_unresolved(controller: AccessController) {
	let request = ParamRequest::named::<First>("missing");
	assert!(!supports(controller.read_only_view().registry(), &request));

	let err = controller.resolve(&request).unwrap_err();
	assert_eq!(
		err,
		ParamsError::Resolve(ResolveError::Unresolved {
			kind: KeyKind::Name,
			key: "missing".into(),
		})
	);
}

#[rstest]
fn test_missing_type_unresolved(controller: AccessController) {
	let request = ParamRequest::of::<u8>();
	assert!(!supports(controller.read_only_view().registry(), &request));
	assert!(matches!(
		controller.resolve(&request),
		Err(ParamsError::Resolve(ResolveError::Unresolved {
			kind: KeyKind::Type,
			..
		}))
	));
}

#[test]
fn test_named_does_not_fall_back_to_type() {
	let mut controller = AccessController::new();
	controller.writable_view().register(First("typed")).unwrap();

	let request = ParamRequest::named::<First>("absent");
	assert!(controller.resolve(&request).is_err());
}

#[rstest]
fn test_view_request_is_read_only(controller: AccessController) {
	let request = ParamRequest::view();
	assert!(supports(controller.read_only_view().registry(), &request));

	let mut view = controller.resolve(&request).unwrap().into_view().unwrap();
	assert!(!view.is_writable());
	assert!(matches!(
		view.register(First("sneaky")),
		Err(ParamsError::Unsupported(_))
	));
	assert_eq!(*view.get::<First>().unwrap(), First("Hello"));
}

#[test]
fn test_view_request_ignores_phase_without_mut() {
	let controller = AccessController::new();
	let request = ParamRequest::view().in_phase(Phase::Setup);
	let view = controller.resolve(&request).unwrap().into_view().unwrap();
	assert!(!view.is_writable());
}

#[test]
fn test_resolve_mut_grants_setup_view() {
	let mut controller = AccessController::new();

	let request = ParamRequest::view().in_phase(Phase::Setup);
	let mut view = controller.resolve_mut(&request).unwrap().into_view().unwrap();
	assert!(view.is_writable());
	view.register(First("from setup")).unwrap();

	let consumer = controller.resolve_mut(&ParamRequest::view()).unwrap().into_view().unwrap();
	assert!(!consumer.is_writable());
	assert_eq!(*consumer.get::<First>().unwrap(), First("from setup"));
}

#[test]
fn test_named_view_request_still_yields_view() {
	let controller = AccessController::new();
	let mut request = ParamRequest::view();
	request.name = Some("anything".into());
	assert!(controller.resolve(&request).unwrap().into_view().is_some());
}

#[test]
fn test_request_display() {
	assert_eq!(ParamRequest::of::<u8>().to_string(), "u8");
	assert_eq!(ParamRequest::named::<u8>("n").to_string(), "\"n\": u8");
}

proptest! {
	#[test]
	fn prop_supports_agrees_with_resolve(
		registered in proptest::collection::hash_set("[a-c]{1,2}", 0..4),
		requested in "[a-c]{1,2}",
		as_u32 in any::<bool>(),
	) {
		let mut controller = AccessController::new();
		for name in &registered {
			controller.writable_view().register_named(name.clone(), 7u32).unwrap();
		}

		let request = if as_u32 {
			ParamRequest::named::<u32>(requested)
		} else {
			ParamRequest::named::<i32>(requested)
		};
		let supported = supports(controller.read_only_view().registry(), &request);
		prop_assert_eq!(supported, controller.resolve(&request).is_ok());
	}
}
