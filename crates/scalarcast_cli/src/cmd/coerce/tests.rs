use crate::cmd::test_support::{run_scalarcast, run_scalarcast_json};

#[test]
fn coerce_json_reports_parse_strategy_for_int_text() {
	let json = run_scalarcast_json(&["coerce", "42", "--to", "int", "--json"]);

	assert_eq!(json["input"], "42");
	assert_eq!(json["type"], "int");
	assert_eq!(json["culture"], "invariant");
	assert_eq!(json["strategy"], "parse");
	assert_eq!(json["kind"], "int");
	assert_eq!(json["value"], 42);
}

#[test]
fn coerce_json_uses_bool_digit_before_parse() {
	let json = run_scalarcast_json(&["coerce", "1", "--to", "bool", "--json"]);

	assert_eq!(json["strategy"], "bool_digit");
	assert_eq!(json["value"], true);
}

#[test]
fn coerce_json_unpacks_hex_into_enum_list() {
	let json = run_scalarcast_json(&[
		"coerce",
		"040000000000000005000000",
		"--to",
		"List<Layer>",
		"--enum",
		"Layer=Default,TransparentFX,Water:4,UI",
		"--json",
	]);

	assert_eq!(json["strategy"], "packed_array");
	assert_eq!(json["kind"], "list");
	assert_eq!(json["value"], serde_json::json!(["Water", "Default", "UI"]));
}

#[test]
fn coerce_json_honors_culture_decimal_separator() {
	let json = run_scalarcast_json(&["coerce", "3,5", "--to", "double", "--culture", "de-DE", "--json"]);

	assert_eq!(json["culture"], "de-DE");
	assert_eq!(json["value"], 3.5);
}

#[test]
fn coerce_null_yields_destination_default() {
	let json = run_scalarcast_json(&["coerce", "--null", "--to", "int", "--json"]);

	assert!(json["input"].is_null());
	assert_eq!(json["strategy"], "null");
	assert_eq!(json["value"], 0);
}

#[test]
fn coerce_strict_hex_rejects_bad_pair() {
	let output = run_scalarcast(&["coerce", "zz000000", "--to", "int[]", "--strict-hex"]);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("zz"), "unexpected stderr: {stderr}");
}

#[test]
fn coerce_unknown_type_fails() {
	let output = run_scalarcast(&["coerce", "1", "--to", "Widget"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Widget"));
}
