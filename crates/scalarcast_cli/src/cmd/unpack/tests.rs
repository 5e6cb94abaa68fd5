use crate::cmd::test_support::{run_scalarcast, run_scalarcast_json};

#[test]
fn unpack_json_matches_fixture_samples() {
	for sample in scalarcast_testkit::packed_samples() {
		let json = run_scalarcast_json(&["unpack", &sample.packed, "--json"]);

		assert_eq!(json["count"], sample.ints.len(), "sample {}", sample.name);
		assert_eq!(json["ints"], serde_json::json!(sample.ints), "sample {}", sample.name);
	}
}

#[test]
fn unpack_json_reports_ignored_trailing_chars() {
	let json = run_scalarcast_json(&["unpack", "f3650a0001", "--json"]);

	assert_eq!(json["ignored_trailing"], 2);
	assert_eq!(json["ints"], serde_json::json!([681459]));
}

#[test]
fn unpack_json_counts_characters_not_bytes() {
	let json = run_scalarcast_json(&["unpack", "f3650a00éé", "--json"]);

	assert_eq!(json["count"], 1);
	assert_eq!(json["ignored_trailing"], 2);
	assert_eq!(json["ints"], serde_json::json!([681459]));
}

#[test]
fn unpack_lenient_zeroes_bad_pair() {
	let json = run_scalarcast_json(&["unpack", "zz650a00", "--json"]);

	assert_eq!(json["ints"], serde_json::json!([0x000a_6500]));
}

#[test]
fn unpack_strict_fails_on_bad_pair() {
	let output = run_scalarcast(&["unpack", "zz650a00", "--strict-hex"]);

	assert!(!output.status.success());
}

#[test]
fn unpack_text_lists_blocks() {
	let output = run_scalarcast(&["unpack", "f3650a00ffffffff"]);

	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("count: 2"));
	assert!(stdout.contains("[0] f3650a00 = 681459"));
	assert!(stdout.contains("[1] ffffffff = -1"));
}
