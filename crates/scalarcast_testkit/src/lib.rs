//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// One packed string and the integers it must decode to.
#[derive(Debug, Clone)]
pub struct PackedSample {
	/// Fixture label.
	pub name: String,
	/// Packed hex text.
	pub packed: String,
	/// Expected decode output.
	pub ints: Vec<i32>,
}

/// Packed enum sample: enum declaration plus expected symbol order.
#[derive(Debug, Clone)]
pub struct PackedEnumSample {
	/// Fixture label.
	pub name: String,
	/// Enum type name.
	pub enum_name: String,
	/// Declared `(symbol, value)` pairs.
	pub symbols: Vec<(String, i64)>,
	/// Packed hex text.
	pub packed: String,
	/// Expected symbols in decode order.
	pub symbols_out: Vec<String>,
}

/// Load `fixtures/packed_samples.json` integer samples.
pub fn packed_samples() -> Vec<PackedSample> {
	let doc = load_samples_doc();
	doc["samples"]
		.as_array()
		.expect("samples array")
		.iter()
		.map(|item| PackedSample {
			name: str_field(item, "name"),
			packed: str_field(item, "packed"),
			ints: item["ints"]
				.as_array()
				.expect("ints array")
				.iter()
				.map(|value| i32::try_from(value.as_i64().expect("integer")).expect("fits i32"))
				.collect(),
		})
		.collect()
}

/// Load `fixtures/packed_samples.json` enum samples.
pub fn packed_enum_samples() -> Vec<PackedEnumSample> {
	let doc = load_samples_doc();
	doc["enum_samples"]
		.as_array()
		.expect("enum_samples array")
		.iter()
		.map(|item| PackedEnumSample {
			name: str_field(item, "name"),
			enum_name: str_field(item, "enum"),
			symbols: item["symbols"]
				.as_array()
				.expect("symbols array")
				.iter()
				.map(|pair| (pair[0].as_str().expect("symbol name").to_owned(), pair[1].as_i64().expect("symbol value")))
				.collect(),
			packed: str_field(item, "packed"),
			symbols_out: item["symbols_out"]
				.as_array()
				.expect("symbols_out array")
				.iter()
				.map(|value| value.as_str().expect("symbol").to_owned())
				.collect(),
		})
		.collect()
}

fn load_samples_doc() -> serde_json::Value {
	let path = fixture_path("packed_samples.json");
	let bytes = std::fs::read(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	serde_json::from_slice(&bytes).expect("fixture is valid json")
}

fn str_field(item: &serde_json::Value, key: &str) -> String {
	item[key].as_str().unwrap_or_else(|| panic!("missing string field {key}")).to_owned()
}
