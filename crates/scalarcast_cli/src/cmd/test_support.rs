use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

static SCALARCAST_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_scalarcast(args: &[&str]) -> Output {
	Command::new(scalarcast_bin()).args(args).output().expect("scalarcast command executes")
}

pub(crate) fn run_scalarcast_json(args: &[&str]) -> serde_json::Value {
	let output = run_scalarcast(args);
	assert!(
		output.status.success(),
		"scalarcast command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn scalarcast_bin() -> &'static PathBuf {
	SCALARCAST_BIN.get_or_init(resolve_scalarcast_bin)
}

fn resolve_scalarcast_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_scalarcast") {
		return PathBuf::from(path);
	}

	let workspace_root = scalarcast_testkit::workspace_root();
	let target_dir = std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root.join("target"));

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "scalarcast.exe" } else { "scalarcast" });

	let status = Command::new("cargo")
		.current_dir(&workspace_root)
		.args(["build", "--quiet", "--bin", "scalarcast"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build scalarcast binary at {}", bin.display());

	bin
}
