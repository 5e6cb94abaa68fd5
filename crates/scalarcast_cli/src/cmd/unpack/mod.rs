use log::debug;
use scalarcast::coerce::{HexMode, decode_packed_ints_with, packed_blocks};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	/// Packed hex text (8 characters per integer).
	pub packed: String,
	/// Fail on non-hex byte pairs instead of decoding them as 0.
	#[arg(long = "strict-hex")]
	pub strict_hex: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode a packed string and print one integer per block.
pub fn run(args: Args) -> scalarcast::coerce::Result<()> {
	let Args { packed, strict_hex, json } = args;

	let mode = if strict_hex { HexMode::Strict } else { HexMode::Lenient };
	let ints = decode_packed_ints_with(&packed, mode)?;
	let chars = packed.chars().count();
	let ignored = chars % 8;
	debug!("unpacked {} ints from {chars} chars", ints.len());

	if json {
		emit_json(&UnpackJson {
			packed: packed.clone(),
			count: ints.len(),
			ignored_trailing: ignored,
			ints: ints.clone(),
		});
		return Ok(());
	}

	println!("packed: {packed}");
	println!("count: {}", ints.len());
	if ignored > 0 {
		println!("ignored trailing chars: {ignored}");
	}
	for (idx, (value, block)) in ints.iter().zip(packed_blocks(&packed)).enumerate() {
		println!("  [{idx}] {block} = {value}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct UnpackJson {
	packed: String,
	count: usize,
	ignored_trailing: usize,
	ints: Vec<i32>,
}

#[cfg(test)]
mod tests;
