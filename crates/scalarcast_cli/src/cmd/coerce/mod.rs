use log::debug;
use scalarcast::coerce::{CoerceOptions, Coercer, ConverterRegistry, Culture, HexMode, Strategy, TypeDesc, Value};

use crate::cmd::util::{emit_json, parse_enum_spec, parse_type_expr, value_json};

#[derive(clap::Args)]
pub struct Args {
	/// Source scalar text.
	#[arg(required_unless_present = "null")]
	pub value: Option<String>,
	/// Destination type, e.g. `int[]`, `List<Mode>`, `bool?`.
	#[arg(long = "to")]
	pub to: String,
	/// Culture name for culture-aware parsing.
	#[arg(long)]
	pub culture: Option<String>,
	/// Enum declaration `Name=Sym[:value],...`; repeatable.
	#[arg(long = "enum")]
	pub enums: Vec<String>,
	/// Fail on non-hex byte pairs in packed arrays.
	#[arg(long = "strict-hex")]
	pub strict_hex: bool,
	/// Coerce a null source instead of VALUE.
	#[arg(long, conflicts_with = "value")]
	pub null: bool,
	#[arg(long)]
	pub json: bool,
}

/// Coerce one scalar and print the result.
pub fn run(args: Args) -> scalarcast::coerce::Result<()> {
	let Args {
		value,
		to,
		culture,
		enums,
		strict_hex,
		null,
		json,
	} = args;

	let enums = enums.iter().map(|spec| parse_enum_spec(spec)).collect::<scalarcast::coerce::Result<Vec<_>>>()?;
	let destination = parse_type_expr(&to, &enums)?;
	let culture = match culture.as_deref() {
		Some(name) => Culture::named(name)?,
		None => Culture::invariant(),
	};
	let options = CoerceOptions {
		hex_mode: if strict_hex { HexMode::Strict } else { HexMode::Lenient },
		..CoerceOptions::default()
	};

	let source = match value.as_deref() {
		Some(text) if !null => Value::string(text),
		_ => Value::Null,
	};

	debug!("coerce {} -> {destination} (culture={})", source.kind(), culture_label(&culture));
	let registry = ConverterRegistry::with_builtin_parsers();
	let engine = Coercer::with_options(&registry, options);
	let (out, strategy) = engine.coerce_traced(&source, &destination, &culture)?;

	if json {
		emit_coerce_json(value.as_deref().filter(|_| !null), &destination, &culture, strategy, &out);
		return Ok(());
	}

	match value.as_deref().filter(|_| !null) {
		Some(text) => println!("input: {text:?}"),
		None => println!("input: null"),
	}
	println!("type: {destination}");
	println!("culture: {}", culture_label(&culture));
	println!("strategy: {strategy}");
	println!("value: {out}");
	Ok(())
}

fn culture_label(culture: &Culture) -> &str {
	if culture.is_invariant() { "invariant" } else { &culture.name }
}

fn emit_coerce_json(input: Option<&str>, destination: &TypeDesc, culture: &Culture, strategy: Strategy, out: &Value) {
	let payload = CoerceJson {
		input: input.map(str::to_owned),
		destination: destination.to_string(),
		culture: culture_label(culture).to_owned(),
		strategy: strategy.label(),
		kind: out.kind(),
		value: value_json(out),
	};
	emit_json(&payload);
}

#[derive(serde::Serialize)]
struct CoerceJson {
	input: Option<String>,
	#[serde(rename = "type")]
	destination: String,
	culture: String,
	strategy: &'static str,
	kind: &'static str,
	value: serde_json::Value,
}

#[cfg(test)]
mod tests;
