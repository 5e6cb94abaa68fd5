use std::sync::Arc;

use scalarcast::coerce::{CoerceError, EnumDef, Result, TypeDesc, Value};

/// Parse a type expression such as `int[]`, `List<Mode>`, or `bool?`.
///
/// Enum names resolve against `enums`.
pub(crate) fn parse_type_expr(expr: &str, enums: &[Arc<EnumDef>]) -> Result<TypeDesc> {
	let invalid = || CoerceError::InvalidTypeExpr { expr: expr.to_owned() };
	let trimmed = expr.trim();

	if let Some(inner) = trimmed.strip_suffix("[]") {
		return parse_type_expr(inner, enums).map(TypeDesc::array).map_err(|_| invalid());
	}
	if let Some(inner) = trimmed.strip_suffix('?') {
		return parse_type_expr(inner, enums).map(TypeDesc::nullable).map_err(|_| invalid());
	}
	if let Some(rest) = trimmed.strip_prefix("List<") {
		let inner = rest.strip_suffix('>').ok_or_else(invalid)?;
		return parse_type_expr(inner, enums).map(TypeDesc::list).map_err(|_| invalid());
	}

	let base = match trimmed.to_ascii_lowercase().as_str() {
		"object" => TypeDesc::Object,
		"bool" | "boolean" => TypeDesc::Bool,
		"int" | "int32" => TypeDesc::I32,
		"long" | "int64" => TypeDesc::I64,
		"ulong" | "uint64" => TypeDesc::U64,
		"float" | "single" => TypeDesc::F32,
		"double" => TypeDesc::F64,
		"string" => TypeDesc::String,
		"timespan" | "duration" => TypeDesc::Duration,
		_ => {
			let def = enums.iter().find(|def| def.name.as_ref() == trimmed).ok_or_else(invalid)?;
			TypeDesc::Enum(Arc::clone(def))
		}
	};
	Ok(base)
}

/// Parse `Name=Sym[:value],Sym[:value],...`; omitted values continue from the previous one.
pub(crate) fn parse_enum_spec(spec: &str) -> Result<Arc<EnumDef>> {
	let invalid = || CoerceError::InvalidEnumSpec { spec: spec.to_owned() };
	let (name, body) = spec.split_once('=').ok_or_else(invalid)?;
	let name = name.trim();
	if name.is_empty() || !name.chars().all(|ch| ch.is_alphanumeric() || ch == '_') {
		return Err(invalid());
	}

	let mut symbols = Vec::new();
	let mut next = 0_i64;
	for item in body.split(',') {
		let (symbol, value) = match item.split_once(':') {
			Some((symbol, value)) => (symbol.trim(), value.trim().parse::<i64>().map_err(|_| invalid())?),
			None => (item.trim(), next),
		};
		if symbol.is_empty() {
			return Err(invalid());
		}
		symbols.push((symbol, value));
		next = value.wrapping_add(1);
	}

	Ok(EnumDef::new(name, symbols))
}

/// Render a coerced value as JSON.
pub(crate) fn value_json(value: &Value) -> serde_json::Value {
	use serde_json::{Value as Json, json};

	match value {
		Value::Null | Value::DbNull => Json::Null,
		Value::Bool(flag) => json!(flag),
		Value::I32(item) => json!(item),
		Value::I64(item) => json!(item),
		Value::U64(item) => json!(item),
		Value::F32(item) => json!(item),
		Value::F64(item) => json!(item),
		Value::String(text) => Json::String(text.to_string()),
		Value::Duration(span) => json!(span.to_string()),
		Value::Enum(item) => json!(item.to_string()),
		Value::Nullable { value, .. } => value.as_deref().map(value_json).unwrap_or(Json::Null),
		Value::Array { items, .. } | Value::List { items, .. } => Json::Array(items.iter().map(value_json).collect()),
		Value::Custom(item) => Json::Object(item.fields.iter().map(|(name, field)| (name.to_string(), value_json(field))).collect()),
	}
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

#[cfg(test)]
mod tests {
	use scalarcast::coerce::{EnumDef, TypeDesc, Value};

	use super::{parse_enum_spec, parse_type_expr, value_json};

	#[test]
	fn type_expr_handles_nesting() {
		let mode = EnumDef::new("Mode", [("Off", 0), ("On", 1)]);
		let enums = [mode.clone()];
		assert_eq!(parse_type_expr("int[]", &enums).expect("parses"), TypeDesc::array(TypeDesc::I32));
		assert_eq!(parse_type_expr("List<Mode>", &enums).expect("parses"), TypeDesc::list(TypeDesc::Enum(mode)));
		assert_eq!(parse_type_expr("bool?", &enums).expect("parses"), TypeDesc::nullable(TypeDesc::Bool));
		assert_eq!(
			parse_type_expr("List<long>[]", &enums).expect("parses"),
			TypeDesc::array(TypeDesc::list(TypeDesc::I64))
		);
		assert!(parse_type_expr("List<int", &enums).is_err());
		assert!(parse_type_expr("Unknown", &enums).is_err());
	}

	#[test]
	fn enum_spec_fills_implicit_values() {
		let def = parse_enum_spec("Layer=Default,Water:4,UI").expect("spec parses");
		assert_eq!(def.name.as_ref(), "Layer");
		assert_eq!(def.value_of("Default"), Some(0));
		assert_eq!(def.value_of("ui"), Some(5));
		assert!(parse_enum_spec("=A").is_err());
		assert!(parse_enum_spec("Mode=A:x").is_err());
		assert!(parse_enum_spec("Mode=A,,B").is_err());
	}

	#[test]
	fn json_unwraps_nullable_and_lists() {
		let value = Value::List {
			element: TypeDesc::nullable(TypeDesc::I32),
			items: vec![
				Value::Nullable {
					inner: TypeDesc::I32,
					value: Some(Box::new(Value::I32(3))),
				},
				Value::Nullable {
					inner: TypeDesc::I32,
					value: None,
				},
			],
		};
		assert_eq!(value_json(&value), serde_json::json!([3, null]));
	}
}
