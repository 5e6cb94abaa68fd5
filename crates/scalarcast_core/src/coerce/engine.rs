use std::fmt;

use log::{debug, trace};

use crate::coerce::packed::{HexMode, unpack_for};
use crate::coerce::{CoerceError, ConverterRegistry, Culture, Result, TimeSpan, TypeDesc, Value};

/// Runtime switches for coercion.
#[derive(Debug, Clone)]
pub struct CoerceOptions {
	/// Policy for malformed byte pairs in packed arrays.
	pub hex_mode: HexMode,
	/// Maximum nesting of recursive coercions (nullable unwrap, duration text).
	pub max_depth: u32,
}

impl Default for CoerceOptions {
	fn default() -> Self {
		Self {
			hex_mode: HexMode::Lenient,
			max_depth: 16,
		}
	}
}

/// One step of the coercion chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// Null or database-null source.
	Null,
	/// Source already satisfies the destination.
	Identity,
	/// Coerce to the wrapped type and re-wrap.
	NullableUnwrap,
	/// Enum destination.
	Enum,
	/// `"0"`/`"1"` to boolean.
	BoolDigit,
	/// Adapter registered on the source type.
	SourceConverter,
	/// Adapter registered on the destination type.
	DestinationConverter,
	/// Packed hex string to `int`/enum array or list.
	PackedArray,
	/// Registered cast function.
	Cast,
	/// Registered text parser.
	Parse,
	/// Duration destination via text.
	Duration,
	/// Built-in primitive conversion under the invariant culture.
	ChangeType,
}

impl Strategy {
	/// Evaluation order; the first strategy that produces a value wins.
	pub const ORDER: [Strategy; 12] = [
		Strategy::Null,
		Strategy::Identity,
		Strategy::NullableUnwrap,
		Strategy::Enum,
		Strategy::BoolDigit,
		Strategy::SourceConverter,
		Strategy::DestinationConverter,
		Strategy::PackedArray,
		Strategy::Cast,
		Strategy::Parse,
		Strategy::Duration,
		Strategy::ChangeType,
	];

	/// Stable label used in logs and CLI output.
	pub fn label(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Identity => "identity",
			Self::NullableUnwrap => "nullable_unwrap",
			Self::Enum => "enum",
			Self::BoolDigit => "bool_digit",
			Self::SourceConverter => "source_converter",
			Self::DestinationConverter => "destination_converter",
			Self::PackedArray => "packed_array",
			Self::Cast => "cast",
			Self::Parse => "parse",
			Self::Duration => "duration",
			Self::ChangeType => "change_type",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// `Ok(None)`: strategy does not apply. `Err`: strategy applied and failed.
type Attempt = Result<Option<Value>>;

/// Converts values to destination types by trying `Strategy::ORDER` in turn.
///
/// Holds no mutable state; one instance can serve concurrent callers as long
/// as the borrowed registry's adapters are side-effect free.
pub struct Coercer<'r> {
	registry: &'r ConverterRegistry,
	options: CoerceOptions,
}

impl<'r> Coercer<'r> {
	/// Engine with default options.
	pub fn new(registry: &'r ConverterRegistry) -> Self {
		Self::with_options(registry, CoerceOptions::default())
	}

	/// Engine with explicit options.
	pub fn with_options(registry: &'r ConverterRegistry, options: CoerceOptions) -> Self {
		Self { registry, options }
	}

	/// Active options.
	pub fn options(&self) -> &CoerceOptions {
		&self.options
	}

	/// Convert `value` to `destination`.
	///
	/// Errors are `NoApplicableStrategy` when every strategy declined, or
	/// `Conversion` wrapping the innermost failure otherwise.
	pub fn coerce(&self, value: &Value, destination: &TypeDesc, culture: &Culture) -> Result<Value> {
		self.coerce_traced(value, destination, culture).map(|(value, _)| value)
	}

	/// Convert using the invariant culture.
	pub fn coerce_invariant(&self, value: &Value, destination: &TypeDesc) -> Result<Value> {
		self.coerce(value, destination, &Culture::invariant())
	}

	/// Convert and report which strategy produced the result.
	pub fn coerce_traced(&self, value: &Value, destination: &TypeDesc, culture: &Culture) -> Result<(Value, Strategy)> {
		self.run(value, destination, culture, 0).map_err(|err| match err {
			CoerceError::NoApplicableStrategy { .. } => CoerceError::NoApplicableStrategy {
				value: value.to_string(),
				destination: destination.to_string(),
			},
			other => CoerceError::Conversion {
				value: value.to_string(),
				destination: destination.to_string(),
				source: Box::new(other.into_root_cause()),
			},
		})
	}

	fn run(&self, value: &Value, destination: &TypeDesc, culture: &Culture, depth: u32) -> Result<(Value, Strategy)> {
		if depth > self.options.max_depth {
			return Err(CoerceError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let value = unbox(value);
		for strategy in Strategy::ORDER {
			match self.attempt(strategy, value, destination, culture, depth) {
				Ok(Some(out)) => {
					debug!("coerce {} -> {destination}: {strategy}", value.kind());
					return Ok((out, strategy));
				}
				Ok(None) => trace!("coerce {} -> {destination}: {strategy} declined", value.kind()),
				Err(err) => {
					debug!("coerce {} -> {destination}: {strategy} failed: {err}", value.kind());
					return Err(err);
				}
			}
		}

		Err(CoerceError::NoApplicableStrategy {
			value: value.to_string(),
			destination: destination.to_string(),
		})
	}

	fn attempt(&self, strategy: Strategy, value: &Value, destination: &TypeDesc, culture: &Culture, depth: u32) -> Attempt {
		if strategy == Strategy::Null {
			return Ok(value.is_null().then(|| destination.default_value()));
		}

		// Every later strategy sees a non-null source.
		let Some(source) = value.type_desc() else {
			return Ok(None);
		};

		match strategy {
			Strategy::Null => Ok(None),
			Strategy::Identity => Ok(destination.is_assignable_from(&source).then(|| value.clone())),
			Strategy::NullableUnwrap => self.nullable_unwrap(value, destination, culture, depth),
			Strategy::Enum => enum_strategy(value, destination),
			Strategy::BoolDigit => Ok(bool_digit(value, destination)),
			Strategy::SourceConverter => match self.registry.converter_for(&source) {
				Some(converter) if converter.can_convert_to(destination) => converter.convert_to(value, destination, culture).map(Some),
				_ => Ok(None),
			},
			Strategy::DestinationConverter => match self.registry.converter_for(destination) {
				Some(converter) if converter.can_convert_from(&source) => converter.convert_from(value, culture).map(Some),
				_ => Ok(None),
			},
			Strategy::PackedArray => match value {
				Value::String(text) => unpack_for(text, destination, self.options.hex_mode),
				_ => Ok(None),
			},
			Strategy::Cast => match self.registry.find_cast(&source, destination) {
				Some(cast) => (cast.func)(value).map(Some).map_err(CoerceError::into_root_cause),
				None => Ok(None),
			},
			Strategy::Parse => self.parse(value, destination, culture),
			Strategy::Duration => self.duration(value, destination, depth),
			Strategy::ChangeType => change_type(value, destination),
		}
	}

	fn nullable_unwrap(&self, value: &Value, destination: &TypeDesc, culture: &Culture, depth: u32) -> Attempt {
		let Some(inner) = destination.nullable_inner() else {
			return Ok(None);
		};

		let (converted, _) = self.run(value, inner, culture, depth + 1)?;
		Ok(Some(Value::Nullable {
			inner: inner.clone(),
			value: (!converted.is_null()).then(|| Box::new(converted)),
		}))
	}

	fn parse(&self, value: &Value, destination: &TypeDesc, culture: &Culture) -> Attempt {
		let Some(text) = value.as_str() else {
			return Ok(None);
		};
		let Some(entry) = self.registry.parsers_for(destination) else {
			return Ok(None);
		};

		let parsed = if let Some(parse) = &entry.with_culture {
			parse(text, culture)
		} else if let Some(parse) = &entry.plain {
			parse(text)
		} else {
			return Ok(None);
		};
		parsed.map(Some).map_err(CoerceError::into_root_cause)
	}

	fn duration(&self, value: &Value, destination: &TypeDesc, depth: u32) -> Attempt {
		if *destination != TypeDesc::Duration {
			return Ok(None);
		}

		let (text, _) = self.run(value, &TypeDesc::String, &Culture::invariant(), depth + 1)?;
		match text {
			Value::String(text) => TimeSpan::parse(&text).map(|span| Some(Value::Duration(span))),
			_ => Ok(None),
		}
	}
}

static NULL: Value = Value::Null;

/// A populated nullable behaves as its payload; an empty one as null.
fn unbox(value: &Value) -> &Value {
	match value {
		Value::Nullable { value: Some(inner), .. } => unbox(inner),
		Value::Nullable { value: None, .. } => &NULL,
		other => other,
	}
}

fn enum_strategy(value: &Value, destination: &TypeDesc) -> Attempt {
	let Some(def) = destination.enum_def() else {
		return Ok(None);
	};

	match value {
		Value::String(text) => def.parse(text).map(|parsed| Some(Value::Enum(parsed))),
		other => Ok(Some(other.clone())),
	}
}

fn bool_digit(value: &Value, destination: &TypeDesc) -> Option<Value> {
	if *destination != TypeDesc::Bool {
		return None;
	}

	match value.as_str()? {
		"0" => Some(Value::Bool(false)),
		"1" => Some(Value::Bool(true)),
		_ => None,
	}
}

enum Number {
	Int(i128),
	Float(f64),
}

fn number_of(value: &Value) -> Result<Option<Number>> {
	Ok(Some(match value {
		Value::Bool(flag) => Number::Int(i128::from(*flag)),
		Value::I32(item) => Number::Int(i128::from(*item)),
		Value::I64(item) => Number::Int(i128::from(*item)),
		Value::U64(item) => Number::Int(i128::from(*item)),
		Value::F32(item) => Number::Float(f64::from(*item)),
		Value::F64(item) => Number::Float(*item),
		Value::Enum(item) => Number::Int(i128::from(item.value)),
		Value::String(text) => parse_invariant_number(text)?,
		_ => return Ok(None),
	}))
}

fn parse_invariant_number(text: &str) -> Result<Number> {
	let trimmed = text.trim();
	if let Ok(int) = trimmed.parse::<i128>() {
		return Ok(Number::Int(int));
	}
	Culture::invariant().parse_f64(trimmed).map(Number::Float)
}

/// Primitive-to-primitive conversion under the invariant culture.
fn change_type(value: &Value, destination: &TypeDesc) -> Attempt {
	match destination {
		TypeDesc::String => Ok(render_invariant(value).map(Value::String)),
		TypeDesc::Bool => match value {
			Value::String(text) => crate::coerce::parse_bool(text).map(|flag| Some(Value::Bool(flag))),
			other => Ok(number_of(other)?.map(|number| {
				Value::Bool(match number {
					Number::Int(int) => int != 0,
					Number::Float(float) => float != 0.0,
				})
			})),
		},
		TypeDesc::I32 | TypeDesc::I64 | TypeDesc::U64 | TypeDesc::F32 | TypeDesc::F64 => match number_of(value)? {
			Some(number) => number_to(number, destination, value).map(Some),
			None => Ok(None),
		},
		_ => Ok(None),
	}
}

fn number_to(number: Number, destination: &TypeDesc, original: &Value) -> Result<Value> {
	let overflow = |kind: &'static str| CoerceError::NumericOverflow {
		kind,
		value: original.to_string(),
	};

	let int = match (number, destination) {
		(Number::Int(int), TypeDesc::F32) => return Ok(Value::F32(int as f32)),
		(Number::Int(int), TypeDesc::F64) => return Ok(Value::F64(int as f64)),
		(Number::Float(float), TypeDesc::F32) => return Ok(Value::F32(float as f32)),
		(Number::Float(float), TypeDesc::F64) => return Ok(Value::F64(float)),
		(Number::Int(int), _) => int,
		(Number::Float(float), _) => {
			if !float.is_finite() {
				return Err(overflow(int_kind(destination)));
			}
			float.round_ties_even() as i128
		}
	};

	match destination {
		TypeDesc::I32 => i32::try_from(int).map(Value::I32).map_err(|_| overflow("int")),
		TypeDesc::I64 => i64::try_from(int).map(Value::I64).map_err(|_| overflow("long")),
		_ => u64::try_from(int).map(Value::U64).map_err(|_| overflow("ulong")),
	}
}

fn int_kind(destination: &TypeDesc) -> &'static str {
	match destination {
		TypeDesc::I32 => "int",
		TypeDesc::I64 => "long",
		_ => "ulong",
	}
}

fn render_invariant(value: &Value) -> Option<Box<str>> {
	let text = match value {
		Value::Bool(flag) => flag.to_string(),
		Value::I32(item) => item.to_string(),
		Value::I64(item) => item.to_string(),
		Value::U64(item) => item.to_string(),
		Value::F32(item) => item.to_string(),
		Value::F64(item) => item.to_string(),
		Value::String(text) => text.to_string(),
		Value::Duration(span) => span.to_string(),
		Value::Enum(item) => item.to_string(),
		_ => return None,
	};
	Some(text.into_boxed_str())
}
