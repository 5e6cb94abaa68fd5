use std::collections::HashMap;
use std::sync::Arc;

use crate::coerce::{CoerceError, Culture, Result, TypeDesc, Value};

/// Conversion adapter attached to one type.
///
/// The engine consults the adapter registered for the source type
/// (`can_convert_to`/`convert_to`) and then the one registered for the
/// destination type (`can_convert_from`/`convert_from`).
pub trait TypeConverter: Send + Sync {
	/// Whether this adapter can turn its own type into `destination`.
	fn can_convert_to(&self, destination: &TypeDesc) -> bool {
		let _ = destination;
		false
	}

	/// Convert a value of the adapter's type into `destination`.
	fn convert_to(&self, value: &Value, destination: &TypeDesc, culture: &Culture) -> Result<Value> {
		let _ = (destination, culture);
		Err(CoerceError::InvocationFailure {
			operation: "convert_to".to_owned(),
			message: format!("no outbound conversion for {}", value.kind()),
		})
	}

	/// Whether this adapter can build its own type from `source`.
	fn can_convert_from(&self, source: &TypeDesc) -> bool {
		let _ = source;
		false
	}

	/// Build a value of the adapter's type from `value`.
	fn convert_from(&self, value: &Value, culture: &Culture) -> Result<Value> {
		let _ = culture;
		Err(CoerceError::InvocationFailure {
			operation: "convert_from".to_owned(),
			message: format!("no inbound conversion from {}", value.kind()),
		})
	}
}

/// Explicit cast function registered for a `(from, to)` pair.
pub type CastFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;
/// Text parser without culture.
pub type ParseFn = Arc<dyn Fn(&str) -> Result<Value> + Send + Sync>;
/// Culture-aware text parser.
pub type CultureParseFn = Arc<dyn Fn(&str, &Culture) -> Result<Value> + Send + Sync>;

struct RegisteredConverter {
	kind: &'static str,
	converter: Arc<dyn TypeConverter>,
}

/// Registered cast between two types.
#[derive(Clone)]
pub struct CastEntry {
	/// Declared parameter type.
	pub from: TypeDesc,
	/// Declared return type.
	pub to: TypeDesc,
	/// Cast implementation.
	pub func: CastFn,
}

/// Parse functions registered for one destination type.
#[derive(Clone, Default)]
pub struct ParseEntry {
	/// `parse(text, culture)` form, preferred when present.
	pub with_culture: Option<CultureParseFn>,
	/// `parse(text)` form.
	pub plain: Option<ParseFn>,
}

/// Lookup tables for converter adapters, casts, and parse functions.
///
/// Built once before coercion starts and then only borrowed.
#[derive(Default)]
pub struct ConverterRegistry {
	converters: HashMap<TypeDesc, RegisteredConverter>,
	casts: Vec<CastEntry>,
	parsers: HashMap<TypeDesc, ParseEntry>,
}

impl ConverterRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry pre-loaded with text parsers for the primitive types.
	///
	/// Numeric parsers honour the caller's culture; `bool` parses
	/// `true`/`false` case-insensitively. `timespan` is left to the duration
	/// strategy.
	pub fn with_builtin_parsers() -> Self {
		let mut registry = Self::new();
		registry.register_parse_with_culture(TypeDesc::I32, |text, culture| {
			let value = culture.parse_i64(text).map_err(|_| invalid_number("int", text))?;
			i32::try_from(value).map(Value::I32).map_err(|_| overflow("int", text))
		});
		registry.register_parse_with_culture(TypeDesc::I64, |text, culture| {
			culture.parse_i64(text).map(Value::I64).map_err(|_| invalid_number("long", text))
		});
		registry.register_parse_with_culture(TypeDesc::U64, |text, _| {
			text.trim().parse::<u64>().map(Value::U64).map_err(|_| invalid_number("ulong", text))
		});
		registry.register_parse_with_culture(TypeDesc::F32, |text, culture| {
			culture.parse_f64(text).map(|value| Value::F32(value as f32)).map_err(|_| invalid_number("float", text))
		});
		registry.register_parse_with_culture(TypeDesc::F64, |text, culture| culture.parse_f64(text).map(Value::F64));
		registry.register_parse(TypeDesc::Bool, |text| parse_bool(text).map(Value::Bool));
		registry
	}

	/// Attach a converter adapter to `ty`.
	///
	/// Returns `false` when an adapter of the same Rust type is already attached.
	pub fn register_converter<C>(&mut self, ty: TypeDesc, converter: C) -> bool
	where
		C: TypeConverter + 'static,
	{
		let kind = std::any::type_name::<C>();
		if self.converters.get(&ty).is_some_and(|existing| existing.kind == kind) {
			return false;
		}
		self.converters.insert(
			ty,
			RegisteredConverter {
				kind,
				converter: Arc::new(converter),
			},
		);
		true
	}

	/// Adapter attached to `ty`, if any.
	pub fn converter_for(&self, ty: &TypeDesc) -> Option<&dyn TypeConverter> {
		self.converters.get(ty).map(|entry| entry.converter.as_ref())
	}

	/// Register an explicit cast from `from` to `to`.
	pub fn register_cast<F>(&mut self, from: TypeDesc, to: TypeDesc, func: F)
	where
		F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
	{
		self.casts.push(CastEntry {
			from,
			to,
			func: Arc::new(func),
		});
	}

	/// Find a cast whose parameter accepts `source` and whose result satisfies `destination`.
	///
	/// Casts declared exactly on `source` win over casts declared on a wider
	/// parameter type; registration order breaks remaining ties.
	pub fn find_cast(&self, source: &TypeDesc, destination: &TypeDesc) -> Option<&CastEntry> {
		let returns_destination = |entry: &&CastEntry| destination.is_assignable_from(&entry.to);
		self.casts
			.iter()
			.filter(returns_destination)
			.find(|entry| entry.from == *source)
			.or_else(|| {
				self.casts
					.iter()
					.filter(returns_destination)
					.find(|entry| entry.from.is_assignable_from(source))
			})
	}

	/// Register a culture-aware parser for `ty`.
	pub fn register_parse_with_culture<F>(&mut self, ty: TypeDesc, func: F)
	where
		F: Fn(&str, &Culture) -> Result<Value> + Send + Sync + 'static,
	{
		self.parsers.entry(ty).or_default().with_culture = Some(Arc::new(func));
	}

	/// Register a culture-free parser for `ty`.
	pub fn register_parse<F>(&mut self, ty: TypeDesc, func: F)
	where
		F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
	{
		self.parsers.entry(ty).or_default().plain = Some(Arc::new(func));
	}

	/// Parse functions registered for `ty`.
	pub fn parsers_for(&self, ty: &TypeDesc) -> Option<&ParseEntry> {
		self.parsers.get(ty)
	}
}

/// Parse `true`/`false` ignoring ASCII case and surrounding whitespace.
pub fn parse_bool(text: &str) -> Result<bool> {
	let trimmed = text.trim();
	if trimmed.eq_ignore_ascii_case("true") {
		Ok(true)
	} else if trimmed.eq_ignore_ascii_case("false") {
		Ok(false)
	} else {
		Err(CoerceError::InvalidBool { text: text.to_owned() })
	}
}

fn invalid_number(kind: &'static str, text: &str) -> CoerceError {
	CoerceError::InvalidNumber { kind, text: text.to_owned() }
}

fn overflow(kind: &'static str, text: &str) -> CoerceError {
	CoerceError::NumericOverflow { kind, value: text.trim().to_owned() }
}
