use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CoerceError>;

/// Errors produced while coercing values, decoding packed arrays, and reading scalars.
#[derive(Debug, Error)]
pub enum CoerceError {
	/// Every strategy declined the request.
	#[error("no conversion from {value} to {destination}")]
	NoApplicableStrategy {
		/// Rendered source value.
		value: String,
		/// Requested destination type.
		destination: String,
	},
	/// A strategy committed to the conversion and failed.
	#[error("cannot convert {value} to {destination}: {source}")]
	Conversion {
		/// Rendered source value.
		value: String,
		/// Requested destination type.
		destination: String,
		/// Innermost failure.
		source: Box<CoerceError>,
	},
	/// A registered cast, parse, or converter function reported a failure.
	#[error("{operation} failed: {message}")]
	InvocationFailure {
		/// Name of the invoked operation.
		operation: String,
		/// Failure text reported by the operation.
		message: String,
	},
	/// Decoded integer has no matching enum symbol.
	#[error("enum {enum_name} has no symbol with value {value}")]
	MalformedEnumValue {
		/// Enum type name.
		enum_name: String,
		/// Underlying value that failed to map.
		value: i64,
	},
	/// Text does not name an enum symbol and is not numeric.
	#[error("enum {enum_name} has no symbol matching {text:?}")]
	InvalidEnumText {
		/// Enum type name.
		enum_name: String,
		/// Offending text.
		text: String,
	},
	/// Strict packed-array decoding hit a non-hex byte pair.
	#[error("packed array block {block} holds non-hex byte pair {text:?} at offset {offset}")]
	HexDecodeAnomaly {
		/// Zero-based 8-character block index.
		block: usize,
		/// Byte offset of the pair in the source string.
		offset: usize,
		/// Offending two-character text.
		text: String,
	},
	/// Text is not a number of the requested type.
	#[error("invalid {kind} literal {text:?}")]
	InvalidNumber {
		/// Target numeric type name.
		kind: &'static str,
		/// Offending text.
		text: String,
	},
	/// Numeric value does not fit the requested type.
	#[error("value {value} overflows {kind}")]
	NumericOverflow {
		/// Target numeric type name.
		kind: &'static str,
		/// Rendered value.
		value: String,
	},
	/// Text is not a boolean literal.
	#[error("invalid boolean literal {text:?}")]
	InvalidBool {
		/// Offending text.
		text: String,
	},
	/// Text does not follow the duration grammar.
	#[error("invalid duration literal {text:?}")]
	InvalidDuration {
		/// Offending text.
		text: String,
	},
	/// Recursive coercion went deeper than the configured limit.
	#[error("coercion depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Scalar source ran out of tokens.
	#[error("unexpected end of scalar input (expected {expected})")]
	UnexpectedEndOfInput {
		/// Token kind the reader wanted.
		expected: &'static str,
	},
	/// Scalar source produced a token of the wrong kind.
	#[error("unexpected token {got}, expected {expected}")]
	UnexpectedToken {
		/// Token kind the reader wanted.
		expected: &'static str,
		/// Rendered token that was found.
		got: String,
	},
	/// Mapping read by a scalar helper lacked a required key.
	#[error("mapping is missing key {key}")]
	MissingKey {
		/// Missing key name.
		key: &'static str,
	},
	/// Type expression could not be parsed.
	#[error("invalid type expression: {expr}")]
	InvalidTypeExpr {
		/// User-provided type text.
		expr: String,
	},
	/// Enum declaration could not be parsed.
	#[error("invalid enum declaration: {spec}")]
	InvalidEnumSpec {
		/// User-provided declaration text.
		spec: String,
	},
	/// Culture name is not in the built-in table.
	#[error("unknown culture: {name}")]
	UnknownCulture {
		/// Requested culture name.
		name: String,
	},
}

impl CoerceError {
	/// Walk `Conversion` wrappers down to the innermost failure.
	pub fn root_cause(&self) -> &CoerceError {
		let mut current = self;
		while let CoerceError::Conversion { source, .. } = current {
			current = source;
		}
		current
	}

	/// Strip `Conversion` wrappers, keeping the innermost failure.
	pub fn into_root_cause(self) -> CoerceError {
		match self {
			CoerceError::Conversion { source, .. } => source.into_root_cause(),
			other => other,
		}
	}
}
