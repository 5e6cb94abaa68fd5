use std::fmt;

use crate::coerce::{CoerceError, Coercer, Culture, Result, TypeDesc, Value};

/// Token produced by an upstream text reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// Scalar text.
	Scalar(Box<str>),
	/// Start of a mapping.
	MappingStart,
	/// End of a mapping.
	MappingEnd,
	/// Start of a sequence.
	SequenceStart,
	/// End of a sequence.
	SequenceEnd,
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(text) => write!(f, "scalar {text:?}"),
			Self::MappingStart => f.write_str("mapping start"),
			Self::MappingEnd => f.write_str("mapping end"),
			Self::SequenceStart => f.write_str("sequence start"),
			Self::SequenceEnd => f.write_str("sequence end"),
		}
	}
}

/// Cursor over upstream tokens.
pub trait ScalarSource {
	/// Token at the cursor, if any.
	fn current(&self) -> Option<&Token>;

	/// Move past the current token.
	fn advance(&mut self);

	/// Take the current scalar's text and advance.
	fn next_scalar(&mut self) -> Result<Box<str>> {
		let text = match self.current() {
			Some(Token::Scalar(text)) => text.clone(),
			Some(other) => {
				return Err(CoerceError::UnexpectedToken {
					expected: "scalar",
					got: other.to_string(),
				});
			}
			None => return Err(CoerceError::UnexpectedEndOfInput { expected: "scalar" }),
		};
		self.advance();
		Ok(text)
	}

	/// Require `token` at the cursor and advance past it.
	fn expect_token(&mut self, token: &Token, expected: &'static str) -> Result<()> {
		match self.current() {
			Some(found) if found == token => {
				self.advance();
				Ok(())
			}
			Some(found) => Err(CoerceError::UnexpectedToken {
				expected,
				got: found.to_string(),
			}),
			None => Err(CoerceError::UnexpectedEndOfInput { expected }),
		}
	}
}

/// In-memory token list.
#[derive(Debug, Clone, Default)]
pub struct VecScalarSource {
	tokens: Vec<Token>,
	pos: usize,
}

impl VecScalarSource {
	/// Cursor at the first token.
	pub fn new(tokens: Vec<Token>) -> Self {
		Self { tokens, pos: 0 }
	}

	/// Tokens not yet consumed.
	pub fn remaining(&self) -> usize {
		self.tokens.len().saturating_sub(self.pos)
	}
}

impl ScalarSource for VecScalarSource {
	fn current(&self) -> Option<&Token> {
		self.tokens.get(self.pos)
	}

	fn advance(&mut self) {
		if self.pos < self.tokens.len() {
			self.pos += 1;
		}
	}
}

/// Read an integer flag scalar: `0` is `false`, any other integer is `true`.
pub fn read_flag_bool(source: &mut impl ScalarSource) -> Result<bool> {
	let text = source.next_scalar()?;
	let value = text.trim().parse::<i64>().map_err(|_| CoerceError::InvalidBool { text: text.to_string() })?;
	Ok(value != 0)
}

/// RGBA color with float channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
	/// Red.
	pub r: f32,
	/// Green.
	pub g: f32,
	/// Blue.
	pub b: f32,
	/// Alpha.
	pub a: f32,
}

/// Read a `{r: .., g: .., b: .., a: ..}` mapping, coercing each channel to `float`.
///
/// Keys may appear in any order; unknown keys are skipped.
pub fn read_color(source: &mut impl ScalarSource, engine: &Coercer<'_>, culture: &Culture) -> Result<Color> {
	source.expect_token(&Token::MappingStart, "mapping start")?;

	let mut channels: [Option<f32>; 4] = [None; 4];
	while source.current() != Some(&Token::MappingEnd) {
		let key = source.next_scalar()?;
		let raw = source.next_scalar()?;
		let slot = match &*key {
			"r" => 0,
			"g" => 1,
			"b" => 2,
			"a" => 3,
			_ => continue,
		};
		channels[slot] = match engine.coerce(&Value::String(raw), &TypeDesc::F32, culture)? {
			Value::F32(value) => Some(value),
			other => {
				return Err(CoerceError::UnexpectedToken {
					expected: "float channel",
					got: other.to_string(),
				});
			}
		};
	}
	source.expect_token(&Token::MappingEnd, "mapping end")?;

	let channel = |idx: usize, key: &'static str| channels[idx].ok_or(CoerceError::MissingKey { key });
	Ok(Color {
		r: channel(0, "r")?,
		g: channel(1, "g")?,
		b: channel(2, "b")?,
		a: channel(3, "a")?,
	})
}

/// Source key for a member name: `_` followed by the camel-cased name.
///
/// A `_` or `-` directly before an ASCII letter is dropped and the letter
/// upper-cased; other separators stay. The first character is lower-cased,
/// so `max_health`, `max-health` and `MaxHealth` all map to `_maxHealth`
/// while `max_1` stays `_max_1`.
pub fn field_key(name: &str) -> String {
	let mut camel = String::with_capacity(name.len());
	let mut chars = name.chars().peekable();
	while let Some(ch) = chars.next() {
		match chars.peek() {
			Some(next) if matches!(ch, '_' | '-') && next.is_ascii_alphabetic() => {
				camel.push(next.to_ascii_uppercase());
				chars.next();
			}
			_ => camel.push(ch),
		}
	}

	let mut out = String::with_capacity(camel.len() + 1);
	out.push('_');
	let mut rest = camel.chars();
	if let Some(first) = rest.next() {
		out.extend(first.to_lowercase());
		out.push_str(rest.as_str());
	}
	out
}
