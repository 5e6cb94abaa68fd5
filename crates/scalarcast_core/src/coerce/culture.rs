use crate::coerce::{CoerceError, Result};

/// Number formatting conventions used by culture-aware parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
	/// Culture name, empty for the invariant culture.
	pub name: Box<str>,
	/// Decimal separator.
	pub decimal_separator: char,
	/// Digit group separator.
	pub group_separator: char,
}

const BUILTIN: &[(&str, char, char)] = &[("en-US", '.', ','), ("en-GB", '.', ','), ("de-DE", ',', '.'), ("fr-FR", ',', '\u{202f}')];

impl Culture {
	/// Culture-independent conventions.
	pub fn invariant() -> Self {
		Self {
			name: "".into(),
			decimal_separator: '.',
			group_separator: ',',
		}
	}

	/// Look up a culture in the built-in table; empty or `invariant` yields the invariant culture.
	pub fn named(name: &str) -> Result<Self> {
		if name.is_empty() || name.eq_ignore_ascii_case("invariant") {
			return Ok(Self::invariant());
		}

		BUILTIN
			.iter()
			.find(|(item, _, _)| item.eq_ignore_ascii_case(name))
			.map(|(item, decimal_separator, group_separator)| Self {
				name: (*item).into(),
				decimal_separator: *decimal_separator,
				group_separator: *group_separator,
			})
			.ok_or_else(|| CoerceError::UnknownCulture { name: name.to_owned() })
	}

	/// Whether this is the invariant culture.
	pub fn is_invariant(&self) -> bool {
		self.name.is_empty()
	}

	/// Rewrite culture-formatted float text into the form `str::parse` accepts.
	pub fn normalize_float(&self, text: &str) -> String {
		text.trim()
			.chars()
			.filter(|ch| *ch != self.group_separator)
			.map(|ch| if ch == self.decimal_separator { '.' } else { ch })
			.collect()
	}

	/// Parse integer text; group separators are not accepted.
	pub fn parse_i64(&self, text: &str) -> Result<i64> {
		text.trim().parse().map_err(|_| CoerceError::InvalidNumber {
			kind: "long",
			text: text.to_owned(),
		})
	}

	/// Parse float text using this culture's separators.
	pub fn parse_f64(&self, text: &str) -> Result<f64> {
		let normalized = self.normalize_float(text);
		if normalized.is_empty() {
			return Err(CoerceError::InvalidNumber {
				kind: "double",
				text: text.to_owned(),
			});
		}
		normalized.parse().map_err(|_| CoerceError::InvalidNumber {
			kind: "double",
			text: text.to_owned(),
		})
	}
}

impl Default for Culture {
	fn default() -> Self {
		Self::invariant()
	}
}
