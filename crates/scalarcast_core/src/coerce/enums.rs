use std::fmt;
use std::sync::Arc;

use crate::coerce::{CoerceError, Result};

/// Declared enum type: a name plus ordered `(symbol, underlying value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDef {
	/// Enum type name.
	pub name: Box<str>,
	/// Symbols in declaration order.
	pub symbols: Vec<(Box<str>, i64)>,
}

impl EnumDef {
	/// Build a shared enum definition.
	pub fn new<N, S>(name: N, symbols: impl IntoIterator<Item = (S, i64)>) -> Arc<Self>
	where
		N: Into<Box<str>>,
		S: Into<Box<str>>,
	{
		Arc::new(Self {
			name: name.into(),
			symbols: symbols.into_iter().map(|(symbol, value)| (symbol.into(), value)).collect(),
		})
	}

	/// Find the first symbol declared with `value`.
	pub fn symbol_for(&self, value: i64) -> Option<&str> {
		self.symbols.iter().find(|(_, item)| *item == value).map(|(symbol, _)| symbol.as_ref())
	}

	/// Find a symbol's underlying value, ignoring ASCII case.
	pub fn value_of(&self, symbol: &str) -> Option<i64> {
		self.symbols
			.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case(symbol))
			.map(|(_, value)| *value)
	}

	/// Map an underlying value to its declared symbol.
	pub fn from_underlying(self: &Arc<Self>, value: i64) -> Result<EnumValue> {
		if self.symbol_for(value).is_none() {
			return Err(CoerceError::MalformedEnumValue {
				enum_name: self.name.to_string(),
				value,
			});
		}
		Ok(EnumValue { def: Arc::clone(self), value })
	}

	/// Parse symbol text, a signed decimal number, or a comma-separated flag list.
	///
	/// Symbol names match case-insensitively. Numeric text is accepted even when
	/// no symbol carries that value.
	pub fn parse(self: &Arc<Self>, text: &str) -> Result<EnumValue> {
		let trimmed = text.trim();
		let invalid = || CoerceError::InvalidEnumText {
			enum_name: self.name.to_string(),
			text: text.to_owned(),
		};

		if trimmed.is_empty() {
			return Err(invalid());
		}

		if looks_numeric(trimmed) {
			let value = trimmed.parse::<i64>().map_err(|_| invalid())?;
			return Ok(EnumValue { def: Arc::clone(self), value });
		}

		let mut value = 0_i64;
		for part in trimmed.split(',') {
			let part = part.trim();
			value |= self.value_of(part).ok_or_else(invalid)?;
		}
		Ok(EnumValue { def: Arc::clone(self), value })
	}

	/// Value used when an enum slot is default-initialised.
	pub fn zero(self: &Arc<Self>) -> EnumValue {
		EnumValue { def: Arc::clone(self), value: 0 }
	}
}

fn looks_numeric(text: &str) -> bool {
	let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
	digits.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// One enum-typed runtime value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
	/// Owning enum definition.
	pub def: Arc<EnumDef>,
	/// Underlying integral value.
	pub value: i64,
}

impl EnumValue {
	/// Symbol declared for this exact value, if any.
	pub fn symbol(&self) -> Option<&str> {
		self.def.symbol_for(self.value)
	}
}

impl fmt::Display for EnumValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(symbol) = self.symbol() {
			return f.write_str(symbol);
		}

		let set: Vec<(&str, i64)> = self
			.def
			.symbols
			.iter()
			.filter(|(_, bit)| *bit != 0 && self.value & *bit == *bit)
			.map(|(symbol, bit)| (symbol.as_ref(), *bit))
			.collect();
		let covered = set.iter().fold(0_i64, |acc, (_, bit)| acc | *bit);
		if !set.is_empty() && covered == self.value {
			let names: Vec<&str> = set.iter().map(|(symbol, _)| *symbol).collect();
			return f.write_str(&names.join(", "));
		}

		write!(f, "{}", self.value)
	}
}
