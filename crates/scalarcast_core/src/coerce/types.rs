use std::fmt;
use std::sync::Arc;

use crate::coerce::duration::TimeSpan;
use crate::coerce::enums::EnumDef;
use crate::coerce::value::Value;

/// Destination type descriptor.
///
/// Stands in for host reflection: every query the engine needs is answered
/// from the variant itself rather than by inspecting member tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
	/// Top type; every value is assignable to it.
	Object,
	/// Boolean.
	Bool,
	/// 32-bit signed integer.
	I32,
	/// 64-bit signed integer.
	I64,
	/// 64-bit unsigned integer.
	U64,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
	/// UTF-8 text.
	String,
	/// Signed time span.
	Duration,
	/// Declared enum type.
	Enum(Arc<EnumDef>),
	/// "T or absence of value".
	Nullable(Box<TypeDesc>),
	/// Fixed array of the element type.
	Array(Box<TypeDesc>),
	/// Growable list of the type argument.
	List(Box<TypeDesc>),
	/// Named application type converted only through the registry.
	Custom(Arc<str>),
}

impl TypeDesc {
	/// Shorthand for `Nullable(inner)`.
	pub fn nullable(inner: TypeDesc) -> Self {
		Self::Nullable(Box::new(inner))
	}

	/// Shorthand for `Array(element)`.
	pub fn array(element: TypeDesc) -> Self {
		Self::Array(Box::new(element))
	}

	/// Shorthand for `List(element)`.
	pub fn list(element: TypeDesc) -> Self {
		Self::List(Box::new(element))
	}

	/// Shorthand for `Custom(name)`.
	pub fn custom(name: &str) -> Self {
		Self::Custom(Arc::from(name))
	}

	/// Whether values of this type have a non-null default.
	pub fn is_value_type(&self) -> bool {
		matches!(
			self,
			Self::Bool | Self::I32 | Self::I64 | Self::U64 | Self::F32 | Self::F64 | Self::Duration | Self::Enum(_) | Self::Nullable(_)
		)
	}

	/// Wrapped type of a nullable wrapper.
	pub fn nullable_inner(&self) -> Option<&TypeDesc> {
		match self {
			Self::Nullable(inner) => Some(inner),
			_ => None,
		}
	}

	/// Declared element type of an array or type argument of a list.
	pub fn element_type(&self) -> Option<&TypeDesc> {
		match self {
			Self::Array(element) | Self::List(element) => Some(element),
			_ => None,
		}
	}

	/// Enum definition when this is an enum type.
	pub fn enum_def(&self) -> Option<&Arc<EnumDef>> {
		match self {
			Self::Enum(def) => Some(def),
			_ => None,
		}
	}

	/// Whether a value of runtime type `source` already satisfies `self`.
	///
	/// Nullable wrappers only accept other nullable wrappers of the same inner
	/// type; a bare `T` goes through the unwrap strategy instead.
	pub fn is_assignable_from(&self, source: &TypeDesc) -> bool {
		matches!(self, Self::Object) || self == source
	}

	/// Default value used when the source is null: the zero value for value
	/// types, `Null` for everything else.
	pub fn default_value(&self) -> Value {
		if !self.is_value_type() {
			return Value::Null;
		}

		match self {
			Self::Bool => Value::Bool(false),
			Self::I32 => Value::I32(0),
			Self::I64 => Value::I64(0),
			Self::U64 => Value::U64(0),
			Self::F32 => Value::F32(0.0),
			Self::F64 => Value::F64(0.0),
			Self::Duration => Value::Duration(TimeSpan::ZERO),
			Self::Enum(def) => Value::Enum(def.zero()),
			Self::Nullable(inner) => Value::Nullable {
				inner: inner.as_ref().clone(),
				value: None,
			},
			_ => Value::Null,
		}
	}
}

impl fmt::Display for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Object => f.write_str("object"),
			Self::Bool => f.write_str("bool"),
			Self::I32 => f.write_str("int"),
			Self::I64 => f.write_str("long"),
			Self::U64 => f.write_str("ulong"),
			Self::F32 => f.write_str("float"),
			Self::F64 => f.write_str("double"),
			Self::String => f.write_str("string"),
			Self::Duration => f.write_str("timespan"),
			Self::Enum(def) => f.write_str(&def.name),
			Self::Nullable(inner) => write!(f, "{inner}?"),
			Self::Array(element) => write!(f, "{element}[]"),
			Self::List(element) => write!(f, "List<{element}>"),
			Self::Custom(name) => f.write_str(name),
		}
	}
}

#[cfg(test)]
mod tests;
