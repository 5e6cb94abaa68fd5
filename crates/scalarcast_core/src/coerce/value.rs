use std::fmt;
use std::sync::Arc;

use crate::coerce::duration::TimeSpan;
use crate::coerce::enums::EnumValue;
use crate::coerce::types::TypeDesc;

/// Runtime value handed to and produced by the coercion engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value.
	Null,
	/// Database-null sentinel; treated like `Null`.
	DbNull,
	/// Boolean scalar.
	Bool(bool),
	/// 32-bit signed integer.
	I32(i32),
	/// 64-bit signed integer.
	I64(i64),
	/// 64-bit unsigned integer.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// Text scalar.
	String(Box<str>),
	/// Time span.
	Duration(TimeSpan),
	/// Enum symbol.
	Enum(EnumValue),
	/// Nullable wrapper; `None` is the empty wrapper.
	Nullable {
		/// Wrapped type.
		inner: TypeDesc,
		/// Wrapped value.
		value: Option<Box<Value>>,
	},
	/// Fixed array.
	Array {
		/// Declared element type.
		element: TypeDesc,
		/// Items in order.
		items: Vec<Value>,
	},
	/// Growable list.
	List {
		/// Declared type argument.
		element: TypeDesc,
		/// Items in order.
		items: Vec<Value>,
	},
	/// Application-defined value produced by registry functions.
	Custom(CustomValue),
}

/// Application-defined value with named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomValue {
	/// Custom type name; matches `TypeDesc::Custom`.
	pub type_name: Arc<str>,
	/// Field values in declaration order.
	pub fields: Vec<(Box<str>, Value)>,
}

impl CustomValue {
	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|(field, _)| field.as_ref() == name).map(|(_, value)| value)
	}
}

impl Value {
	/// Build a text value.
	pub fn string(text: impl Into<Box<str>>) -> Self {
		Self::String(text.into())
	}

	/// Whether this is `Null` or `DbNull`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null | Self::DbNull)
	}

	/// Runtime type of the value; `None` for null markers.
	pub fn type_desc(&self) -> Option<TypeDesc> {
		Some(match self {
			Self::Null | Self::DbNull => return None,
			Self::Bool(_) => TypeDesc::Bool,
			Self::I32(_) => TypeDesc::I32,
			Self::I64(_) => TypeDesc::I64,
			Self::U64(_) => TypeDesc::U64,
			Self::F32(_) => TypeDesc::F32,
			Self::F64(_) => TypeDesc::F64,
			Self::String(_) => TypeDesc::String,
			Self::Duration(_) => TypeDesc::Duration,
			Self::Enum(value) => TypeDesc::Enum(Arc::clone(&value.def)),
			Self::Nullable { inner, .. } => TypeDesc::nullable(inner.clone()),
			Self::Array { element, .. } => TypeDesc::array(element.clone()),
			Self::List { element, .. } => TypeDesc::list(element.clone()),
			Self::Custom(value) => TypeDesc::Custom(Arc::clone(&value.type_name)),
		})
	}

	/// Borrow text content.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text.as_ref()),
			_ => None,
		}
	}

	/// Borrow array or list items.
	pub fn items(&self) -> Option<&[Value]> {
		match self {
			Self::Array { items, .. } | Self::List { items, .. } => Some(items.as_slice()),
			_ => None,
		}
	}

	/// Collect items as `i32` when every item is an `I32`.
	pub fn to_i32_vec(&self) -> Option<Vec<i32>> {
		self.items()?
			.iter()
			.map(|item| match item {
				Self::I32(value) => Some(*value),
				_ => None,
			})
			.collect()
	}

	/// Short label for the value kind, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::DbNull => "dbnull",
			Self::Bool(_) => "bool",
			Self::I32(_) => "int",
			Self::I64(_) => "long",
			Self::U64(_) => "ulong",
			Self::F32(_) => "float",
			Self::F64(_) => "double",
			Self::String(_) => "string",
			Self::Duration(_) => "timespan",
			Self::Enum(_) => "enum",
			Self::Nullable { .. } => "nullable",
			Self::Array { .. } => "array",
			Self::List { .. } => "list",
			Self::Custom(_) => "custom",
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::DbNull => f.write_str("dbnull"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::I32(value) => write!(f, "{value}"),
			Self::I64(value) => write!(f, "{value}"),
			Self::U64(value) => write!(f, "{value}"),
			Self::F32(value) => write!(f, "{value}"),
			Self::F64(value) => write!(f, "{value}"),
			Self::String(text) => write!(f, "{text:?}"),
			Self::Duration(span) => write!(f, "{span}"),
			Self::Enum(value) => write!(f, "{value}"),
			Self::Nullable { value: Some(value), .. } => write!(f, "{value}"),
			Self::Nullable { value: None, .. } => f.write_str("null"),
			Self::Array { items, .. } | Self::List { items, .. } => {
				f.write_str("[")?;
				for (idx, item) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Self::Custom(value) => {
				write!(f, "{} {{", value.type_name)?;
				for (idx, (name, item)) in value.fields.iter().enumerate() {
					if idx > 0 {
						f.write_str(",")?;
					}
					write!(f, " {name}: {item}")?;
				}
				f.write_str(" }")
			}
		}
	}
}
