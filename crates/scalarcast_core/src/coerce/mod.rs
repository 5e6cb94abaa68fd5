mod culture;
mod duration;
mod engine;
mod enums;
mod error;
mod packed;
mod registry;
mod scalar;
mod types;
mod value;

/// Number formatting conventions.
pub use culture::Culture;
/// Time span value and grammar.
pub use duration::TimeSpan;
/// Coercion engine, options, and strategy order.
pub use engine::{CoerceOptions, Coercer, Strategy};
/// Enum declarations and enum values.
pub use enums::{EnumDef, EnumValue};
/// Error and result aliases.
pub use error::{CoerceError, Result};
/// Packed hex-string array codec.
pub use packed::{CollectionShape, HexMode, decode_packed_ints, decode_packed_ints_with, packed_blocks, rehydrate, unpack_for};
/// Converter adapters, casts, and parse functions.
pub use registry::{CastEntry, CastFn, ConverterRegistry, CultureParseFn, ParseEntry, ParseFn, TypeConverter, parse_bool};
/// Upstream token boundary and scalar helpers.
pub use scalar::{Color, ScalarSource, Token, VecScalarSource, field_key, read_color, read_flag_bool};
/// Destination type descriptors.
pub use types::TypeDesc;
/// Runtime values.
pub use value::{CustomValue, Value};
