//! Packed hex-string integer arrays.
//!
//! Some producers write an `int`/enum array or list as one string of
//! consecutive 8-character blocks. Each block is four 2-character hex byte
//! pairs read left to right, least-significant byte first:
//!
//! ```text
//! "f3650a00" -> [0xf3, 0x65, 0x0a, 0x00] -> 0xf3 + 0x65 << 8 + 0x0a << 16 = 681459
//! ```
//!
//! Blocks are counted in characters. Trailing characters that do not fill a
//! whole block are ignored, and a pair holding anything but two hex digits is
//! malformed.

use std::convert::Infallible;
use std::sync::Arc;

use log::warn;

use crate::coerce::{CoerceError, EnumDef, Result, TypeDesc, Value};

const BLOCK_LEN: usize = 8;
const PAIR_LEN: usize = 2;

/// Handling of byte pairs that are not valid hexadecimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HexMode {
	/// Substitute `0` for the bad byte and keep decoding.
	#[default]
	Lenient,
	/// Fail the whole decode with `HexDecodeAnomaly`.
	Strict,
}

/// Container form produced when re-hydrating decoded integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionShape {
	/// `int[]`.
	IntArray,
	/// `List<int>`.
	IntList,
	/// `E[]` for an enum `E`.
	EnumArray(Arc<EnumDef>),
	/// `List<E>` for an enum `E`.
	EnumList(Arc<EnumDef>),
}

impl CollectionShape {
	/// Pick the shape for a destination from its declared element type.
	///
	/// Returns `None` when the destination is not an array/list of `int` or of an enum.
	pub fn for_destination(destination: &TypeDesc) -> Option<Self> {
		let element = destination.element_type()?;
		let list = matches!(destination, TypeDesc::List(_));
		if *element == TypeDesc::I32 {
			return Some(if list { Self::IntList } else { Self::IntArray });
		}

		let def = Arc::clone(element.enum_def()?);
		Some(if list { Self::EnumList(def) } else { Self::EnumArray(def) })
	}

	/// Element type carried by this shape.
	pub fn element_type(&self) -> TypeDesc {
		match self {
			Self::IntArray | Self::IntList => TypeDesc::I32,
			Self::EnumArray(def) | Self::EnumList(def) => TypeDesc::Enum(Arc::clone(def)),
		}
	}
}

/// Whole 8-character blocks of `source`, in order; trailing characters are dropped.
///
/// Blocks are counted in characters, not bytes.
pub fn packed_blocks(source: &str) -> impl Iterator<Item = &str> {
	char_windows(source, BLOCK_LEN)
}

/// Decode a packed string, substituting `0` for malformed byte pairs.
pub fn decode_packed_ints(source: &str) -> Vec<i32> {
	let decoded = decode_blocks(source, |block, _, pair| {
		warn!("packed array block {block}: non-hex byte pair {pair:?} decoded as 0");
		Ok::<u8, Infallible>(0)
	});
	match decoded {
		Ok(ints) => ints,
		Err(never) => match never {},
	}
}

/// Decode a packed string under the selected hex policy.
pub fn decode_packed_ints_with(source: &str, mode: HexMode) -> Result<Vec<i32>> {
	match mode {
		HexMode::Lenient => Ok(decode_packed_ints(source)),
		HexMode::Strict => decode_blocks(source, |block, offset, pair| {
			Err(CoerceError::HexDecodeAnomaly {
				block,
				offset,
				text: pair.to_owned(),
			})
		}),
	}
}

/// Build the container described by `shape` from decoded integers.
///
/// Enum shapes map each integer through its declared symbol and fail with
/// `MalformedEnumValue` on the first value without one.
pub fn rehydrate(shape: &CollectionShape, ints: &[i32]) -> Result<Value> {
	let element = shape.element_type();
	let items = match shape {
		CollectionShape::IntArray | CollectionShape::IntList => ints.iter().copied().map(Value::I32).collect(),
		CollectionShape::EnumArray(def) | CollectionShape::EnumList(def) => ints
			.iter()
			.map(|value| def.from_underlying(i64::from(*value)).map(Value::Enum))
			.collect::<Result<Vec<_>>>()?,
	};

	Ok(match shape {
		CollectionShape::IntArray | CollectionShape::EnumArray(_) => Value::Array { element, items },
		CollectionShape::IntList | CollectionShape::EnumList(_) => Value::List { element, items },
	})
}

/// Decode `source` and re-hydrate it for `destination`.
///
/// Returns `Ok(None)` when the destination has no packed shape or `source` is empty.
pub fn unpack_for(source: &str, destination: &TypeDesc, mode: HexMode) -> Result<Option<Value>> {
	let Some(shape) = CollectionShape::for_destination(destination) else {
		return Ok(None);
	};
	if source.is_empty() {
		return Ok(None);
	}

	let ints = decode_packed_ints_with(source, mode)?;
	rehydrate(&shape, &ints).map(Some)
}

/// `on_bad(block, char_offset, pair)` supplies the byte for a pair that is not two hex digits.
fn decode_blocks<E>(source: &str, mut on_bad: impl FnMut(usize, usize, &str) -> std::result::Result<u8, E>) -> std::result::Result<Vec<i32>, E> {
	let mut out = Vec::with_capacity(source.len() / BLOCK_LEN);
	for (block_idx, block) in packed_blocks(source).enumerate() {
		let mut bytes = [0_u8; 4];
		for (pair_idx, pair) in char_windows(block, PAIR_LEN).enumerate() {
			let mut byte = [0_u8; 1];
			bytes[pair_idx] = match hex::decode_to_slice(pair, &mut byte) {
				Ok(()) => byte[0],
				Err(_) => on_bad(block_idx, block_idx * BLOCK_LEN + pair_idx * PAIR_LEN, pair)?,
			};
		}
		out.push(i32::from_le_bytes(bytes));
	}
	Ok(out)
}

fn char_windows(text: &str, width: usize) -> impl Iterator<Item = &str> {
	let mut bounds: Vec<usize> = text.char_indices().map(|(idx, _)| idx).collect();
	bounds.push(text.len());
	let count = (bounds.len() - 1) / width;
	(0..count).map(move |idx| &text[bounds[idx * width]..bounds[(idx + 1) * width]])
}

#[cfg(test)]
mod tests;
