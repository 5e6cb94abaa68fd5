use scalarcast_testkit::{packed_enum_samples, packed_samples};

use crate::coerce::{CoerceError, CollectionShape, EnumDef, HexMode, TypeDesc, Value, decode_packed_ints, decode_packed_ints_with, packed_blocks, rehydrate, unpack_for};

#[test]
fn fixture_samples_decode() {
	for sample in packed_samples() {
		assert_eq!(decode_packed_ints(&sample.packed), sample.ints, "sample {}", sample.name);
	}
}

#[test]
fn first_pair_is_least_significant_byte() {
	assert_eq!(decode_packed_ints("f3650a00"), vec![243 + 101 * 256 + 10 * 65_536]);
	assert_eq!(decode_packed_ints("00000001"), vec![1 << 24]);
}

#[test]
fn trailing_remainder_matches_truncated_input() {
	let full = "000100000010000000200000f3650a00";
	for cut in 0..8 {
		let padded = format!("{}{}", &full[..8], &full[8..8 + cut]);
		assert_eq!(decode_packed_ints(&padded), decode_packed_ints(&full[..8]), "cut {cut}");
	}
}

#[test]
fn lenient_mode_zeroes_bad_pairs() {
	assert_eq!(decode_packed_ints("zz650a00"), vec![101 * 256 + 10 * 65_536]);
	assert_eq!(decode_packed_ints("f3zz0a00"), vec![243 + 10 * 65_536]);
}

#[test]
fn strict_mode_reports_offending_pair() {
	let err = decode_packed_ints_with("00000000f3zz0a00", HexMode::Strict).expect_err("strict decode fails");
	assert!(matches!(err, CoerceError::HexDecodeAnomaly { block: 1, offset: 10, ref text } if text == "zz"));

	let ints = decode_packed_ints_with("f3650a00", HexMode::Strict).expect("clean input decodes");
	assert_eq!(ints, vec![681_459]);
}

#[test]
fn blocks_are_counted_in_characters() {
	assert_eq!(decode_packed_ints("éééééééé"), vec![0]);
	assert_eq!(decode_packed_ints("ff650a0é"), vec![0x000a_65ff]);
	assert_eq!(decode_packed_ints("f3650a00éééé"), vec![681_459]);
	assert_eq!(packed_blocks("ab€€€€cd0011").collect::<Vec<_>>(), vec!["ab€€€€cd"]);
}

#[test]
fn strict_mode_rejects_non_ascii_pair() {
	let err = decode_packed_ints_with("00000000f365é000", HexMode::Strict).expect_err("strict decode fails");
	assert!(matches!(err, CoerceError::HexDecodeAnomaly { block: 1, offset: 12, ref text } if text == "é0"));
}

#[test]
fn non_ascii_text_does_not_grow_enum_list() {
	let def = EnumDef::new("Layer", [("Default", 0), ("Water", 4)]);
	let destination = TypeDesc::list(TypeDesc::Enum(def));
	let value = unpack_for("04000000ééééééé", &destination, HexMode::Lenient)
		.expect("declared values rehydrate")
		.expect("non-empty text unpacks");
	assert_eq!(value.items().map(<[Value]>::len), Some(1));
}

#[test]
fn enum_samples_round_trip_symbols() {
	for sample in packed_enum_samples() {
		let def = EnumDef::new(sample.enum_name.as_str(), sample.symbols.iter().map(|(name, value)| (name.as_str(), *value)));
		let ints = decode_packed_ints(&sample.packed);
		let value = rehydrate(&CollectionShape::EnumList(def), &ints).expect("every value is declared");

		let Value::List { items, .. } = value else {
			panic!("expected list for {}", sample.name);
		};
		let symbols: Vec<String> = items
			.iter()
			.map(|item| match item {
				Value::Enum(value) => value.symbol().expect("declared symbol").to_owned(),
				other => panic!("expected enum item, got {other:?}"),
			})
			.collect();
		assert_eq!(symbols, sample.symbols_out, "sample {}", sample.name);
	}
}

#[test]
fn undeclared_enum_value_is_malformed() {
	let def = EnumDef::new("Layer", [("Default", 0), ("Water", 4)]);
	let err = rehydrate(&CollectionShape::EnumArray(def), &[4, 3]).expect_err("3 has no symbol");
	assert!(matches!(err, CoerceError::MalformedEnumValue { value: 3, .. }));
}

#[test]
fn empty_input_yields_empty_container() {
	let value = rehydrate(&CollectionShape::IntArray, &decode_packed_ints("")).expect("empty rehydrates");
	assert_eq!(
		value,
		Value::Array {
			element: TypeDesc::I32,
			items: Vec::new()
		}
	);
}

#[test]
fn shape_comes_from_declared_element_type() {
	let def = EnumDef::new("Mode", [("Off", 0)]);
	assert_eq!(CollectionShape::for_destination(&TypeDesc::array(TypeDesc::I32)), Some(CollectionShape::IntArray));
	assert_eq!(CollectionShape::for_destination(&TypeDesc::list(TypeDesc::I32)), Some(CollectionShape::IntList));
	assert_eq!(
		CollectionShape::for_destination(&TypeDesc::list(TypeDesc::Enum(def.clone()))),
		Some(CollectionShape::EnumList(def))
	);
	assert_eq!(CollectionShape::for_destination(&TypeDesc::array(TypeDesc::String)), None);
	assert_eq!(CollectionShape::for_destination(&TypeDesc::I32), None);
}

#[test]
fn unpack_for_declines_empty_text() {
	let destination = TypeDesc::list(TypeDesc::I32);
	assert_eq!(unpack_for("", &destination, HexMode::Lenient).expect("no error"), None);

	let value = unpack_for("0102", &destination, HexMode::Lenient)
		.expect("no error")
		.expect("non-empty text unpacks");
	assert_eq!(value.to_i32_vec(), Some(Vec::new()));
}
