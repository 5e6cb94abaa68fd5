use crate::coerce::{EnumDef, TimeSpan, TypeDesc, Value};

#[test]
fn display_uses_csharp_spelling() {
	let mode = TypeDesc::Enum(EnumDef::new("Mode", [("Off", 0)]));
	assert_eq!(TypeDesc::array(TypeDesc::I32).to_string(), "int[]");
	assert_eq!(TypeDesc::list(mode).to_string(), "List<Mode>");
	assert_eq!(TypeDesc::nullable(TypeDesc::Bool).to_string(), "bool?");
	assert_eq!(TypeDesc::array(TypeDesc::list(TypeDesc::F64)).to_string(), "List<double>[]");
}

#[test]
fn element_type_answers_directly() {
	let list = TypeDesc::list(TypeDesc::I64);
	assert_eq!(list.element_type(), Some(&TypeDesc::I64));
	assert_eq!(TypeDesc::String.element_type(), None);
	assert_eq!(TypeDesc::nullable(TypeDesc::I32).nullable_inner(), Some(&TypeDesc::I32));
}

#[test]
fn defaults_follow_value_type_rules() {
	let mode = TypeDesc::Enum(EnumDef::new("Mode", [("Off", 0), ("On", 1)]));
	assert!(mode.is_value_type());
	assert!(TypeDesc::nullable(TypeDesc::String).is_value_type());
	assert!(!TypeDesc::String.is_value_type());
	assert!(!TypeDesc::custom("Color").is_value_type());
	assert!(matches!(mode.default_value(), Value::Enum(item) if item.value == 0));
	assert_eq!(TypeDesc::custom("Color").default_value(), Value::Null);
	assert_eq!(TypeDesc::I32.default_value(), Value::I32(0));
	assert_eq!(TypeDesc::Duration.default_value(), Value::Duration(TimeSpan::ZERO));
	assert_eq!(TypeDesc::String.default_value(), Value::Null);
	assert_eq!(TypeDesc::array(TypeDesc::I32).default_value(), Value::Null);
	assert_eq!(
		TypeDesc::nullable(TypeDesc::F32).default_value(),
		Value::Nullable {
			inner: TypeDesc::F32,
			value: None
		}
	);
}

#[test]
fn object_accepts_everything_and_nullable_is_strict() {
	assert!(TypeDesc::Object.is_assignable_from(&TypeDesc::list(TypeDesc::I32)));
	assert!(TypeDesc::I32.is_assignable_from(&TypeDesc::I32));
	assert!(!TypeDesc::I64.is_assignable_from(&TypeDesc::I32));
	assert!(!TypeDesc::nullable(TypeDesc::I32).is_assignable_from(&TypeDesc::I32));
}
