use crate::coerce::{CoerceError, TimeSpan};

#[test]
fn parses_clock_forms() {
	assert_eq!(TimeSpan::parse("00:01").expect("hh:mm parses"), TimeSpan::from_seconds(60));
	assert_eq!(TimeSpan::parse("01:02:03").expect("hh:mm:ss parses"), TimeSpan::from_seconds(3723));
	assert_eq!(TimeSpan::parse(" 2.00:00:30 ").expect("d.hh:mm:ss parses"), TimeSpan::from_seconds(2 * 86_400 + 30));
}

#[test]
fn parses_bare_days_and_sign() {
	assert_eq!(TimeSpan::parse("3").expect("days parse"), TimeSpan::from_seconds(3 * 86_400));
	assert_eq!(TimeSpan::parse("-00:00:10").expect("negative parses"), TimeSpan::from_seconds(-10));
}

#[test]
fn fraction_is_scaled_to_ticks() {
	let span = TimeSpan::parse("00:00:01.5").expect("fraction parses");
	assert_eq!(span.ticks, 15_000_000);
	assert_eq!(span.to_string(), "00:00:01.5000000");
}

#[test]
fn rejects_out_of_range_components() {
	for text in ["24:00", "00:60", "00:00:60", "1:2:3:4", "", "-", "ab:cd", "00:00:00.12345678"] {
		let err = TimeSpan::parse(text).expect_err("malformed span fails");
		assert!(matches!(err, CoerceError::InvalidDuration { .. }), "unexpected error for {text:?}");
	}
}

#[test]
fn display_includes_day_prefix() {
	assert_eq!(TimeSpan::from_seconds(86_400 + 3661).to_string(), "1.01:01:01");
	assert_eq!(TimeSpan::from_seconds(-90).to_string(), "-00:01:30");
}
