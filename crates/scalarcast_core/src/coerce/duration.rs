use std::fmt;

use crate::coerce::{CoerceError, Result};

/// Signed time span counted in 100 ns ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
	/// Tick count.
	pub ticks: i64,
}

const TICKS_PER_SECOND: i64 = 10_000_000;
const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;
const FRACTION_DIGITS: usize = 7;

impl TimeSpan {
	/// Zero-length span.
	pub const ZERO: Self = Self { ticks: 0 };

	/// Build a span from whole seconds.
	pub fn from_seconds(seconds: i64) -> Self {
		Self {
			ticks: seconds.saturating_mul(TICKS_PER_SECOND),
		}
	}

	/// Parse `[-]d` or `[-][d.]hh:mm[:ss[.fffffff]]`, surrounding whitespace allowed.
	pub fn parse(text: &str) -> Result<Self> {
		parse_span(text.trim()).ok_or_else(|| CoerceError::InvalidDuration { text: text.to_owned() })
	}
}

fn parse_span(text: &str) -> Option<TimeSpan> {
	let (negative, body) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text),
	};
	if body.is_empty() {
		return None;
	}

	let ticks = match body.find(':') {
		None => parse_digits(body)?.checked_mul(TICKS_PER_DAY)?,
		Some(colon) => {
			let (days, clock) = match body[..colon].find('.') {
				Some(dot) => (parse_digits(&body[..dot])?, &body[dot + 1..]),
				None => (0, body),
			};
			days.checked_mul(TICKS_PER_DAY)?.checked_add(parse_clock(clock)?)?
		}
	};

	Some(TimeSpan {
		ticks: if negative { -ticks } else { ticks },
	})
}

fn parse_clock(clock: &str) -> Option<i64> {
	let parts: Vec<&str> = clock.split(':').collect();
	let (hours, minutes, seconds) = match parts.as_slice() {
		[hours, minutes] => (*hours, *minutes, None),
		[hours, minutes, seconds] => (*hours, *minutes, Some(*seconds)),
		_ => return None,
	};

	let hours = bounded(hours, 24)?;
	let minutes = bounded(minutes, 60)?;
	let mut ticks = hours * TICKS_PER_HOUR + minutes * TICKS_PER_MINUTE;

	if let Some(seconds) = seconds {
		let (whole, fraction) = match seconds.split_once('.') {
			Some((whole, fraction)) => (whole, Some(fraction)),
			None => (seconds, None),
		};
		ticks += bounded(whole, 60)? * TICKS_PER_SECOND;
		if let Some(fraction) = fraction {
			ticks += parse_fraction(fraction)?;
		}
	}

	Some(ticks)
}

fn bounded(text: &str, limit: i64) -> Option<i64> {
	parse_digits(text).filter(|value| *value < limit)
}

fn parse_digits(text: &str) -> Option<i64> {
	if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	text.parse().ok()
}

fn parse_fraction(text: &str) -> Option<i64> {
	if text.len() > FRACTION_DIGITS {
		return None;
	}
	let value = parse_digits(text)?;
	Some(value * 10_i64.pow((FRACTION_DIGITS - text.len()) as u32))
}

impl fmt::Display for TimeSpan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let magnitude = self.ticks.unsigned_abs();
		if self.ticks < 0 {
			f.write_str("-")?;
		}

		let day = TICKS_PER_DAY as u64;
		let days = magnitude / day;
		let rem = magnitude % day;
		let hours = rem / TICKS_PER_HOUR as u64;
		let minutes = rem % TICKS_PER_HOUR as u64 / TICKS_PER_MINUTE as u64;
		let seconds = rem % TICKS_PER_MINUTE as u64 / TICKS_PER_SECOND as u64;
		let fraction = rem % TICKS_PER_SECOND as u64;

		if days > 0 {
			write!(f, "{days}.")?;
		}
		write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
		if fraction > 0 {
			write!(f, ".{fraction:07}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
