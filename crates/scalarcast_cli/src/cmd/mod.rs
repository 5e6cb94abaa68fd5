/// Scalar coercion command.
pub mod coerce;
/// Packed hex-string decode command.
pub mod unpack;
/// Shared argument parsing and rendering helpers.
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
