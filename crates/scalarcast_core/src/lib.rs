//! Runtime value coercion for weakly typed scalar sources.

/// Coercion engine, packed-array codec, type model, and converter registry.
pub mod coerce;
