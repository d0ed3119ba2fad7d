//! Runtime Borsh schema algebra with a deterministic binary codec.
//!
//! A [`Schema`] is an immutable description of a wire layout, composed
//! leaves-first from primitives, collections, optionals, structs and
//! enums. The codec then encodes a dynamic [`Value`] to bytes and back
//! under that schema, following the Borsh format: little-endian
//! fixed-width numbers, `u32` length prefixes, one presence byte for
//! options and one tag byte for enum variants. Equal inputs always
//! produce equal bytes, which is what makes the output usable for
//! hashing and signing.
//!
//! ```
//! use athanor::{deserialize, serialize, Schema, Value};
//!
//! let schema = Schema::structure([
//!     ("name", Schema::String),
//!     ("age", Schema::U8),
//! ])?;
//!
//! let person = Value::record([("name", Value::from("alice")), ("age", Value::from(18u8))]);
//!
//! let bytes = serialize(&schema, &person)?;
//! assert_eq!(deserialize(&schema, &bytes)?, person);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Schemas round-trip losslessly through [`Descriptor`], the plain
//! language-agnostic tree other Borsh implementations exchange, and
//! [`SchemaOf`] derives the schema for native Rust types at compile
//! time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod de;
mod descriptor;
mod error;
mod schema;
mod schema_of;
mod ser;
mod value;


pub use self::{
    descriptor::{
        ArrayDescriptor, Descriptor, EntryDescriptor, FieldMap, Primitive, VariantDescriptor,
    },
    error::{DecodeError, EncodeError, SchemaError},
    schema::{Schema, MAX_ENUM_VARIANTS},
    schema_of::SchemaOf,
    value::Value,
};

/// Encodes `value` against `schema` into a fresh byte vector.
///
/// Set elements and map pairs are written in the order the value
/// supplies them; use [`serialize_canonical`] when the byte stream must
/// not depend on iteration order.
///
/// # Errors
///
/// Returns [`EncodeError`] when the value's runtime shape disagrees
/// with the schema: wrong collection length for a fixed array, an
/// integer outside the declared width, a missing struct field, or an
/// undeclared enum case.
pub fn serialize(schema: &Schema, value: &Value) -> Result<Vec<u8>, EncodeError> {
    ser::serialize_with(schema, value, ser::Ordering::Supplied)
}

/// Encodes like [`serialize`], but sorts `hashset` elements by their
/// encoded bytes and `hashmap` pairs by their encoded key bytes.
///
/// The base format leaves collection order to the caller; this
/// extension pins it down so logically equal sets and maps always
/// produce identical bytes.
///
/// # Errors
///
/// Same conditions as [`serialize`].
pub fn serialize_canonical(schema: &Schema, value: &Value) -> Result<Vec<u8>, EncodeError> {
    ser::serialize_with(schema, value, ser::Ordering::Canonical)
}

/// Decodes one value of `schema` from the front of `input`.
///
/// Exactly the schema-implied prefix is consumed; trailing bytes are
/// ignored. Callers that require the whole buffer to be meaningful
/// should use [`deserialize_prefix`] and compare the consumed length
/// against `input.len()`.
///
/// # Errors
///
/// Returns [`DecodeError`] for truncated input, invalid bool or
/// presence bytes, invalid UTF-8, an enum tag outside the declared
/// range, a length prefix claiming more data than remains, or a
/// nonzero length prefix for elements that occupy zero wire bytes.
pub fn deserialize(schema: &Schema, input: &[u8]) -> Result<Value, DecodeError> {
    let mut decoder = de::Decoder::new(input);
    de::decode(schema, &mut decoder)
}

/// Decodes like [`deserialize`] and also reports how many bytes of
/// `input` the value occupied.
///
/// # Errors
///
/// Same conditions as [`deserialize`].
pub fn deserialize_prefix(schema: &Schema, input: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut decoder = de::Decoder::new(input);
    let value = de::decode(schema, &mut decoder)?;
    Ok((value, decoder.consumed()))
}
