use crate::{error::EncodeError, schema::Schema, value::Value};

/// Element ordering policy for `hashset` and `hashmap` encodings.
///
/// The base format writes elements in the order the caller supplies.
/// [`Ordering::Canonical`] instead sorts set elements by their encoded
/// bytes and map pairs by their encoded key bytes, so the same logical
/// value always yields the same byte stream regardless of iteration
/// order. That matters when the output feeds a hash or a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ordering {
    Supplied,
    Canonical,
}

pub(crate) fn serialize_with(
    schema: &Schema,
    value: &Value,
    ordering: Ordering,
) -> Result<Vec<u8>, EncodeError> {
    // Warm-start capacity. The minimum size of a hand-built schema can
    // be astronomically large, so it only seeds the buffer up to a page.
    let mut output = Vec::with_capacity(schema.min_serialized_size().min(4096));
    encode(schema, value, ordering, &mut output)?;
    Ok(output)
}

macro_rules! encode_int {
    ($n:expr, $ty:ty, $out:expr) => {{
        let narrowed = <$ty>::try_from(*$n).map_err(|_| EncodeError::OutOfRange {
            value: $n.to_string(),
            width: stringify!($ty),
        })?;
        $out.extend_from_slice(&narrowed.to_le_bytes());
    }};
}

/// Encodes `value` against `schema`, appending to `out`.
///
/// The schema alone drives field order, byte widths and tag
/// assignment; the value is only consulted for payload data and is
/// rejected wherever its shape disagrees.
fn encode(
    schema: &Schema,
    value: &Value,
    ordering: Ordering,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    match (schema, value) {
        (Schema::U8, Value::UInt(n)) => encode_int!(n, u8, out),
        (Schema::U16, Value::UInt(n)) => encode_int!(n, u16, out),
        (Schema::U32, Value::UInt(n)) => encode_int!(n, u32, out),
        (Schema::U64, Value::UInt(n)) => encode_int!(n, u64, out),
        (Schema::U128, Value::UInt(n)) => out.extend_from_slice(&n.to_le_bytes()),
        (Schema::I8, Value::Int(n)) => encode_int!(n, i8, out),
        (Schema::I16, Value::Int(n)) => encode_int!(n, i16, out),
        (Schema::I32, Value::Int(n)) => encode_int!(n, i32, out),
        (Schema::I64, Value::Int(n)) => encode_int!(n, i64, out),
        (Schema::I128, Value::Int(n)) => out.extend_from_slice(&n.to_le_bytes()),
        (Schema::F32, Value::F32(x)) => out.extend_from_slice(&x.to_le_bytes()),
        (Schema::F64, Value::F64(x)) => out.extend_from_slice(&x.to_le_bytes()),
        (Schema::Bool, Value::Bool(b)) => out.push(u8::from(*b)),
        (Schema::String, Value::String(s)) => {
            write_length(s.len(), out)?;
            out.extend_from_slice(s.as_bytes());
        }
        (Schema::Array { element, length }, Value::Seq(items)) => {
            if items.len() != *length {
                return Err(EncodeError::LengthMismatch {
                    expected: *length,
                    found: items.len(),
                });
            }
            for item in items {
                encode(element, item, ordering, out)?;
            }
        }
        (Schema::Vec(element), Value::Seq(items)) => {
            write_length(items.len(), out)?;
            for item in items {
                encode(element, item, ordering, out)?;
            }
        }
        (Schema::HashSet(element), Value::Set(items)) => {
            write_length(items.len(), out)?;
            match ordering {
                Ordering::Supplied => {
                    for item in items {
                        encode(element, item, ordering, out)?;
                    }
                }
                Ordering::Canonical => {
                    let mut encoded = items
                        .iter()
                        .map(|item| encode_detached(element, item, ordering))
                        .collect::<Result<Vec<_>, _>>()?;
                    encoded.sort_unstable();
                    for bytes in &encoded {
                        out.extend_from_slice(bytes);
                    }
                }
            }
        }
        (Schema::HashMap { key, value }, Value::Map(pairs)) => {
            write_length(pairs.len(), out)?;
            match ordering {
                Ordering::Supplied => {
                    for (k, v) in pairs {
                        encode(key, k, ordering, out)?;
                        encode(value, v, ordering, out)?;
                    }
                }
                Ordering::Canonical => {
                    let mut encoded = pairs
                        .iter()
                        .map(|(k, v)| {
                            Ok((
                                encode_detached(key, k, ordering)?,
                                encode_detached(value, v, ordering)?,
                            ))
                        })
                        .collect::<Result<Vec<_>, EncodeError>>()?;
                    encoded.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
                    for (k, v) in &encoded {
                        out.extend_from_slice(k);
                        out.extend_from_slice(v);
                    }
                }
            }
        }
        (Schema::Option(inner), Value::Option(payload)) => match payload {
            None => out.push(0),
            Some(payload) => {
                out.push(1);
                encode(inner, payload, ordering, out)?;
            }
        },
        (Schema::Struct { fields }, Value::Struct(_)) => {
            for (name, field_schema) in fields {
                let field = value
                    .field(name)
                    .ok_or_else(|| EncodeError::MissingField(name.clone()))?;
                encode(field_schema, field, ordering, out)?;
            }
        }
        (Schema::Enum { variants }, Value::Enum { variant, payload }) => {
            let index = variants
                .iter()
                .position(|(name, _)| name == variant)
                .ok_or_else(|| EncodeError::UnknownVariant(variant.clone()))?;
            // `Schema::enumeration` caps variants at 256; a hand-built
            // schema may not, so the tag is still range-checked.
            let tag = u8::try_from(index).map_err(|_| EncodeError::OutOfRange {
                value: index.to_string(),
                width: "u8",
            })?;
            out.push(tag);
            encode(&variants[index].1, payload, ordering, out)?;
        }
        (schema, value) => {
            return Err(EncodeError::TypeMismatch {
                expected: schema.kind(),
                found: value.kind(),
            })
        }
    }
    Ok(())
}

fn encode_detached(
    schema: &Schema,
    value: &Value,
    ordering: Ordering,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    encode(schema, value, ordering, &mut buffer)?;
    Ok(buffer)
}

/// Writes the `u32` little-endian length prefix.
#[inline]
fn write_length(length: usize, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let length = u32::try_from(length).map_err(|_| EncodeError::LengthOverflow(length))?;
    out.extend_from_slice(&length.to_le_bytes());
    Ok(())
}
