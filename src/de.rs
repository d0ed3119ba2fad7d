use crate::{error::DecodeError, schema::Schema, value::Value};

/// Cursor over untrusted input bytes, consumed front to back.
pub(crate) struct Decoder<'de> {
    input: &'de [u8],
    consumed: usize,
}

impl<'de> Decoder<'de> {
    pub(crate) fn new(input: &'de [u8]) -> Self {
        Decoder { input, consumed: 0 }
    }

    /// Bytes consumed so far.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    fn remaining(&self) -> usize {
        self.input.len()
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'de [u8], DecodeError> {
        if len > self.input.len() {
            return Err(DecodeError::OutOfBounds);
        }
        let (head, tail) = self.input.split_at(len);
        self.input = tail;
        self.consumed += len;
        Ok(head)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_byte_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.read_bytes(N)?);
        Ok(bytes)
    }

    /// Reads a `u32` little-endian length prefix and checks that
    /// `count` elements of at least `min_element_size` bytes each can
    /// still fit in the remaining input. A prefix that cannot is
    /// attacker-controlled garbage and is rejected before any
    /// allocation happens.
    ///
    /// Zero-size elements make any count claim satisfiable, so a
    /// four-byte prefix could demand billions of manufactured values.
    /// Only the empty collection is accepted for them.
    fn read_count(&mut self, min_element_size: usize) -> Result<usize, DecodeError> {
        let count = u32::from_le_bytes(self.read_byte_array()?);
        if min_element_size == 0 {
            if count != 0 {
                return Err(DecodeError::ZeroSizeSequence(count));
            }
            return Ok(0);
        }
        let count_usize = count as usize;
        let fit = self.remaining() / min_element_size;
        if count_usize > fit {
            return Err(DecodeError::InvalidLength(count));
        }
        Ok(count_usize)
    }

    /// Upper bound for capacity reservations: never reserve for more
    /// elements than the remaining input could hold.
    fn clamp_capacity(&self, count: usize, min_element_size: usize) -> usize {
        if min_element_size == 0 {
            return 0;
        }
        count.min(self.remaining() / min_element_size)
    }
}

macro_rules! decode_uint {
    ($de:expr, $ty:ty) => {{
        let bytes = $de.read_byte_array()?;
        Value::UInt(u128::from(<$ty>::from_le_bytes(bytes)))
    }};
}

macro_rules! decode_int {
    ($de:expr, $ty:ty) => {{
        let bytes = $de.read_byte_array()?;
        Value::Int(i128::from(<$ty>::from_le_bytes(bytes)))
    }};
}

/// Decodes one value of `schema` from the cursor, reading exactly the
/// schema-implied byte span and leaving any trailing bytes untouched.
pub(crate) fn decode(schema: &Schema, de: &mut Decoder<'_>) -> Result<Value, DecodeError> {
    let value = match schema {
        Schema::U8 => decode_uint!(de, u8),
        Schema::U16 => decode_uint!(de, u16),
        Schema::U32 => decode_uint!(de, u32),
        Schema::U64 => decode_uint!(de, u64),
        Schema::U128 => decode_uint!(de, u128),
        Schema::I8 => decode_int!(de, i8),
        Schema::I16 => decode_int!(de, i16),
        Schema::I32 => decode_int!(de, i32),
        Schema::I64 => decode_int!(de, i64),
        Schema::I128 => decode_int!(de, i128),
        Schema::F32 => Value::F32(f32::from_le_bytes(de.read_byte_array()?)),
        Schema::F64 => Value::F64(f64::from_le_bytes(de.read_byte_array()?)),
        Schema::Bool => match de.read_byte()? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            byte => return Err(DecodeError::InvalidBool(byte)),
        },
        Schema::String => {
            let len = de.read_count(1)?;
            let bytes = de.read_bytes(len)?;
            Value::String(core::str::from_utf8(bytes)?.to_owned())
        }
        Schema::Array { element, length } => {
            // The length comes from the schema, not the wire.
            let mut items = Vec::with_capacity(*length);
            for _ in 0..*length {
                items.push(decode(element, de)?);
            }
            Value::Seq(items)
        }
        Schema::Vec(element) => {
            let min = element.min_serialized_size();
            let count = de.read_count(min)?;
            let mut items = Vec::with_capacity(de.clamp_capacity(count, min));
            for _ in 0..count {
                items.push(decode(element, de)?);
            }
            Value::Seq(items)
        }
        Schema::HashSet(element) => {
            let min = element.min_serialized_size();
            let count = de.read_count(min)?;
            let mut items = Vec::with_capacity(de.clamp_capacity(count, min));
            for _ in 0..count {
                items.push(decode(element, de)?);
            }
            Value::Set(items)
        }
        Schema::HashMap { key, value } => {
            let min = key
                .min_serialized_size()
                .saturating_add(value.min_serialized_size());
            let count = de.read_count(min)?;
            let mut pairs = Vec::with_capacity(de.clamp_capacity(count, min));
            for _ in 0..count {
                let k = decode(key, de)?;
                let v = decode(value, de)?;
                pairs.push((k, v));
            }
            Value::Map(pairs)
        }
        Schema::Option(inner) => match de.read_byte()? {
            0 => Value::Option(None),
            1 => Value::Option(Some(Box::new(decode(inner, de)?))),
            byte => return Err(DecodeError::InvalidPresence(byte)),
        },
        Schema::Struct { fields } => {
            let mut decoded = Vec::with_capacity(fields.len());
            for (name, field) in fields {
                decoded.push((name.clone(), decode(field, de)?));
            }
            Value::Struct(decoded)
        }
        Schema::Enum { variants } => {
            let index = de.read_byte()?;
            let (name, payload) =
                variants
                    .get(usize::from(index))
                    .ok_or(DecodeError::InvalidVariant {
                        index,
                        count: variants.len(),
                    })?;
            Value::Enum {
                variant: name.clone(),
                payload: Box::new(decode(payload, de)?),
            }
        }
    };
    Ok(value)
}
