use crate::error::SchemaError;

/// Maximum number of variants an enum schema may declare.
/// The wire tag is a single byte.
pub const MAX_ENUM_VARIANTS: usize = 256;

/// Immutable description of how a value is laid out as bytes.
///
/// A `Schema` is plain data. It is built leaves-first from the
/// constructors below, never mutated afterwards, and may be shared
/// across any number of concurrent [`serialize`](crate::serialize) and
/// [`deserialize`](crate::deserialize) calls.
///
/// Struct field order and enum variant order are structural: they are
/// exactly the order the wire format uses, since no names are encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Schema {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer, little-endian.
    U16,
    /// Unsigned 32-bit integer, little-endian.
    U32,
    /// Unsigned 64-bit integer, little-endian.
    U64,
    /// Unsigned 128-bit integer, little-endian.
    U128,
    /// Signed 8-bit integer, two's complement.
    I8,
    /// Signed 16-bit integer, two's complement little-endian.
    I16,
    /// Signed 32-bit integer, two's complement little-endian.
    I32,
    /// Signed 64-bit integer, two's complement little-endian.
    I64,
    /// Signed 128-bit integer, two's complement little-endian.
    I128,
    /// IEEE-754 single precision float, little-endian bit pattern.
    F32,
    /// IEEE-754 double precision float, little-endian bit pattern.
    F64,
    /// One byte, `0` or `1`.
    Bool,
    /// UTF-8 bytes with a `u32` little-endian length prefix.
    String,
    /// Exactly `length` elements back to back, no length prefix.
    Array {
        /// Element schema.
        element: Box<Schema>,
        /// Number of elements.
        length: usize,
    },
    /// Variable-length sequence with a `u32` little-endian count prefix.
    Vec(Box<Schema>),
    /// Variable-length set with a `u32` little-endian count prefix.
    /// Element order on the wire is the order the encoder receives.
    HashSet(Box<Schema>),
    /// Variable-length key/value pairs with a `u32` little-endian count
    /// prefix. Each pair encodes key then value.
    HashMap {
        /// Key schema.
        key: Box<Schema>,
        /// Value schema.
        value: Box<Schema>,
    },
    /// Presence byte (`0` or `1`) followed by the inner payload iff present.
    Option(Box<Schema>),
    /// Fields concatenated in declaration order. Field names never reach
    /// the wire.
    Struct {
        /// Ordered field name and schema pairs.
        fields: Vec<(String, Schema)>,
    },
    /// One tag byte holding the zero-based declared index of the active
    /// variant, followed by that variant's payload.
    Enum {
        /// Ordered variant name and payload schema pairs.
        variants: Vec<(String, Schema)>,
    },
}

impl Schema {
    /// Schema for a fixed-length array of `length` elements.
    #[must_use]
    pub fn array(element: Schema, length: usize) -> Self {
        Schema::Array {
            element: Box::new(element),
            length,
        }
    }

    /// Schema for a length-prefixed sequence.
    #[must_use]
    pub fn vec(element: Schema) -> Self {
        Schema::Vec(Box::new(element))
    }

    /// Schema for a length-prefixed set.
    #[must_use]
    pub fn hash_set(element: Schema) -> Self {
        Schema::HashSet(Box::new(element))
    }

    /// Schema for a length-prefixed key/value mapping.
    #[must_use]
    pub fn hash_map(key: Schema, value: Schema) -> Self {
        Schema::HashMap {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Schema for an optional value.
    #[must_use]
    pub fn option(inner: Schema) -> Self {
        Schema::Option(Box::new(inner))
    }

    /// Schema for the unit value: a struct with zero fields,
    /// occupying zero bytes on the wire.
    #[must_use]
    pub fn unit() -> Self {
        Schema::Struct { fields: Vec::new() }
    }

    /// Schema for a product type with named fields encoded in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] if two fields share a name.
    /// A duplicate would silently displace an earlier field's wire
    /// position, so it is rejected.
    pub fn structure<I, N>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, Schema)>,
        N: Into<String>,
    {
        let fields: Vec<(String, Schema)> = fields
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();

        if let Some(name) = first_duplicate(&fields) {
            return Err(SchemaError::DuplicateField(name.to_owned()));
        }

        Ok(Schema::Struct { fields })
    }

    /// Schema for a sum type. The wire tag is the zero-based position of
    /// the active variant in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateVariant`] if two variants share a
    /// name, or [`SchemaError::TooManyVariants`] if more than
    /// [`MAX_ENUM_VARIANTS`] are declared.
    pub fn enumeration<I, N>(variants: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, Schema)>,
        N: Into<String>,
    {
        let variants: Vec<(String, Schema)> = variants
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();

        if variants.len() > MAX_ENUM_VARIANTS {
            return Err(SchemaError::TooManyVariants(variants.len()));
        }

        if let Some(name) = first_duplicate(&variants) {
            return Err(SchemaError::DuplicateVariant(name.to_owned()));
        }

        Ok(Schema::Enum { variants })
    }

    /// Short name of the schema's wire shape, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::U8 => "u8",
            Schema::U16 => "u16",
            Schema::U32 => "u32",
            Schema::U64 => "u64",
            Schema::U128 => "u128",
            Schema::I8 => "i8",
            Schema::I16 => "i16",
            Schema::I32 => "i32",
            Schema::I64 => "i64",
            Schema::I128 => "i128",
            Schema::F32 => "f32",
            Schema::F64 => "f64",
            Schema::Bool => "bool",
            Schema::String => "string",
            Schema::Array { .. } => "array",
            Schema::Vec(_) => "vec",
            Schema::HashSet(_) => "hashset",
            Schema::HashMap { .. } => "hashmap",
            Schema::Option(_) => "option",
            Schema::Struct { .. } => "struct",
            Schema::Enum { .. } => "enum",
        }
    }

    /// Least number of bytes any value of this schema occupies on the
    /// wire. The decoder uses it to reject length prefixes that claim
    /// more elements than the remaining input could possibly hold.
    #[must_use]
    pub fn min_serialized_size(&self) -> usize {
        match self {
            Schema::U8 | Schema::I8 | Schema::Bool => 1,
            Schema::U16 | Schema::I16 => 2,
            Schema::U32 | Schema::I32 | Schema::F32 => 4,
            Schema::U64 | Schema::I64 | Schema::F64 => 8,
            Schema::U128 | Schema::I128 => 16,
            // Length prefix alone, for the empty collection.
            Schema::String | Schema::Vec(_) | Schema::HashSet(_) | Schema::HashMap { .. } => 4,
            Schema::Array { element, length } => {
                element.min_serialized_size().saturating_mul(*length)
            }
            // Absent: the presence byte alone.
            Schema::Option(_) => 1,
            Schema::Struct { fields } => fields.iter().fold(0usize, |total, (_, field)| {
                total.saturating_add(field.min_serialized_size())
            }),
            Schema::Enum { variants } => {
                let payload = variants
                    .iter()
                    .map(|(_, payload)| payload.min_serialized_size())
                    .min()
                    .unwrap_or(0);
                payload.saturating_add(1)
            }
        }
    }
}

/// First name that appears more than once, scanning in order.
fn first_duplicate(entries: &[(String, Schema)]) -> Option<&str> {
    for (index, (name, _)) in entries.iter().enumerate() {
        if entries[..index].iter().any(|(seen, _)| seen == name) {
            return Some(name);
        }
    }
    None
}
