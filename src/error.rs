use core::str::Utf8Error;

use thiserror::Error;

/// Error raised while constructing a [`Schema`](crate::Schema) or
/// importing one from a [`Descriptor`](crate::Descriptor).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two struct fields share a name.
    #[error("duplicate struct field `{0}`")]
    DuplicateField(String),

    /// Two enum variants share a name.
    #[error("duplicate enum variant `{0}`")]
    DuplicateVariant(String),

    /// More variants than the one-byte wire tag can address.
    #[error("enum declares {0} variants, the one-byte tag allows at most 256")]
    TooManyVariants(usize),

    /// An imported enum variant descriptor is not a single-field struct.
    #[error("enum variant descriptor must wrap exactly one field, found {0}")]
    MalformedVariant(usize),

    /// An imported array length does not fit `usize`.
    #[error("array length {0} does not fit the platform word")]
    LengthOverflow(u64),
}

/// Error raised when a value's runtime shape disagrees with the schema
/// it is encoded against.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value's shape does not match the schema's wire shape.
    #[error("schema expects {expected}, value is {found}")]
    TypeMismatch {
        /// Wire shape the schema declares.
        expected: &'static str,
        /// Shape of the supplied value.
        found: &'static str,
    },

    /// Integer value outside the declared width's representable range.
    #[error("value {value} does not fit {width}")]
    OutOfRange {
        /// The offending value, rendered as text.
        value: String,
        /// The declared wire width.
        width: &'static str,
    },

    /// Fixed-length array received a sequence of the wrong length.
    #[error("array schema declares {expected} elements, value holds {found}")]
    LengthMismatch {
        /// Declared element count.
        expected: usize,
        /// Supplied element count.
        found: usize,
    },

    /// A collection or string exceeds the `u32` length prefix.
    #[error("length {0} exceeds the u32 length prefix")]
    LengthOverflow(usize),

    /// The value struct lacks a field the schema declares.
    #[error("missing struct field `{0}`")]
    MissingField(String),

    /// The enum case name is not declared by the schema.
    #[error("unknown enum variant `{0}`")]
    UnknownVariant(String),
}

/// Error raised while decoding untrusted bytes. Any of these means the
/// input was rejected; the schema stays valid and reusable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ends before the schema-implied prefix does.
    #[error("input too short")]
    OutOfBounds,

    /// A boolean byte other than `0` or `1`.
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    /// String payload is not valid UTF-8.
    #[error("invalid utf-8 in string payload")]
    NonUtf8(#[from] Utf8Error),

    /// Enum tag byte outside the declared variant range.
    #[error("enum tag {index} out of range, schema declares {count} variants")]
    InvalidVariant {
        /// Tag byte read from the wire.
        index: u8,
        /// Number of declared variants.
        count: usize,
    },

    /// Option presence byte other than `0` or `1`.
    #[error("invalid option presence byte {0:#04x}")]
    InvalidPresence(u8),

    /// A length prefix claims more data than the remaining input holds.
    #[error("length prefix {0} exceeds remaining input")]
    InvalidLength(u32),

    /// A nonzero element count for elements that occupy zero bytes each.
    /// Accepting it would manufacture unbounded output from a four-byte
    /// prefix, so only the empty collection decodes for such elements.
    #[error("length prefix {0} for zero-size elements")]
    ZeroSizeSequence(u32),
}
