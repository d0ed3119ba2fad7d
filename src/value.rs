/// Runtime value accepted by the encoder and produced by the decoder.
///
/// Integers are carried widened: every unsigned width maps to
/// [`Value::UInt`] and every signed width to [`Value::Int`]. The schema
/// passed to [`serialize`](crate::serialize) declares the wire width and
/// bounds the accepted range, so `Value::UInt(300)` encodes fine against
/// [`Schema::U16`](crate::Schema::U16) and fails against
/// [`Schema::U8`](crate::Schema::U8).
///
/// Equality treats [`Value::Struct`] as a keyed record: two struct
/// values are equal when they hold the same fields with equal payloads,
/// regardless of field order. The encoder looks struct fields up by
/// name and the decoder emits them in schema declaration order, so
/// order-insensitive equality is what makes
/// `deserialize(s, &serialize(s, v)?)? == v` hold for every accepted
/// struct value. All other variants compare structurally.
#[derive(Clone, Debug)]
pub enum Value {
    /// Unsigned integer of any declared width.
    UInt(u128),
    /// Signed integer of any declared width.
    Int(i128),
    /// Single precision float.
    F32(f32),
    /// Double precision float.
    F64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 text.
    String(String),
    /// Ordered sequence, for both `array` and `vec` schemas.
    Seq(Vec<Value>),
    /// Set elements in encode order.
    Set(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(Value, Value)>),
    /// Present or absent optional payload.
    Option(Option<Box<Value>>),
    /// Keyed record. Fields are matched to the schema by name, so their
    /// order here need not follow the schema's declaration order.
    Struct(Vec<(String, Value)>),
    /// Exactly one tagged case of a sum type.
    Enum {
        /// Name of the active variant.
        variant: String,
        /// That variant's payload.
        payload: Box<Value>,
    },
}

impl Value {
    /// The unit value: a struct with zero fields.
    #[must_use]
    pub fn unit() -> Self {
        Value::Struct(Vec::new())
    }

    /// A present optional payload.
    #[must_use]
    pub fn some(value: Value) -> Self {
        Value::Option(Some(Box::new(value)))
    }

    /// An absent optional payload.
    #[must_use]
    pub fn none() -> Self {
        Value::Option(None)
    }

    /// An enum case with the given variant name and payload.
    #[must_use]
    pub fn case(variant: impl Into<String>, payload: Value) -> Self {
        Value::Enum {
            variant: variant.into(),
            payload: Box::new(payload),
        }
    }

    /// A struct value from name/value pairs.
    #[must_use]
    pub fn record<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<String>,
    {
        Value::Struct(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Short name of the value's shape, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::UInt(_) => "unsigned integer",
            Value::Int(_) => "signed integer",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Option(_) => "option",
            Value::Struct(_) => "struct",
            Value::Enum { .. } => "enum",
        }
    }

    /// Looks a struct field up by name. Returns `None` for missing
    /// fields and for non-struct values.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Option(a), Value::Option(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => struct_fields_eq(a, b),
            (
                Value::Enum { variant, payload },
                Value::Enum {
                    variant: other_variant,
                    payload: other_payload,
                },
            ) => variant == other_variant && payload == other_payload,
            _ => false,
        }
    }
}

/// Keyed record comparison: same field count, and each field of `a`
/// matches `b`'s field of the same name, in whatever order either side
/// lists them.
fn struct_fields_eq(a: &[(String, Value)], b: &[(String, Value)]) -> bool {
    a.len() == b.len()
        && a.iter().all(|(name, value)| {
            b.iter().find(|(other, _)| other == name).map(|(_, v)| v) == Some(value)
        })
        && b.iter()
            .all(|(name, _)| a.iter().any(|(other, _)| other == name))
}

macro_rules! impl_from_uint {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::UInt(u128::from(value))
            }
        }
    )*};
}

macro_rules! impl_from_int {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::Int(i128::from(value))
            }
        }
    )*};
}

impl_from_uint!(u8, u16, u32, u64, u128);
impl_from_int!(i8, i16, i32, i64, i128);

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(values: Vec<T>) -> Self {
        Value::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        Value::Option(value.map(|inner| Box::new(inner.into())))
    }
}
