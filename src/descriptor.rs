//! Generic, language-agnostic descriptor interchange.
//!
//! External schema producers (borsh-js and friends) exchange schemas as
//! a plain recursive tree: primitives are lowercase strings, composites
//! are single-key objects, and each enum variant rides inside a
//! single-field struct keyed by the variant name so the name and the
//! payload travel together. [`Descriptor`] mirrors that encoding
//! exactly, and conversion to and from [`Schema`] is lossless.
//!
//! ```
//! # use athanor::{Descriptor, Schema};
//! let schema = Schema::vec(Schema::String);
//! let descriptor = schema.to_descriptor();
//! assert_eq!(Schema::from_descriptor(&descriptor), Ok(schema));
//! ```

use core::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{error::SchemaError, schema::Schema};

/// Language-agnostic schema tree, one-to-one with the external JSON
/// encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Descriptor {
    /// A primitive, serialized as its lowercase name.
    Primitive(Primitive),
    /// `{"array": {"type": d, "len": n}}`; `len` absent for `vec`.
    Array {
        /// Element descriptor plus optional fixed length.
        array: ArrayDescriptor,
    },
    /// `{"set": d}`.
    Set {
        /// Element descriptor.
        set: Box<Descriptor>,
    },
    /// `{"map": {"key": d, "value": d}}`.
    Map {
        /// Key and value descriptors.
        map: EntryDescriptor,
    },
    /// `{"option": d}`.
    Option {
        /// Payload descriptor.
        option: Box<Descriptor>,
    },
    /// `{"struct": {field: d, ...}}`, entries in declaration order.
    Struct {
        /// Ordered field map.
        r#struct: FieldMap,
    },
    /// `{"enum": [{"struct": {variant: d}}, ...]}`.
    Enum {
        /// Ordered variant list.
        r#enum: Vec<VariantDescriptor>,
    },
}

/// Primitive descriptor tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    Bool,
    String,
}

/// Element descriptor for `array` and `vec` shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDescriptor {
    /// Element descriptor.
    #[serde(rename = "type")]
    pub element: Box<Descriptor>,
    /// Fixed element count; `None` means a length-prefixed `vec`.
    #[serde(rename = "len", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

/// Key and value descriptors of a `map` shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    /// Key descriptor.
    pub key: Box<Descriptor>,
    /// Value descriptor.
    pub value: Box<Descriptor>,
}

/// One enum variant: a struct wrapping exactly one field, whose name is
/// the variant name and whose descriptor is the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    /// The single-field wrapper struct.
    pub r#struct: FieldMap,
}

/// Ordered field-name-to-descriptor map. JSON objects carry field order
/// implicitly; this type keeps entries in document order on both
/// serialization paths instead of hashing them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FieldMap(pub Vec<(String, Descriptor)>);

impl Serialize for FieldMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, descriptor) in &self.0 {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of field names to descriptors")
            }

            fn visit_map<A>(self, mut access: A) -> Result<FieldMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, Descriptor>()? {
                    entries.push(entry);
                }
                Ok(FieldMap(entries))
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

impl Schema {
    /// Exports this schema as the language-agnostic descriptor tree.
    #[must_use]
    pub fn to_descriptor(&self) -> Descriptor {
        match self {
            Schema::U8 => Descriptor::Primitive(Primitive::U8),
            Schema::U16 => Descriptor::Primitive(Primitive::U16),
            Schema::U32 => Descriptor::Primitive(Primitive::U32),
            Schema::U64 => Descriptor::Primitive(Primitive::U64),
            Schema::U128 => Descriptor::Primitive(Primitive::U128),
            Schema::I8 => Descriptor::Primitive(Primitive::I8),
            Schema::I16 => Descriptor::Primitive(Primitive::I16),
            Schema::I32 => Descriptor::Primitive(Primitive::I32),
            Schema::I64 => Descriptor::Primitive(Primitive::I64),
            Schema::I128 => Descriptor::Primitive(Primitive::I128),
            Schema::F32 => Descriptor::Primitive(Primitive::F32),
            Schema::F64 => Descriptor::Primitive(Primitive::F64),
            Schema::Bool => Descriptor::Primitive(Primitive::Bool),
            Schema::String => Descriptor::Primitive(Primitive::String),
            Schema::Array { element, length } => Descriptor::Array {
                array: ArrayDescriptor {
                    element: Box::new(element.to_descriptor()),
                    length: Some(*length as u64),
                },
            },
            Schema::Vec(element) => Descriptor::Array {
                array: ArrayDescriptor {
                    element: Box::new(element.to_descriptor()),
                    length: None,
                },
            },
            Schema::HashSet(element) => Descriptor::Set {
                set: Box::new(element.to_descriptor()),
            },
            Schema::HashMap { key, value } => Descriptor::Map {
                map: EntryDescriptor {
                    key: Box::new(key.to_descriptor()),
                    value: Box::new(value.to_descriptor()),
                },
            },
            Schema::Option(inner) => Descriptor::Option {
                option: Box::new(inner.to_descriptor()),
            },
            Schema::Struct { fields } => Descriptor::Struct {
                r#struct: FieldMap(
                    fields
                        .iter()
                        .map(|(name, field)| (name.clone(), field.to_descriptor()))
                        .collect(),
                ),
            },
            Schema::Enum { variants } => Descriptor::Enum {
                r#enum: variants
                    .iter()
                    .map(|(name, payload)| VariantDescriptor {
                        r#struct: FieldMap(vec![(name.clone(), payload.to_descriptor())]),
                    })
                    .collect(),
            },
        }
    }

    /// Imports a schema from the language-agnostic descriptor tree.
    ///
    /// External descriptors are untrusted, so the construction checks
    /// run again here.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] for duplicate field or variant names,
    /// variant wrappers that do not hold exactly one field, oversized
    /// array lengths, and enums with more variants than the tag byte
    /// can address.
    pub fn from_descriptor(descriptor: &Descriptor) -> Result<Self, SchemaError> {
        match descriptor {
            Descriptor::Primitive(primitive) => Ok(match primitive {
                Primitive::U8 => Schema::U8,
                Primitive::U16 => Schema::U16,
                Primitive::U32 => Schema::U32,
                Primitive::U64 => Schema::U64,
                Primitive::U128 => Schema::U128,
                Primitive::I8 => Schema::I8,
                Primitive::I16 => Schema::I16,
                Primitive::I32 => Schema::I32,
                Primitive::I64 => Schema::I64,
                Primitive::I128 => Schema::I128,
                Primitive::F32 => Schema::F32,
                Primitive::F64 => Schema::F64,
                Primitive::Bool => Schema::Bool,
                Primitive::String => Schema::String,
            }),
            Descriptor::Array { array } => {
                let element = Schema::from_descriptor(&array.element)?;
                match array.length {
                    Some(length) => {
                        let length = usize::try_from(length)
                            .map_err(|_| SchemaError::LengthOverflow(length))?;
                        Ok(Schema::array(element, length))
                    }
                    None => Ok(Schema::vec(element)),
                }
            }
            Descriptor::Set { set } => Ok(Schema::hash_set(Schema::from_descriptor(set)?)),
            Descriptor::Map { map } => Ok(Schema::hash_map(
                Schema::from_descriptor(&map.key)?,
                Schema::from_descriptor(&map.value)?,
            )),
            Descriptor::Option { option } => Ok(Schema::option(Schema::from_descriptor(option)?)),
            Descriptor::Struct { r#struct } => {
                let fields = r#struct
                    .0
                    .iter()
                    .map(|(name, field)| Ok((name.clone(), Schema::from_descriptor(field)?)))
                    .collect::<Result<Vec<_>, SchemaError>>()?;
                Schema::structure(fields)
            }
            Descriptor::Enum { r#enum } => {
                let variants = r#enum
                    .iter()
                    .map(|variant| {
                        let wrapper = &variant.r#struct.0;
                        if wrapper.len() != 1 {
                            return Err(SchemaError::MalformedVariant(wrapper.len()));
                        }
                        let (name, payload) = &wrapper[0];
                        Ok((name.clone(), Schema::from_descriptor(payload)?))
                    })
                    .collect::<Result<Vec<_>, SchemaError>>()?;
                Schema::enumeration(variants)
            }
        }
    }
}

impl From<&Schema> for Descriptor {
    fn from(schema: &Schema) -> Self {
        schema.to_descriptor()
    }
}

impl TryFrom<&Descriptor> for Schema {
    type Error = SchemaError;

    fn try_from(descriptor: &Descriptor) -> Result<Self, SchemaError> {
        Schema::from_descriptor(descriptor)
    }
}
