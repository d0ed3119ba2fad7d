//! Compile-time schema inference for native Rust types.
//!
//! The typed counterpart of the runtime algebra: `T::schema()` yields
//! the [`Schema`] whose wire shape matches `T`'s Borsh layout, so call
//! sites that already know their payload type need not spell the
//! schema out by hand. Purely shape derivation; nothing here runs
//! during encode or decode.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::schema::Schema;

/// Types with a fixed Borsh schema.
pub trait SchemaOf {
    /// The schema describing this type's wire layout.
    fn schema() -> Schema;
}

macro_rules! impl_schema_of {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl SchemaOf for $ty {
            #[inline]
            fn schema() -> Schema {
                Schema::$variant
            }
        }
    )*};
}

impl_schema_of! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
    str => String,
}

impl SchemaOf for () {
    #[inline]
    fn schema() -> Schema {
        Schema::unit()
    }
}

impl<T: SchemaOf, const N: usize> SchemaOf for [T; N] {
    #[inline]
    fn schema() -> Schema {
        Schema::array(T::schema(), N)
    }
}

impl<T: SchemaOf> SchemaOf for Vec<T> {
    #[inline]
    fn schema() -> Schema {
        Schema::vec(T::schema())
    }
}

impl<T: SchemaOf> SchemaOf for [T] {
    #[inline]
    fn schema() -> Schema {
        Schema::vec(T::schema())
    }
}

impl<T: SchemaOf> SchemaOf for Option<T> {
    #[inline]
    fn schema() -> Schema {
        Schema::option(T::schema())
    }
}

impl<T: SchemaOf, S> SchemaOf for HashSet<T, S> {
    #[inline]
    fn schema() -> Schema {
        Schema::hash_set(T::schema())
    }
}

impl<T: SchemaOf> SchemaOf for BTreeSet<T> {
    #[inline]
    fn schema() -> Schema {
        Schema::hash_set(T::schema())
    }
}

impl<K: SchemaOf, V: SchemaOf, S> SchemaOf for HashMap<K, V, S> {
    #[inline]
    fn schema() -> Schema {
        Schema::hash_map(K::schema(), V::schema())
    }
}

impl<K: SchemaOf, V: SchemaOf> SchemaOf for BTreeMap<K, V> {
    #[inline]
    fn schema() -> Schema {
        Schema::hash_map(K::schema(), V::schema())
    }
}

impl<'a, T: SchemaOf + ?Sized> SchemaOf for &'a T {
    #[inline]
    fn schema() -> Schema {
        T::schema()
    }
}

impl<T: SchemaOf + ?Sized> SchemaOf for Box<T> {
    #[inline]
    fn schema() -> Schema {
        T::schema()
    }
}
