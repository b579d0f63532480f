//! Attribute codecs between stored columns and attribute values

use std::fmt;
use std::marker::PhantomData;

use crate::error::QueryError;
use crate::types::NativeType;
use crate::value::RawValue;

/// Converts an attribute between its domain form and its stored column form
///
/// Codecs are attached to paths. Native coercion applies them only to plain
/// attribute reads, never to the results of operations over the attribute.
pub trait ValueCodec<T>: fmt::Debug + Send + Sync {
    fn encode(&self, value: &T) -> RawValue;

    fn decode(&self, raw: RawValue) -> Result<T, QueryError>;
}

/// Identity codec for native types
pub struct NativeCodec<T>(PhantomData<fn() -> T>);

impl<T> NativeCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NativeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for NativeCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T: NativeType> ValueCodec<T> for NativeCodec<T> {
    fn encode(&self, value: &T) -> RawValue {
        value.clone().into_raw()
    }

    fn decode(&self, raw: RawValue) -> Result<T, QueryError> {
        T::from_raw(raw)
    }
}
