//! Type descriptors and the native scalar types the engine can coerce to

use rust_decimal::Decimal;
use std::fmt;

use crate::error::QueryError;
use crate::value::RawValue;

/// Storage-level category of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Text,
    Integer,
    Real,
    Decimal,
    /// A user-defined type the engine has no native coercion for
    Custom,
}

/// Declares the result type of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
}

impl TypeDescriptor {
    pub const TEXT: TypeDescriptor = TypeDescriptor::new("String", TypeKind::Text);
    pub const INTEGER: TypeDescriptor = TypeDescriptor::new("Integer", TypeKind::Integer);
    pub const REAL: TypeDescriptor = TypeDescriptor::new("Real", TypeKind::Real);
    pub const DECIMAL: TypeDescriptor = TypeDescriptor::new("Decimal", TypeKind::Decimal);

    pub const fn new(name: &'static str, kind: TypeKind) -> Self {
        Self { name, kind }
    }

    /// Declares a user-defined type, e.g. `TypeDescriptor::custom("CustomNumber")`
    pub const fn custom(name: &'static str) -> Self {
        Self::new(name, TypeKind::Custom)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_custom(&self) -> bool {
        self.kind == TypeKind::Custom
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A Rust type the engine converts raw values into without help
///
/// `from_raw` is strict: it accepts only the variant matching `DESCRIPTOR`
/// and fails with `QueryError::TypeMismatch` for anything else.
pub trait NativeType: fmt::Debug + Clone + Send + Sync + Sized + 'static {
    const DESCRIPTOR: TypeDescriptor;

    fn from_raw(raw: RawValue) -> Result<Self, QueryError>;

    fn into_raw(self) -> RawValue;
}

impl NativeType for String {
    const DESCRIPTOR: TypeDescriptor = TypeDescriptor::TEXT;

    fn from_raw(raw: RawValue) -> Result<Self, QueryError> {
        match raw {
            RawValue::Text(s) => Ok(s),
            other => Err(QueryError::type_mismatch(Self::DESCRIPTOR.name(), &other)),
        }
    }

    fn into_raw(self) -> RawValue {
        RawValue::Text(self)
    }
}

impl NativeType for i64 {
    const DESCRIPTOR: TypeDescriptor = TypeDescriptor::INTEGER;

    fn from_raw(raw: RawValue) -> Result<Self, QueryError> {
        match raw {
            RawValue::Integer(i) => Ok(i),
            other => Err(QueryError::type_mismatch(Self::DESCRIPTOR.name(), &other)),
        }
    }

    fn into_raw(self) -> RawValue {
        RawValue::Integer(self)
    }
}

impl NativeType for f64 {
    const DESCRIPTOR: TypeDescriptor = TypeDescriptor::REAL;

    fn from_raw(raw: RawValue) -> Result<Self, QueryError> {
        match raw {
            RawValue::Real(r) => Ok(r),
            other => Err(QueryError::type_mismatch(Self::DESCRIPTOR.name(), &other)),
        }
    }

    fn into_raw(self) -> RawValue {
        RawValue::Real(self)
    }
}

impl NativeType for Decimal {
    const DESCRIPTOR: TypeDescriptor = TypeDescriptor::DECIMAL;

    fn from_raw(raw: RawValue) -> Result<Self, QueryError> {
        match raw {
            RawValue::Decimal(d) => Ok(d),
            other => Err(QueryError::type_mismatch(Self::DESCRIPTOR.name(), &other)),
        }
    }

    fn into_raw(self) -> RawValue {
        RawValue::Decimal(self)
    }
}

/// `NULL` becomes `None`; everything else must match `T`
impl<T: NativeType> NativeType for Option<T> {
    const DESCRIPTOR: TypeDescriptor = T::DESCRIPTOR;

    fn from_raw(raw: RawValue) -> Result<Self, QueryError> {
        match raw {
            RawValue::Null => Ok(None),
            other => T::from_raw(other).map(Some),
        }
    }

    fn into_raw(self) -> RawValue {
        self.map_or(RawValue::Null, NativeType::into_raw)
    }
}
