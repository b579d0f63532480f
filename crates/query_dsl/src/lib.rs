//! Query DSL - Typed query expressions for an embedded SQL engine
//!
//! This crate models queries as expression trees that an engine can walk
//! without knowing the concrete expression types:
//!
//! - `expr`: the untyped tree (`Expr`) every engine sees
//! - `visitor`: the double-dispatch contract used to walk that tree
//! - `expression`: typed handles (`Expression<T>`, `FactoryExpression<T>`, `Projection<T>`)
//! - `path`: attribute paths, aggregates, casts and predicates
//! - `coercion`: the engine's native result coercion
//! - `constructor` / `type_wrapper`: factory expressions that build result rows
//!
//! # Result coercion
//!
//! Native coercion only knows the built-in scalar kinds. Attribute paths reach
//! domain types through their `ValueCodec`, but an aggregate over a domain
//! type declares that domain type as its result and is rejected with
//! `QueryError::UnsupportedTargetType`. `TypeWrapper` takes over coercion for
//! such expressions:
//!
//! ```rust,ignore
//! let total = TypeWrapper::new(
//!     entry.amount.sum().cast_to_num::<Decimal>(),
//!     CUSTOM_NUMBER,
//!     CustomNumber::new,
//! );
//! ```

pub mod error;
pub mod value;
pub mod types;
pub mod expr;
pub mod visitor;
pub mod codec;
pub mod expression;
pub mod path;
pub mod coercion;
pub mod constructor;
pub mod type_wrapper;

pub use error::QueryError;
pub use value::RawValue;
pub use types::{NativeType, TypeDescriptor, TypeKind};
pub use expr::{Constant, Expr, Operation, Operator, Order, OrderSpecifier, PathMetadata, Predicate};
pub use visitor::{ToStringVisitor, Visitor};
pub use codec::{NativeCodec, ValueCodec};
pub use expression::{Expression, FactoryExpression, Projection};
pub use path::{EntityPath, NumberExpression, Path};
pub use constructor::ConstructorExpression;
pub use type_wrapper::TypeWrapper;
