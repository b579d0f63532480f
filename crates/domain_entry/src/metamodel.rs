//! Query metamodel for entries
//!
//! `ENTRY` is the default root, aliased `entry`:
//!
//! ```rust,ignore
//! SqlQuery::select(&*ENTRY).from(&*ENTRY).fetch(&pool).await?;
//! SqlQuery::select(ENTRY.amount_total()).from(&*ENTRY).fetch_one(&pool).await?;
//! ```

use core_kernel::{CustomNumber, EntryId};
use once_cell::sync::Lazy;
use query_dsl::{
    ConstructorExpression, EntityPath, Expr, Expression, FactoryExpression, Path, Projection,
    QueryError, RawValue, TypeDescriptor, TypeWrapper, Visitor,
};
use rust_decimal::Decimal;

use crate::codecs::{CustomNumberCodec, EntryIdCodec, CUSTOM_NUMBER, ENTRY_ID};
use crate::entry::{CategoryTotal, Entry};

/// Table backing the `Entry` entity
pub const ENTRY_TABLE: &str = "entries";

const ENTRY_TYPE: TypeDescriptor = TypeDescriptor::custom("Entry");
const CATEGORY_TOTAL_TYPE: TypeDescriptor = TypeDescriptor::custom("CategoryTotal");

/// Default `entry` root
pub static ENTRY: Lazy<QEntry> = Lazy::new(|| QEntry::new("entry"));

/// Paths of the `Entry` entity under one alias
#[derive(Debug, Clone)]
pub struct QEntry {
    alias: String,
    pub id: Path<EntryId>,
    pub category: Path<String>,
    pub amount: Path<CustomNumber>,
}

impl QEntry {
    pub fn new(alias: &str) -> Self {
        Self {
            alias: alias.to_string(),
            id: Path::new(alias, "id", TypeDescriptor::TEXT, ENTRY_ID, EntryIdCodec),
            category: Path::native(alias, "category"),
            amount: Path::new(alias, "amount", TypeDescriptor::TEXT, CUSTOM_NUMBER, CustomNumberCodec),
        }
    }

    /// Sum of all amounts, coerced to `CustomNumber` by a `TypeWrapper`
    ///
    /// The sum is cast to `Decimal` first so the engine can coerce it natively.
    pub fn amount_total(&self) -> TypeWrapper<Decimal, CustomNumber> {
        TypeWrapper::new(
            self.amount.sum().cast_to_num::<Decimal>(),
            CUSTOM_NUMBER,
            CustomNumber::new,
        )
    }

    fn attribute_exprs(&self) -> Vec<Expr> {
        vec![
            self.id.to_expr(),
            self.category.to_expr(),
            self.amount.to_expr(),
        ]
    }
}

impl EntityPath for QEntry {
    fn table_name(&self) -> &str {
        ENTRY_TABLE
    }

    fn alias(&self) -> &str {
        &self.alias
    }
}

/// Selecting the root hydrates whole entities from their attribute columns
impl Expression<Entry> for QEntry {
    fn value_type(&self) -> TypeDescriptor {
        ENTRY_TYPE
    }

    fn to_expr(&self) -> Expr {
        Expr::Factory {
            value_type: ENTRY_TYPE,
            args: self.attribute_exprs(),
        }
    }
}

impl Projection<Entry> for QEntry {
    fn materialize(&self, values: &[RawValue]) -> Result<Entry, QueryError> {
        match values {
            [id, category, amount] => Ok(Entry::new(
                self.id.decode(id.clone())?,
                self.category.decode(category.clone())?,
                self.amount.decode(amount.clone())?,
            )),
            other => Err(QueryError::ArityMismatch {
                expected: 3,
                found: other.len(),
            }),
        }
    }
}

/// Constructor expression for `CategoryTotal`
#[derive(Debug, Clone)]
pub struct QCategoryTotal(ConstructorExpression<CategoryTotal>);

impl QCategoryTotal {
    /// Selects `category` and `amount` into a `CategoryTotal`
    ///
    /// `amount` can be a plain path, an aggregate, or a `TypeWrapper` around
    /// an aggregate.
    pub fn new<P, Q>(category: P, amount: Q) -> Self
    where
        P: Projection<String> + 'static,
        Q: Projection<CustomNumber> + 'static,
    {
        Self(ConstructorExpression::of2(
            CATEGORY_TOTAL_TYPE,
            category,
            amount,
            |category: String, amount: CustomNumber| CategoryTotal::new(category, amount),
        ))
    }
}

impl Expression<CategoryTotal> for QCategoryTotal {
    fn value_type(&self) -> TypeDescriptor {
        self.0.value_type()
    }

    fn to_expr(&self) -> Expr {
        self.0.to_expr()
    }

    fn accept<V, C>(&self, visitor: &mut V, context: C) -> V::Output
    where
        V: Visitor<C>,
    {
        self.0.accept(visitor, context)
    }
}

impl FactoryExpression<CategoryTotal> for QCategoryTotal {
    fn args(&self) -> &[Expr] {
        self.0.args()
    }

    fn new_instance(&self, args: &[RawValue]) -> Result<CategoryTotal, QueryError> {
        self.0.new_instance(args)
    }
}

impl Projection<CategoryTotal> for QCategoryTotal {
    fn materialize(&self, values: &[RawValue]) -> Result<CategoryTotal, QueryError> {
        self.0.new_instance(values)
    }
}
