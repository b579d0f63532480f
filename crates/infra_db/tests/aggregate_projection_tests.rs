//! End-to-end tests for projections and aggregates over entries
//!
//! Every test runs against its own in-memory database seeded with two
//! entries in "aaa" (111, 222) and two in "zzz" (444, 555).

use core_kernel::CustomNumber;
use domain_entry::{CategoryTotal, Entry, QCategoryTotal, CUSTOM_NUMBER, ENTRY};
use infra_db::{DatabaseError, SqlQuery};
use query_dsl::{QueryError, TypeWrapper};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{
    assert_contains_exactly_in_any_order, assert_custom_number_eq, number, EntryFixtures,
    TestDatabase, TestEntryBuilder,
};

fn unsupported_custom_number() -> QueryError {
    QueryError::UnsupportedTargetType("CustomNumber".to_string())
}

fn query_error(error: DatabaseError) -> QueryError {
    match error {
        DatabaseError::Query(error) => error,
        other => panic!("expected a query error, got {:?}", other),
    }
}

mod selection {
    use super::*;

    #[tokio::test]
    async fn test_select_entities() {
        let db = TestDatabase::seeded().await.unwrap();

        let entries: Vec<Entry> = SqlQuery::select(&*ENTRY)
            .from(&*ENTRY)
            .fetch(db.pool())
            .await
            .unwrap();

        assert_contains_exactly_in_any_order(&entries, &EntryFixtures::all());
    }

    #[tokio::test]
    async fn test_select_category_amount_projection() {
        let db = TestDatabase::seeded().await.unwrap();

        let projections = SqlQuery::select(QCategoryTotal::new(
            ENTRY.category.clone(),
            ENTRY.amount.clone(),
        ))
        .from(&*ENTRY)
        .fetch(db.pool())
        .await
        .unwrap();

        assert_contains_exactly_in_any_order(&projections, &EntryFixtures::category_amounts());
    }

    #[tokio::test]
    async fn test_fetch_one_with_several_rows_fails() {
        let db = TestDatabase::seeded().await.unwrap();

        let err = SqlQuery::select(&*ENTRY)
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap_err();

        assert_eq!(query_error(err), QueryError::NonUniqueResult(4));
    }

    #[tokio::test]
    async fn test_fetch_one_without_rows() {
        let db = TestDatabase::new().await.unwrap();

        let entry = SqlQuery::select(&*ENTRY)
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(entry, None);
    }
}

mod native_aggregates {
    use super::*;

    #[tokio::test]
    async fn test_sum_of_custom_numbers_is_unsupported() {
        let db = TestDatabase::seeded().await.unwrap();

        let err = SqlQuery::select(ENTRY.amount.sum())
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap_err();

        assert_eq!(query_error(err), unsupported_custom_number());
    }

    #[tokio::test]
    async fn test_grouped_sum_in_projection_is_unsupported() {
        let db = TestDatabase::seeded().await.unwrap();

        let err = SqlQuery::select(QCategoryTotal::new(
            ENTRY.category.clone(),
            ENTRY.amount.sum(),
        ))
        .from(&*ENTRY)
        .group_by(&ENTRY.category)
        .fetch(db.pool())
        .await
        .unwrap_err();

        assert_eq!(query_error(err), unsupported_custom_number());
    }

    #[tokio::test]
    async fn test_max_of_custom_numbers_is_unsupported() {
        let db = TestDatabase::seeded().await.unwrap();

        let err = SqlQuery::select(ENTRY.amount.max())
            .from(&*ENTRY)
            .fetch(db.pool())
            .await
            .unwrap_err();

        assert_eq!(query_error(err), unsupported_custom_number());
    }

    test_utils::db_test!(test_count_is_native, |pool| {
        let count = SqlQuery::select(ENTRY.id.count())
            .from(&*ENTRY)
            .fetch_one(pool)
            .await
            .unwrap();

        assert_eq!(count, Some(4));
    });
}

mod wrapped_aggregates {
    use super::*;

    #[tokio::test]
    async fn test_wrapped_sum() {
        let db = TestDatabase::seeded().await.unwrap();

        let total = SqlQuery::select(ENTRY.amount_total())
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(total, EntryFixtures::grand_total());
        assert_eq!(total, number("1332.0"));
    }

    #[tokio::test]
    async fn test_wrapped_sum_grouped_in_projection() {
        let db = TestDatabase::seeded().await.unwrap();

        let totals = SqlQuery::select(QCategoryTotal::new(
            ENTRY.category.clone(),
            ENTRY.amount_total(),
        ))
        .from(&*ENTRY)
        .group_by(&ENTRY.category)
        .fetch(db.pool())
        .await
        .unwrap();

        assert_contains_exactly_in_any_order(&totals, &EntryFixtures::category_totals());
    }

    #[tokio::test]
    async fn test_grouped_totals_follow_order_by() {
        let db = TestDatabase::seeded().await.unwrap();

        let totals = SqlQuery::select(QCategoryTotal::new(
            ENTRY.category.clone(),
            ENTRY.amount_total(),
        ))
        .from(&*ENTRY)
        .group_by(&ENTRY.category)
        .order_by(ENTRY.category.desc())
        .fetch(db.pool())
        .await
        .unwrap();

        let categories: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["zzz", "aaa"]);
    }

    #[tokio::test]
    async fn test_wrapped_sum_with_filter() {
        let db = TestDatabase::seeded().await.unwrap();

        let total = SqlQuery::select(ENTRY.amount_total())
            .from(&*ENTRY)
            .where_(ENTRY.category.eq(&"zzz".to_string()))
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(total, Some(number("999")));
    }

    #[tokio::test]
    async fn test_wrapped_sum_keeps_fractional_digits() {
        let db = TestDatabase::new().await.unwrap();
        db.insert(&[
            TestEntryBuilder::new().with_amount(number("1.25")).build(),
            TestEntryBuilder::new().with_amount(number("2.50")).build(),
        ])
        .await
        .unwrap();

        let total = SqlQuery::select(ENTRY.amount_total())
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap()
            .unwrap();

        assert_custom_number_eq(&total, "3.75");
    }

    #[tokio::test]
    async fn test_wrapped_sum_rejects_rounded_real() {
        let db = TestDatabase::new().await.unwrap();
        db.insert(&[
            TestEntryBuilder::new().with_amount(number("12345678901234.56")).build(),
            TestEntryBuilder::new().with_amount(number("0.01")).build(),
        ])
        .await
        .unwrap();

        let err = SqlQuery::select(ENTRY.amount_total())
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap_err();

        assert!(matches!(query_error(err), QueryError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_wrapped_max() {
        let db = TestDatabase::seeded().await.unwrap();
        let largest = TypeWrapper::new(
            ENTRY.amount.max().cast_to_num::<Decimal>(),
            CUSTOM_NUMBER,
            CustomNumber::new,
        );

        let value = SqlQuery::select(largest)
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(value, Some(number("555")));
    }

    #[tokio::test]
    async fn test_wrapped_sum_over_no_rows_is_a_type_mismatch() {
        let db = TestDatabase::new().await.unwrap();

        let err = SqlQuery::select(ENTRY.amount_total())
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap_err();

        assert!(query_error(err).is_type_mismatch());
    }

    #[tokio::test]
    async fn test_optional_source_handles_no_rows() {
        let db = TestDatabase::new().await.unwrap();
        let total = TypeWrapper::new(
            ENTRY.amount.sum().cast_to_num::<Option<Decimal>>(),
            CUSTOM_NUMBER,
            |sum: Option<Decimal>| CustomNumber::new(sum.unwrap_or(dec!(0))),
        );

        let value = SqlQuery::select(total)
            .from(&*ENTRY)
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(value, Some(CustomNumber::zero()));
    }

    #[tokio::test]
    async fn test_totals_match_in_memory_sums() {
        let db = TestDatabase::seeded().await.unwrap();

        let totals = SqlQuery::select(QCategoryTotal::new(
            ENTRY.category.clone(),
            ENTRY.amount_total(),
        ))
        .from(&*ENTRY)
        .group_by(&ENTRY.category)
        .fetch(db.pool())
        .await
        .unwrap();

        for CategoryTotal { category, amount } in totals {
            let expected: CustomNumber = EntryFixtures::all()
                .iter()
                .filter(|e| e.category() == category)
                .map(Entry::amount)
                .sum();
            assert_eq!(amount, expected, "category {}", category);
        }
    }
}
