#![allow(clippy::unwrap_used)]

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn text(s: &str) -> Value {
    Value::Text(s.into())
}

// ── Flag validation ───────────────────────────────────────────

#[test]
fn test_date_and_range_conflict() {
    assert_eq!(
        ensure_compatible(true, true, false, false),
        Err(QueryError::ConflictingFlags("date", "daterange"))
    );
}

#[test]
fn test_category_and_categories_conflict() {
    assert_eq!(
        ensure_compatible(false, false, true, true),
        Err(QueryError::ConflictingFlags("category", "categories"))
    );
}

#[test]
fn test_compatible_combinations() {
    assert!(ensure_compatible(false, false, false, false).is_ok());
    assert!(ensure_compatible(true, false, true, false).is_ok());
    assert!(ensure_compatible(false, true, false, true).is_ok());
}

#[test]
fn test_limit_must_be_positive() {
    assert_eq!(ensure_limit(0), Err(QueryError::InvalidLimit(0)));
    assert_eq!(ensure_limit(-5), Err(QueryError::InvalidLimit(-5)));
    assert!(ensure_limit(1).is_ok());
}

// ── Query building ────────────────────────────────────────────

#[test]
fn test_empty_filter_matches_all() {
    let q = Filter::default().to_query().unwrap();
    assert_eq!(q.sql, format!("{SELECT_EXPENSES} ORDER BY Date"));
    assert!(q.params.is_empty());
}

#[test]
fn test_limit_is_bound() {
    let filter = Filter {
        limit: Some(100),
        ..Default::default()
    };
    let q = filter.to_query().unwrap();
    assert_eq!(q.sql, format!("{SELECT_EXPENSES} ORDER BY Date LIMIT ?1"));
    assert_eq!(q.params, vec![Value::Integer(100)]);
}

#[test]
fn test_zero_limit_rejected() {
    let filter = Filter {
        limit: Some(0),
        ..Default::default()
    };
    assert_eq!(filter.to_query(), Err(QueryError::InvalidLimit(0)));
}

#[test]
fn test_exact_date() {
    let filter = Filter {
        on_date: Some(day(2024, 1, 15)),
        ..Default::default()
    };
    let q = filter.to_query().unwrap();
    assert!(q.sql.contains(" WHERE Date = ?1 ORDER BY Date"));
    assert_eq!(q.params, vec![text("2024-01-15")]);
}

#[test]
fn test_date_range_both_bounds() {
    let filter = Filter {
        date_range: Some(DateRange {
            from: Some(day(2024, 1, 1)),
            to: Some(day(2024, 1, 31)),
        }),
        ..Default::default()
    };
    let q = filter.to_query().unwrap();
    assert!(q.sql.contains(" WHERE Date >= ?1 AND Date <= ?2 "));
    assert_eq!(q.params, vec![text("2024-01-01"), text("2024-01-31")]);
}

#[test]
fn test_date_range_open_end() {
    let filter = Filter {
        date_range: Some(DateRange {
            from: None,
            to: Some(day(2024, 1, 31)),
        }),
        ..Default::default()
    };
    let q = filter.to_query().unwrap();
    assert!(q.sql.contains(" WHERE Date <= ?1 "));
    assert_eq!(q.params.len(), 1);
}

#[test]
fn test_conflicting_directives_rejected() {
    let filter = Filter {
        on_date: Some(day(2024, 1, 15)),
        date_range: Some(DateRange::default()),
        ..Default::default()
    };
    assert_eq!(
        filter.to_query(),
        Err(QueryError::ConflictingFlags("date", "daterange"))
    );

    let filter = Filter {
        category: Some("food".into()),
        categories: Some(vec!["food".into()]),
        ..Default::default()
    };
    assert!(filter.to_query().is_err());
}

#[test]
fn test_category_set() {
    let filter = Filter {
        categories: Some(vec!["food".into(), "transport".into()]),
        ..Default::default()
    };
    let q = filter.to_query().unwrap();
    assert!(q.sql.contains(" WHERE Category IN (?1, ?2) "));
    assert_eq!(q.params, vec![text("food"), text("transport")]);
}

#[test]
fn test_empty_category_set_is_unconstrained() {
    let filter = Filter {
        categories: Some(Vec::new()),
        ..Default::default()
    };
    assert!(filter.predicates().is_empty());
    assert!(!filter.to_query().unwrap().sql.contains("WHERE"));
}

#[test]
fn test_predicate_order_and_numbering() {
    let filter = Filter {
        date_range: Some(DateRange {
            from: Some(day(2024, 1, 1)),
            to: Some(day(2024, 2, 1)),
        }),
        categories: Some(vec!["food".into(), "fun".into()]),
        limit: Some(5),
        ..Default::default()
    };
    assert_eq!(
        filter.predicates(),
        vec![
            Predicate::DateFrom(day(2024, 1, 1)),
            Predicate::DateTo(day(2024, 2, 1)),
            Predicate::CategoryIn(vec!["food".into(), "fun".into()]),
        ]
    );
    let q = filter.to_query().unwrap();
    assert_eq!(
        q.sql,
        format!(
            "{SELECT_EXPENSES} WHERE Date >= ?1 AND Date <= ?2 AND Category IN (?3, ?4) ORDER BY Date LIMIT ?5"
        )
    );
    assert_eq!(q.params.len(), 5);
}

#[test]
fn test_category_text_is_never_interpolated() {
    let hostile = "x' OR '1'='1";
    let filter = Filter {
        category: Some(hostile.into()),
        ..Default::default()
    };
    let q = filter.to_query().unwrap();
    assert!(!q.sql.contains(hostile));
    assert_eq!(q.params, vec![text(hostile)]);
}
