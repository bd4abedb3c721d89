#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_migrate_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_value("k", "v").unwrap();
    db.migrate().unwrap();
    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_open_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    {
        let db = Database::open(&path).unwrap();
        db.set_value("2025_marzo_spese_canone", "1.000,00").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(
        db.get_value("2025_marzo_spese_canone").unwrap().as_deref(),
        Some("1.000,00")
    );
}

// ── Key/value store ───────────────────────────────────────────

#[test]
fn test_set_and_get_value() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_value("missing").unwrap().is_none());
    db.set_value("a", "1").unwrap();
    assert_eq!(db.get_value("a").unwrap().as_deref(), Some("1"));
}

#[test]
fn test_set_value_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("a", "1").unwrap();
    db.set_value("a", "2").unwrap();
    assert_eq!(db.get_value("a").unwrap().as_deref(), Some("2"));
    assert_eq!(db.values_with_prefix("").unwrap().len(), 1);
}

#[test]
fn test_delete_value() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("a", "1").unwrap();
    assert!(db.delete_value("a").unwrap());
    assert!(!db.delete_value("a").unwrap());
    assert!(db.get_value("a").unwrap().is_none());
}

#[test]
fn test_values_with_prefix() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("2025_marzo_spese_canone", "800").unwrap();
    db.set_value("2025_marzo_fatture_bevande", "120").unwrap();
    db.set_value("2025_marzolino_spese_canone", "1").unwrap();
    db.set_value("2025_aprile_spese_canone", "900").unwrap();

    let rows = db.values_with_prefix("2025_marzo_").unwrap();
    let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["2025_marzo_fatture_bevande", "2025_marzo_spese_canone"]
    );
}

#[test]
fn test_prefix_is_literal() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("2025_marzo_spese_canone", "800").unwrap();
    db.set_value("2025xmarzo_spese_canone", "1").unwrap();
    // '_' must not act as a wildcard
    assert_eq!(db.values_with_prefix("2025_").unwrap().len(), 1);
}

#[test]
fn test_set_values_batch() {
    let mut db = Database::open_in_memory().unwrap();
    let entries = vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
        ("a".to_string(), "3".to_string()),
    ];
    assert_eq!(db.set_values(&entries).unwrap(), 3);
    assert_eq!(db.get_value("a").unwrap().as_deref(), Some("3"));
    assert_eq!(db.get_value("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_store_reader_impl() {
    let db = Database::open_in_memory().unwrap();
    db.set_value("x", "42").unwrap();
    assert_eq!(StoreReader::read(&db, "x").as_deref(), Some("42"));
    assert!(StoreReader::read(&db, "y").is_none());
}

// ── Monthly totals ────────────────────────────────────────────

#[test]
fn test_monthly_totals_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    db.set_monthly_totals(2025, 3, "10.000,00", "7.500,00").unwrap();
    let cells = db.get_monthly_cells(2025, 3).unwrap().unwrap();
    assert_eq!(cells.revenue, "10.000,00");
    assert_eq!(cells.expenses, "7.500,00");
    assert!(db.get_monthly_cells(2025, 4).unwrap().is_none());
    assert!(db.get_monthly_cells(2024, 3).unwrap().is_none());
}

#[test]
fn test_monthly_totals_overwrite() {
    let db = Database::open_in_memory().unwrap();
    db.set_monthly_totals(2025, 1, "1", "2").unwrap();
    db.set_monthly_totals(2025, 1, "3", "4").unwrap();
    let cells = db.get_monthly_cells(2025, 1).unwrap().unwrap();
    assert_eq!(cells.revenue, "3");
    assert_eq!(cells.expenses, "4");
}

#[test]
fn test_monthly_totals_rejects_bad_index() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.set_monthly_totals(2025, 0, "1", "1").is_err());
    assert!(db.set_monthly_totals(2025, 13, "1", "1").is_err());
}

#[test]
fn test_year_cells() {
    let db = Database::open_in_memory().unwrap();
    db.set_monthly_totals(2025, 1, "100", "50").unwrap();
    db.set_monthly_totals(2025, 12, "200", "80").unwrap();
    db.set_monthly_totals(2024, 6, "999", "999").unwrap();

    let cells = db.get_year_cells(2025).unwrap();
    assert_eq!(cells.len(), 12);
    assert_eq!(cells[0].revenue, "100");
    assert_eq!(cells[11].expenses, "80");
    assert_eq!(cells[5], MonthlyCells::default());
}

#[test]
fn test_year_page_reader() {
    let db = Database::open_in_memory().unwrap();
    db.set_monthly_totals(2025, 2, "1.500,00", "900").unwrap();
    let page = db.year_page(2025);
    assert_eq!(page.revenue_cell(2).as_deref(), Some("1.500,00"));
    assert_eq!(page.expense_cell(2).as_deref(), Some("900"));
    assert!(page.revenue_cell(3).is_none());
    assert!(db.year_page(2024).revenue_cell(2).is_none());
}

#[test]
fn test_evaluate_against_database() {
    use crate::evaluate::{store_key, ThresholdEvaluator};
    use crate::models::{Bucket, Month, ThresholdTable};
    use rust_decimal_macros::dec;

    let db = Database::open_in_memory().unwrap();
    db.set_monthly_totals(2025, 3, "10.000,00", "7.000,00").unwrap();
    db.set_value(
        &store_key(2025, Month::Marzo, Bucket::Invoices, "alimentari"),
        "2.600,00",
    )
    .unwrap();
    db.set_value(
        &store_key(2025, Month::Marzo, Bucket::Expenses, "staff-cucina"),
        "3.400,00",
    )
    .unwrap();

    let table = ThresholdTable::default();
    let result =
        ThresholdEvaluator::new(&table, 2025).evaluate(Month::Marzo, &db, &db.year_page(2025));
    assert_eq!(result.revenue, dec!(10000));
    assert_eq!(result.personnel_ratio(), dec!(34));
    assert!(result.over_limit_overall);
}
