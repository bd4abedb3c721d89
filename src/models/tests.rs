#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_parse_full_names() {
    assert_eq!(Month::parse("gennaio"), Some(Month::Gennaio));
    assert_eq!(Month::parse("  Dicembre "), Some(Month::Dicembre));
    assert_eq!(Month::parse("SETTEMBRE"), Some(Month::Settembre));
}

#[test]
fn test_month_parse_numbers() {
    assert_eq!(Month::parse("1"), Some(Month::Gennaio));
    assert_eq!(Month::parse("03"), Some(Month::Marzo));
    assert_eq!(Month::parse("12"), Some(Month::Dicembre));
    assert_eq!(Month::parse("0"), None);
    assert_eq!(Month::parse("13"), None);
}

#[test]
fn test_month_parse_aliases() {
    assert_eq!(Month::parse("gen"), Some(Month::Gennaio));
    assert_eq!(Month::parse("sett"), Some(Month::Settembre));
    assert_eq!(Month::parse("sep"), Some(Month::Settembre));
    assert_eq!(Month::parse("dic"), Some(Month::Dicembre));
}

#[test]
fn test_month_parse_rejects_unknown() {
    assert_eq!(Month::parse(""), None);
    assert_eq!(Month::parse("january"), None);
    assert_eq!(Month::parse("gennaio2"), None);
}

#[test]
fn test_month_index_roundtrip() {
    for (i, month) in Month::all().iter().enumerate() {
        assert_eq!(usize::from(month.index()), i + 1);
        assert_eq!(Month::from_index(i as u32 + 1), Some(*month));
    }
}

#[test]
fn test_month_next_prev_wrap() {
    assert_eq!(Month::Dicembre.next(), Month::Gennaio);
    assert_eq!(Month::Gennaio.prev(), Month::Dicembre);
    assert_eq!(Month::Marzo.next(), Month::Aprile);
    assert_eq!(Month::Marzo.prev(), Month::Febbraio);
}

#[test]
fn test_month_display_name() {
    assert_eq!(Month::Agosto.display_name(), "Agosto");
    assert_eq!(format!("{}", Month::Agosto), "agosto");
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse_roundtrip() {
    for c in Category::all() {
        assert_eq!(Category::parse(c.as_str()), Some(*c), "Roundtrip failed for {c}");
    }
    assert_eq!(Category::parse("Staff-Sala"), Some(Category::StaffSala));
    assert_eq!(Category::parse("affitto"), None);
}

#[test]
fn test_category_buckets() {
    assert_eq!(Category::Alimentari.bucket(), Bucket::Invoices);
    assert_eq!(Category::Varie.bucket(), Bucket::Invoices);
    assert_eq!(Category::Amministrazione.bucket(), Bucket::Expenses);
    assert_eq!(Category::StaffCucina.bucket(), Bucket::Expenses);
    assert_eq!(Category::Canone.bucket(), Bucket::Expenses);
}

#[test]
fn test_groups_are_expense_bucket_and_disjoint() {
    for c in Category::personnel() {
        assert!(!Category::financing().contains(c));
        assert_eq!(c.bucket(), Bucket::Expenses);
    }
    for c in Category::financing() {
        assert_eq!(c.bucket(), Bucket::Expenses);
    }
}

#[test]
fn test_bucket_parse() {
    assert_eq!(Bucket::parse("spese"), Some(Bucket::Expenses));
    assert_eq!(Bucket::parse("Fatture"), Some(Bucket::Invoices));
    assert_eq!(Bucket::parse("invoices"), Some(Bucket::Invoices));
    assert_eq!(Bucket::parse("other"), None);
}

// ── ThresholdTable ────────────────────────────────────────────

#[test]
fn test_default_thresholds() {
    let table = ThresholdTable::default();
    assert_eq!(table.singles.len(), 11);
    assert_eq!(table.limit_for(Category::Alimentari), Some(dec!(25)));
    assert_eq!(table.limit_for(Category::Lavanderia), Some(dec!(1.5)));
    assert_eq!(table.limit_for(Category::StaffSala), None);
    assert_eq!(table.personnel.limit, dec!(33));
    assert_eq!(table.financing.limit, dec!(12));
    assert_eq!(table.personnel.group, Group::Personnel);
    assert_eq!(table.financing.group.members().len(), 3);
}

#[test]
fn test_single_thresholds_are_unique() {
    let table = ThresholdTable::default();
    let mut ids: Vec<&str> = table.singles.iter().map(|(c, _)| c.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), table.singles.len());
}
