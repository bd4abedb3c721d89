use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;

use crate::db::Database;
use crate::evaluate::{format_euro, parse_euro, round_cents, store_key};
use crate::models::{Bucket, Category, Month};

/// Invoice category descriptions as suppliers' documents spell them.
const CATEGORY_MAP: &[(&str, Category)] = &[
    ("alimentari (food cost)", Category::Alimentari),
    ("bevande", Category::Bevande),
    ("utilità (luce, acqua, gas)", Category::Utilita),
    ("manutenzioni e riparazioni", Category::Manutenzioni),
    ("marketing e pubblicità", Category::Marketing),
    ("licenze e assicurazioni", Category::Licenze),
    ("commissioni (the fork)", Category::Commissioni),
    ("lavanderia", Category::Lavanderia),
    ("pulizia e igiene", Category::Pulizia),
    ("spese varie", Category::SpeseVarie),
    ("varie", Category::Varie),
];

const DATE_HEADERS: &[&str] = &["data", "date", "data_inserimento"];
const SUPPLIER_HEADERS: &[&str] = &["fornitore", "supplier"];
const CATEGORY_HEADERS: &[&str] = &["categoria", "category"];
const AMOUNT_HEADERS: &[&str] = &["importo", "amount", "totale"];

/// Map an invoice category description to the category it is tracked
/// under. Unrecognized descriptions land in `spese-varie`.
pub(crate) fn map_invoice_category(description: &str) -> Category {
    let key = description.trim().to_lowercase();
    if let Some((_, cat)) = CATEGORY_MAP.iter().find(|(name, _)| *name == key) {
        return *cat;
    }
    match Category::parse(&key) {
        Some(cat) if cat.is_invoice_tracked() => cat,
        _ => Category::SpeseVarie,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invoice {
    pub(crate) date: NaiveDate,
    pub(crate) supplier: String,
    pub(crate) category: Category,
    pub(crate) amount: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    supplier: Option<usize>,
    category: usize,
    amount: usize,
}

impl Columns {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };
        let required = |names: &[&str]| {
            find(names).ok_or_else(|| {
                anyhow::anyhow!("Missing column '{}' (found: {})", names[0], headers.join(", "))
            })
        };
        Ok(Self {
            date: required(DATE_HEADERS)?,
            supplier: find(SUPPLIER_HEADERS),
            category: required(CATEGORY_HEADERS)?,
            amount: required(AMOUNT_HEADERS)?,
        })
    }
}

/// Totals written by one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub(crate) invoices: usize,
    pub(crate) skipped_other_years: usize,
    pub(crate) entries: Vec<(String, String)>,
}

pub(crate) struct InvoiceImporter;

impl InvoiceImporter {
    /// Read every invoice in the file. Rows with an empty date are skipped.
    pub(crate) fn read(path: &Path) -> Result<Vec<Invoice>> {
        let delimiter = sniff_delimiter(path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .delimiter(delimiter)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let cols = Columns::from_headers(&headers)?;

        let mut invoices = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record.context("Failed to read CSV record")?;
            let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

            let date_str = field(cols.date);
            if date_str.is_empty() {
                continue;
            }
            // Header is line 1.
            let line = i + 2;
            let date = parse_date(date_str)
                .with_context(|| format!("Line {line}: failed to parse date '{date_str}'"))?;

            invoices.push(Invoice {
                date,
                supplier: cols.supplier.map(|c| field(c).to_string()).unwrap_or_default(),
                category: map_invoice_category(field(cols.category)),
                amount: parse_euro(Some(field(cols.amount))),
            });
        }
        tracing::debug!(path = %path.display(), count = invoices.len(), "invoices read");
        Ok(invoices)
    }

    /// Sum the invoices of `year` per month and category, rounded to cents.
    pub(crate) fn monthly_totals(
        invoices: &[Invoice],
        year: i32,
    ) -> BTreeMap<(Month, Category), Decimal> {
        let mut totals: BTreeMap<(Month, Category), Decimal> = BTreeMap::new();
        for inv in invoices.iter().filter(|inv| inv.date.year() == year) {
            let Some(month) = Month::from_index(inv.date.month()) else {
                continue;
            };
            let slot = totals.entry((month, inv.category)).or_default();
            *slot = slot.saturating_add(inv.amount);
        }
        for total in totals.values_mut() {
            *total = round_cents(*total);
        }
        totals
    }

    pub(crate) fn store_entries(
        year: i32,
        totals: &BTreeMap<(Month, Category), Decimal>,
    ) -> Vec<(String, String)> {
        totals
            .iter()
            .map(|((month, cat), total)| {
                (
                    store_key(year, *month, Bucket::Invoices, cat.as_str()),
                    format_euro(*total),
                )
            })
            .collect()
    }
}

/// Read `path`, total its invoices for `year` and overwrite the matching
/// `fatture` entries in the store.
pub(crate) fn import_invoices(path: &Path, year: i32, db: &mut Database) -> Result<ImportSummary> {
    let invoices = InvoiceImporter::read(path)?;
    let in_year = invoices.iter().filter(|i| i.date.year() == year).count();
    let totals = InvoiceImporter::monthly_totals(&invoices, year);
    let entries = InvoiceImporter::store_entries(year, &totals);
    db.set_values(&entries)?;
    tracing::info!(
        path = %path.display(),
        year,
        invoices = in_year,
        entries = entries.len(),
        "invoices imported"
    );
    Ok(ImportSummary {
        invoices: in_year,
        skipped_other_years: invoices.len() - in_year,
        entries,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

/// Italian spreadsheets export with `;`; everything else is `,`.
fn sniff_delimiter(path: &Path) -> Result<u8> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    let header = content.lines().next().unwrap_or("");
    if header.contains(';') && !header.contains(',') {
        Ok(b';')
    } else {
        Ok(b',')
    }
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
