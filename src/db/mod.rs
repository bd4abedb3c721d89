mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::evaluate::{PageReader, StoreReader};

pub(crate) struct Database {
    conn: Connection,
}

/// Raw revenue/expense cell text for one month, as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MonthlyCells {
    pub(crate) revenue: String,
    pub(crate) expenses: String,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Key/value store ───────────────────────────────────────

    pub(crate) fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to store value for {key}"))?;
        tracing::debug!(key, value, "store value set");
        Ok(())
    }

    pub(crate) fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub(crate) fn delete_value(&self, key: &str) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }

    /// All entries whose key starts with `prefix`, ordered by key.
    pub(crate) fn values_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM kv_store WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let rows = stmt.query_map(params![prefix], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Write several entries in one transaction.
    pub(crate) fn set_values(&mut self, entries: &[(String, String)]) -> Result<usize> {
        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(entries.len())
    }

    // ── Monthly totals ────────────────────────────────────────

    pub(crate) fn set_monthly_totals(
        &self,
        year: i32,
        month_index: u8,
        revenue: &str,
        expenses: &str,
    ) -> Result<()> {
        if !(1..=12).contains(&month_index) {
            anyhow::bail!("Month index out of range: {month_index}");
        }
        self.conn
            .execute(
                "INSERT INTO monthly_totals (year, month_index, revenue, expenses, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(year, month_index) DO UPDATE SET
                    revenue = excluded.revenue,
                    expenses = excluded.expenses,
                    updated_at = excluded.updated_at",
                params![
                    year,
                    month_index,
                    revenue,
                    expenses,
                    chrono::Utc::now().to_rfc3339()
                ],
            )
            .with_context(|| format!("Failed to store totals for {year}-{month_index:02}"))?;
        tracing::debug!(year, month_index, revenue, expenses, "monthly totals set");
        Ok(())
    }

    pub(crate) fn get_monthly_cells(&self, year: i32, month_index: u8) -> Result<Option<MonthlyCells>> {
        let cells = self
            .conn
            .query_row(
                "SELECT revenue, expenses FROM monthly_totals WHERE year = ?1 AND month_index = ?2",
                params![year, month_index],
                |row| {
                    Ok(MonthlyCells {
                        revenue: row.get(0)?,
                        expenses: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(cells)
    }

    /// Twelve entries, January first; months with no row are empty cells.
    pub(crate) fn get_year_cells(&self, year: i32) -> Result<Vec<MonthlyCells>> {
        let mut cells = vec![MonthlyCells::default(); 12];
        let mut stmt = self.conn.prepare(
            "SELECT month_index, revenue, expenses FROM monthly_totals WHERE year = ?1",
        )?;
        let rows = stmt.query_map(params![year], |row| {
            Ok((
                row.get::<_, u8>(0)?,
                MonthlyCells {
                    revenue: row.get(1)?,
                    expenses: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (idx, c) = row?;
            if let Some(slot) = usize::from(idx).checked_sub(1).and_then(|i| cells.get_mut(i)) {
                *slot = c;
            }
        }
        Ok(cells)
    }

    pub(crate) fn year_page(&self, year: i32) -> YearPage<'_> {
        YearPage { db: self, year }
    }
}

impl StoreReader for Database {
    fn read(&self, key: &str) -> Option<String> {
        match self.get_value(key) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed, treating as empty");
                None
            }
        }
    }
}

/// The revenue/expense cells of one year, addressed by month index.
pub(crate) struct YearPage<'a> {
    db: &'a Database,
    year: i32,
}

impl YearPage<'_> {
    fn cells(&self, month_index: u8) -> Option<MonthlyCells> {
        match self.db.get_monthly_cells(self.year, month_index) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(year = self.year, month_index, error = %e, "totals read failed");
                None
            }
        }
    }
}

impl PageReader for YearPage<'_> {
    fn revenue_cell(&self, month_index: u8) -> Option<String> {
        self.cells(month_index).map(|c| c.revenue)
    }

    fn expense_cell(&self, month_index: u8) -> Option<String> {
        self.cells(month_index).map(|c| c.expenses)
    }
}

#[cfg(test)]
mod tests;
