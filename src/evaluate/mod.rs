mod currency;
mod labels;

pub(crate) use currency::{format_euro, format_limit, format_percent, parse_euro, round_cents};
pub(crate) use labels::category_label;

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::*;

/// Read access to the persisted key/value store.
pub(crate) trait StoreReader {
    fn read(&self, key: &str) -> Option<String>;
}

/// Read access to the yearly revenue/expense cells, by 1-based month index.
pub(crate) trait PageReader {
    fn revenue_cell(&self, month_index: u8) -> Option<String>;
    fn expense_cell(&self, month_index: u8) -> Option<String>;
}

impl StoreReader for HashMap<String, String> {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// `{year}_{month}_{bucket}_{category}`
pub(crate) fn store_key(year: i32, month: Month, bucket: Bucket, category: &str) -> String {
    format!("{year}_{}_{}_{category}", month.as_str(), bucket.as_str())
}

/// `value / revenue * 100`, or 0 when there is no positive revenue.
pub(crate) fn ratio_of(value: Decimal, revenue: Decimal) -> Decimal {
    if revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    value
        .checked_div(revenue)
        .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            tracing::warn!(%value, %revenue, "ratio out of range, using 0");
            Decimal::ZERO
        })
}

pub(crate) struct ThresholdEvaluator<'a> {
    table: &'a ThresholdTable,
    year: i32,
}

impl<'a> ThresholdEvaluator<'a> {
    pub(crate) fn new(table: &'a ThresholdTable, year: i32) -> Self {
        Self { table, year }
    }

    pub(crate) fn evaluate(
        &self,
        month: Month,
        store: &impl StoreReader,
        page: &impl PageReader,
    ) -> EvaluationResult {
        let idx = month.index();
        let revenue = parse_euro(page.revenue_cell(idx).as_deref());
        let total_expense = parse_euro(page.expense_cell(idx).as_deref());
        let total_expense_ratio = ratio_of(total_expense, revenue);
        tracing::info!(
            year = self.year,
            month = month.as_str(),
            %revenue,
            %total_expense,
            "evaluating thresholds"
        );

        let personnel = self.group_ratio(&self.table.personnel, month, store, revenue);
        let financing = self.group_ratio(&self.table.financing, month, store, revenue);

        let per_category: Vec<CategoryRatio> = self
            .table
            .singles
            .iter()
            .map(|&(category, limit)| {
                let value = self.read_value(store, month, category.bucket(), category);
                let ratio = ratio_of(value, revenue);
                let exceeded = ratio > limit;
                tracing::debug!(category = category.as_str(), %value, %ratio, exceeded);
                CategoryRatio {
                    category,
                    value,
                    ratio,
                    limit,
                    exceeded,
                }
            })
            .collect();

        let sum_of_ratios = per_category
            .iter()
            .map(|c| c.ratio)
            .chain([personnel.ratio, financing.ratio])
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r));

        let over_limit_overall = personnel.exceeded
            || financing.exceeded
            || per_category.iter().any(|c| c.exceeded)
            || sum_of_ratios > Decimal::ONE_HUNDRED;

        let result = EvaluationResult {
            year: self.year,
            month,
            revenue,
            total_expense,
            total_expense_ratio,
            per_category,
            personnel,
            financing,
            sum_of_ratios,
            over_limit_overall,
        };
        tracing::info!(
            personnel = %result.personnel_ratio(),
            financing = %result.financing_ratio(),
            sum = %result.sum_of_ratios,
            over_limit_overall,
            "evaluation complete"
        );
        result
    }

    fn group_ratio(
        &self,
        limit: &GroupLimit,
        month: Month,
        store: &impl StoreReader,
        revenue: Decimal,
    ) -> GroupRatio {
        let total: Decimal = limit
            .group
            .members()
            .iter()
            .map(|&c| self.read_value(store, month, Bucket::Expenses, c))
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v));
        let ratio = ratio_of(total, revenue);
        GroupRatio {
            group: limit.group,
            total,
            ratio,
            limit: limit.limit,
            exceeded: ratio > limit.limit,
        }
    }

    fn read_value(
        &self,
        store: &impl StoreReader,
        month: Month,
        bucket: Bucket,
        category: Category,
    ) -> Decimal {
        let key = store_key(self.year, month, bucket, category.as_str());
        parse_euro(store.read(&key).as_deref())
    }
}
