use rust_decimal::Decimal;

use super::{Category, Group, Month};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRatio {
    pub category: Category,
    pub value: Decimal,
    pub ratio: Decimal,
    pub limit: Decimal,
    pub exceeded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupRatio {
    pub group: Group,
    pub total: Decimal,
    pub ratio: Decimal,
    pub limit: Decimal,
    pub exceeded: bool,
}

/// Outcome of one threshold evaluation. Ratios are percentages of revenue.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub year: i32,
    pub month: Month,
    pub revenue: Decimal,
    pub total_expense: Decimal,
    pub total_expense_ratio: Decimal,
    pub per_category: Vec<CategoryRatio>,
    pub personnel: GroupRatio,
    pub financing: GroupRatio,
    pub sum_of_ratios: Decimal,
    pub over_limit_overall: bool,
}

impl EvaluationResult {
    pub fn personnel_ratio(&self) -> Decimal {
        self.personnel.ratio
    }

    pub fn financing_ratio(&self) -> Decimal {
        self.financing.ratio
    }

    /// True when a group or a single category is over its own limit.
    pub fn any_exceeded(&self) -> bool {
        self.personnel.exceeded
            || self.financing.exceeded
            || self.per_category.iter().any(|c| c.exceeded)
    }

    pub fn sum_exceeds_revenue(&self) -> bool {
        self.sum_of_ratios > Decimal::ONE_HUNDRED
    }

    pub fn exceeded_categories(&self) -> impl Iterator<Item = &CategoryRatio> {
        self.per_category.iter().filter(|c| c.exceeded)
    }

    pub fn exceeded_groups(&self) -> impl Iterator<Item = &GroupRatio> {
        [&self.personnel, &self.financing]
            .into_iter()
            .filter(|g| g.exceeded)
    }
}
