use rust_decimal::Decimal;

use super::Category;

/// Aggregates whose members are summed before the limit is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Personnel,
    Financing,
}

impl Group {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Personnel => "Spese del Personale",
            Self::Financing => "Canone e Finanziamenti",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Personnel => "Controlla i turni, evita straordinari e rivedi l'organico.",
            Self::Financing => "Rinegozia affitto o valuta rifinanziamento.",
        }
    }

    pub fn members(&self) -> &'static [Category] {
        match self {
            Self::Personnel => Category::personnel(),
            Self::Financing => Category::financing(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupLimit {
    pub group: Group,
    /// Percentage of revenue, e.g. `33` for 33%.
    pub limit: Decimal,
}

/// Percentage-of-revenue limits. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    /// Single-category limits, in report order.
    pub singles: Vec<(Category, Decimal)>,
    pub personnel: GroupLimit,
    pub financing: GroupLimit,
}

impl ThresholdTable {
    pub fn limit_for(&self, category: Category) -> Option<Decimal> {
        self.singles
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, limit)| *limit)
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let pct = |units: i64, scale: u32| Decimal::new(units, scale);
        Self {
            singles: vec![
                (Category::Alimentari, pct(25, 0)),
                (Category::Bevande, pct(6, 0)),
                (Category::Utilita, pct(4, 0)),
                (Category::Manutenzioni, pct(2, 0)),
                (Category::Marketing, pct(3, 0)),
                (Category::Licenze, pct(2, 0)),
                (Category::Commissioni, pct(2, 0)),
                (Category::Pulizia, pct(1, 0)),
                (Category::Lavanderia, pct(15, 1)),
                (Category::SpeseVarie, pct(3, 0)),
                (Category::Amministrazione, pct(2, 0)),
            ],
            personnel: GroupLimit {
                group: Group::Personnel,
                limit: pct(33, 0),
            },
            financing: GroupLimit {
                group: Group::Financing,
                limit: pct(12, 0),
            },
        }
    }
}
