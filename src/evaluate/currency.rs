use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

static NUMERIC_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").ok()
});

/// Parse an Italian-formatted euro string ("1.234,56", "–1.234,56", "12.5").
///
/// With a comma present, periods are thousands separators and the comma is
/// the decimal mark; without one the period is a decimal point. Only the
/// leading numeric part is read. Missing, blank or unparsable input is 0.
pub(crate) fn parse_euro(val: Option<&str>) -> Decimal {
    let s = val.unwrap_or("").trim().replace('–', "-");
    if s.is_empty() {
        return Decimal::ZERO;
    }
    let cleaned = if s.contains(',') {
        s.replace('.', "").replacen(',', ".", 1)
    } else {
        s
    };
    let Some(re) = NUMERIC_PREFIX.as_ref() else {
        return Decimal::ZERO;
    };
    re.find(&cleaned)
        .and_then(|m| decimal_from_literal(m.as_str()))
        .unwrap_or(Decimal::ZERO)
}

fn decimal_from_literal(lit: &str) -> Option<Decimal> {
    let lit = lit.strip_prefix('+').unwrap_or(lit);
    if lit.contains(['e', 'E']) {
        return Decimal::from_scientific(lit).ok();
    }
    let lit = lit.strip_suffix('.').unwrap_or(lit);
    if let Some(frac) = lit.strip_prefix("-.") {
        return Decimal::from_str(&format!("-0.{frac}")).ok();
    }
    if let Some(frac) = lit.strip_prefix('.') {
        return Decimal::from_str(&format!("0.{frac}")).ok();
    }
    Decimal::from_str(lit).ok()
}

/// Format with `.` thousands separators and a `,` decimal mark, two places.
/// e.g. `-1234567.891` → `"-1.234.567,89"`
pub(crate) fn format_euro(val: Decimal) -> String {
    let rounded = round_cents(val);
    let abs = rounded.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let grouped: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if rounded < Decimal::ZERO {
        format!("-{grouped},{dec_part}")
    } else {
        format!("{grouped},{dec_part}")
    }
}

/// Percentage with two places and a comma decimal mark: `"34,00%"`.
pub(crate) fn format_percent(ratio: Decimal) -> String {
    let formatted = format!("{:.2}", round_cents(ratio));
    format!("{}%", formatted.replace('.', ","))
}

/// Two places, half-way values away from zero.
pub(crate) fn round_cents(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Limits are shown without trailing zeros: `25%`, `1,5%`.
pub(crate) fn format_limit(limit: Decimal) -> String {
    format!("{}%", limit.normalize().to_string().replace('.', ","))
}
