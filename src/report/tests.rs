#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::*;

#[derive(Default)]
struct RecordingPresenter {
    shown: Vec<(Report, bool)>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, report: Report, is_warning: bool) {
        self.shown.push((report, is_warning));
    }
}

#[derive(Default)]
struct RecordingSpeaker {
    spoken: Vec<String>,
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }
}

fn group(group: Group, ratio: Decimal, limit: Decimal) -> GroupRatio {
    GroupRatio {
        group,
        total: ratio * dec!(100),
        ratio,
        limit,
        exceeded: ratio > limit,
    }
}

fn result(personnel: Decimal, food: Decimal, sum: Decimal) -> EvaluationResult {
    let per_category = vec![CategoryRatio {
        category: Category::Alimentari,
        value: food * dec!(100),
        ratio: food,
        limit: dec!(25),
        exceeded: food > dec!(25),
    }];
    let personnel = group(Group::Personnel, personnel, dec!(33));
    let financing = group(Group::Financing, dec!(10), dec!(12));
    let over = personnel.exceeded || per_category[0].exceeded || sum > dec!(100);
    EvaluationResult {
        year: 2025,
        month: Month::Marzo,
        revenue: dec!(10000),
        total_expense: dec!(7000),
        total_expense_ratio: dec!(70),
        per_category,
        personnel,
        financing,
        sum_of_ratios: sum,
        over_limit_overall: over,
    }
}

fn warnings(report: &Report) -> Vec<&str> {
    report
        .lines
        .iter()
        .filter_map(|l| match l {
            ReportLine::Warning { title, .. } => Some(title.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_report_header_fields() {
    let report = Report::build(&result(dec!(20), dec!(10), dec!(40)));
    assert_eq!(
        report.lines[0],
        ReportLine::Field {
            label: "Mese",
            value: "Marzo 2025".into()
        }
    );
    assert_eq!(
        report.lines[1],
        ReportLine::Field {
            label: "Incasso",
            value: "€ 10.000,00".into()
        }
    );
    assert_eq!(
        report.lines[3],
        ReportLine::Field {
            label: "Spese / Incasso",
            value: "70,00%".into()
        }
    );
}

#[test]
fn test_report_all_clear() {
    let report = Report::build(&result(dec!(20), dec!(10), dec!(40)));
    assert_eq!(report.title, "Tutto sotto controllo");
    assert!(warnings(&report).is_empty());
    assert_eq!(report.lines.last(), Some(&ReportLine::Praise));
    assert_eq!(report.utterances, vec![SPEECH_ALL_CLEAR]);
}

#[test]
fn test_report_warning_blocks() {
    let report = Report::build(&result(dec!(34), dec!(26), dec!(70)));
    assert_eq!(report.title, "Attenzione!");
    assert_eq!(warnings(&report), vec!["Spese del Personale", "Alimentari"]);
    assert!(report.lines.contains(&ReportLine::Warning {
        title: "Spese del Personale".into(),
        ratio: "34,00%".into(),
        limit: "33%".into(),
        advice: Some(Group::Personnel.advice()),
    }));
    assert!(!report.lines.contains(&ReportLine::Praise));
    assert_eq!(report.utterances, vec![SPEECH_CATEGORIES_OVER]);
}

#[test]
fn test_report_total_over_hundred() {
    let report = Report::build(&result(dec!(20), dec!(10), dec!(101)));
    assert_eq!(report.title, "Attenzione!");
    assert!(warnings(&report).is_empty());
    assert!(report.lines.contains(&ReportLine::Total {
        value: "101,00%".into(),
        over: true
    }));
    assert_eq!(report.utterances, vec![SPEECH_TOTAL_OVER]);
}

#[test]
fn test_report_both_alerts() {
    let report = Report::build(&result(dec!(40), dec!(30), dec!(120)));
    assert_eq!(
        report.utterances,
        vec![SPEECH_TOTAL_OVER, SPEECH_CATEGORIES_OVER]
    );
}

#[test]
fn test_plain_text_contains_warnings() {
    let text = Report::build(&result(dec!(34), dec!(26), dec!(70))).to_plain_text();
    assert!(text.starts_with("Attenzione!"));
    assert!(text.contains("! Spese del Personale: 34,00% (limite 33%)"));
    assert!(text.contains("Controlla i turni"));
    assert!(text.contains("! Alimentari: 26,00% (limite 25%)"));
    assert!(text.contains("Totale spese su incasso: 70,00%"));
}

#[test]
fn test_dispatch_presents_and_speaks() {
    let mut presenter = RecordingPresenter::default();
    let mut speaker = RecordingSpeaker::default();
    dispatch(
        &result(dec!(34), dec!(10), dec!(101)),
        &mut presenter,
        &mut speaker,
    );
    assert_eq!(presenter.shown.len(), 1);
    assert!(presenter.shown[0].1);
    assert_eq!(speaker.spoken.len(), 1);
    assert!(speaker.spoken[0].contains("cento per cento"));
    assert!(speaker.spoken[0].contains("soglie di spesa"));
}

#[test]
fn test_dispatch_all_clear_flag() {
    let mut presenter = RecordingPresenter::default();
    dispatch(
        &result(dec!(10), dec!(10), dec!(30)),
        &mut presenter,
        &mut MutedSpeaker,
    );
    assert!(!presenter.shown[0].1);
}
