mod speech;

pub(crate) use speech::{MutedSpeaker, Speaker, SystemSpeaker};

use crate::evaluate::{format_euro, format_limit, format_percent};
use crate::models::EvaluationResult;

pub(crate) const SPEECH_TOTAL_OVER: &str =
    "Attenzione! Le spese totali superano il cento per cento dell'incasso.";
pub(crate) const SPEECH_CATEGORIES_OVER: &str =
    "Attenzione: alcune categorie superano le soglie di spesa.";
pub(crate) const SPEECH_ALL_CLEAR: &str = "Ottimo lavoro! Tutte le categorie sono entro i limiti.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReportLine {
    Field {
        label: &'static str,
        value: String,
    },
    Warning {
        title: String,
        ratio: String,
        limit: String,
        advice: Option<&'static str>,
    },
    Separator,
    Total {
        value: String,
        over: bool,
    },
    Praise,
}

/// Rendered content of the threshold popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Report {
    pub(crate) title: &'static str,
    pub(crate) lines: Vec<ReportLine>,
    pub(crate) utterances: Vec<&'static str>,
}

/// Receives a finished report. The TUI shows it as a blocking popup, the
/// CLI prints it.
pub(crate) trait Presenter {
    fn present(&mut self, report: Report, is_warning: bool);
}

impl Report {
    pub(crate) fn build(result: &EvaluationResult) -> Self {
        let mut lines = vec![
            ReportLine::Field {
                label: "Mese",
                value: format!("{} {}", result.month.display_name(), result.year),
            },
            ReportLine::Field {
                label: "Incasso",
                value: format!("€ {}", format_euro(result.revenue)),
            },
            ReportLine::Field {
                label: "Spese totali",
                value: format!("€ {}", format_euro(result.total_expense)),
            },
            ReportLine::Field {
                label: "Spese / Incasso",
                value: format_percent(result.total_expense_ratio),
            },
        ];

        for group in result.exceeded_groups() {
            lines.push(ReportLine::Warning {
                title: group.group.label().to_string(),
                ratio: format_percent(group.ratio),
                limit: format_limit(group.limit),
                advice: Some(group.group.advice()),
            });
        }

        for cat in result.exceeded_categories() {
            lines.push(ReportLine::Warning {
                title: cat.category.label(),
                ratio: format_percent(cat.ratio),
                limit: format_limit(cat.limit),
                advice: None,
            });
        }

        lines.push(ReportLine::Separator);
        lines.push(ReportLine::Total {
            value: format_percent(result.sum_of_ratios),
            over: result.sum_exceeds_revenue(),
        });

        let mut utterances = Vec::new();
        if result.sum_exceeds_revenue() {
            utterances.push(SPEECH_TOTAL_OVER);
        }
        if result.any_exceeded() {
            utterances.push(SPEECH_CATEGORIES_OVER);
        }

        let title = if result.over_limit_overall {
            "Attenzione!"
        } else {
            lines.push(ReportLine::Praise);
            utterances.push(SPEECH_ALL_CLEAR);
            "Tutto sotto controllo"
        };

        Self {
            title,
            lines,
            utterances,
        }
    }

    pub(crate) fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(self.title);
        out.push('\n');
        out.push_str(&"─".repeat(40));
        out.push('\n');
        for line in &self.lines {
            match line {
                ReportLine::Field { label, value } => {
                    out.push_str(&format!("  {:<17} {value}\n", format!("{label}:")));
                }
                ReportLine::Warning {
                    title,
                    ratio,
                    limit,
                    advice,
                } => {
                    out.push_str(&format!("  ! {title}: {ratio} (limite {limit})\n"));
                    if let Some(advice) = advice {
                        out.push_str(&format!("    {advice}\n"));
                    }
                }
                ReportLine::Separator => {
                    out.push_str(&"─".repeat(40));
                    out.push('\n');
                }
                ReportLine::Total { value, .. } => {
                    out.push_str(&format!("  Totale spese su incasso: {value}\n"));
                }
                ReportLine::Praise => {
                    out.push_str("  Tutto entro i limiti. Ottimo lavoro!\n");
                }
            }
        }
        out
    }
}

/// Build the report for `result`, narrate it and hand it to the presenter.
pub(crate) fn dispatch(
    result: &EvaluationResult,
    presenter: &mut impl Presenter,
    speaker: &mut dyn Speaker,
) {
    let report = Report::build(result);
    if !report.utterances.is_empty() {
        speaker.speak(&report.utterances.join(" "));
    }
    presenter.present(report, result.over_limit_overall);
}

#[cfg(test)]
mod tests;
