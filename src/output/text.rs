//! Plain-text output printed outside the TUI.
//!
//! Colors come from yansi and follow its global switch, so `--no-color`
//! turns them off everywhere with `yansi::disable()`.

use std::path::Path;

use yansi::Paint;

use super::json::QuizReport;
use crate::dataset::DatasetOverview;
use crate::tui::format_percent;

/// Summary printed after the TUI exits.
#[must_use]
pub fn format_quiz_summary(report: &QuizReport) -> String {
    let mut out = String::new();
    let heading = report.title.as_deref().unwrap_or("Quiz");

    if report.completed {
        let percent = format_percent(report.percent);
        let percent = if report.percent >= 50.0 {
            percent.green().bold().to_string()
        } else {
            percent.red().bold().to_string()
        };
        out.push_str(&format!(
            "{} complete: {}/{} correct ({})\n",
            heading.bold(),
            report.score,
            report.total,
            percent
        ));
    } else {
        out.push_str(&format!(
            "{} not finished: {}/{} correct after {} of {} questions\n",
            heading.bold(),
            report.score,
            report.total,
            report.answered,
            report.total
        ));
    }

    for attempt in report.attempts.iter().filter(|a| !a.correct) {
        out.push_str(&format!(
            "  {} Q{}: {} (answer: {})\n",
            "✗".red(),
            attempt.position,
            attempt.prompt,
            attempt.correct_answer.join(", ").green()
        ));
    }

    out
}

/// Overview printed by `check`.
#[must_use]
pub fn format_overview(path: &Path, overview: &DatasetOverview) -> String {
    let mut out = format!("{} {}\n", "✓".green().bold(), path.display());
    if let Some(title) = &overview.title {
        out.push_str(&format!("  title:         {}\n", title.bold()));
    }
    out.push_str(&format!("  questions:     {}\n", overview.total));
    out.push_str(&format!("  single answer: {}\n", overview.single_answer));
    out.push_str(&format!("  two answers:   {}\n", overview.dual_answer));
    out
}
