use crate::analysis::{AnalysisResult, Check};
use serde::Serialize;

pub const PASS_MARK: &str = "✅";
pub const FAIL_MARK: &str = "❌";

const DEFAULT_COLOR: &str = "#E5E7EB";
const BAR_WIDTH: usize = 20;

// ---------------------------------------------------------------------------
// Progress mapping
// ---------------------------------------------------------------------------

/// Completed share in `0.0..=1.0`. A zero total reads as no progress.
pub fn progress_fraction(completed: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(completed) / f64::from(total)
}

/// Indicator color keyed by the exact completed count.
pub fn progress_color(completed: u32) -> &'static str {
    match completed {
        0 => "#E5E7EB",
        1 => "#FBBF24",
        2 => "#F59E0B",
        3 => "#84CC16",
        4 => "#16A34A",
        _ => DEFAULT_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub check: Check,
    pub label: &'static str,
    pub passed: bool,
}

impl ReportLine {
    pub fn render(&self) -> String {
        let mark = if self.passed { PASS_MARK } else { FAIL_MARK };
        format!("{mark} {}", self.label)
    }
}

/// Everything a panel needs to display one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub heading: String,
    pub progress: f64,
    pub percent: f64,
    pub color: &'static str,
    pub aria_label: String,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn new(result: &AnalysisResult) -> Self {
        let completed = result.completed_count();
        let total = result.total_count();
        let progress = progress_fraction(completed, total);
        Self {
            heading: format!("{completed}/{total} user story sections completed"),
            progress,
            percent: progress * 100.0,
            color: progress_color(completed),
            aria_label: format!("{completed} out of {total} sections completed"),
            lines: result
                .checks()
                .iter()
                .map(|(check, passed)| ReportLine {
                    check,
                    label: check.label(),
                    passed,
                })
                .collect(),
        }
    }

    /// `[#########...........]  45%` style bar for terminals.
    pub fn progress_bar(&self) -> String {
        let filled = (self.progress * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        format!(
            "[{}{}] {:>3.0}%",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            self.percent
        )
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.heading);
        out.push('\n');
        out.push_str(&self.progress_bar());
        out.push('\n');
        for line in &self.lines {
            out.push_str(&line.render());
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn colors_follow_completed_count() {
        assert_eq!(progress_color(0), "#E5E7EB");
        assert_eq!(progress_color(1), "#FBBF24");
        assert_eq!(progress_color(2), "#F59E0B");
        assert_eq!(progress_color(3), "#84CC16");
        assert_eq!(progress_color(4), "#16A34A");
        assert_eq!(progress_color(9), DEFAULT_COLOR);
    }

    #[test]
    fn fraction_handles_zero_total() {
        assert_eq!(progress_fraction(2, 4), 0.5);
        assert_eq!(progress_fraction(0, 0), 0.0);
    }

    #[test]
    fn report_heading_and_lines() {
        let report = Report::new(&analyze("requirements and testing"));
        assert_eq!(report.heading, "2/4 user story sections completed");
        assert_eq!(report.aria_label, "2 out of 4 sections completed");
        assert_eq!(report.color, "#F59E0B");
        assert_eq!(report.percent, 50.0);

        let rendered: Vec<String> = report.lines.iter().map(ReportLine::render).collect();
        assert_eq!(
            rendered,
            vec![
                "❌ User Story Format",
                "✅ Acceptance Criteria",
                "✅ Test Cases",
                "❌ Dependencies / Assumptions",
            ]
        );
    }

    #[test]
    fn progress_bar_scales_with_count() {
        assert_eq!(
            Report::new(&analyze("")).progress_bar(),
            "[....................]   0%"
        );
        assert_eq!(
            Report::new(&analyze("given when then ac: testing assumption")).progress_bar(),
            "[####################] 100%"
        );
    }

    #[test]
    fn render_starts_with_heading() {
        let text = Report::new(&analyze("given when then")).render();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("1/4 user story sections completed"));
        assert!(lines.next().unwrap().starts_with("[#####"));
        assert_eq!(text.lines().count(), 6);
    }
}
