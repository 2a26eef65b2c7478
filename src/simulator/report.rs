//! Simulation report generation.

use super::config::{Distribution, SimConfig};
use crate::error::Result;
use crate::stats::{Accumulator, Estimate};
use serde::Serialize;

/// One reported statistic: a Monte Carlo value next to its closed form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: f64,
    /// None for quantile statistics, which are not sample means.
    pub std_error: Option<f64>,
    pub ci95: Option<(f64, f64)>,
    pub expected: Option<f64>,
}

impl StatLine {
    pub fn from_estimate(
        label: impl Into<String>,
        estimate: &Estimate,
        expected: Option<f64>,
    ) -> Result<Self> {
        Ok(Self {
            label: label.into(),
            value: estimate.mean,
            std_error: Some(estimate.std_error()),
            ci95: Some(estimate.confidence_interval(0.95)?),
            expected,
        })
    }

    pub fn point(label: impl Into<String>, value: f64, expected: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value,
            std_error: None,
            ci95: None,
            expected,
        }
    }

    pub fn abs_error(&self) -> Option<f64> {
        self.expected.map(|e| (self.value - e).abs())
    }

    /// Whether the closed form falls inside the 95% interval.
    pub fn covers_expected(&self) -> Option<bool> {
        let (lo, hi) = self.ci95?;
        self.expected.map(|e| lo <= e && e <= hi)
    }
}

/// Results of one seeded repetition.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub run: u32,
    pub seed: Option<u64>,
    pub lines: Vec<StatLine>,
}

/// Spread of one statistic across repetitions.
#[derive(Debug, Clone, Serialize)]
pub struct LineSummary {
    pub label: String,
    pub mean: f64,
    pub std_dev_across_runs: f64,
    pub expected: Option<f64>,
}

/// Mean absolute deviation from the closed form at one sample count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergencePoint {
    pub sample_count: u64,
    pub repeats: u32,
    pub mean_abs_error: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub distribution: Distribution,
    pub sample_count: u64,
    pub num_runs: u32,
    pub runs: Vec<RunResult>,
    pub summary: Vec<LineSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub convergence: Vec<ConvergencePoint>,
}

impl SimReport {
    /// Create a new report from completed runs.
    pub fn from_runs(config: &SimConfig, runs: Vec<RunResult>) -> Self {
        let line_count = runs.first().map(|r| r.lines.len()).unwrap_or(0);
        let summary = (0..line_count)
            .filter_map(|i| {
                let mut acc = Accumulator::new();
                for run in &runs {
                    if let Some(line) = run.lines.get(i) {
                        acc.push(line.value);
                    }
                }
                let first = &runs.first()?.lines[i];
                let est = acc.finish()?;
                Some(LineSummary {
                    label: first.label.clone(),
                    mean: est.mean,
                    std_dev_across_runs: est.std_dev,
                    expected: first.expected,
                })
            })
            .collect();

        Self {
            distribution: config.distribution,
            sample_count: config.sample_count,
            num_runs: runs.len() as u32,
            runs,
            summary,
            convergence: Vec::new(),
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 MONTE CARLO ESTIMATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Experiment: {}   Samples/run: {}   Runs: {}\n\n",
            self.distribution.as_str(),
            self.sample_count,
            self.num_runs
        ));

        for run in &self.runs {
            let seed = run
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string());
            report.push_str(&format!(
                "── RUN {} (seed {}) ──────────────────────────────────────────\n",
                run.run + 1,
                seed
            ));
            for line in &run.lines {
                push_line(&mut report, line);
            }
            report.push('\n');
        }

        if self.num_runs > 1 {
            report.push_str("── ACROSS RUNS ──────────────────────────────────────────────────\n");
            for s in &self.summary {
                report.push_str(&format!("  {}\n", s.label));
                report.push_str(&format!(
                    "    Mean:             {:.6}   (sd across runs {:.6})\n",
                    s.mean, s.std_dev_across_runs
                ));
                if let Some(expected) = s.expected {
                    report.push_str(&format!("    Expected:         {:.6}\n", expected));
                }
            }
            report.push('\n');
        }

        if !self.convergence.is_empty() {
            report.push_str(&convergence_text(&self.convergence));
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn push_line(report: &mut String, line: &StatLine) {
    report.push_str(&format!("  {}\n", line.label));
    report.push_str(&format!("    Estimate:         {:.6}\n", line.value));
    if let Some(se) = line.std_error {
        report.push_str(&format!("    Std Error:        {:.6}\n", se));
    }
    if let Some((lo, hi)) = line.ci95 {
        report.push_str(&format!("    95% CI:           [{:.6}, {:.6}]\n", lo, hi));
    }
    if let Some(expected) = line.expected {
        report.push_str(&format!("    Expected:         {:.6}\n", expected));
    }
    if let Some(err) = line.abs_error() {
        report.push_str(&format!("    Abs Error:        {:.6}\n", err));
    }
    if line.covers_expected() == Some(false) {
        report.push_str("    ⚠️  Expected value outside the 95% interval\n");
    }
}

/// Render a convergence table.
pub fn convergence_text(points: &[ConvergencePoint]) -> String {
    let mut text = String::new();
    text.push_str("── CONVERGENCE ──────────────────────────────────────────────────\n");
    text.push_str("  Samples        Repeats   Mean |error|\n");
    text.push_str("  ───────        ───────   ────────────\n");
    for p in points {
        text.push_str(&format!(
            "  {:<14} {:<9} {:.6}\n",
            p.sample_count, p.repeats, p.mean_abs_error
        ));
    }
    text.push('\n');
    text
}
