//! Named wall-clock timers.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use super::color::Palette;

/// Accumulates elapsed time per named section.
///
/// `tic` starts a section, `toc` stops it and adds the elapsed time to that
/// section's total. Sections are reported in name order.
#[derive(Debug, Clone)]
pub struct Timer {
    module: String,
    report_average: bool,
    started: BTreeMap<String, Instant>,
    totals: BTreeMap<String, Duration>,
    counts: BTreeMap<String, u32>,
}

impl Timer {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            report_average: false,
            started: BTreeMap::new(),
            totals: BTreeMap::new(),
            counts: BTreeMap::new(),
        }
    }

    /// Report the mean per `toc` instead of the running total.
    pub fn with_average(mut self, report_average: bool) -> Self {
        self.report_average = report_average;
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Start (or restart) the named section.
    pub fn tic(&mut self, name: impl Into<String>) {
        self.started.insert(name.into(), Instant::now());
    }

    /// Stop the named section. Returns `None` if it was never started.
    pub fn toc(&mut self, name: &str) -> Option<Duration> {
        let start = self.started.remove(name)?;
        let elapsed = start.elapsed();
        self.record(name, elapsed);
        Some(elapsed)
    }

    /// Add an externally measured interval.
    pub fn record(&mut self, name: &str, elapsed: Duration) {
        *self.totals.entry(name.to_string()).or_default() += elapsed;
        *self.counts.entry(name.to_string()).or_default() += 1;
    }

    /// Reported duration for a section (total or mean).
    pub fn elapsed(&self, name: &str) -> Option<Duration> {
        let total = *self.totals.get(name)?;
        if self.report_average {
            let n = self.counts.get(name).copied().unwrap_or(1).max(1);
            Some(total / n)
        } else {
            Some(total)
        }
    }

    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Render all sections, one line each, between dotted rules.
    pub fn report(&self, palette: &Palette) -> String {
        let mut out = String::from(".....\n");
        for name in self.totals.keys() {
            let Some(elapsed) = self.elapsed(name) else { continue };
            let _ = writeln!(
                out,
                "[{}{}{}{}]{}{}{}:{:.3} ms",
                palette.bold,
                palette.green,
                self.module,
                palette.end,
                palette.cyan,
                name,
                palette.end,
                elapsed.as_secs_f64() * 1e3,
            );
        }
        out.push_str(".....\n");
        out
    }
}
