//! Debounce gate that suppresses rapid-fire re-validation.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::report::ValidationReport;

/// Minimum time between two real validation runs.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(5);

/// Single-slot cache of the last completed validation report.
///
/// The slot is deliberately not keyed by ecosystem tag: an invocation
/// right after a tag change can be handed the previous tag's report while
/// the window is open. The expected invocation pattern (same directory,
/// repeated hook firings in a burst) makes that an accepted trade-off.
#[derive(Debug)]
pub struct DebounceGate {
    window: Duration,
    last: Option<DebounceSlot>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct DebounceSlot {
    completed_at: Instant,
    report: ValidationReport,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Return the cached report if it is younger than the window, otherwise
    /// call `run`, store its report, and return it.
    pub fn get_or_run<F>(&mut self, run: F) -> ValidationReport
    where
        F: FnOnce() -> ValidationReport,
    {
        if let Some(slot) = &self.last {
            let age = slot.completed_at.elapsed();
            if age < self.window {
                debug!(age_ms = age.as_millis() as u64, "debounced, reusing report");
                return slot.report.clone();
            }
        }

        let report = run();
        self.last = Some(DebounceSlot {
            completed_at: Instant::now(),
            report: report.clone(),
        });
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecosystem::EcosystemTag;

    fn report_for(tag: EcosystemTag) -> ValidationReport {
        ValidationReport {
            project_type: tag,
            validations: vec![],
            message: None,
        }
    }

    #[test]
    fn second_call_within_window_reuses_report() {
        let mut gate = DebounceGate::new();
        let mut runs = 0;

        let first = gate.get_or_run(|| {
            runs += 1;
            report_for(EcosystemTag::Go)
        });
        let second = gate.get_or_run(|| {
            runs += 1;
            report_for(EcosystemTag::Go)
        });

        assert_eq!(runs, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn elapsed_window_triggers_a_fresh_run() {
        let mut gate = DebounceGate::with_window(Duration::ZERO);
        let mut runs = 0;

        gate.get_or_run(|| {
            runs += 1;
            report_for(EcosystemTag::Go)
        });
        gate.get_or_run(|| {
            runs += 1;
            report_for(EcosystemTag::Go)
        });

        assert_eq!(runs, 2);
    }

    #[test]
    fn stale_report_survives_tag_change() {
        // The slot keys only on time, not tag: a burst that crosses a tag
        // change still sees the earlier tag's report.
        let mut gate = DebounceGate::new();

        gate.get_or_run(|| report_for(EcosystemTag::Go));
        let reused = gate.get_or_run(|| report_for(EcosystemTag::Python));

        assert_eq!(reused.project_type, EcosystemTag::Go);
    }
}
