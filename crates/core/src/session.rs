//! Per-invocation hook state tying detector, debounce gate, and runner
//! together.

use std::path::PathBuf;

use crate::debounce::DebounceGate;
use crate::detector::ProjectDetector;
use crate::ecosystem::EcosystemTag;
use crate::report::ValidationReport;
use crate::runner::ValidationRunner;

/// Owns the detection cache and debounce slot for one hook invocation.
///
/// Both caches are plain fields here rather than process-wide globals, so
/// tests can build as many independent sessions as they like. The hook
/// binary is short-lived and single-threaded; a long-lived host embedding
/// this type across threads would need a lock around the check-then-run
/// sequences to avoid double-launching the runner.
pub struct HookSession {
    detector: ProjectDetector,
    gate: DebounceGate,
    runner: ValidationRunner,
    dir: PathBuf,
}

impl HookSession {
    pub fn new(dir: PathBuf) -> Self {
        Self::with_parts(
            ProjectDetector::new(),
            DebounceGate::new(),
            ValidationRunner::new(),
            dir,
        )
    }

    pub fn with_parts(
        detector: ProjectDetector,
        gate: DebounceGate,
        runner: ValidationRunner,
        dir: PathBuf,
    ) -> Self {
        Self {
            detector,
            gate,
            runner,
            dir,
        }
    }

    /// Resolve the ecosystem tag for the session's working directory.
    pub fn project_type(&mut self) -> EcosystemTag {
        self.detector.detect(&self.dir)
    }

    /// Detect, then run validations (or reuse the debounced report).
    pub fn validate(&mut self) -> ValidationReport {
        let tag = self.detector.detect(&self.dir);
        let runner = &self.runner;
        let dir = self.dir.as_path();
        self.gate.get_or_run(|| runner.run(tag, dir))
    }
}
