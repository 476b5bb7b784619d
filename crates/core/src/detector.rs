//! Working-directory ecosystem detection with a TTL-bounded cache.

use std::path::Path;
use std::time::{Duration, Instant};

use globset::Glob;
use tracing::debug;

use crate::ecosystem::{EcosystemTag, Marker, MARKER_RULES};

/// How long one detection result stays valid before the directory is
/// rescanned.
pub const DETECTION_TTL: Duration = Duration::from_secs(60);

/// Detects which ecosystem occupies a directory, caching the answer.
///
/// The cache is a single slot owned by this value (not a process global),
/// refreshed whenever a scan runs and trusted until its TTL elapses.
#[derive(Debug)]
pub struct ProjectDetector {
    cache: Option<CachedDetection>,
    ttl: Duration,
    scans: u64,
}

#[derive(Debug)]
struct CachedDetection {
    tag: EcosystemTag,
    refreshed_at: Instant,
}

impl Default for ProjectDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDetector {
    pub fn new() -> Self {
        Self::with_ttl(DETECTION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: None,
            ttl,
            scans: 0,
        }
    }

    /// Resolve the ecosystem tag for `dir`.
    ///
    /// Never fails: unreadable directories and unmatched markers both fall
    /// back to [`EcosystemTag::Default`].
    pub fn detect(&mut self, dir: &Path) -> EcosystemTag {
        if let Some(cached) = &self.cache {
            if cached.refreshed_at.elapsed() < self.ttl {
                debug!(tag = %cached.tag, "detection cache hit");
                return cached.tag;
            }
        }

        let tag = self.scan(dir);
        self.cache = Some(CachedDetection {
            tag,
            refreshed_at: Instant::now(),
        });
        tag
    }

    /// Number of real directory scans performed so far. Lets tests verify
    /// cache hits without filesystem spies.
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    fn scan(&mut self, dir: &Path) -> EcosystemTag {
        self.scans += 1;
        for rule in MARKER_RULES {
            for marker in rule.markers {
                let matched = match marker {
                    Marker::Name(name) => dir.join(name).exists(),
                    Marker::Glob(pattern) => glob_matches(dir, pattern),
                };
                if matched {
                    debug!(tag = %rule.tag, marker = ?marker, "marker matched");
                    return rule.tag;
                }
            }
        }
        debug!("no marker matched, using fallback tag");
        EcosystemTag::Default
    }
}

// Filesystem and pattern errors count as "no match for this marker":
// detection must keep scanning rather than fail.
fn glob_matches(dir: &Path, pattern: &str) -> bool {
    let Ok(glob) = Glob::new(pattern) else {
        return false;
    };
    let matcher = glob.compile_matcher();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries
        .flatten()
        .any(|entry| matcher.is_match(entry.file_name()))
}
