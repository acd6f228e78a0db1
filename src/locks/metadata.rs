//! Lock metadata payload and its line format.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::fs;
use std::io;
use std::path::Path;

/// Diagnostic payload written into the `LOCK` file by the holder.
///
/// Rendered as exactly two lines:
///
/// ```text
/// pid=<decimal integer>
/// acquired_at=<RFC3339 timestamp with nanoseconds>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockMetadata {
    /// Process ID of the lock holder.
    pub pid: u32,

    /// When the lock was acquired.
    pub acquired_at: DateTime<Utc>,
}

impl LockMetadata {
    /// Metadata for the current process, timestamped now.
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
            acquired_at: Utc::now(),
        }
    }

    /// Render the payload written to the lock file.
    pub fn render(&self) -> String {
        format!(
            "pid={}\nacquired_at={}\n",
            self.pid,
            self.acquired_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
        )
    }

    /// Parse a payload leniently.
    ///
    /// Unknown keys and blank lines are skipped. Returns `None` unless both
    /// `pid` and `acquired_at` are present and valid, which is the normal case
    /// for a payload that was half-written or left by another tool.
    pub fn parse(content: &str) -> Option<Self> {
        let mut pid = None;
        let mut acquired_at = None;

        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            match key.trim() {
                "pid" => pid = value.trim().parse::<u32>().ok(),
                "acquired_at" => {
                    acquired_at = DateTime::parse_from_rfc3339(value.trim())
                        .ok()
                        .map(|ts| ts.with_timezone(&Utc));
                }
                _ => {}
            }
        }

        Some(Self {
            pid: pid?,
            acquired_at: acquired_at?,
        })
    }

    /// Read and parse the payload at `path`.
    ///
    /// I/O errors are returned; an unparseable payload yields `Ok(None)`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Option<Self>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// How long ago the lock was acquired.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.acquired_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", seconds.max(0))
        }
    }
}
