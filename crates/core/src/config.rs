//! Enrollment limits read from the environment.

/// Default cap on rows accepted in one enrollment submission.
pub const DEFAULT_ENROLL_MAX_ROWS: usize = 150;

/// Enrollment limits loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentConfig {
    /// Maximum rows per submission (default: `150`).
    pub max_rows: usize,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_ENROLL_MAX_ROWS,
        }
    }
}

impl EnrollmentConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default |
    /// |-------------------|---------|
    /// | `ENROLL_MAX_ROWS` | `150`   |
    ///
    /// Unparsable or zero values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_rows = lookup("ENROLL_MAX_ROWS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(|| {
                tracing::debug!(default = DEFAULT_ENROLL_MAX_ROWS, "Using default ENROLL_MAX_ROWS");
                DEFAULT_ENROLL_MAX_ROWS
            });

        Self { max_rows }
    }
}
