/// Identity primary keys are assigned by storage as 64-bit integers.
pub type DbId = i64;

/// Placeholder printed in place of credential material in `Debug` output.
pub const REDACTED_VALUE: &str = "***REDACTED***";
