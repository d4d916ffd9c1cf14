/// Seconds in one calendar day; slot counts are derived from this.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Default slot interval for the overlay list (15 minutes).
pub const DEFAULT_INTERVAL_SECS: u32 = 900;
