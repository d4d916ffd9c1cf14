use crate::constants::SECONDS_PER_DAY;
use crate::time::TimeOfDay;

/// One selectable entry of the overlay list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotEntry {
    pub index: usize,
    pub time: TimeOfDay,
    /// Locale-formatted text shown in the list and written into the field.
    pub display: String,
    /// Zero-padded 24-hour `HH:MM`, the value submitted to the server.
    pub canonical: String,
}

/// The ordered sequence of fixed-interval time slots spanning one day,
/// starting at midnight. Populated lazily, once, for the field's lifetime.
#[derive(Clone, Debug, Default)]
pub struct SlotList {
    entries: Vec<SlotEntry>,
}

impl SlotList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate `86400 / interval` entries, `interval_secs` apart.
    ///
    /// Idempotent: an already-populated list is left untouched, so repeated
    /// construction cannot duplicate entries. An interval that does not
    /// evenly divide a day gets a floored entry count; a zero interval yields
    /// an empty list rather than a panic.
    pub fn populate(&mut self, interval_secs: u32) {
        if !self.entries.is_empty() || interval_secs == 0 {
            return;
        }

        let count = SECONDS_PER_DAY / interval_secs;
        self.entries = (0..count)
            .filter_map(|i| {
                let time = TimeOfDay::from_seconds_of_day(i * interval_secs)?;
                Some(SlotEntry {
                    index: i as usize,
                    time,
                    display: time.format_display(),
                    canonical: time.format_canonical(),
                })
            })
            .collect();
    }

    #[must_use]
    pub fn entries(&self) -> &[SlotEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SlotEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose display or canonical text has `text` as a
    /// case-insensitive prefix. An empty prefix would match every entry, so
    /// a cleared field never selects a candidate.
    #[must_use]
    pub fn find_candidate(&self, text: &str) -> Option<usize> {
        let needle = text.to_uppercase();
        if needle.trim().is_empty() {
            return None;
        }
        self.entries.iter().position(|entry| {
            entry.display.to_uppercase().starts_with(&needle)
                || entry.canonical.starts_with(&needle)
        })
    }
}
