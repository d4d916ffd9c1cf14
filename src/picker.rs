use crate::slots::SlotList;
use crate::time::TimeOfDay;

/// Outcome of pressing Enter while the text field has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterAction {
    /// Commit the highlighted candidate entry.
    Commit(usize),
    /// No candidate; the list is closed and the default action suppressed.
    HideOnly,
}

/// Focus/commit transition for a key pressed while a list entry has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListNav {
    FocusEntry(usize),
    FocusField,
    Commit(usize),
}

/// State of one picker field: the current text and its parsed value, the
/// overlay list, its visibility, and the highlighted candidate.
///
/// Markup attributes are read once at construction; from then on this struct
/// is the only store. All mutation happens on discrete input callbacks, so
/// every method runs to completion before the next event arrives.
#[derive(Clone, Debug, Default)]
pub struct PickerState {
    slots: SlotList,
    text: String,
    value: Option<TimeOfDay>,
    original_text: String,
    original: Option<TimeOfDay>,
    list_visible: bool,
    candidate: Option<usize>,
}

impl PickerState {
    /// Build widget state from the declared initial value and slot interval.
    #[must_use]
    pub fn new(initial_text: &str, interval_secs: u32) -> Self {
        let mut slots = SlotList::new();
        slots.populate(interval_secs);
        let original = TimeOfDay::parse(initial_text);

        Self {
            slots,
            text: initial_text.to_string(),
            value: original,
            original_text: initial_text.to_string(),
            original,
            list_visible: false,
            candidate: None,
        }
    }

    #[must_use]
    pub fn slots(&self) -> &SlotList {
        &self.slots
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn value(&self) -> Option<TimeOfDay> {
        self.value
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.list_visible
    }

    #[must_use]
    pub fn candidate(&self) -> Option<usize> {
        self.candidate
    }

    /// Replace the field text, reparsing the stored value.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.value = TimeOfDay::parse(text);
    }

    pub fn show(&mut self) {
        self.list_visible = true;
    }

    /// Candidates are not meaningful across separate open/close cycles, so
    /// hiding clears the highlight.
    pub fn hide(&mut self) {
        self.list_visible = false;
        self.candidate = None;
    }

    /// Handle a keystroke: re-show the list and move the highlight to the
    /// first entry matching the typed prefix.
    ///
    /// Returns the newly matched index so the caller can scroll it into
    /// view; `None` (no match) leaves the highlight state unchanged.
    pub fn on_input(&mut self, text: &str) -> Option<usize> {
        self.set_text(text);
        self.show();

        let matched = self.slots.find_candidate(text);
        if matched.is_some() {
            self.candidate = matched;
        }
        matched
    }

    /// Commit a slot entry: parse its canonical value, store the result, and
    /// close the list. Returns the display text to write into the field.
    pub fn commit(&mut self, index: usize) -> Option<String> {
        let entry = self.slots.get(index)?;
        let time = TimeOfDay::parse(&entry.canonical)?;
        let display = time.format_display();

        self.text = display.clone();
        self.value = Some(time);
        self.hide();

        Some(display)
    }

    /// Enter pressed while the field has focus. Either way the caller must
    /// suppress the default action so no enclosing form is submitted.
    pub fn on_field_enter(&mut self) -> EnterAction {
        if self.list_visible {
            if let Some(index) = self.candidate {
                return EnterAction::Commit(index);
            }
        }

        self.hide();
        EnterAction::HideOnly
    }

    /// Navigation for a key pressed while list entry `index` has focus.
    /// ArrowDown at the last entry is a no-op; ArrowUp at the first entry
    /// returns focus to the field.
    #[must_use]
    pub fn list_nav(&self, key: &str, index: usize) -> Option<ListNav> {
        match key {
            "ArrowDown" => {
                if index + 1 < self.slots.len() {
                    Some(ListNav::FocusEntry(index + 1))
                } else {
                    None
                }
            }
            "ArrowUp" => Some(if index == 0 {
                ListNav::FocusField
            } else {
                ListNav::FocusEntry(index - 1)
            }),
            "Enter" => Some(ListNav::Commit(index)),
            _ => None,
        }
    }

    /// Canonical value for form submission; empty when the field is empty or
    /// unparsable.
    #[must_use]
    pub fn submission_value(&self) -> String {
        self.value.map_or_else(String::new, TimeOfDay::format_canonical)
    }

    /// Restore the text captured at construction.
    pub fn reset(&mut self) {
        self.text = self.original_text.clone();
        self.value = self.original;
        self.hide();
    }

    /// Compares parsed values, not raw text, so "9:00 AM" and "09:00" count
    /// as the same value.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.value != self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly_picker() -> PickerState {
        PickerState::new("", 3600)
    }

    #[test]
    fn test_not_dirty_after_construction() {
        assert!(!hourly_picker().is_dirty());
        assert!(!PickerState::new("14:30", 3600).is_dirty());
    }

    #[test]
    fn test_show_hide_clears_candidate() {
        let mut picker = hourly_picker();
        picker.on_input("2");
        assert!(picker.is_visible());
        assert!(picker.candidate().is_some());

        picker.hide();
        assert!(!picker.is_visible());
        assert_eq!(picker.candidate(), None);
    }

    #[test]
    fn test_on_input_highlights_single_candidate() {
        let mut picker = hourly_picker();
        let matched = picker.on_input("2").expect("should match");
        assert_eq!(picker.candidate(), Some(matched));
        assert_eq!(
            picker.slots().get(matched).map(|e| e.canonical.as_str()),
            Some("02:00")
        );
    }

    #[test]
    fn test_on_input_no_match_keeps_previous_candidate() {
        let mut picker = hourly_picker();
        picker.on_input("2");
        let previous = picker.candidate();

        assert!(picker.on_input("zzz").is_none());
        assert_eq!(picker.candidate(), previous);
        assert!(picker.is_visible());
    }

    #[test]
    fn test_cleared_field_does_not_commit_first_entry() {
        let mut picker = hourly_picker();
        assert!(picker.on_input("").is_none());
        assert_eq!(picker.candidate(), None);
        // With nothing highlighted, Enter must close the list, not commit
        // midnight.
        assert_eq!(picker.on_field_enter(), EnterAction::HideOnly);
        assert_eq!(picker.submission_value(), "");
    }

    #[test]
    fn test_on_input_no_match_on_short_list() {
        let mut picker = PickerState::new("", 43_200);
        assert!(picker.on_input("9").is_none());
        assert_eq!(picker.candidate(), None);
    }

    #[test]
    fn test_commit_updates_value_and_hides() {
        let mut picker = hourly_picker();
        picker.show();
        let display = picker.commit(14).expect("should commit");

        assert_eq!(display, "2:00 PM");
        assert_eq!(picker.text(), "2:00 PM");
        assert_eq!(picker.submission_value(), "14:00");
        assert!(!picker.is_visible());
        assert!(picker.is_dirty());
    }

    #[test]
    fn test_commit_out_of_range_index() {
        let mut picker = hourly_picker();
        assert!(picker.commit(99).is_none());
        assert_eq!(picker.submission_value(), "");
    }

    #[test]
    fn test_field_enter_commits_candidate() {
        let mut picker = hourly_picker();
        let matched = picker.on_input("2").expect("should match");
        assert_eq!(picker.on_field_enter(), EnterAction::Commit(matched));
    }

    #[test]
    fn test_field_enter_without_candidate_hides() {
        let mut picker = hourly_picker();
        picker.show();
        assert_eq!(picker.on_field_enter(), EnterAction::HideOnly);
        assert!(!picker.is_visible());
    }

    #[test]
    fn test_field_enter_with_stale_candidate_after_hide() {
        let mut picker = hourly_picker();
        picker.on_input("2");
        picker.hide();
        // The list is closed, so the old candidate must not be committed.
        assert_eq!(picker.on_field_enter(), EnterAction::HideOnly);
    }

    #[test]
    fn test_list_nav_arrow_down() {
        let picker = hourly_picker();
        assert_eq!(picker.list_nav("ArrowDown", 0), Some(ListNav::FocusEntry(1)));
        assert_eq!(picker.list_nav("ArrowDown", 23), None);
    }

    #[test]
    fn test_list_nav_arrow_up() {
        let picker = hourly_picker();
        assert_eq!(picker.list_nav("ArrowUp", 5), Some(ListNav::FocusEntry(4)));
        assert_eq!(picker.list_nav("ArrowUp", 0), Some(ListNav::FocusField));
    }

    #[test]
    fn test_list_nav_enter_and_other_keys() {
        let picker = hourly_picker();
        assert_eq!(picker.list_nav("Enter", 7), Some(ListNav::Commit(7)));
        assert_eq!(picker.list_nav("Tab", 7), None);
    }

    #[test]
    fn test_submission_value_parses_typed_text() {
        let mut picker = hourly_picker();
        picker.set_text("2:30 PM");
        assert_eq!(picker.submission_value(), "14:30");

        picker.set_text("banana");
        assert_eq!(picker.submission_value(), "");
    }

    #[test]
    fn test_reset_restores_original_text() {
        let mut picker = PickerState::new("9:00 AM", 3600);
        picker.set_text("14:30");
        assert!(picker.is_dirty());

        picker.reset();
        assert_eq!(picker.text(), "9:00 AM");
        assert_eq!(picker.submission_value(), "09:00");
        assert!(!picker.is_dirty());
    }

    #[test]
    fn test_dirty_compares_parsed_values() {
        let mut picker = PickerState::new("9:00 AM", 3600);
        // Different spelling of the same time is not a change.
        picker.set_text("09:00");
        assert!(!picker.is_dirty());
    }
}
