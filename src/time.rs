use chrono::{Local, NaiveDateTime, Timelike};

/// Parse attempts, in order: each prefixes today's calendar date to the typed
/// text with a separator convention and hands the result to chrono's generic
/// date-time parser. The `T` convention reads bare `H:MM`/`HH:MM` as 24-hour
/// time; the space convention requires an am/pm marker and reads `2:30 PM` as
/// 14:30. Reusing the generic parser avoids a custom grammar for the
/// 12/24-hour ambiguity.
const PARSE_ATTEMPTS: &[(&str, &str)] = &[
    ("T", "%Y-%m-%dT%H:%M"),
    (" ", "%Y-%m-%d %I:%M %p"),
];

/// A wall-clock time of day at minute precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(chrono::NaiveTime);

impl TimeOfDay {
    #[must_use]
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        chrono::NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    #[must_use]
    pub fn from_seconds_of_day(seconds: u32) -> Option<Self> {
        chrono::NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).map(Self)
    }

    /// Parse free-form user input as a time of day.
    ///
    /// Accepts 24-hour `H:MM`/`HH:MM` and 12-hour `H:MM am/pm` (whitespace
    /// around the meridiem marker is optional, case is ignored). The calendar
    /// date used during parsing is discarded; only hours and minutes survive.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let today = Local::now().format("%Y-%m-%d").to_string();
        PARSE_ATTEMPTS.iter().find_map(|(separator, format)| {
            NaiveDateTime::parse_from_str(&format!("{today}{separator}{trimmed}"), format)
                .ok()
                .map(|datetime| Self(datetime.time()))
        })
    }

    /// Locale-aware short time string for display, e.g. "2:30 PM".
    ///
    /// In the browser this asks `Intl.DateTimeFormat` so that 12/24-hour
    /// display follows the user's locale; the canonical submission value is
    /// unaffected either way.
    #[must_use]
    pub fn format_display(self) -> String {
        #[cfg(target_arch = "wasm32")]
        if let Some(text) = self.locale_display() {
            return text;
        }

        self.0.format("%-I:%M %p").to_string()
    }

    /// Canonical zero-padded 24-hour `HH:MM`, the only form submitted to the
    /// server. Round-trips losslessly through `parse`.
    #[must_use]
    pub fn format_canonical(self) -> String {
        format!("{:02}:{:02}", self.0.hour(), self.0.minute())
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    #[cfg(target_arch = "wasm32")]
    fn locale_display(self) -> Option<String> {
        use wasm_bindgen::JsValue;

        let date = js_sys::Date::new_0();
        date.set_hours(self.0.hour());
        date.set_minutes(self.0.minute());
        date.set_seconds(0);

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"hour".into(), &"numeric".into()).ok()?;
        js_sys::Reflect::set(&options, &"minute".into(), &"2-digit".into()).ok()?;

        let formatter = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &options);
        formatter
            .format()
            .call1(&JsValue::NULL, &date)
            .ok()
            .and_then(|value| value.as_string())
    }
}
