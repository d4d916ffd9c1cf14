pub mod app;
pub mod time_picker_field;
