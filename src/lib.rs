pub mod components;
pub mod constants;
pub mod field;
pub mod form;
pub mod logging;
pub mod picker;
pub mod slots;
pub mod time;

pub use components::app::App;
