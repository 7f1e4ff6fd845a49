pub mod events;
pub mod import;
pub mod settings;
pub mod uploads;
