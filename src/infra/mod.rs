pub mod assets;
pub mod error;
pub mod http;
pub mod memstore;
pub mod telemetry;
pub mod uploads;
