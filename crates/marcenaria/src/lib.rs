pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod snapshot;
pub mod telemetry;
pub mod workflows;
