//! src/lib.rs
pub mod configuration;
pub mod emitter;
pub mod error;
pub mod functions;
pub mod mappers;
pub mod record;
pub mod reducers;
pub mod stage;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
