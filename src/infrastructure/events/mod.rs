//! Event sink implementations

mod json;

pub use json::{event_json, JsonEventSink};
