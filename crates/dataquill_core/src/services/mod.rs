//! Collaborator seams for the workbench.
//!
//! - `engine` - Engine trait and the simulated engine
//! - `schema` - SchemaSource trait, static and JSON file sources
//! - `notifications` - NotificationSink trait, channel and tracing sinks

pub mod engine;
pub mod notifications;
pub mod schema;

pub use engine::{DelayWindow, Engine, SimulatedEngine};
pub use notifications::{ChannelSink, NotificationSink, TracingSink};
pub use schema::{
    read_schema_file, sample_catalog, JsonFileSchemaSource, SchemaSource, StaticSchemaSource,
};
