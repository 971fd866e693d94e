//! Cassettes: YAML records of port interactions, replayable in tests.

pub mod format;
pub mod recorder;
pub mod replayer;
