//! Cassette format for recording and replaying hosting API exchanges.

pub mod format;
pub mod recorder;
pub mod replayer;
