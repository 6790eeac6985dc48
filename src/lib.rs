//! Typesetter Formatter - normalize raw dialogue scripts for typesetting.
//!
//! The library runs a fixed-order chain of line transforms over a script:
//! look-alike character normalization, decoration stripping, panel-label and
//! blank-line filtering, non-Latin line rejection, speaker-label extraction,
//! and repeated-character truncation. Each stage can be toggled through the
//! persisted configuration; the binary in `src/main.rs` wires the pipeline to
//! files and the interactive prompt.

pub mod config;
pub mod files;
pub mod pipeline;

pub use config::{Config, ConfigError};
pub use pipeline::{Confirm, ConfirmError, FeatureSet, Pipeline, PipelineOutput, StageReport};
