//! The line-transformation pipeline.
//!
//! A script is a `Vec<String>` of lines. The pipeline runs a fixed-order
//! chain of [`Transform`] passes over it, each gated by a [`FeatureSet`]
//! flag. Order matters: normalization must run before classification and
//! decoration stripping, and classification must run before speaker
//! extraction, because later stages assume validated character sets.
//!
//! The orchestrator exclusively owns the working sequence for the duration
//! of one run; no transform retains state across runs. The only external
//! interaction is the [`Confirm`] capability used by the speaker-label
//! extractor for ambiguous prefixes.

mod confirm;
mod transforms;

pub use confirm::{Confirm, ConfirmError};
pub use transforms::{
    BlankLineFilter, CharNormalizer, ColonDecision, DecorationStripper, LatinScriptFilter,
    PanelFilter, RunCollapse, SpeakerLabelExtractor,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single pass over the working line sequence.
///
/// Implementations rebuild the sequence rather than aliasing into it and
/// track how many lines they changed or removed for the stage report.
pub trait Transform {
    /// Stage name as it appears in configuration and reports.
    fn name(&self) -> &'static str;

    /// Run the pass over the whole sequence.
    fn transform(&mut self, lines: &mut Vec<String>);

    /// Number of lines this pass changed or removed.
    fn affected(&self) -> usize;
}

/// Per-stage enablement flags.
///
/// Within an explicit `[features]` table, unlisted stages are disabled.
/// Unknown keys are ignored by serde. `input_is_output` is a path-resolution
/// concern consumed by the command layer, never by the pipeline itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    pub preprocess: bool,
    pub decorations: bool,
    pub panels: bool,
    pub nonlatin: bool,
    pub speakers: bool,
    pub tildes: bool,
    pub ellipses: bool,
    pub blanklines: bool,
    pub input_is_output: bool,
}

impl FeatureSet {
    /// All transformation stages on, `input_is_output` off. This is the
    /// profile written into a freshly generated config file.
    pub fn all_enabled() -> Self {
        Self {
            preprocess: true,
            decorations: true,
            panels: true,
            nonlatin: true,
            speakers: true,
            tildes: true,
            ellipses: true,
            blanklines: true,
            input_is_output: false,
        }
    }
}

/// Affected-line counts per stage, in pipeline order.
///
/// Every stage is recorded on every run; a disabled stage contributes a
/// zero entry rather than being omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    entries: Vec<(&'static str, usize)>,
}

impl StageReport {
    fn record(&mut self, stage: &'static str, affected: usize) {
        self.entries.push((stage, affected));
    }

    /// Count for a stage by name; zero for stages never recorded.
    pub fn count(&self, stage: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Entries in pipeline order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.entries.iter().copied()
    }
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The normalized line sequence.
    pub lines: Vec<String>,
    /// Lines rejected by the Latin-script classifier, kept for diagnostics.
    pub rejected: Vec<String>,
    /// Per-stage affected counts.
    pub report: StageReport,
}

/// Sequences the enabled transforms over a line collection.
pub struct Pipeline {
    features: FeatureSet,
    chapter_label: String,
    decorations: Vec<Regex>,
}

impl Pipeline {
    /// Create a pipeline from already-validated configuration values.
    ///
    /// `decorations` must be pre-compiled; pattern errors are a
    /// configuration-load concern and never surface per-line.
    pub fn new(
        features: FeatureSet,
        chapter_label: impl Into<String>,
        decorations: Vec<Regex>,
    ) -> Self {
        Self {
            features,
            chapter_label: chapter_label.into(),
            decorations,
        }
    }

    /// Run every stage in fixed order, consuming the input sequence.
    ///
    /// `confirm` is only invoked by the speaker-label extractor when a
    /// prefix is ambiguous; all other stages are pure.
    pub fn run(&self, lines: Vec<String>, confirm: &mut dyn Confirm) -> PipelineOutput {
        let mut working = lines;
        let mut report = StageReport::default();

        run_stage(
            self.features.preprocess,
            CharNormalizer::new(),
            &mut working,
            &mut report,
        );
        run_stage(
            self.features.decorations,
            DecorationStripper::new(&self.decorations),
            &mut working,
            &mut report,
        );
        run_stage(
            self.features.panels,
            PanelFilter::new(),
            &mut working,
            &mut report,
        );
        let latin = run_stage(
            self.features.nonlatin,
            LatinScriptFilter::new(),
            &mut working,
            &mut report,
        );
        run_stage(
            self.features.speakers,
            SpeakerLabelExtractor::new(&self.chapter_label, confirm),
            &mut working,
            &mut report,
        );
        run_stage(
            self.features.tildes,
            RunCollapse::tildes(),
            &mut working,
            &mut report,
        );
        run_stage(
            self.features.ellipses,
            RunCollapse::ellipses(),
            &mut working,
            &mut report,
        );
        run_stage(
            self.features.blanklines,
            BlankLineFilter::new(),
            &mut working,
            &mut report,
        );

        PipelineOutput {
            lines: working,
            rejected: latin.into_rejected(),
            report,
        }
    }
}

/// Run one stage if enabled, record its count either way, and hand the
/// transform back so stage-specific state (rejected lines) can be recovered.
fn run_stage<T: Transform>(
    enabled: bool,
    mut stage: T,
    working: &mut Vec<String>,
    report: &mut StageReport,
) -> T {
    if enabled {
        stage.transform(working);
        debug!(
            stage = stage.name(),
            affected = stage.affected(),
            remaining = working.len(),
            "stage complete"
        );
    }
    report.record(stage.name(), stage.affected());
    stage
}
