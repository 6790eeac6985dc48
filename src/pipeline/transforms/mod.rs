//! Individual pipeline stages.
//!
//! Each transform owns its affected-line counter; the orchestrator in the
//! parent module sequences them and collects the counts.

mod decorations;
mod filters;
mod latin;
mod normalize;
mod speakers;

pub use decorations::DecorationStripper;
pub use filters::{BlankLineFilter, PanelFilter};
pub use latin::LatinScriptFilter;
pub use normalize::{CharNormalizer, RunCollapse};
pub use speakers::{ColonDecision, SpeakerLabelExtractor};
