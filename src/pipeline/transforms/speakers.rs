//! Speaker-label extraction.
//!
//! Script lines are frequently shaped `LABEL: dialogue`. The label must be
//! stripped when it names a speaker, but chapter headers, sound-effect
//! annotations, and editorial notes share the same shape, and stripping one
//! of those silently corrupts the script. Protection rules therefore run
//! before the speaker heuristic, and a prefix that looks like a long phrase
//! rather than a name is surfaced to the operator instead of guessed at.
//!
//! Colons are scanned left-to-right and the first colon that yields a
//! decision settles the line, so every input line produces exactly one
//! output line. (The historical behavior re-emitted the line at every colon,
//! which could duplicate it; see `emits_once_for_multiple_colons` below.)

use tracing::warn;

use crate::pipeline::{Confirm, Transform};

/// Classification of the text preceding one colon occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColonDecision {
    /// A protected tag (`sfx:`, `note:`, chapter label, note marker):
    /// emit the original line unchanged.
    Protected,
    /// A short, name-like prefix: strip through the colon without asking.
    Strip,
    /// A long prefix that may or may not be a speaker: ask the operator.
    Ambiguous,
}

/// Classify one case-folded, colon-inclusive prefix.
///
/// Protection rules take precedence over the speaker heuristic:
/// 1. trailing `sfx:` or `note:` tag,
/// 2. chapter label at the head of the prefix,
/// 3. a note marker (`note`, `/n`, `\n`) in the first colon segment.
///
/// Anything else is a speaker-label candidate; more than one interior space
/// makes it ambiguous, otherwise it is stripped deterministically.
pub fn evaluate_prefix(prefix: &str, chapter_label: &str) -> ColonDecision {
    if tail_chars(prefix, 4).trim() == "sfx:" || tail_chars(prefix, 5).trim() == "note:" {
        return ColonDecision::Protected;
    }

    if head_chars(prefix, chapter_label.chars().count()).trim() == chapter_label {
        return ColonDecision::Protected;
    }

    let first_segment = prefix.split(':').next().unwrap_or("");
    if first_segment.contains("note")
        || first_segment.contains("/n")
        || first_segment.contains("\\n")
    {
        return ColonDecision::Protected;
    }

    if prefix.matches(' ').count() > 1 {
        ColonDecision::Ambiguous
    } else {
        ColonDecision::Strip
    }
}

/// Last `n` characters of `s`, or all of `s` when shorter.
fn tail_chars(s: &str, n: usize) -> &str {
    let len = s.chars().count();
    if len <= n {
        return s;
    }
    match s.char_indices().nth(len - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// First `n` characters of `s`, or all of `s` when shorter.
fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Strips speaker labels while preserving protected tags, deferring
/// ambiguous prefixes to the injected [`Confirm`] capability.
pub struct SpeakerLabelExtractor<'a> {
    chapter_label: String,
    confirm: &'a mut dyn Confirm,
    stripped: usize,
    unanswered: usize,
}

impl<'a> SpeakerLabelExtractor<'a> {
    pub fn new(chapter_label: &str, confirm: &'a mut dyn Confirm) -> Self {
        Self {
            chapter_label: chapter_label.to_lowercase(),
            confirm,
            stripped: 0,
            unanswered: 0,
        }
    }

    /// Ambiguous prefixes kept unchanged because no answer was available.
    pub fn unanswered(&self) -> usize {
        self.unanswered
    }

    fn process_line(&mut self, line: &str) -> String {
        if !line.contains(':') {
            return line.to_string();
        }

        for (idx, _) in line.match_indices(':') {
            // A failed slice means a malformed prefix at this colon; skip it
            // and keep scanning rather than abort the line.
            let Some(prefix) = line.get(..idx + 1) else {
                continue;
            };
            let Some(remainder) = line.get(idx + 1..) else {
                continue;
            };

            match evaluate_prefix(&prefix.to_lowercase(), &self.chapter_label) {
                ColonDecision::Protected => return line.to_string(),
                ColonDecision::Strip => {
                    self.stripped += 1;
                    return remainder.trim().to_string();
                }
                ColonDecision::Ambiguous => match self.confirm.confirm(line) {
                    Ok(true) => {
                        self.stripped += 1;
                        return remainder.trim().to_string();
                    }
                    Ok(false) => return line.to_string(),
                    Err(err) => {
                        self.unanswered += 1;
                        warn!(%err, line, "cannot confirm ambiguous speaker label, keeping line");
                        return line.to_string();
                    }
                },
            }
        }

        line.to_string()
    }
}

impl Transform for SpeakerLabelExtractor<'_> {
    fn name(&self) -> &'static str {
        "speakers"
    }

    fn transform(&mut self, lines: &mut Vec<String>) {
        let mut output = Vec::with_capacity(lines.len());
        for line in std::mem::take(lines) {
            output.push(self.process_line(&line));
        }
        *lines = output;
    }

    fn affected(&self) -> usize {
        self.stripped
    }
}
