//! Look-alike character normalization and repeated-run truncation.

use regex::Regex;

use crate::pipeline::Transform;

/// Canonical ASCII replacement for a look-alike glyph, if it has one.
///
/// The table is fixed and total over the look-alike alphabet: smart quotes
/// and bracket-quote variants map to plain apostrophe/quote, the single
/// ellipsis glyph expands to three dots.
fn canonical(c: char) -> Option<&'static str> {
    match c {
        '\u{2026}' => Some("..."),
        '\u{2019}' | '\u{2018}' | '『' | '』' | '﹃' | '﹄' | '〈' | '〉' => Some("'"),
        '\u{201c}' | '\u{201d}' | '「' | '」' | '﹁' | '﹂' | '《' | '》' => Some("\""),
        _ => None,
    }
}

/// Replaces look-alike glyphs with canonical ASCII so later stages only see
/// one spelling of each quote and ellipsis.
pub struct CharNormalizer {
    changed: usize,
}

impl CharNormalizer {
    pub fn new() -> Self {
        Self { changed: 0 }
    }
}

impl Default for CharNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for CharNormalizer {
    fn name(&self) -> &'static str {
        "preprocess"
    }

    fn transform(&mut self, lines: &mut Vec<String>) {
        for line in lines.iter_mut() {
            if !line.chars().any(|c| canonical(c).is_some()) {
                continue;
            }
            let mut result = String::with_capacity(line.len());
            for c in line.chars() {
                match canonical(c) {
                    Some(replacement) => result.push_str(replacement),
                    None => result.push(c),
                }
            }
            *line = result;
            self.changed += 1;
        }
    }

    fn affected(&self) -> usize {
        self.changed
    }
}

/// Collapses maximal runs of a repeated character or substring to a single
/// occurrence. Idempotent: a second application never changes a line again.
pub struct RunCollapse {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
    changed: usize,
}

impl RunCollapse {
    /// Collapse `~~~...` runs to a single `~`.
    pub fn tildes() -> Self {
        Self {
            name: "tildes",
            pattern: Regex::new("~+").unwrap(),
            replacement: "~",
            changed: 0,
        }
    }

    /// Collapse repeated `...` sequences to a single `...`.
    pub fn ellipses() -> Self {
        Self {
            name: "ellipses",
            pattern: Regex::new(r"(\.\.\.)+").unwrap(),
            replacement: "...",
            changed: 0,
        }
    }
}

impl Transform for RunCollapse {
    fn name(&self) -> &'static str {
        self.name
    }

    fn transform(&mut self, lines: &mut Vec<String>) {
        for line in lines.iter_mut() {
            let collapsed = self.pattern.replace_all(line, self.replacement);
            if collapsed != *line {
                *line = collapsed.into_owned();
                self.changed += 1;
            }
        }
    }

    fn affected(&self) -> usize {
        self.changed
    }
}
