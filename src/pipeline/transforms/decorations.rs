//! User-configured decoration stripping.

use regex::Regex;

use crate::pipeline::Transform;

/// Deletes every match of the configured decoration patterns.
///
/// Patterns apply cumulatively in list order: each one operates on the
/// output of the previous. The patterns arrive pre-compiled; a malformed
/// pattern is a configuration error caught at load time, never here.
pub struct DecorationStripper<'a> {
    patterns: &'a [Regex],
    changed: usize,
}

impl<'a> DecorationStripper<'a> {
    pub fn new(patterns: &'a [Regex]) -> Self {
        Self {
            patterns,
            changed: 0,
        }
    }
}

impl Transform for DecorationStripper<'_> {
    fn name(&self) -> &'static str {
        "decorations"
    }

    fn transform(&mut self, lines: &mut Vec<String>) {
        for line in lines.iter_mut() {
            let mut stripped = line.clone();
            for pattern in self.patterns {
                stripped = pattern.replace_all(&stripped, "").into_owned();
            }
            if stripped != *line {
                *line = stripped;
                self.changed += 1;
            }
        }
    }

    fn affected(&self) -> usize {
        self.changed
    }
}
