//! Final ordered materialization of each destination.

use crate::engine::CaptureEngine;

/// One materialized output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Target name from the directives that fed this snippet.
    pub name: String,
    /// Final line sequence, priority-merged and optionally trimmed.
    pub lines: Vec<String>,
}

impl CaptureEngine {
    /// Materialize every destination into its final line sequence.
    ///
    /// Buckets concatenate in ascending numeric priority; within a bucket
    /// lines keep append order. With `trim_enabled`, exactly the
    /// destination's minimum indentation is stripped from every line; a
    /// line shorter than that becomes empty. A destination that never saw a
    /// non-blank line is not trimmed at all.
    ///
    /// Snippets come out ordered by name, so repeated runs over unchanged
    /// input produce identical output.
    #[must_use]
    pub fn into_snippets(self, trim_enabled: bool) -> Vec<Snippet> {
        self.destinations
            .into_iter()
            .filter(|(_, destination)| !destination.buckets.is_empty())
            .map(|(name, destination)| {
                let trim = if trim_enabled {
                    destination.min_indent.unwrap_or(0)
                } else {
                    0
                };

                let mut lines = Vec::new();
                for bucket in destination.buckets.into_values() {
                    if trim == 0 {
                        lines.extend(bucket);
                    } else {
                        lines.extend(bucket.iter().map(|line| trim_leading(line, trim)));
                    }
                }

                Snippet { name, lines }
            })
            .collect()
    }
}

/// Strip exactly `width` leading characters; a shorter line becomes empty.
fn trim_leading(line: &str, width: usize) -> String {
    match line.char_indices().nth(width) {
        Some((index, _)) => line[index..].to_owned(),
        None => String::new(),
    }
}
