//! Capture state tracking.
//!
//! The [`CaptureEngine`] owns all mutable extraction state: which targets
//! are currently capturing, what has accumulated in each priority bucket,
//! and the minimum indentation seen per destination. It consumes lines and
//! knows nothing about files beyond "the current file has ended".

use std::collections::BTreeMap;
use std::mem;

use crate::diagnostics::Diagnostic;
use crate::normalize::expand_tabs;
use crate::parser::{Directive, directives};

/// Accumulated state for one named output artifact.
///
/// Destinations persist for the whole run; a capture closing and reopening
/// keeps feeding the same destination.
#[derive(Debug, Default)]
pub(crate) struct Destination {
    /// Lines per priority, in append order within each priority. A bucket
    /// is created lazily on the first `BEGIN` naming its priority.
    pub(crate) buckets: BTreeMap<i64, Vec<String>>,
    /// Minimum leading-space count over every non-blank captured line,
    /// after tab expansion. `None` until a non-blank line is seen.
    pub(crate) min_indent: Option<usize>,
}

/// The capture multiplexing engine.
///
/// One instance processes an entire input set. Call
/// [`consume_file`](Self::consume_file) once per input file, then
/// [`into_snippets`](Self::into_snippets) to materialize the output.
///
/// Invariants:
/// - at most one active capture per target name, whatever the priority;
/// - destinations and buckets only grow, lines keep strict append order;
/// - `min_indent` is monotonically non-increasing.
#[derive(Debug)]
pub struct CaptureEngine {
    tab_width: usize,
    pub(crate) destinations: BTreeMap<String, Destination>,
    /// Open captures: target name to the priority fixed at `BEGIN` time.
    active: BTreeMap<String, i64>,
    diagnostics: Vec<Diagnostic>,
}

impl CaptureEngine {
    /// Create an engine that expands tabs to `tab_width` spaces.
    #[must_use]
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width,
            destinations: BTreeMap::new(),
            active: BTreeMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Consume one input file.
    ///
    /// For each line: parse directives, apply their effects, and append the
    /// line to every open capture only when it carried no directive. Ends
    /// with the forced-closure step, so a capture never spans a file
    /// boundary. Returns the diagnostics raised for this file.
    pub fn consume_file<'a, I>(&mut self, lines: I) -> Vec<Diagnostic>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            let mut bearing = false;
            for (directive, _span) in directives(line) {
                bearing = true;
                self.apply(directive);
            }
            // Any directive on the line discards the whole line, even the
            // text outside the directive spans.
            if !bearing {
                self.append_line(line);
            }
        }
        self.end_of_file();
        mem::take(&mut self.diagnostics)
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Begin { name, priority } => {
                self.open_capture(&name, priority.unwrap_or(0));
            }
            Directive::End { name, priority } => {
                self.close_capture(&name);
                if priority.is_some() {
                    self.diagnostics
                        .push(Diagnostic::RedundantPriority { target: name });
                }
            }
            Directive::Unknown { keyword } => {
                self.diagnostics.push(Diagnostic::UnknownKeyword { keyword });
            }
            Directive::Invalid => self.diagnostics.push(Diagnostic::InvalidTarget),
        }
    }

    /// Open a capture for `target` at `priority`.
    ///
    /// A second `BEGIN` while the target is open is rejected: the existing
    /// capture and its original priority stay in place.
    pub fn open_capture(&mut self, target: &str, priority: i64) {
        if self.active.contains_key(target) {
            self.diagnostics.push(Diagnostic::DuplicateCapture {
                target: target.to_owned(),
            });
            return;
        }

        tracing::debug!(snippet = %target, priority, "starting capture");
        let destination = self.destinations.entry(target.to_owned()).or_default();
        destination.buckets.entry(priority).or_default();
        self.active.insert(target.to_owned(), priority);
    }

    /// Close the capture for `target`, if one is open.
    pub fn close_capture(&mut self, target: &str) {
        if self.active.remove(target).is_some() {
            tracing::debug!(snippet = %target, "ended capture");
        } else {
            self.diagnostics.push(Diagnostic::CaptureNotOpen {
                target: target.to_owned(),
            });
        }
    }

    /// Append a content line to every open capture.
    ///
    /// The line is tab-expanded first. Blank lines are appended verbatim but
    /// do not constrain `min_indent`.
    pub fn append_line(&mut self, line: &str) {
        if self.active.is_empty() {
            return;
        }

        let expanded = expand_tabs(line, self.tab_width);
        let indent = leading_spaces(&expanded);

        for (name, &priority) in &self.active {
            let Some(destination) = self.destinations.get_mut(name) else {
                continue;
            };
            if let Some(count) = indent
                && destination.min_indent.is_none_or(|current| count < current)
            {
                tracing::debug!(snippet = %name, width = count, "updating trim width");
                destination.min_indent = Some(count);
            }
            destination
                .buckets
                .entry(priority)
                .or_default()
                .push(expanded.clone());
        }
    }

    /// Force-close every still-open capture at a file boundary.
    ///
    /// Each one is diagnosed; accumulated content is kept.
    pub fn end_of_file(&mut self) {
        for target in self.active.keys() {
            self.diagnostics.push(Diagnostic::UnclosedCapture {
                target: target.clone(),
            });
        }
        self.active.clear();
    }
}

/// Leading-space count of a line, or `None` for blank lines.
fn leading_spaces(line: &str) -> Option<usize> {
    if line.trim().is_empty() {
        return None;
    }
    Some(line.bytes().take_while(|&b| b == b' ').count())
}
