//! Structured diagnostics raised while consuming input.
//!
//! Every condition here is recovered; the engine keeps going and the
//! caller decides how loudly to report. Events carry their data rather
//! than preformatted strings.

use std::fmt;

/// How loud a diagnostic should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Noise worth mentioning, nothing was lost.
    Info,
    /// Probable authoring mistake in the input.
    Warning,
}

/// A recovered condition encountered while consuming input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `BEGIN` for a target that already has an open capture. The original
    /// capture and its priority are kept.
    DuplicateCapture {
        /// Target named by the rejected `BEGIN`.
        target: String,
    },
    /// `END` for a target with no open capture.
    CaptureNotOpen {
        /// Target named by the stray `END`.
        target: String,
    },
    /// Explicit priority on an `END` token; priorities only matter on
    /// `BEGIN`. The capture is still closed.
    RedundantPriority {
        /// Target that was closed anyway.
        target: String,
    },
    /// Delimited token with a keyword other than `BEGIN`/`END`.
    UnknownKeyword {
        /// The unrecognized keyword, trimmed.
        keyword: String,
    },
    /// Directive with an empty target name.
    InvalidTarget,
    /// Capture still open when its file ended; force-closed, accumulated
    /// content kept.
    UnclosedCapture {
        /// Target that was force-closed.
        target: String,
    },
}

impl Diagnostic {
    /// Severity of this diagnostic.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::RedundantPriority { .. } => Severity::Info,
            Self::DuplicateCapture { .. }
            | Self::CaptureNotOpen { .. }
            | Self::UnknownKeyword { .. }
            | Self::InvalidTarget
            | Self::UnclosedCapture { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCapture { target } => {
                write!(f, "already capturing to {target}")
            }
            Self::CaptureNotOpen { target } => {
                write!(f, "invalid end token: not capturing to {target}")
            }
            Self::RedundantPriority { target } => {
                write!(f, "extraneous priority on END token for {target}")
            }
            Self::UnknownKeyword { keyword } => {
                write!(f, "unknown directive keyword \"{keyword}\"")
            }
            Self::InvalidTarget => write!(f, "directive with empty target name"),
            Self::UnclosedCapture { target } => {
                write!(f, "unclosed capture: {target}")
            }
        }
    }
}
