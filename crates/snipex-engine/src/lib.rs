//! Capture multiplexing engine for snippet extraction.
//!
//! Source files embed directive tokens naming "snippets" that should be
//! assembled into standalone output files:
//!
//! ```text
//! <<< BEGIN: intro.txt >>>
//! <<< BEGIN: intro.txt {-1} >>>
//! <<< END: intro.txt >>>
//! ```
//!
//! The [`CaptureEngine`] consumes files line by line. Every line that is not
//! itself a directive is appended to every currently open capture; a single
//! snippet may be fed from several priority-tagged regions that are merged
//! in ascending priority order when the engine is materialized into
//! [`Snippet`] values.
//!
//! The engine performs no file I/O. Feeding it input and writing the
//! materialized snippets out is the caller's concern.
//!
//! # Example
//!
//! ```
//! use snipex_engine::CaptureEngine;
//!
//! let mut engine = CaptureEngine::new(4);
//! let source = "\
//! // <<< BEGIN: hello >>>
//! fn main() {}
//! // <<< END: hello >>>";
//!
//! let diagnostics = engine.consume_file(source.lines());
//! assert!(diagnostics.is_empty());
//!
//! let snippets = engine.into_snippets(true);
//! assert_eq!(snippets[0].name, "hello");
//! assert_eq!(snippets[0].lines, vec!["fn main() {}"]);
//! ```

mod diagnostics;
mod engine;
mod materialize;
pub mod normalize;
pub mod parser;

pub use diagnostics::{Diagnostic, Severity};
pub use engine::CaptureEngine;
pub use materialize::Snippet;
