//! Line normalization applied before a line is captured.

/// Replace every tab character with `width` literal spaces.
///
/// This is a flat substitution, not elastic column alignment: a tab in the
/// middle of a line expands to the same run of spaces as a leading one.
/// Directive-bearing lines never reach this stage.
#[must_use]
pub fn expand_tabs(line: &str, width: usize) -> String {
    if !line.contains('\t') {
        return line.to_owned();
    }
    line.replace('\t', &" ".repeat(width))
}
