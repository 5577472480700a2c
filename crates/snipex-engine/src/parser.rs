//! Directive token parsing.
//!
//! Recognizes `<<< BEGIN: name >>>` style tokens embedded anywhere in a
//! line, including several tokens back to back.

/// Opening delimiter of a directive token.
const OPEN: &str = "<<<";
/// Closing delimiter of a directive token.
const CLOSE: &str = ">>>";

/// Parsed directive token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `<<< BEGIN: name >>>`, optionally with a `{priority}` suffix.
    Begin {
        name: String,
        priority: Option<i64>,
    },
    /// `<<< END: name >>>`. An explicit priority is tolerated but carries
    /// no meaning for matching.
    End {
        name: String,
        priority: Option<i64>,
    },
    /// Delimited token with a keyword other than `BEGIN`/`END`.
    Unknown { keyword: String },
    /// Known keyword but no usable target name.
    Invalid,
}

/// Parse a line for the first directive token at or after `from`.
///
/// Returns the directive and the byte span it occupied, or `None` if the
/// rest of the line contains no directive. Delimited text without the `:`
/// separator is not a directive.
fn parse_from(line: &str, from: usize) -> Option<(Directive, usize, usize)> {
    let mut search = from;

    while let Some(rel) = line[search..].find(OPEN) {
        let start = search + rel;
        let inner_start = start + OPEN.len();

        let Some(close_rel) = line[inner_start..].find(CLOSE) else {
            return None;
        };
        let inner = &line[inner_start..inner_start + close_rel];
        let end = inner_start + close_rel + CLOSE.len();

        // A nested opener means this candidate swallowed the real token;
        // restart the scan at the nested opener, like a regex engine would.
        let nested = inner.find(OPEN);

        let Some(colon) = inner.find(':') else {
            search = match nested {
                Some(n) => inner_start + n,
                None => end,
            };
            continue;
        };

        if let Some(n) = nested
            && n < colon
        {
            search = inner_start + n;
            continue;
        }

        let keyword = inner[..colon].trim();
        let directive = match keyword {
            "BEGIN" => {
                let (name, priority) = parse_target(&inner[colon + 1..]);
                match name {
                    Some(name) => Directive::Begin { name, priority },
                    None => Directive::Invalid,
                }
            }
            "END" => {
                let (name, priority) = parse_target(&inner[colon + 1..]);
                match name {
                    Some(name) => Directive::End { name, priority },
                    None => Directive::Invalid,
                }
            }
            _ => Directive::Unknown {
                keyword: keyword.to_owned(),
            },
        };

        return Some((directive, start, end));
    }

    None
}

/// Split a raw target into name and optional `{priority}` suffix.
///
/// The priority must be a base-10 signed integer directly between the
/// braces; anything else leaves the braces as part of the name. Returns
/// `None` for the name when it trims to empty.
fn parse_target(raw: &str) -> (Option<String>, Option<i64>) {
    let raw = raw.trim();

    let (name, priority) = match split_priority(raw) {
        Some((head, priority)) => (head.trim_end(), Some(priority)),
        None => (raw, None),
    };

    if name.is_empty() {
        (None, priority)
    } else {
        (Some(name.to_owned()), priority)
    }
}

/// Extract a trailing `{priority}` group, if present and well formed.
fn split_priority(raw: &str) -> Option<(&str, i64)> {
    let head = raw.strip_suffix('}')?;
    let brace = head.rfind('{')?;
    let digits = &head[brace + 1..];

    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let priority = digits.parse().ok()?;
    Some((&head[..brace], priority))
}

/// Lazy iterator over all non-overlapping directives on a line,
/// left to right, each paired with its byte span.
pub fn directives(line: &str) -> Directives<'_> {
    Directives { line, pos: 0 }
}

/// Iterator returned by [`directives`].
pub struct Directives<'a> {
    line: &'a str,
    pos: usize,
}

impl Iterator for Directives<'_> {
    type Item = (Directive, std::ops::Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let (directive, start, end) = parse_from(self.line, self.pos)?;
        self.pos = end;
        Some((directive, start..end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_all(line: &str) -> Vec<Directive> {
        directives(line).map(|(d, _)| d).collect()
    }

    #[test]
    fn test_begin_without_priority() {
        let parsed = parse_all("<<< BEGIN: intro >>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "intro".to_owned(),
                priority: None,
            }]
        );
    }

    #[test]
    fn test_begin_with_priority() {
        let parsed = parse_all("<<< BEGIN: intro {3} >>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "intro".to_owned(),
                priority: Some(3),
            }]
        );
    }

    #[test]
    fn test_negative_priority() {
        let parsed = parse_all("<<<BEGIN: setup {-12}>>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "setup".to_owned(),
                priority: Some(-12),
            }]
        );
    }

    #[test]
    fn test_end_directive() {
        let parsed = parse_all("<<< END: intro >>>");
        assert_eq!(
            parsed,
            vec![Directive::End {
                name: "intro".to_owned(),
                priority: None,
            }]
        );
    }

    #[test]
    fn test_end_with_redundant_priority() {
        let parsed = parse_all("<<< END: intro {5} >>>");
        assert_eq!(
            parsed,
            vec![Directive::End {
                name: "intro".to_owned(),
                priority: Some(5),
            }]
        );
    }

    #[test]
    fn test_directive_embedded_in_comment() {
        let (directive, span) = directives("    // <<< BEGIN: main.rs >>> keep going")
            .next()
            .unwrap();
        assert_eq!(
            directive,
            Directive::Begin {
                name: "main.rs".to_owned(),
                priority: None,
            }
        );
        assert_eq!(span, 7..29);
    }

    #[test]
    fn test_multiple_directives_on_one_line() {
        let parsed = parse_all("<<< END: a >>> <<< BEGIN: b >>>");
        assert_eq!(
            parsed,
            vec![
                Directive::End {
                    name: "a".to_owned(),
                    priority: None,
                },
                Directive::Begin {
                    name: "b".to_owned(),
                    priority: None,
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let parsed = parse_all("<<<   BEGIN:   spaced name   {7}   >>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "spaced name".to_owned(),
                priority: Some(7),
            }]
        );
    }

    #[test]
    fn test_unknown_keyword() {
        let parsed = parse_all("<<< RESUME: intro >>>");
        assert_eq!(
            parsed,
            vec![Directive::Unknown {
                keyword: "RESUME".to_owned(),
            }]
        );
    }

    #[test]
    fn test_lowercase_keyword_is_unknown() {
        let parsed = parse_all("<<< begin: intro >>>");
        assert_eq!(
            parsed,
            vec![Directive::Unknown {
                keyword: "begin".to_owned(),
            }]
        );
    }

    #[test]
    fn test_empty_target_is_invalid() {
        assert_eq!(parse_all("<<< BEGIN: >>>"), vec![Directive::Invalid]);
        assert_eq!(parse_all("<<< END:>>>"), vec![Directive::Invalid]);
    }

    #[test]
    fn test_no_separator_is_not_a_directive() {
        assert!(parse_all("<<< BEGIN intro >>>").is_empty());
        assert!(parse_all("<<< shift here >>>").is_empty());
    }

    #[test]
    fn test_plain_text_has_no_directives() {
        assert!(parse_all("let x = a << b;").is_empty());
        assert!(parse_all("").is_empty());
    }

    #[test]
    fn test_unclosed_delimiter() {
        assert!(parse_all("<<< BEGIN: intro").is_empty());
    }

    #[test]
    fn test_nested_opener_restarts_scan() {
        let parsed = parse_all("<<< noise <<< BEGIN: real >>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "real".to_owned(),
                priority: None,
            }]
        );
    }

    #[test]
    fn test_malformed_priority_stays_in_name() {
        let parsed = parse_all("<<< BEGIN: intro {x} >>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "intro {x}".to_owned(),
                priority: None,
            }]
        );
    }

    #[test]
    fn test_priority_with_inner_spaces_stays_in_name() {
        let parsed = parse_all("<<< BEGIN: intro { 3 } >>>");
        assert_eq!(
            parsed,
            vec![Directive::Begin {
                name: "intro { 3 }".to_owned(),
                priority: None,
            }]
        );
    }

    #[test]
    fn test_spans_are_left_to_right() {
        let spans: Vec<_> = directives("x <<< END: a >>> y <<< END: b >>> z")
            .map(|(_, span)| span)
            .collect();
        assert_eq!(spans, vec![2..16, 19..33]);
    }
}
