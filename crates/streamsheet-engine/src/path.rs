//! Bracket paths addressing boxes, messages and positions inside message payloads.
//!
//! Box functions produce reference text such as `[Sheet1][msg-7][customer][name]`: the leading
//! segments address a box and a message, the rest index into the message. Segments may be
//! quoted (`["a]b"]`, `['x']`) when they contain brackets. An empty segment (`[]`) is allowed
//! and means "implicit" (the caller's own sheet, or the current message).
//!
//! Text that does not start with `[` is not a path; it parses to the empty path.

use std::fmt;

use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("unterminated segment starting at offset {0}")]
    UnterminatedSegment(usize),
    #[error("unterminated quote starting at offset {0}")]
    UnterminatedQuote(usize),
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { offset: usize, found: char },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[String; 4]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(src: &str) -> Result<Self, PathParseError> {
        let mut segments = SmallVec::new();
        if !src.starts_with('[') {
            return Ok(Self { segments });
        }

        let bytes = src.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'[' {
                // `i` is always on a char boundary: we only advance past ASCII delimiters or
                // to offsets returned by `find`.
                let found = src[i..].chars().next().unwrap_or('?');
                return Err(PathParseError::Unexpected { offset: i, found });
            }
            let start = i;
            i += 1;
            let segment = match bytes.get(i) {
                Some(&(quote @ (b'"' | b'\''))) => {
                    let body = i + 1;
                    let len = src[body..]
                        .find(quote as char)
                        .ok_or(PathParseError::UnterminatedQuote(i))?;
                    i = body + len + 1;
                    match bytes.get(i) {
                        Some(b']') => {}
                        Some(_) => {
                            let found = src[i..].chars().next().unwrap_or('?');
                            return Err(PathParseError::Unexpected { offset: i, found });
                        }
                        None => return Err(PathParseError::UnterminatedSegment(start)),
                    }
                    &src[body..body + len]
                }
                _ => {
                    let len = src[i..]
                        .find(']')
                        .ok_or(PathParseError::UnterminatedSegment(start))?;
                    let segment = &src[i..i + len];
                    i += len;
                    segment
                }
            };
            segments.push(segment.to_string());
            // Skip the closing `]`.
            i += 1;
        }

        Ok(Self { segments })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.segments.get(idx).map(String::as_str)
    }

    /// Like [`Path::get`], but empty segments count as absent.
    pub fn non_empty(&self, idx: usize) -> Option<&str> {
        self.get(idx).filter(|s| !s.is_empty())
    }

    /// Split into the leading `n` addressing segments and the remaining extraction segments.
    /// Short paths yield an empty extraction part.
    pub fn split_at(&self, n: usize) -> (&[String], &[String]) {
        self.segments.split_at(n.min(self.segments.len()))
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Segments holding `]`, or starting with a quote, are written quoted. A segment that needs
/// quoting but contains both quote characters has no bracket form.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            if segment.contains(']') || segment.starts_with(['"', '\'']) {
                let quote = if segment.contains('"') { '\'' } else { '"' };
                write!(f, "[{quote}{segment}{quote}]")?;
            } else {
                write!(f, "[{segment}]")?;
            }
        }
        Ok(())
    }
}
