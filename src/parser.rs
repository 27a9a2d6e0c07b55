//! Parsing forms from bracket notation.
//!
//! Four bracket families are interchangeable: `⟨⟩`, `()`, `[]` and `{}`.
//! An opening bracket starts an enclosure, its contents are the sibling forms
//! up to the matching closing bracket, and juxtaposition is plain adjacency.
//!
//! Two entry points are provided:
//!
//! - [`parse`] never fails. Whitespace and unknown characters are skipped,
//!   stray closing brackets are ignored and unclosed enclosures are closed at the end of input.
//!   Brackets nested deeper than [`MAX_NESTING`] are dropped along with their closes.
//! - [`parse_strict`] (and [`FromStr`] for [`Form`]) reports the first defect as a [`ParseError`].
//!
//! ```
//! use lof_rs::form::Form;
//! use lof_rs::parser::parse;
//!
//! assert_eq!(parse(""), Form::void());
//! assert_eq!(parse("⟨⟩"), Form::mark());
//! assert_eq!(parse("(())"), Form::enclose(Form::mark()));
//! ```

use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::form::Form;

const OPEN: [char; 4] = ['⟨', '(', '[', '{'];
const CLOSE: [char; 4] = ['⟩', ')', ']', '}'];

/// A defect found by [`parse_strict`]. Positions are character offsets.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("unmatched closing bracket {found:?} at position {position}")]
    UnmatchedClose { found: char, position: usize },

    #[error("bracket {open:?} opened at position {position} is never closed")]
    Unclosed { open: char, position: usize },

    #[error("bracket {open:?} opened at position {opened} is closed by {close:?} at position {position}")]
    Mismatched {
        open: char,
        opened: usize,
        close: char,
        position: usize,
    },

    #[error("bracket opened at position {position} nests deeper than {limit}")]
    TooDeep { limit: usize, position: usize },
}

fn family(c: char) -> Option<usize> {
    OPEN.iter().position(|&o| o == c)
}

fn closing_family(c: char) -> Option<usize> {
    CLOSE.iter().position(|&o| o == c)
}

/// Deepest enclosure nesting the parser accepts.
///
/// [`parse`] drops brackets opened beyond this depth together with their matching closes,
/// [`parse_strict`] rejects them with [`ParseError::TooDeep`].
pub const MAX_NESTING: usize = 1024;

/// An enclosure still waiting for its closing bracket.
#[derive(Debug)]
struct Frame {
    family: usize,
    opened: usize,
    contents: Vec<Form>,
}

/// Bracket parser over the characters of the input, driven by an explicit stack of open enclosures.
#[derive(Debug)]
pub struct Parser {
    chars: Vec<char>,
    pos: usize,
    strict: bool,
}

impl Parser {
    pub fn new(input: &str, strict: bool) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            strict,
        }
    }

    /// Parse the whole input as a juxtaposition of top-level forms.
    pub fn parse(mut self) -> Result<Form, ParseError> {
        let mut top = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        // Opens dropped past MAX_NESTING, whose closes must be dropped as well.
        let mut skipped = 0usize;

        while let Some(c) = self.peek() {
            if let Some(fam) = family(c) {
                if stack.len() >= MAX_NESTING {
                    if self.strict {
                        return Err(ParseError::TooDeep {
                            limit: MAX_NESTING,
                            position: self.pos,
                        });
                    }
                    debug!("dropping {:?} at {} beyond nesting depth {}", c, self.pos, MAX_NESTING);
                    skipped += 1;
                } else {
                    stack.push(Frame {
                        family: fam,
                        opened: self.pos,
                        contents: Vec::new(),
                    });
                }
                self.pos += 1;
            } else if let Some(close) = closing_family(c) {
                if skipped > 0 {
                    skipped -= 1;
                    self.pos += 1;
                    continue;
                }
                let Some(frame) = stack.pop() else {
                    if self.strict {
                        return Err(ParseError::UnmatchedClose {
                            found: c,
                            position: self.pos,
                        });
                    }
                    debug!("skipping unmatched {:?} at {}", c, self.pos);
                    self.pos += 1;
                    continue;
                };
                if self.strict && close != frame.family {
                    return Err(ParseError::Mismatched {
                        open: OPEN[frame.family],
                        opened: frame.opened,
                        close: c,
                        position: self.pos,
                    });
                }
                self.pos += 1;
                let form = Form::enclose_all(frame.contents);
                match stack.last_mut() {
                    Some(parent) => parent.contents.push(form),
                    None => top.push(form),
                }
            } else {
                self.skip(c)?;
            }
        }

        if let Some(frame) = stack.last() {
            if self.strict {
                return Err(ParseError::Unclosed {
                    open: OPEN[frame.family],
                    position: frame.opened,
                });
            }
        }
        while let Some(frame) = stack.pop() {
            debug!("closing {:?} opened at {} at end of input", OPEN[frame.family], frame.opened);
            let form = Form::enclose_all(frame.contents);
            match stack.last_mut() {
                Some(parent) => parent.contents.push(form),
                None => top.push(form),
            }
        }

        Ok(Form::juxtapose(top))
    }

    fn skip(&mut self, c: char) -> Result<(), ParseError> {
        if self.strict && !c.is_whitespace() {
            return Err(ParseError::UnexpectedChar {
                found: c,
                position: self.pos,
            });
        }
        self.pos += 1;
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }
}

/// Parse a form, tolerating malformed input.
///
/// Empty or blank input yields void.
pub fn parse(input: &str) -> Form {
    match Parser::new(input, false).parse() {
        Ok(form) => form,
        Err(e) => unreachable!("lenient parser cannot fail: {}", e),
    }
}

/// Parse a form, rejecting stray characters and unbalanced or mismatched brackets.
pub fn parse_strict(input: &str) -> Result<Form, ParseError> {
    Parser::new(input, true).parse()
}

impl FromStr for Form {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_strict(s)
    }
}
