//! Task structure parser
//!
//! Folds a line stream into one title, ordered child tasks, and a trailing note:
//!
//! ```text
//! Buy groceries          <- title
//! - Carrots              <- child 1
//! - Onions               <- child 2
//!                        <- first blank line: note mode from here on
//! From the market        <- note
//! - not a child          <- note (bullets are kept verbatim)
//! ```

use thiserror::Error;
use tracing::debug;

/// Bullet marker stripped from child lines
const BULLET: &str = "- ";

/// Errors from parsing input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No title line: input is empty or starts with a blank line")]
    EmptyInput,
}

/// One prospective child task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildLine {
    pub text: String,
    /// 1-based rank among siblings
    pub position: u32,
}

/// The hierarchy derived from one input stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStructure {
    pub title: String,
    pub children: Vec<ChildLine>,
    /// Note body, lines joined with `\n`; empty when there is no note
    pub note: String,
}

impl ParsedStructure {
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

/// Parser state; the only transition is `Collecting -> NoteMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Collecting,
    NoteMode,
}

/// Incremental parser over lines following the title
#[derive(Debug)]
pub struct TaskParser {
    title: String,
    state: ParseState,
    children: Vec<ChildLine>,
    note_lines: Vec<String>,
}

impl TaskParser {
    /// Start a parse with its title line
    pub fn new(title_line: &str) -> Result<Self, ParseError> {
        let title = title_line.trim();
        if title.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        debug!(%title, "TaskParser::new: title accepted");
        Ok(Self {
            title: title.to_string(),
            state: ParseState::Collecting,
            children: Vec::new(),
            note_lines: Vec::new(),
        })
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Feed the next line
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        match self.state {
            ParseState::Collecting if line.is_empty() => {
                debug!(children = self.children.len(), "TaskParser::push: blank line, entering note mode");
                self.state = ParseState::NoteMode;
            }
            ParseState::Collecting => {
                let position = self.children.len() as u32 + 1;
                self.children.push(ChildLine {
                    text: strip_bullet(line).to_string(),
                    position,
                });
            }
            ParseState::NoteMode => self.note_lines.push(line.to_string()),
        }
    }

    /// Finish the parse once the input is exhausted
    pub fn finish(self) -> ParsedStructure {
        let note = self.note_lines.join("\n").trim().to_string();
        debug!(
            children = self.children.len(),
            note_len = note.len(),
            "TaskParser::finish: called"
        );
        ParsedStructure {
            title: self.title,
            children: self.children,
            note,
        }
    }
}

/// Strip one leading bullet marker
///
/// A bare `-` is what `"- "` becomes after trimming, so it is an empty bullet.
fn strip_bullet(line: &str) -> &str {
    if line == BULLET.trim_end() {
        return "";
    }
    line.strip_prefix(BULLET).unwrap_or(line)
}

/// Parse a whole line sequence
pub fn parse_lines<I, S>(lines: I) -> Result<ParsedStructure, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();
    let first = lines.next().ok_or(ParseError::EmptyInput)?;
    let mut parser = TaskParser::new(first.as_ref())?;
    for line in lines {
        parser.push(line.as_ref());
    }
    Ok(parser.finish())
}
