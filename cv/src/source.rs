//! Line source: one lazy, ordered stream of lines from stdin and files
//!
//! Stdin comes first, but only when it has data immediately available (a zero-timeout
//! poll, so an idle pipe or a terminal never blocks the run). Each readable file follows in
//! the order given. The stream is consumed exactly once; at most one file handle is open
//! at a time. Bytes that are not valid UTF-8 decode to U+FFFD instead of ending the origin.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::os::fd::AsFd;
use std::path::{Path, PathBuf};

use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use tracing::{debug, warn};

type Reader = Box<dyn BufRead + Send>;

/// One line of input, newline stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub text: String,
    /// Ordinal of the origin this line came from, in the order origins were opened
    pub origin: usize,
}

/// A requested input file that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for UnreadableFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Input origins for one run
pub struct LineSource {
    stdin: Option<Reader>,
    files: Vec<PathBuf>,
    unreadable: Vec<UnreadableFile>,
}

impl LineSource {
    /// Read from process stdin (when `read_stdin` is set and stdin has data ready) and `paths`
    pub fn new(read_stdin: bool, paths: &[PathBuf]) -> Self {
        let stdin = io::stdin();
        let ready = read_stdin && has_data_ready(&stdin);
        debug!(read_stdin, ready, file_count = paths.len(), "LineSource::new: called");

        let reader: Option<Reader> = if ready { Some(Box::new(BufReader::new(stdin))) } else { None };
        Self::build(reader, paths)
    }

    /// Use `reader` in place of stdin, followed by `paths`
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R, paths: &[PathBuf]) -> Self {
        debug!(file_count = paths.len(), "LineSource::from_reader: called");
        Self::build(Some(Box::new(reader)), paths)
    }

    /// Read `paths` only
    pub fn from_files(paths: &[PathBuf]) -> Self {
        Self::build(None, paths)
    }

    fn build(stdin: Option<Reader>, paths: &[PathBuf]) -> Self {
        let mut files = Vec::new();
        let mut unreadable = Vec::new();

        for path in paths {
            match check_readable(path) {
                Ok(()) => files.push(path.clone()),
                Err(reason) => {
                    debug!(path = %path.display(), %reason, "LineSource::build: unreadable file");
                    unreadable.push(UnreadableFile {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }

        Self {
            stdin,
            files,
            unreadable,
        }
    }

    /// Files that were requested but cannot be read; they are skipped by [`Lines`]
    pub fn unreadable(&self) -> &[UnreadableFile] {
        &self.unreadable
    }

    /// Consume the source into its line stream
    pub fn into_lines(self) -> Lines {
        Lines {
            current: None,
            stdin: self.stdin,
            files: self.files.into_iter(),
            next_origin: 0,
        }
    }
}

/// Whether `fd` can be read right now without blocking
///
/// A hang-up counts as ready: the read returns whatever was written before the writer
/// closed, then end of input.
fn has_data_ready<F: AsFd>(fd: &F) -> bool {
    let mut fds = [PollFd::new(fd.as_fd(), PollFlags::POLLIN)];
    match poll(&mut fds, PollTimeout::ZERO) {
        Ok(0) => false,
        Ok(_) => fds[0]
            .revents()
            .is_some_and(|events| events.intersects(PollFlags::POLLIN | PollFlags::POLLHUP)),
        Err(e) => {
            warn!(error = %e, "Could not poll stdin, not reading it");
            false
        }
    }
}

/// A path is readable if it is a regular file we can open
fn check_readable(path: &Path) -> Result<(), String> {
    let meta = fs::metadata(path).map_err(|e| e.to_string())?;
    if !meta.is_file() {
        return Err("not a regular file".to_string());
    }
    File::open(path).map(|_| ()).map_err(|e| e.to_string())
}

/// Forward-only iterator over the lines of every origin
pub struct Lines {
    current: Option<(usize, Reader)>,
    stdin: Option<Reader>,
    files: std::vec::IntoIter<PathBuf>,
    next_origin: usize,
}

impl Lines {
    /// Open the next origin, or return false when all are used up
    fn advance(&mut self) -> bool {
        if let Some(stdin) = self.stdin.take() {
            debug!(origin = self.next_origin, "Lines::advance: reading stdin");
            self.current = Some((self.next_origin, stdin));
            self.next_origin += 1;
            return true;
        }

        for path in self.files.by_ref() {
            match File::open(&path) {
                Ok(file) => {
                    debug!(origin = self.next_origin, path = %path.display(), "Lines::advance: reading file");
                    self.current = Some((self.next_origin, Box::new(BufReader::new(file))));
                    self.next_origin += 1;
                    return true;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping file that can no longer be opened");
                }
            }
        }
        false
    }
}

impl Iterator for Lines {
    type Item = InputLine;

    fn next(&mut self) -> Option<InputLine> {
        loop {
            let Some((origin, reader)) = self.current.as_mut() else {
                if !self.advance() {
                    return None;
                }
                continue;
            };
            let origin = *origin;

            let mut buf = Vec::new();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    // Dropping the reader closes the file before the next one opens
                    self.current = None;
                }
                Ok(_) => {
                    if buf.ends_with(b"\n") {
                        buf.pop();
                        if buf.ends_with(b"\r") {
                            buf.pop();
                        }
                    }
                    let text = String::from_utf8_lossy(&buf).into_owned();
                    return Some(InputLine { text, origin });
                }
                Err(e) => {
                    warn!(origin, error = %e, "Stopped reading input origin after read error");
                    self.current = None;
                }
            }
        }
    }
}
