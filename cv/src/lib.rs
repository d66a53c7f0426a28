//! Checkvist - command-line client for the Checkvist checklist service
//!
//! Besides browsing lists, the main job is turning piped text into a task hierarchy:
//!
//! ```text
//! $ cv create <<EOF
//! Ingredients
//! - Carrots
//! - Onions
//!
//! Great note here
//! EOF
//! ```
//!
//! The first line becomes a parent task, bullet lines become its children in order, and
//! everything after the first blank line becomes a note on the parent.
//!
//! # Modules
//!
//! - [`source`] - lazy line stream from stdin and files
//! - [`parser`] - title / children / note classification
//! - [`creator`] - ordered, fail-fast creation of the hierarchy
//! - [`api`] - `CheckvistApi` trait and the reqwest client
//! - [`trace`] - debug taps for intermediate values
//! - [`config`] - configuration and credentials
//! - [`cli`] - command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod creator;
pub mod parser;
pub mod render;
pub mod source;
pub mod trace;

pub use api::{ApiError, CheckvistApi, CheckvistClient, NewTask, Note, Task, TaskRef};
pub use config::{ApiConfig, Config, Credentials, CredentialsError};
pub use creator::{CreateError, CreatedHierarchy, CreationStep, HierarchyCreator};
pub use parser::{ChildLine, ParseError, ParseState, ParsedStructure, TaskParser, parse_lines};
pub use source::{InputLine, LineSource, Lines, UnreadableFile};
