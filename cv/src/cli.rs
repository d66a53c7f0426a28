//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Usage examples shown after `--help` and when there is nothing to do
pub const USAGE_EXAMPLES: &str = "\
Examples:
  cv list
  cv list --list 608643 --notes
  cv create <<EOF
  Ingredients
  - Carrots
  - Onions

  Great note here
  EOF
  cv create todo.txt --no-stdin --dry-run";

/// Checkvist command-line client
#[derive(Parser, Debug)]
#[command(
    name = "cv",
    version,
    about = "Checkvist command-line client",
    after_help = USAGE_EXAMPLES,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current user and checklists, or the tasks of one checklist
    List {
        /// Checklist ID whose tasks to show
        #[arg(short = 'L', long = "list", value_name = "ID")]
        list_id: Option<u64>,

        /// Also show the notes of each task that has any
        #[arg(short, long, requires = "list_id")]
        notes: bool,
    },

    /// Create a task hierarchy from piped text and/or files
    ///
    /// First line: parent task. Following lines ("- " optional): child tasks, in order.
    /// Everything after the first blank line: a note on the parent.
    Create {
        /// Files to read after stdin
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Do not read stdin even when it is piped
        #[arg(long)]
        no_stdin: bool,

        /// Checklist ID to create in (default: api.default-list from config)
        #[arg(short = 'L', long = "list", value_name = "ID")]
        list_id: Option<u64>,

        /// Print the parsed structure without creating anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Delete a task
    Delete {
        /// Task ID
        task_id: u64,

        /// Checklist ID (default: api.default-list from config)
        #[arg(short = 'L', long = "list", value_name = "ID")]
        list_id: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["cv"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["cv", "list"]);
        assert!(matches!(
            cli.command,
            Some(Command::List {
                list_id: None,
                notes: false
            })
        ));
    }

    #[test]
    fn test_cli_parse_list_with_notes() {
        let cli = Cli::parse_from(["cv", "list", "--list", "42", "--notes"]);
        assert!(matches!(
            cli.command,
            Some(Command::List {
                list_id: Some(42),
                notes: true
            })
        ));
    }

    #[test]
    fn test_cli_notes_requires_list() {
        assert!(Cli::try_parse_from(["cv", "list", "--notes"]).is_err());
    }

    #[test]
    fn test_cli_parse_create() {
        let cli = Cli::parse_from(["cv", "create", "a.txt", "b.txt", "--no-stdin", "-L", "7", "--dry-run"]);
        if let Some(Command::Create {
            files,
            no_stdin,
            list_id,
            dry_run,
        }) = cli.command
        {
            assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
            assert!(no_stdin);
            assert_eq!(list_id, Some(7));
            assert!(dry_run);
        } else {
            panic!("Expected Create command");
        }
    }

    #[test]
    fn test_cli_parse_create_defaults() {
        let cli = Cli::parse_from(["cv", "create"]);
        assert!(matches!(
            cli.command,
            Some(Command::Create {
                ref files,
                no_stdin: false,
                list_id: None,
                dry_run: false,
            }) if files.is_empty()
        ));
    }

    #[test]
    fn test_cli_parse_delete() {
        let cli = Cli::parse_from(["cv", "delete", "123", "--list", "7"]);
        assert!(matches!(
            cli.command,
            Some(Command::Delete {
                task_id: 123,
                list_id: Some(7)
            })
        ));
    }

    #[test]
    fn test_cli_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["cv", "frobnicate"]).is_err());
    }

    #[test]
    fn test_cli_with_global_options() {
        let cli = Cli::parse_from(["cv", "list", "-c", "/path/to/config.yml", "-l", "debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
