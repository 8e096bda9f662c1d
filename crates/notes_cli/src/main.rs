//! `notes` command-line entry point.
//!
//! # Responsibility
//! - Parse the single-operation command line and dispatch to `notes_core`.
//! - Map every failure to a message on stderr and exit status 1.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use log::info;
use notes_core::view::{render_deleted, render_list, render_note, USAGE};
use notes_core::{init_logging, open_service, NotesConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "notes",
    override_help = USAGE,
    group(
        ArgGroup::new("operation")
            .required(true)
            .multiple(false)
            .args(["add", "list", "show", "del"])
    )
)]
struct Cli {
    /// Add a note; the optional value is its title.
    #[arg(
        short = 'a',
        long = "add",
        value_name = "TITLE",
        num_args = 0..=1,
        allow_hyphen_values = true
    )]
    add: Option<Option<String>>,

    /// List all notes.
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Show one note by number.
    #[arg(
        short = 's',
        long = "show",
        value_name = "NUMBER",
        allow_negative_numbers = true
    )]
    show: Option<String>,

    /// Delete one note by number.
    #[arg(
        short = 'd',
        long = "del",
        value_name = "NUMBER",
        allow_negative_numbers = true
    )]
    del: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Add { title: String },
    List,
    Show { number: String },
    Delete { number: String },
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Show { .. } => "show",
            Self::Delete { .. } => "delete",
        }
    }
}

impl Cli {
    fn into_operation(self) -> Operation {
        if let Some(title) = self.add {
            return Operation::Add {
                title: title.unwrap_or_default(),
            };
        }
        if let Some(number) = self.show {
            return Operation::Show { number };
        }
        if let Some(number) = self.del {
            return Operation::Delete { number };
        }
        Operation::List
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(&err),
    };

    let config = match prepare() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config, cli.into_operation()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn report_parse_error(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{}", err.render());
            ExitCode::SUCCESS
        }
        _ => {
            eprint!("{}", err.render());
            eprint!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves locations, creates the data directory, and starts file logging.
fn prepare() -> Result<NotesConfig> {
    let config = NotesConfig::from_env()?;
    config.ensure_data_dir()?;
    if config.logging_enabled() {
        if let Err(err) = init_logging(config.log_level, &config.log_dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }
    Ok(config)
}

fn run(config: &NotesConfig, operation: Operation) -> Result<()> {
    info!(
        "event=cli_dispatch module=cli status=start operation={} core_version={}",
        operation.name(),
        notes_core::core_version()
    );
    let service = open_service(config);
    let mut out = io::stdout().lock();

    match operation {
        Operation::Add { title } => {
            service.add_note(&title, io::stdin().lock())?;
        }
        Operation::List => {
            let notes = service.list_notes()?;
            out.write_all(render_list(&notes).as_bytes())?;
        }
        Operation::Show { number } => {
            let found = service.get_note(&number)?;
            out.write_all(render_note(found.number, &found.note).as_bytes())?;
        }
        Operation::Delete { number } => {
            service.delete_note(&number)?;
            out.write_all(render_deleted(&number).as_bytes())?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Operation};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};

    fn parse(args: &[&str]) -> Result<Operation, ErrorKind> {
        let argv = std::iter::once("notes").chain(args.iter().copied());
        Cli::try_parse_from(argv)
            .map(Cli::into_operation)
            .map_err(|err| err.kind())
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_title_is_optional() {
        assert_eq!(
            parse(&["-a"]),
            Ok(Operation::Add {
                title: String::new()
            })
        );
        assert_eq!(
            parse(&["--add", "Groceries"]),
            Ok(Operation::Add {
                title: "Groceries".to_string()
            })
        );
    }

    #[test]
    fn add_title_may_start_with_a_hyphen() {
        for title in ["-urgent", "-5", "--"] {
            assert_eq!(
                parse(&["-a", title]),
                Ok(Operation::Add {
                    title: title.to_string()
                }),
                "{title}"
            );
        }
    }

    #[test]
    fn short_and_long_forms_select_the_same_operation() {
        assert_eq!(parse(&["-l"]), parse(&["--list"]));
        assert_eq!(
            parse(&["-s", "2"]),
            Ok(Operation::Show {
                number: "2".to_string()
            })
        );
        assert_eq!(
            parse(&["--del", "3"]),
            Ok(Operation::Delete {
                number: "3".to_string()
            })
        );
    }

    #[test]
    fn negative_numbers_reach_the_range_check() {
        assert_eq!(
            parse(&["--show", "-1"]),
            Ok(Operation::Show {
                number: "-1".to_string()
            })
        );
    }

    #[test]
    fn malformed_command_lines_are_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--show"]).is_err());
        assert!(parse(&["--del"]).is_err());
        assert!(parse(&["-l", "-s", "1"]).is_err());
        assert!(parse(&["-a", "one", "two"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert_eq!(parse(&["-h"]), Err(ErrorKind::DisplayHelp));
    }
}
