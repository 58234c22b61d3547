//! Command-line flags for the `student-roster` binary.

use clap::Parser;

use crate::logging::Verbosity;

/// Keep a student roster in an .xlsx spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "student-roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug events to the roster log
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log only errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "student-roster");
    }

    #[test]
    fn flags_select_verbosity() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().verbosity();
        assert_eq!(parse(&["student-roster"]), Verbosity::Normal);
        assert_eq!(parse(&["student-roster", "-v"]), Verbosity::Verbose);
        assert_eq!(parse(&["student-roster", "--quiet"]), Verbosity::Quiet);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["student-roster", "-v", "-q"]).is_err());
    }
}
