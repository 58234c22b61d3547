//! Binary entry point: bring up logging and the session store, decide whether
//! a previous spreadsheet can be restored, and drive the Ratatui event loop
//! until the user exits.
use clap::Parser;
use student_roster::cli::Cli;
use student_roster::logging::{init_logging, LOG_FILE_NAME};
use student_roster::{data_dir, ensure_schema, run_app, App};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let conn = ensure_schema()?;
    init_logging(cli.verbosity(), &data_dir()?.join(LOG_FILE_NAME))?;
    tracing::info!("session started");

    let mut app = App::new(conn);
    app.start();
    run_app(&mut app)
}
