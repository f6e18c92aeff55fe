use clap::{arg, command, ArgAction};
use std::env;
use tracing::{error, info};

use crate::collator::Collator;
use crate::error::CollateError;

pub fn run() -> Result<(), CollateError> {
    let matches = command!()
        .about("Concatenate the .cpp and .hpp files of the current directory into result.txt")
        .arg(arg!(-v --verbose "Log every file as it is collated").action(ArgAction::SetTrue))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let cwd = env::current_dir().map_err(|e| CollateError::list_dir(".", e))?;
    let collator = Collator::new(cwd);

    match collator.collate() {
        Ok(summary) => {
            info!(
                files = summary.files.len(),
                bytes = summary.bytes,
                output = %summary.output.display(),
                "collation finished"
            );
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "collation aborted");
            Err(err)
        }
    }
}

// Logs go to stderr; RUST_LOG overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "source_collator=debug"
    } else {
        "source_collator=warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}
