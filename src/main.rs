use std::process::ExitCode;
use std::sync::Arc;

use rental_listing_stats::ingestion::{IngestionOptions, LogObserver};
use rental_listing_stats::pipeline::{run_analysis, AnalysisOptions};
use rental_listing_stats::prompt::Prompter;
use rental_listing_stats::{AnalysisError, Stage};

fn main() -> ExitCode {
    env_logger::init();

    let mut prompter = Prompter::stdio();
    match run(&mut prompter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error {}: {e}", e.stage());
            ExitCode::FAILURE
        }
    }
}

fn run(prompter: &mut Prompter<std::io::StdinLock<'static>, std::io::Stdout>) -> Result<(), AnalysisError> {
    let source = prompter.ask_during(Stage::Load, "Enter the path to the CSV file")?;
    let options = AnalysisOptions {
        ingestion: IngestionOptions {
            observer: Some(Arc::new(LogObserver)),
            ..Default::default()
        },
        ..Default::default()
    };
    run_analysis(&source, prompter, &options)?;
    Ok(())
}
