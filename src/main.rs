use log::debug;
use quagmire::cli::parse_cli_args;
use quagmire::cli_pretty_printing::{batch_item_header, failed_to_solve, success_report};
use quagmire::error::SolverError;
use quagmire::{perform_solve, perform_solve_batch};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SolverError> {
    // Turn CLI arguments into the session corpora and a library config
    let (input, config) = parse_cli_args()?;

    if input.batch {
        let results = perform_solve_batch(&input.ciphertexts, &input.ngrams, &config);
        debug!("batch produced {} results", results.len());
        for (i, outcome) in results.iter().enumerate() {
            batch_item_header(i, results.len());
            match outcome {
                Some(outcome) => success_report(outcome, &config, &input.dictionary),
                None => failed_to_solve(),
            }
        }
        return Ok(());
    }

    let result = perform_solve(&input.ciphertexts[0], &input.crib, &input.ngrams, &config);
    debug!("result from perform_solve: {:?}", result.is_some());

    match result {
        Some(outcome) => success_report(&outcome, &config, &input.dictionary),
        None => failed_to_solve(),
    }
    Ok(())
}
