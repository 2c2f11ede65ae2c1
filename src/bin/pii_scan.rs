//! Entry point for the PII line scanner.

use anyhow::{Context, Result};
use clap::Parser;
use osba::{
    cli::ScanCli,
    config::Config,
    error::ExitCode,
    logging::init_logging,
    progress::Progress,
    scanner::{NamePattern, PiiScanner, Report},
};

const BANNER: &str = "--------------------";

fn run(cli: ScanCli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);

    let mut settings = Config::load(cli.config.as_deref()).scanner;
    if let Some(name_file) = cli.name_file {
        settings.name_file = name_file;
    }
    if let Some(root) = cli.root {
        settings.source_dir = root;
    }
    if let Some(output) = cli.output {
        settings.report_file = output;
    }
    if let Some(mode) = cli.match_mode {
        settings.match_mode = mode;
    }
    log::debug!("Scanner settings: {:?}", settings);

    let pattern = NamePattern::load(&settings.name_file, settings.match_mode)
        .context("Failed to load name file")?;
    let scanner = PiiScanner::new(pattern, &settings.source_dir);
    let report = Report::new(&settings.report_file);

    println!();
    println!("{BANNER}");
    println!("PII Scan: [Starting]");
    println!("{BANNER}");

    let progress = Progress::new(cli.quiet);
    let outcome = scanner
        .scan(&report, Some(&progress))
        .context("PII scan failed")?;

    println!("{BANNER}");
    println!("PII Scan: [Complete]");
    println!("{BANNER}");
    if !cli.quiet {
        println!(
            "{} files, {} lines, {} matches, {} skipped",
            outcome.summary.files_scanned,
            outcome.summary.lines_scanned,
            outcome.summary.matches,
            outcome.summary.skipped
        );
    }
    println!();

    Ok(ExitCode::Success)
}

fn main() {
    let cli = ScanCli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
