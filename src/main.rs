use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod rank;
pub mod tfidf;
pub mod tokenizer;
pub mod walker;

use cli::{Cli, Command, MatchArgs};

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = std::env::var("CVRANK_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Match(args) => cmd_match(&args)?,
        Command::Completions(args) => args.generate(),
    }

    Ok(())
}

fn cmd_match(args: &MatchArgs) -> error::Result<()> {
    let job_description = read_job_description(args)?;
    let report = ingest::collect_resumes(&args.inputs, &args.column)?;

    for skip in &report.skipped {
        tracing::warn!("skipped {}: {}", skip.origin, skip.reason);
    }
    if !report.skipped.is_empty() {
        eprintln!("{} source(s) contributed no documents", report.skipped.len());
    }

    // Expected user-input condition, not a fault: warn and exit cleanly
    // instead of running the pipeline.
    if job_description.trim().is_empty() || report.resumes.is_empty() {
        eprintln!("Please upload resumes and enter a job description.");
        return Ok(());
    }

    let query = normalize::normalize(&job_description);
    let documents: Vec<String> = report
        .resumes
        .iter()
        .map(|r| normalize::normalize(&r.text))
        .collect();

    let results = rank::rank_resumes(&query, &documents, args.top);

    if args.json {
        rank::format_json(&results, &report.resumes, &job_description)?;
    } else {
        rank::format_human(&results, &report.resumes);
    }

    Ok(())
}

fn read_job_description(args: &MatchArgs) -> error::Result<String> {
    if let Some(ref text) = args.job {
        return Ok(text.clone());
    }
    if let Some(ref path) = args.job_file {
        let bytes = std::fs::read(path)?;
        return String::from_utf8(bytes).map_err(|_| error::Error::Decode {
            origin: path.display().to_string(),
        });
    }
    // The clap arg group guarantees one source is present.
    Err(error::Error::Config("missing job description".into()))
}
