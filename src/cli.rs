use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "cvrank",
    about = "Rank resumes against a job description with TF-IDF cosine similarity"
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank resumes against a job description
    Match(MatchArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Match --

#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("query").required(true).args(["job", "job_file"])))]
pub struct MatchArgs {
    /// Resume files or directories (txt, pdf, csv)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Job description text
    #[arg(short = 'j', long)]
    pub job: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,

    /// Column holding resume text in tabular files
    #[arg(long, default_value = "resume")]
    pub column: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "cvrank", &mut std::io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_match_defaults() {
        let cli = Cli::parse_from(["cvrank", "match", "resumes/", "--job", "rust developer"]);
        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.inputs, [PathBuf::from("resumes/")]);
                assert_eq!(args.job.as_deref(), Some("rust developer"));
                assert_eq!(args.top, 10);
                assert_eq!(args.column, "resume");
                assert!(!args.json);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn parse_match_multiple_inputs_and_flags() {
        let cli = Cli::parse_from([
            "cvrank", "match", "a.txt", "b.pdf", "batch.csv", "--job-file", "jd.txt", "-n", "3",
            "--column", "cv_text", "--json",
        ]);
        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.inputs.len(), 3);
                assert_eq!(args.job_file.as_deref(), Some(std::path::Path::new("jd.txt")));
                assert_eq!(args.top, 3);
                assert_eq!(args.column, "cv_text");
                assert!(args.json);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn match_requires_a_job_description() {
        assert!(Cli::try_parse_from(["cvrank", "match", "resumes/"]).is_err());
    }

    #[test]
    fn match_rejects_both_job_sources() {
        let result = Cli::try_parse_from([
            "cvrank", "match", "resumes/", "--job", "text", "--job-file", "jd.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn match_requires_at_least_one_input() {
        assert!(Cli::try_parse_from(["cvrank", "match", "--job", "text"]).is_err());
    }

    #[test]
    fn verbose_is_counted() {
        let cli = Cli::parse_from(["cvrank", "-vv", "match", "resumes/", "--job", "x"]);
        assert_eq!(cli.verbose, 2);
    }
}
