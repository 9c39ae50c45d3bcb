//! The glot dataset converter CLI.
//!
//! Provides the `glotc` command with the following subcommands:
//!
//! - `glotc convert --input data.jsonl --output out/` - Convert a JSON-lines
//!   dataset of raw questions into resolved schemas
//! - `glotc languages` - List the built-in target-language renderers
//!
//! Conversion is best-effort across the dataset and fail-fast within each
//! question: failed questions land in `failures.jsonl` with their error
//! kind, successes in `questions.jsonl`, and the exit code stays 0 as long
//! as the files themselves could be processed.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use glot_question::parse_question;
use glot_schema::LanguageSet;

#[derive(Parser)]
#[command(name = "glotc", version, about = "Example-based schema converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON-lines dataset of raw questions into resolved schemas
    Convert {
        /// Input dataset: one JSON object per line with qid, entry_fn_name,
        /// solution, and testing_code
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for questions.jsonl and failures.jsonl
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the built-in target-language renderers
    Languages,
}

/// One raw question from the input dataset.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    qid: String,
    entry_fn_name: String,
    solution: String,
    testing_code: String,
}

/// One failed conversion in failures.jsonl.
#[derive(Debug, Serialize)]
struct Failure<'a> {
    qid: &'a str,
    kind: &'a str,
    error: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glotc=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert { input, output } => {
            if let Err(e) = convert(&input, &output) {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
        Commands::Languages => {
            for name in LanguageSet::builtin().names() {
                println!("{}", name);
            }
        }
    }
}

/// Run the conversion over every line of the input dataset.
fn convert(input: &Path, output: &Path) -> Result<(), String> {
    let file = File::open(input)
        .map_err(|e| format!("cannot open input '{}': {}", input.display(), e))?;
    fs::create_dir_all(output)
        .map_err(|e| format!("cannot create output dir '{}': {}", output.display(), e))?;

    let questions_path = output.join("questions.jsonl");
    let failures_path = output.join("failures.jsonl");
    let mut questions = BufWriter::new(
        File::create(&questions_path)
            .map_err(|e| format!("cannot create '{}': {}", questions_path.display(), e))?,
    );
    let mut failures = BufWriter::new(
        File::create(&failures_path)
            .map_err(|e| format!("cannot create '{}': {}", failures_path.display(), e))?,
    );

    let mut converted = 0usize;
    let mut failed = 0usize;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| format!("read error at line {}: {}", line_no + 1, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawQuestion = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(line = line_no + 1, %e, "skipping malformed input line");
                continue;
            }
        };

        match parse_question(
            &raw.qid,
            &raw.testing_code,
            &raw.solution,
            &raw.entry_fn_name,
        ) {
            Ok(question) => {
                let json = serde_json::to_string(&question)
                    .map_err(|e| format!("serialize failure for '{}': {}", raw.qid, e))?;
                writeln!(questions, "{}", json)
                    .map_err(|e| format!("write error: {}", e))?;
                debug!(qid = %raw.qid, "converted");
                converted += 1;
            }
            Err(err) => {
                warn!(qid = %raw.qid, kind = err.kind(), %err, "conversion failed");
                let failure = Failure {
                    qid: &raw.qid,
                    kind: err.kind(),
                    error: err.to_string(),
                };
                let json = serde_json::to_string(&failure)
                    .map_err(|e| format!("serialize failure record: {}", e))?;
                writeln!(failures, "{}", json)
                    .map_err(|e| format!("write error: {}", e))?;
                failed += 1;
            }
        }
    }

    questions
        .flush()
        .and_then(|_| failures.flush())
        .map_err(|e| format!("flush error: {}", e))?;

    info!(converted, failed, "conversion finished");
    println!("converted {} question(s), {} failure(s)", converted, failed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_splits_successes_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.jsonl");
        let ok_line = serde_json::json!({
            "qid": "q1",
            "entry_fn_name": "f",
            "solution": "def f(x):\n    return x\n",
            "testing_code": "assert f(1) == 1\n",
        });
        let bad_line = serde_json::json!({
            "qid": "q2",
            "entry_fn_name": "g",
            "solution": "def g(x):\n    return x\n",
            "testing_code": "import math\nassert g(1) == 1\n",
        });
        fs::write(&input, format!("{}\n{}\n", ok_line, bad_line)).unwrap();

        let out = dir.path().join("out");
        convert(&input, &out).unwrap();

        let questions = fs::read_to_string(out.join("questions.jsonl")).unwrap();
        assert_eq!(questions.lines().count(), 1);
        let question: serde_json::Value = serde_json::from_str(questions.trim()).unwrap();
        assert_eq!(question["qid"], "q1");
        assert_eq!(question["schema"]["params"][0]["type"], "integer");

        let failures = fs::read_to_string(out.join("failures.jsonl")).unwrap();
        let failure: serde_json::Value = serde_json::from_str(failures.trim()).unwrap();
        assert_eq!(failure["qid"], "q2");
        assert_eq!(failure["kind"], "unsupported_construct");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.jsonl");
        fs::write(&input, "not json\n").unwrap();
        let out = dir.path().join("out");
        convert(&input, &out).unwrap();
        assert_eq!(
            fs::read_to_string(out.join("questions.jsonl")).unwrap().len(),
            0
        );
    }
}
