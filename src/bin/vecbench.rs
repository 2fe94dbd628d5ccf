//! Word-embedding evaluation CLI.
//!
//! Loads a vector set from the word2vec text format and evaluates it against
//! analogy and/or semantic-similarity benchmark files.
//!
//! # Usage
//!
//! ```bash
//! # Analogy benchmarks, both methods, TSV report to stdout
//! cargo run --bin vecbench -- wiki.en.vec \
//!     --analogies syntactic.txt --analogies semantic.txt
//!
//! # Similarity norms, JSON report written to results.json
//! cargo run --bin vecbench -- wiki.en.vec \
//!     --similarities en_simlex.tsv --format json --output results
//!
//! # Bounded-memory per-query batching for very large vocabularies
//! cargo run --bin vecbench -- wiki.en.vec --analogies semantic.txt --per-query
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vecbench::analogy::{AnalogyMethod, SolveStrategy};
use vecbench::config::{LoadOptions, DEFAULT_CAPACITY, DEFAULT_DIMENSION};
use vecbench::reports::{EvaluationReport, ReportFormat};
use vecbench::runner::EvaluationRunner;
use vecbench::vectors::VectorTable;

/// Evaluate word-embedding vector sets against analogy and similarity benchmarks
#[derive(Parser, Debug)]
#[command(name = "vecbench")]
#[command(about = "Evaluate word embeddings against analogy and semantic-similarity benchmarks")]
struct Args {
    /// Word vectors to evaluate (word2vec text format, header line first)
    vectors: PathBuf,

    /// Analogy benchmark file(s) (repeat for multiple)
    #[arg(short, long)]
    analogies: Vec<PathBuf>,

    /// Similarity benchmark file(s) (repeat for multiple)
    #[arg(short, long)]
    similarities: Vec<PathBuf>,

    /// Vector dimensionality
    #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,

    /// Maximum number of vectors to read
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Skip unit-norm rescaling after load
    #[arg(long)]
    no_normalize: bool,

    /// Analogy methods: additive, multiplicative (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_values_t = vec!["additive".to_string(), "multiplicative".to_string()])]
    method: Vec<String>,

    /// Use bounded-memory per-query batching instead of the whole-matrix pass
    #[arg(long)]
    per_query: bool,

    /// Report format: tsv, json, both
    #[arg(short, long, default_value = "tsv")]
    format: String,

    /// Output base path (extension added per format; stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let methods = args
        .method
        .iter()
        .map(|m| m.parse::<AnalogyMethod>().map_err(anyhow::Error::msg))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let format = args
        .format
        .parse::<ReportFormat>()
        .map_err(anyhow::Error::msg)?;
    let strategy = if args.per_query {
        SolveStrategy::PerQuery
    } else {
        SolveStrategy::WholeMatrix
    };

    let options = LoadOptions {
        dimension: args.dimension,
        capacity: args.capacity,
        normalize: !args.no_normalize,
    };
    let table = VectorTable::load(&args.vectors, &options)?;

    let runner = EvaluationRunner::new(&table).with_strategy(strategy);

    let mut results = Vec::new();
    let mut similarity = Vec::new();

    for path in &args.analogies {
        results.extend(runner.run_analogy_file(path, &methods)?);
    }
    for path in &args.similarities {
        let evaluation = runner.run_similarity_file(path)?;
        results.push(evaluation.to_result());
        similarity.push(evaluation);
    }

    let report = EvaluationReport::new(args.vectors.display().to_string(), results, similarity);

    if let Some(base_path) = &args.output {
        report.write_to_file(format, base_path)?;
        println!("report written to {}", base_path.display());
    } else {
        let output = report.generate(format);
        if let Some(tsv) = output.tsv {
            println!("{tsv}");
        }
        if let Some(json) = output.json {
            println!("{json}");
        }
    }

    Ok(())
}
