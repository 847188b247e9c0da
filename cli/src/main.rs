use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use search_core::duplicates::remove_duplicates;
use search_core::process_queries::process_queries;
use search_core::{DocumentId, DocumentStatus, ExecutionMode, SearchServer};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocumentId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    /// JSONL file with one {"id", "text", "status", "ratings"} object per line
    #[arg(long)]
    docs: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Spread scoring and matching over the rayon worker pool
    #[arg(long, default_value_t = false, global = true)]
    parallel: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
    },
    /// Print the query words found in one document
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocumentId,
    },
    /// Remove documents with duplicate word sets and print the remaining ids
    Dedup,
    /// Run every line of a file as a query
    Batch {
        #[arg(long)]
        queries: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let mode = if cli.parallel { ExecutionMode::Parallel } else { ExecutionMode::Sequential };

    let mut server = SearchServer::from_stop_words_text(&cli.stop_words)?;
    let loaded = load_documents(&mut server, Path::new(&cli.docs))?;
    tracing::info!(loaded, docs = %cli.docs, "documents loaded");

    match cli.command {
        Commands::Search { query, status } => {
            let found = server.find_top_documents_in(mode, &query, DocumentStatus::from(status))?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Match { query, id } => {
            let output = match server.match_document_in(mode, &query, id)? {
                Some(matched) => serde_json::json!({
                    "id": id,
                    "words": matched.words,
                    "status": matched.status,
                }),
                None => serde_json::json!({ "id": id, "error": "not found" }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut server);
            let remaining: Vec<DocumentId> = server.document_ids().collect();
            println!("{}", serde_json::json!({ "removed": removed, "remaining": remaining }));
        }
        Commands::Batch { queries } => {
            let queries = read_queries(Path::new(&queries))?;
            let results = process_queries(&server, &queries)?;
            for (query, found) in queries.iter().zip(results) {
                println!("{}", serde_json::json!({ "query": query, "results": found }));
            }
        }
    }
    Ok(())
}

fn load_documents(server: &mut SearchServer, path: &Path) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut loaded = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc =
            serde_json::from_str(&line).with_context(|| format!("parsing line {}", line_no + 1))?;
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("adding document {} from line {}", doc.id, line_no + 1))?;
        loaded += 1;
    }
    Ok(loaded)
}

fn read_queries(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut queries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            queries.push(line);
        }
    }
    Ok(queries)
}
