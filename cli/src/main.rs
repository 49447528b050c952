use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::{corpus, Engine, EngineConfig, EngineError};
use std::fs;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

mod repl;
mod report;

use repl::Command;
use report::{render_hits, render_history, Format};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Search a document corpus with stemming, synonyms and selection feedback", long_about = None)]
struct Cli {
    /// Corpus file or directory (JSON/JSONL). Defaults to the built-in sample corpus.
    #[arg(long, global = true)]
    corpus: Option<String>,
    /// Engine configuration (JSON)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt: type a query, `:select <id>`, `:history`, `:export <path> [--format text|json]`, `:quit`
    Repl,
    /// Run one query and print the ranked results
    Query {
        text: String,
    },
    /// Record selections and write the selection history report
    Export {
        /// Document ids to mark as selected, in order
        #[arg(long = "select", num_args = 1..)]
        selections: Vec<u32>,
        #[arg(long)]
        output: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let engine = load_engine(cli.corpus.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Repl => repl(&engine),
        Commands::Query { text } => {
            print!("{}", render_hits(&engine.search(&text)));
            Ok(())
        }
        Commands::Export { selections, output, format } => {
            for id in selections {
                engine.record_selection(id)?;
            }
            write_history(&engine, &output, format)
        }
    }
}

fn load_engine(corpus_path: Option<&str>, config_path: Option<&str>) -> Result<Engine> {
    let config = match config_path {
        Some(path) => EngineConfig::from_json_file(path).with_context(|| format!("loading config {path}"))?,
        None => EngineConfig::default(),
    };
    let corpus = match corpus_path {
        Some(path) => corpus::load_path(path).with_context(|| format!("loading corpus {path}"))?,
        None => corpus::sample(),
    };
    let engine = Engine::build_index(corpus, &config)?;
    let stats = engine.stats();
    tracing::info!(num_docs = stats.num_docs, num_terms = stats.num_terms, "engine ready");
    Ok(engine)
}

fn write_history(engine: &Engine, output: &str, format: Format) -> Result<()> {
    let rendered = render_history(&engine.export_report(), format)?;
    fs::write(output, rendered).with_context(|| format!("writing {output}"))?;
    tracing::info!(output, entries = engine.stats().selections, "history exported");
    Ok(())
}

fn repl(engine: &Engine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", repl::HELP);
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match repl::parse(&line) {
            Command::Quit => break,
            Command::History => print!("{}", render_history(&engine.export_report(), Format::Text)?),
            Command::Select(id) => match engine.record_selection(id) {
                Ok(entry) => println!(
                    "Selected document {} at {} (Score: {})",
                    entry.record.doc_id,
                    entry.record.timestamp()?,
                    entry.score
                ),
                Err(EngineError::UnknownDocument(id)) => println!("Unknown document: {id}"),
                Err(e) => return Err(e.into()),
            },
            Command::Export { path, format } => write_history(engine, path, format)?,
            Command::Search(query) => print!("{}", render_hits(&engine.search(query))),
            Command::Usage(usage) => println!("{usage}"),
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}
