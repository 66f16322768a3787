use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use tagtree::{
    utils::write_file, Document, FormatConfig, Indent, LineEnding, ParserConfig, Result,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input XML file
    input: PathBuf,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent with this many spaces per level instead of tabs
    #[arg(long, value_name = "N")]
    spaces: Option<usize>,

    /// Write CRLF line endings
    #[arg(long)]
    crlf: bool,

    /// Build unterminated constructs best-effort instead of failing
    #[arg(long)]
    recover: bool,
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let parser_config = if args.recover {
        ParserConfig::recovering()
    } else {
        ParserConfig::default()
    };
    let format_config = FormatConfig {
        indent: args.spaces.map_or(Indent::Tabs, Indent::Spaces),
        line_ending: if args.crlf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        },
    };

    info!("Reading file: {}", args.input.display());
    let mut document = Document::new();
    let diagnostics = document.load_file(&args.input, &parser_config)?;
    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    let output = document.print_with(&format_config);
    match args.output {
        Some(path) => {
            write_file(&path, &output)?;
            info!("Output written to: {}", path.display());
        }
        None => print!("{output}"),
    }

    Ok(())
}
