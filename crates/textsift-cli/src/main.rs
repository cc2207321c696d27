use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use textsift_core::{config_file, DocumentFormat, ExtractionConfig, SourceDocument};

/// textsift - best-effort plain-text extraction from PDF, DOCX, and TXT documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract plain text from a document
    Extract {
        /// Path to the PDF, DOCX, or TXT file
        file_path: PathBuf,

        /// Declared media type (default: guessed from the file extension)
        #[arg(long)]
        media_type: Option<String>,

        /// Emit a JSON object instead of raw text
        #[arg(long)]
        json: bool,

        /// Write extracted text to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject files larger than this many megabytes
        #[arg(long)]
        max_size_mb: Option<u64>,

        /// Disable colored error output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            file_path,
            media_type,
            json,
            output,
            max_size_mb,
            no_color,
        } => extract(file_path, media_type, json, output, max_size_mb, no_color).await,
    }
}

async fn extract(
    file_path: PathBuf,
    media_type: Option<String>,
    json: bool,
    output: Option<PathBuf>,
    max_size_mb: Option<u64>,
    no_color: bool,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let config = file_config.apply(ExtractionConfig::default());
    let max_size_mb = max_size_mb
        .or_else(|| {
            std::env::var("TEXTSIFT_MAX_SIZE_MB")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or_else(|| file_config.max_size_mb())
        .unwrap_or(10);

    let bytes = std::fs::read(&file_path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", file_path.display()))?;
    anyhow::ensure!(
        bytes.len() as u64 <= max_size_mb * 1024 * 1024,
        "{} is {} bytes, over the {max_size_mb} MB limit",
        file_path.display(),
        bytes.len()
    );

    let media_type = media_type.unwrap_or_else(|| guess_media_type(&file_path));
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let doc = SourceDocument::new(bytes, media_type, file_name);
    let format = doc.format();

    match textsift_ingest::extract_text(&doc, &config).await {
        Ok(text) => {
            let rendered = if json {
                serde_json::json!({
                    "file": doc.file_name(),
                    "format": format.map(|f| f.as_str()),
                    "chars": text.chars().count(),
                    "text": text,
                })
                .to_string()
            } else {
                text
            };
            match output {
                Some(path) => std::fs::write(&path, rendered.as_bytes()).map_err(|e| {
                    anyhow::anyhow!("cannot write {}: {e}", path.display())
                })?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{rendered}")?;
                }
            }
            Ok(())
        }
        Err(err) => {
            if no_color {
                eprintln!("error [{}]: {err}", err.kind());
            } else {
                eprintln!("{} [{}] {err}", "error:".red().bold(), err.kind().yellow());
            }
            std::process::exit(1);
        }
    }
}

fn guess_media_type(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("pdf") => DocumentFormat::PDF_MEDIA_TYPE.to_string(),
        Some("docx") => DocumentFormat::DOCX_MEDIA_TYPE.to_string(),
        Some("txt") => DocumentFormat::TEXT_MEDIA_TYPE.to_string(),
        // Unknown extensions stay undeclared; resolution reports them as
        // unsupported with the file name.
        _ => String::new(),
    }
}
