use anyhow::{bail, Context, Result};
use booldex_core::extract::extract_pdf_file;
use booldex_core::{BuildOutcome, Session};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Extract PDFs, build an in-memory inverted index and run Boolean queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and index PDFs, then print the documents and vocabulary size
    Build {
        /// Input path (PDF file or directory searched recursively)
        #[arg(long)]
        input: PathBuf,
    },
    /// Extract and index PDFs, then run one or more queries
    Query {
        /// Input path (PDF file or directory searched recursively)
        #[arg(long)]
        input: PathBuf,
        /// Boolean query, e.g. "apple and banana"; may be repeated
        #[arg(long = "query", short = 'q', required = true)]
        queries: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input } => {
            let session = load_session(&input)?;
            for doc in session.documents().iter() {
                println!("{}\t{}\t{} chars", doc.id, doc.source, doc.text.chars().count());
            }
            if let Some(index) = session.index() {
                println!("{} terms", index.num_terms());
            }
            Ok(())
        }
        Commands::Query { input, queries } => {
            let session = load_session(&input)?;
            for q in &queries {
                print!("{}", render_results(&session, q));
            }
            Ok(())
        }
    }
}

fn load_session(input: &Path) -> Result<Session> {
    let files = pdf_files(input)?;
    let mut session = Session::new();
    for file in &files {
        let text = extract_pdf_file(file).with_context(|| format!("extracting {}", file.display()))?;
        let source = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let doc_id = session.add_document(source, text);
        tracing::info!(%doc_id, file = %file.display(), "extracted");
    }
    match session.build_index() {
        BuildOutcome::Built { documents, terms } => tracing::info!(documents, terms, "index build complete"),
        BuildOutcome::NoDocuments => bail!("no PDF files found under {}", input.display()),
    }
    Ok(session)
}

/// PDF files under `input`, sorted by path so document ids are stable between runs.
fn pdf_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input path {} does not exist", input.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry?;
        let p = entry.path();
        let is_pdf = p.extension().and_then(|s| s.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if p.is_file() && is_pdf {
            files.push(p.to_path_buf());
        }
    }
    Ok(files)
}

fn render_results(session: &Session, raw: &str) -> String {
    let mut out = format!("Results for query '{raw}':\n");
    if let Some((_, hits)) = session.query(raw) {
        for hit in hits {
            out.push_str(&format!("- {} ({}): {}...\n", hit.doc_id, hit.source, hit.preview));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_pdfs_recursively_in_name_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.PDF"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(dir.path().join("nested/c.pdf"), b"").unwrap();

        let names: Vec<String> = pdf_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "nested/c.pdf"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(pdf_files(Path::new("/nonexistent/booldex-input")).is_err());
    }

    #[test]
    fn unreadable_pdf_halts_loading() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
        let err = load_session(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("broken.pdf"));
    }

    #[test]
    fn empty_directory_has_nothing_to_index() {
        let dir = tempdir().unwrap();
        assert!(load_session(dir.path()).is_err());
    }

    #[test]
    fn renders_one_line_per_hit() {
        let mut session = Session::new();
        session.add_document("one.pdf", "apple banana");
        session.add_document("two.pdf", "banana cherry");
        session.build_index();
        assert_eq!(
            render_results(&session, "apple not cherry"),
            "Results for query 'apple not cherry':\n- doc1 (one.pdf): apple banana...\n"
        );
    }
}
