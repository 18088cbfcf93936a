//! CLI binary for code-sleuth: compare two submissions for likely plagiarism.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sleuth_core::config::SleuthConfig;
use sleuth_detect::Comparator;
use sleuth_detect::normalize::normalize;
use sleuth_parser::{Language, TreeSitterParser, extract_structure};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "code-sleuth", about = "Source code plagiarism checker")]
struct Cli {
    /// Directory holding `.sleuth/config.toml` (defaults to current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two source files and print both scores and the verdict
    Compare {
        file1: PathBuf,
        file2: PathBuf,

        /// Source language (detected from the first file's extension if not specified)
        #[arg(short, long)]
        lang: Option<String>,

        /// Shingle width in tokens (overrides config)
        #[arg(short)]
        k: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical structure dump of a file
    Dump {
        file: PathBuf,

        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Print a file as the shingler sees it (comment and blank lines removed)
    Normalize {
        file: PathBuf,

        #[arg(short, long)]
        lang: Option<String>,
    },

    /// List supported languages and their file extensions
    Languages,
}

fn get_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.root {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = get_root(&cli)?;
    let config = SleuthConfig::load(&root)
        .with_context(|| format!("failed to load config from {}", root.display()))?;

    match cli.command {
        Commands::Compare {
            file1,
            file2,
            lang,
            k,
            json,
        } => cmd_compare(&config, &file1, &file2, lang.as_deref(), k, json),
        Commands::Dump { file, lang } => cmd_dump(&config, &file, lang.as_deref()),
        Commands::Normalize { file, lang } => cmd_normalize(&config, &file, lang.as_deref()),
        Commands::Languages => {
            cmd_languages();
            Ok(())
        }
    }
}

/// Pick the grammar: explicit flag, then file extension, then config default.
fn resolve_language(flag: Option<&str>, path: &Path, config: &SleuthConfig) -> Result<Language> {
    if let Some(name) = flag {
        return Language::from_name(name).with_context(|| format!("unknown language: {name}"));
    }
    if let Some(lang) = Language::from_path(path) {
        return Ok(lang);
    }
    let name = &config.detection.language;
    Language::from_name(name).with_context(|| format!("unknown configured language: {name}"))
}

/// Read a submission; it must be valid UTF-8 text.
fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8 text", path.display()))
}

fn cmd_compare(
    config: &SleuthConfig,
    file1: &Path,
    file2: &Path,
    lang: Option<&str>,
    k: Option<usize>,
    json: bool,
) -> Result<()> {
    let language = resolve_language(lang, file1, config)?;
    let mut detection = config.detection.clone();
    if let Some(k) = k {
        detection.shingle_width = k;
    }
    detection.validate()?;

    let code1 = read_source(file1)?;
    let code2 = read_source(file2)?;
    tracing::info!(
        language = %language,
        k = detection.shingle_width,
        "comparing {} and {}",
        file1.display(),
        file2.display()
    );

    let report = Comparator::new(language, &detection).compare(&code1, &code2);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("File 1: {}", file1.display());
        println!("File 2: {}", file2.display());
        println!("Language: {}", language);
        println!(
            "Hash similarity: {:.2}% (threshold {})",
            report.hash_similarity, detection.hash_threshold
        );
        println!(
            "AST similarity: {:.2}% (threshold {})",
            report.ast_similarity, detection.ast_threshold
        );
        println!("Verdict: {}", report.verdict);
    }
    Ok(())
}

fn cmd_dump(config: &SleuthConfig, file: &Path, lang: Option<&str>) -> Result<()> {
    let language = resolve_language(lang, file, config)?;
    let source = read_source(file)?;
    println!(
        "{}",
        extract_structure(&TreeSitterParser::new(language), &source)
    );
    Ok(())
}

fn cmd_normalize(config: &SleuthConfig, file: &Path, lang: Option<&str>) -> Result<()> {
    let language = resolve_language(lang, file, config)?;
    let source = read_source(file)?;
    println!("{}", normalize(&source, language.line_comment_markers()));
    Ok(())
}

fn cmd_languages() {
    for lang in Language::ALL {
        let exts: Vec<String> = lang.extensions().iter().map(|e| format!(".{e}")).collect();
        println!("{:<12} {}", lang.name(), exts.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_compare() {
        let cli = Cli::try_parse_from(["code-sleuth", "compare", "a.py", "b.py", "-k", "3", "--json"])
            .unwrap();
        match cli.command {
            Commands::Compare { k, json, lang, .. } => {
                assert_eq!(k, Some(3));
                assert!(json);
                assert!(lang.is_none());
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_resolve_language_precedence() {
        let config = SleuthConfig::default();
        let path = Path::new("main.rs");
        assert_eq!(
            resolve_language(Some("go"), path, &config).unwrap(),
            Language::Go
        );
        assert_eq!(
            resolve_language(None, path, &config).unwrap(),
            Language::Rust
        );
        assert_eq!(
            resolve_language(None, Path::new("submission.txt"), &config).unwrap(),
            Language::Python
        );
        assert!(resolve_language(Some("cobol"), path, &config).is_err());
    }

    #[test]
    fn test_read_source_rejects_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.py");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_source(&path).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/a.py")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
