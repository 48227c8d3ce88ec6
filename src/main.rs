//! epub-hyph - Insert soft hyphens into EPUB body text

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use epub_hyph::{Dictionary, HyphenateOptions, SoftHyphen, hyphenate_epub_file, output_path};

#[derive(Parser)]
#[command(name = "epub-hyph")]
#[command(version, about = "Insert soft hyphens into EPUB body text", long_about = None)]
#[command(after_help = "EXAMPLES:
    epub-hyph book.epub hyph-pl.tex              Write book.1.epub
    epub-hyph -o out.epub book.epub hyph-pl.tex  Write out.epub
    RUST_LOG=epub_hyph=debug epub-hyph ...       Show scan statistics")]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "EPUB")]
    epub: PathBuf,

    /// TeX hyphenation pattern file
    #[arg(value_name = "PATTERNS")]
    patterns: PathBuf,

    /// Output file (default: EPUB with a .1 marker before the extension)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Join fragments with a literal U+00AD instead of &shy;
    #[arg(long)]
    unicode: bool,

    /// Print the per-entry report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "epub_hyph=warn" } else { "epub_hyph=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let dict = Dictionary::open(&cli.patterns).map_err(|e| e.to_string())?;

    let marker = if cli.unicode {
        SoftHyphen::Character
    } else {
        SoftHyphen::Entity
    };
    let options = HyphenateOptions::new().with_marker(marker);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path(&cli.epub));
    let report =
        hyphenate_epub_file(&cli.epub, &output, &dict, &options).map_err(|e| e.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
    } else if !cli.quiet {
        let totals = report.totals();
        println!("Output: {}", output.display());
        println!("Documents: {}", report.documents());
        println!("Words hyphenated: {}", totals.hyphenated_words);
        println!("Soft hyphens: {}", totals.soft_hyphens);
    }

    Ok(())
}
