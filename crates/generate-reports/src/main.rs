use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use shared::{io, Config, DigestRenderer, DocumentRenderer, ScriptRenderer};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "generate-reports")]
#[command(about = "Generate the weekly digest, report document, and podcast script")]
struct Args {
    /// Path to an articles JSON dump (defaults to the newest dump in the data directory)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Custom name for the report document artifact
    #[arg(short, long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let now = Utc::now();

    let article_file = match args.file {
        Some(path) => path,
        None => latest_article_file(&config)?,
    };

    println!("📖 Loading articles from: {}", article_file.display());
    let articles = io::load_articles(&article_file)?;
    println!("✓ Loaded {} articles", articles.len());

    println!("\n📝 Generating text digest...");
    let digest = DigestRenderer::render(&articles, now);
    let digest_path = DigestRenderer::save(&digest, &config.output_dir, now)
        .context("Failed to save digest")?;
    println!("✓ Digest saved to: {}", digest_path.display());

    println!("\n📄 Generating report document...");
    let document = DocumentRenderer::build(&articles, now);
    let document_path =
        DocumentRenderer::save(&document, &config.output_dir, args.name.as_deref(), now)
            .context("Failed to save report document")?;
    println!("✓ Document saved to: {}", document_path.display());

    println!("\n🎙️ Generating podcast script...");
    match ScriptRenderer::generate(&articles, &config.output_dir, now) {
        Ok((script_path, summary_path)) => {
            println!("✓ Script saved to: {}", script_path.display());
            println!("✓ Summary saved to: {}", summary_path.display());
        }
        Err(e) => {
            // A script failure is logged but does not abort the run; the
            // digest and document are already on disk.
            error!("Podcast script generation failed: {:#}", e);
        }
    }

    println!("\n✅ Report generation complete.");

    Ok(())
}

fn latest_article_file(config: &Config) -> Result<PathBuf> {
    let files = io::list_article_files(&config.data_dir)?;
    files.into_iter().next().ok_or_else(|| {
        anyhow::anyhow!(
            "No article dumps found in {}. Run collect-news first.",
            config.data_dir.display()
        )
    })
}
