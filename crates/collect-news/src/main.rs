use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use shared::{io, Config, NewsCollector};

#[derive(Parser)]
#[command(name = "collect-news")]
#[command(about = "Collect and score AI news articles from RSS feeds")]
struct Args {
    /// Number of days to look back for articles
    #[arg(short, long, default_value = "7")]
    days: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let now = Utc::now();

    println!("📡 Fetching AI news feeds...");
    let collector = NewsCollector::new()?;
    let articles = collector.collect_feeds(args.days, now).await;

    if articles.is_empty() {
        println!("No articles found in the past {} days.", args.days);
        return Ok(());
    }
    println!("✓ Collected {} articles", articles.len());

    println!("\n🔎 Filtering for AI relevance...");
    let relevant = collector.filter_relevant(articles);

    if relevant.is_empty() {
        println!("No relevant articles found.");
        return Ok(());
    }
    println!("✓ Kept {} relevant articles", relevant.len());

    let data_file = io::save_articles(&relevant, &config.data_dir, now)
        .context("Failed to save articles")?;

    println!("\n✅ Articles saved to: {}", data_file.display());
    println!("Next: run generate-reports to build the weekly reports.");

    Ok(())
}
