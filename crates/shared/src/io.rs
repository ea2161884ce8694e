use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::Article;

/// Save collected articles as a dated JSON dump in the data directory.
pub fn save_articles(
    articles: &[Article],
    data_dir: &Path,
    date: DateTime<Utc>,
) -> Result<PathBuf> {
    let filename = format!("articles_{}.json", date.format("%Y%m%d"));
    let filepath = data_dir.join(filename);

    let json = serde_json::to_string_pretty(articles).context("Failed to serialize articles")?;

    fs::write(&filepath, json).context("Failed to write article file")?;

    debug!("Saved {} articles to {}", articles.len(), filepath.display());
    Ok(filepath)
}

/// Load a previously saved article dump.
pub fn load_articles(filepath: &Path) -> Result<Vec<Article>> {
    if !filepath.exists() {
        anyhow::bail!("Article file not found: {}", filepath.display());
    }

    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read article file: {}", filepath.display()))?;

    let articles: Vec<Article> = serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse article JSON from {}. The file may be corrupted or not an article dump.",
            filepath.display()
        )
    })?;

    if articles.is_empty() {
        anyhow::bail!(
            "Article file {} contains no articles. Run collect-news first.",
            filepath.display()
        );
    }

    // The collector guarantees these; a dump that breaks the guarantee is
    // rejected here rather than surfacing as half-empty report entries.
    for article in &articles {
        if article.title.is_empty() || article.source.is_empty() {
            anyhow::bail!(
                "Article file {} contains a record with an empty title or source.",
                filepath.display()
            );
        }
    }

    Ok(articles)
}

/// List article dumps in the data directory, newest first.
pub fn list_article_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if data_dir.exists() {
        for entry in fs::read_dir(data_dir).context("Failed to read data directory")? {
            let entry = entry?;
            let path = entry.path();
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if name.starts_with("articles_") && name.ends_with(".json") {
                files.push(path);
            }
        }
    }

    // Date-stamped filenames sort lexicographically
    files.sort();
    files.reverse();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: "Something happened.".to_string(),
            source: "Test Source".to_string(),
            link: "https://example.com".to_string(),
            published: "2026-08-01T00:00:00Z".to_string(),
            relevance_score: Some(5.0),
            priority_level: "Medium".to_string(),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ai-news-io-test-{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = temp_dir("round-trip");
        let date = Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).unwrap();

        let saved = save_articles(&[article("One"), article("Two")], &dir, date).unwrap();
        assert!(saved.ends_with("articles_20260803.json"));

        let loaded = load_articles(&saved).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "One");
        assert_eq!(loaded[1].title, "Two");
        assert_eq!(loaded[0].relevance_score, Some(5.0));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = temp_dir("missing");
        let result = load_articles(&dir.join("articles_19700101.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_empty_dump() {
        let dir = temp_dir("empty");
        let path = dir.join("articles_20260803.json");
        fs::write(&path, "[]").unwrap();
        assert!(load_articles(&path).is_err());
    }

    #[test]
    fn test_load_tolerates_missing_optional_fields() {
        let dir = temp_dir("partial");
        let path = dir.join("articles_20260803.json");
        fs::write(
            &path,
            r#"[{"title": "Bare", "source": "Feed", "link": "https://example.com"}]"#,
        )
        .unwrap();

        let loaded = load_articles(&path).unwrap();
        assert_eq!(loaded[0].summary, "");
        assert_eq!(loaded[0].relevance_score, None);
        assert_eq!(loaded[0].priority_level, "");
    }

    #[test]
    fn test_list_article_files_newest_first() {
        let dir = temp_dir("listing");
        fs::write(dir.join("articles_20260720.json"), "[]").unwrap();
        fs::write(dir.join("articles_20260803.json"), "[]").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let files = list_article_files(&dir).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("articles_20260803.json"));
        assert!(files[1].ends_with("articles_20260720.json"));
    }
}
