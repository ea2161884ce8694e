use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classify::{ReportCategory, REPORT_TAXONOMY};
use crate::models::{Article, Priority};

const CRITICAL_ITEM_CAP: usize = 10;
const SECTION_ITEM_CAP: usize = 5;

/// Plain-text weekly digest, grouped by the 5-way report scheme.
pub struct DigestRenderer;

impl DigestRenderer {
    fn section_title(category: ReportCategory) -> &'static str {
        match category {
            ReportCategory::Critical => "🚨 Critical Developments",
            ReportCategory::Research => "🔬 Research & Development",
            ReportCategory::Industry => "🏢 Industry News & Products",
            ReportCategory::Policy => "📋 Policy & Ethics",
            ReportCategory::Education => "📚 Learning Resources",
        }
    }

    /// Pure string construction; the caller persists the result.
    pub fn render(articles: &[Article], date: DateTime<Utc>) -> String {
        info!("Rendering text digest for {} articles", articles.len());
        let buckets = REPORT_TAXONOMY.bucket(articles);

        let mut digest = format!(
            "# AI News Weekly Summary\nGenerated on: {}\nTotal Articles Analyzed: {}\n\n",
            date.format("%B %d, %Y"),
            articles.len()
        );

        digest.push_str("## Executive Summary\n");
        digest.push_str(&format!(
            "This week in AI saw {} research developments, {} industry updates, \
             {} policy discussions, and {} educational resources.\n\n",
            buckets.count(ReportCategory::Research),
            buckets.count(ReportCategory::Industry),
            buckets.count(ReportCategory::Policy),
            buckets.count(ReportCategory::Education)
        ));

        for category in ReportCategory::SECTION_ORDER {
            let entries = buckets.get(category);
            if entries.is_empty() {
                continue;
            }

            digest.push_str(&format!("## {}\n\n", Self::section_title(category)));

            // Critical news gets more room than the other sections.
            let cap = if category == ReportCategory::Critical {
                CRITICAL_ITEM_CAP
            } else {
                SECTION_ITEM_CAP
            };

            for (i, article) in entries.iter().take(cap).enumerate() {
                let marker = match article.priority() {
                    Some(Priority::Critical) => " 🔥",
                    Some(Priority::High) => " ⭐",
                    _ => "",
                };

                digest.push_str(&format!("{}. **{}{}**\n", i + 1, article.title, marker));
                digest.push_str(&format!("   Source: {}\n", article.source));
                digest.push_str(&format!("   Link: {}\n", article.link));
                if let Some(sentence) = article.first_sentence() {
                    digest.push_str(&format!("   Summary: {}\n", sentence));
                }
                if let Some(score) = article.relevance_score {
                    digest.push_str(&format!("   Relevance Score: {}\n", score));
                }
                digest.push('\n');
            }
        }

        digest
    }

    pub fn save(content: &str, output_dir: &Path, date: DateTime<Utc>) -> Result<PathBuf> {
        let filename = format!("AI_Industry_Weekly_{}.txt", date.format("%Y%m%d"));
        let filepath = output_dir.join(filename);

        fs::write(&filepath, content).context("Failed to write digest file")?;

        Ok(filepath)
    }
}
