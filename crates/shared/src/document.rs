use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classify::{ReportCategory, REPORT_TAXONOMY};
use crate::models::Article;

const SECTION_ITEM_CAP: usize = 5;
const DEFAULT_DOCUMENT_STEM: &str = "ai_weekly_report";

/// One block of the rich report document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Top-level document title.
    Title(String),
    /// Level-1 section heading.
    Heading(String),
    Paragraph(String),
    BoldParagraph(String),
    /// Empty line between articles.
    Spacer,
}

/// Block-structured rich document, rendered to styled HTML on save.
#[derive(Debug)]
pub struct ReportDocument {
    blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn to_html(&self) -> String {
        let title = self
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::Title(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("Report");

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
        html.push_str("  <style>\n");
        html.push_str("    body { font-family: Arial, sans-serif; max-width: 800px; margin: 40px auto; padding: 0 20px; line-height: 1.6; }\n");
        html.push_str("    h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }\n");
        html.push_str("    h2 { color: #34495e; margin-top: 30px; padding: 10px; background-color: #ecf0f1; border-left: 4px solid #3498db; }\n");
        html.push_str("    p { margin: 5px 0; }\n");
        html.push_str("  </style>\n");
        html.push_str("</head>\n<body>\n");

        for block in &self.blocks {
            match block {
                Block::Title(text) => {
                    html.push_str(&format!("<h1>{}</h1>\n", escape_html(text)));
                }
                Block::Heading(text) => {
                    html.push_str(&format!("<h2>{}</h2>\n", escape_html(text)));
                }
                Block::Paragraph(text) => {
                    html.push_str(&format!("<p>{}</p>\n", escape_html(text)));
                }
                Block::BoldParagraph(text) => {
                    html.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(text)));
                }
                Block::Spacer => {
                    html.push_str("<p>&nbsp;</p>\n");
                }
            }
        }

        html.push_str("</body>\n</html>");
        html
    }
}

/// Rich-document counterpart of the text digest: same classification and
/// section order, uniform per-section cap.
pub struct DocumentRenderer;

impl DocumentRenderer {
    fn section_title(category: ReportCategory) -> &'static str {
        match category {
            ReportCategory::Critical => "🚨 Critical Developments",
            ReportCategory::Research => "🔬 Research & Development",
            ReportCategory::Industry => "🏢 Industry News",
            ReportCategory::Policy => "📋 Policy & Ethics",
            ReportCategory::Education => "📚 Learning Resources",
        }
    }

    pub fn build(articles: &[Article], date: DateTime<Utc>) -> ReportDocument {
        info!("Building report document for {} articles", articles.len());
        let buckets = REPORT_TAXONOMY.bucket(articles);

        let mut blocks = vec![
            Block::Title("AI News Weekly Summary".to_string()),
            Block::Paragraph(format!("Generated on: {}", date.format("%B %d, %Y"))),
            Block::Paragraph(format!("Total Articles Analyzed: {}", articles.len())),
            Block::Heading("Executive Summary".to_string()),
            Block::Paragraph(format!(
                "This week in AI saw {} research developments, {} industry updates, \
                 {} policy discussions, and {} educational resources.",
                buckets.count(ReportCategory::Research),
                buckets.count(ReportCategory::Industry),
                buckets.count(ReportCategory::Policy),
                buckets.count(ReportCategory::Education)
            )),
        ];

        for category in ReportCategory::SECTION_ORDER {
            let entries = buckets.get(category);
            if entries.is_empty() {
                continue;
            }

            blocks.push(Block::Heading(Self::section_title(category).to_string()));

            for (i, article) in entries.iter().take(SECTION_ITEM_CAP).enumerate() {
                blocks.push(Block::BoldParagraph(format!("{}. {}", i + 1, article.title)));
                blocks.push(Block::Paragraph(format!("Source: {}", article.source)));
                blocks.push(Block::Paragraph(format!("Link: {}", article.link)));
                if let Some(sentence) = article.first_sentence() {
                    blocks.push(Block::Paragraph(format!("Summary: {}", sentence)));
                }
                blocks.push(Block::Spacer);
            }
        }

        ReportDocument { blocks }
    }

    /// Persist the document under a caller-supplied or date-stamped default
    /// name and return the output path.
    pub fn save(
        document: &ReportDocument,
        output_dir: &Path,
        custom_name: Option<&str>,
        date: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let stem = custom_name.unwrap_or(DEFAULT_DOCUMENT_STEM);
        let filename = format!("{}_{}.html", stem, date.format("%Y%m%d"));
        let filepath = output_dir.join(filename);

        fs::write(&filepath, document.to_html()).context("Failed to write report document")?;

        info!("Report document saved to {}", filepath.display());
        Ok(filepath)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
