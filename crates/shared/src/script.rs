use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classify::{Buckets, ScriptCategory, SCRIPT_TAXONOMY};
use crate::models::{Article, Priority};

const SECTION_ITEM_CAP: usize = 8;
const TOP_STORY_CAP: usize = 15;

// The narrative prose lives in lookup tables keyed by category or priority
// rather than in branching code, so adding a category only touches data.
// Context templates take {n} for the item count and {s} for pluralization.

const SECTION_CONTEXTS: &[(ScriptCategory, &str)] = &[
    (
        ScriptCategory::Breaking,
        "This week brought {n} major announcement{s} that are already making waves across the \
         AI industry. These developments represent significant shifts in capabilities, market \
         positioning, and technological advancement.",
    ),
    (
        ScriptCategory::Research,
        "The academic and research community published {n} notable development{s} this week. \
         These findings provide crucial insights into the future direction of AI technology \
         and its underlying scientific foundations.",
    ),
    (
        ScriptCategory::Industry,
        "Corporate developments dominated headlines with {n} significant update{s} from major \
         tech companies. These moves signal important strategic shifts and competitive \
         positioning in the AI landscape.",
    ),
    (
        ScriptCategory::Funding,
        "The investment landscape saw {n} noteworthy development{s} this week, reflecting \
         continued confidence in AI innovation and market potential.",
    ),
    (
        ScriptCategory::Tools,
        "Developers and practitioners gained access to {n} new tool{s} and platform{s} this \
         week, expanding the practical applications of AI technology.",
    ),
    (
        ScriptCategory::Policy,
        "Regulatory and ethical considerations took center stage with {n} important \
         development{s} in AI governance and policy formation.",
    ),
    (
        ScriptCategory::Trends,
        "Market analysis revealed {n} significant trend{s} shaping the broader AI ecosystem \
         and its future trajectory.",
    ),
    (
        ScriptCategory::People,
        "Leadership changes and key personnel moves made news with {n} important \
         announcement{s} across the industry.",
    ),
];

const GENERIC_CONTEXT: &str = "This section covers {n} important development{s} in this area.";

const GENERIC_PROMPTS: [&str; 3] = [
    "- What are the key implications of this development?",
    "- How might this impact the broader AI ecosystem?",
    "- What should industry watchers pay attention to next?",
];

const DISCUSSION_PROMPTS: &[(ScriptCategory, [&str; 3])] = &[
    (
        ScriptCategory::Breaking,
        [
            "- What makes this announcement particularly significant for the AI industry?",
            "- How might this impact existing market players and competitive dynamics?",
            "- What are the potential implications for developers and end users?",
        ],
    ),
    (
        ScriptCategory::Research,
        [
            "- What new possibilities does this research unlock?",
            "- How might this advance translate into practical applications?",
            "- What are the broader scientific implications of these findings?",
        ],
    ),
    (
        ScriptCategory::Industry,
        [
            "- What strategic motivations might be driving this move?",
            "- How does this fit into the company's broader AI strategy?",
            "- What signal does this send to the market and competitors?",
        ],
    ),
    (
        ScriptCategory::Funding,
        [
            "- What does this investment say about market confidence in AI?",
            "- How might this funding accelerate development in this space?",
            "- What trends does this reflect in AI investment patterns?",
        ],
    ),
];

const PRIORITY_BANNERS: &[(Priority, &str)] = &[
    (Priority::Critical, "**🚨 CRITICAL DEVELOPMENT**"),
    (Priority::High, "**⭐ HIGH IMPACT**"),
    (Priority::Medium, "**📢 NOTABLE**"),
    (Priority::Low, "**📋 UPDATE**"),
];

const IMPLICATIONS: &[(Priority, &str)] = &[
    (
        Priority::Critical,
        "This development has the potential to significantly reshape competitive dynamics \
         and market positioning across the AI industry.",
    ),
    (
        Priority::High,
        "This represents an important shift that industry participants should monitor \
         closely for strategic implications.",
    ),
    (
        Priority::Medium,
        "This development contributes to ongoing trends and may influence future industry \
         direction.",
    ),
    (
        Priority::Low,
        "While incremental, this update reflects broader patterns in AI industry evolution.",
    ),
];

const GENERIC_IMPLICATION: &str =
    "This development adds to the evolving AI landscape and merits industry attention.";

const CONCLUSION_THEMES: &[(ScriptCategory, &str)] = &[
    (
        ScriptCategory::Breaking,
        "**Major Announcements:** This week's breakthrough announcements signal accelerating \
         innovation and intensifying competition in the AI space. The pace of development \
         continues to exceed industry expectations.",
    ),
    (
        ScriptCategory::Research,
        "**Research Progress:** Academic and research developments this week demonstrate \
         continued advancement in AI capabilities and our understanding of these systems. \
         These findings will likely influence practical applications in the coming months.",
    ),
    (
        ScriptCategory::Funding,
        "**Investment Climate:** Funding activity reflects sustained investor confidence in \
         AI innovation, with particular interest in practical applications and enterprise \
         solutions.",
    ),
    (
        ScriptCategory::Policy,
        "**Regulatory Environment:** Policy developments indicate growing attention to AI \
         governance and ethical considerations, which will increasingly shape industry \
         practices.",
    ),
];

const INDUSTRY_TREND_BULLETS: [&str; 4] = [
    "- **Acceleration:** The pace of AI innovation continues to accelerate across research, development, and deployment",
    "- **Democratization:** New tools and platforms are making AI capabilities more accessible to broader audiences",
    "- **Maturation:** The industry is showing signs of maturation with increased focus on practical applications and governance",
    "- **Competition:** Competitive dynamics are intensifying as major players vie for market position",
];

const WATCH_LIST_BULLETS: [&str; 5] = [
    "- Follow-up announcements and product releases from major AI companies",
    "- Market reactions and competitive responses to breakthrough developments",
    "- Academic publications building on this week's research findings",
    "- Policy responses to emerging AI capabilities and applications",
    "- Investment and funding activity in emerging AI sectors",
];

/// Long-form narrated podcast script plus its condensed companion summary.
pub struct ScriptRenderer;

impl ScriptRenderer {
    /// Render both artifacts and write them side by side. The summary
    /// filename is derived from the script filename, and a failed write of
    /// either aborts both.
    pub fn generate(
        articles: &[Article],
        output_dir: &Path,
        date: DateTime<Utc>,
    ) -> Result<(PathBuf, PathBuf)> {
        let script_name = format!("Podcast_Script_{}.md", date.format("%Y%m%d"));
        let script_path = output_dir.join(&script_name);
        let summary_path = output_dir.join(summary_file_name(&script_name));

        let script = Self::render_script(articles, date);
        let summary = Self::render_summary(articles, date);

        fs::write(&script_path, script).context("Failed to write podcast script")?;
        fs::write(&summary_path, summary).context("Failed to write summary document")?;

        info!(
            "Podcast script saved to {}, summary to {}",
            script_path.display(),
            summary_path.display()
        );
        Ok((script_path, summary_path))
    }

    pub fn render_script(articles: &[Article], date: DateTime<Utc>) -> String {
        info!("Rendering podcast script for {} articles", articles.len());
        let buckets = SCRIPT_TAXONOMY.bucket(articles);
        let total = articles.len();

        let mut script = format!(
            "# AI Industry Weekly Podcast Script\n**Date:** {}\n**Total Stories Covered:** {}\n\n",
            date.format("%B %d, %Y"),
            total
        );

        script.push_str(
            "## Podcast Overview\nThis week's AI industry update covers major developments \
             across artificial intelligence, machine learning, and emerging technologies. \
             We'll explore breakthrough research, significant company announcements, policy \
             developments, and market trends that are shaping the future of AI.\n\n---\n\n",
        );

        script.push_str("## Executive Summary\n\n### Key Themes This Week:\n");
        for category in ScriptCategory::SECTION_ORDER {
            let count = buckets.count(category);
            if count > 0 {
                script.push_str(&format!(
                    "- **{}**: {} major development{}\n",
                    category.name(),
                    count,
                    plural(count)
                ));
            }
        }

        script.push_str("\n### Market Context\n");
        script.push_str(&format!(
            "The AI industry continues its rapid evolution with {} significant developments \
             this week. ",
            total
        ));

        let breaking_count = buckets.count(ScriptCategory::Breaking);
        let research_count = buckets.count(ScriptCategory::Research);
        if breaking_count > 0 {
            script.push_str(&format!(
                "Notably, we saw {} major announcement{} that could reshape the industry. ",
                breaking_count,
                plural(breaking_count)
            ));
        }
        if research_count > 0 {
            script.push_str(&format!(
                "From the research front, {} significant breakthrough{} emerged from leading \
                 institutions. ",
                research_count,
                plural(research_count)
            ));
        }
        script.push_str("Let's dive into the details.\n\n---\n\n");

        for category in ScriptCategory::SECTION_ORDER {
            let entries = buckets.get(category);
            if entries.is_empty() {
                continue;
            }

            script.push_str(&format!("## {}\n\n", section_title(category)));
            script.push_str(&section_context(category, entries.len()));
            script.push_str("\n\n");

            for (i, article) in entries.iter().take(SECTION_ITEM_CAP).enumerate() {
                script.push_str(&Self::render_article(article, i + 1, category));
                script.push('\n');
            }

            script.push_str("---\n\n");
        }

        script.push_str(&Self::render_conclusion(&buckets, total));
        script
    }

    fn render_article(article: &Article, index: usize, category: ScriptCategory) -> String {
        let mut section = format!("### {}. {}\n\n", index, clean_title(&article.title));

        // Missing or unrecognized labels get the renderer default banner;
        // the implications sentence keeps its own generic fallback.
        let banner_priority = article.priority().unwrap_or(Priority::Medium);
        section.push_str(&format!("{}\n\n", priority_banner(banner_priority)));

        section.push_str(&format!("**Source:** {}\n\n", article.source));

        let details = clean_summary(&article.summary);
        if !details.is_empty() {
            section.push_str(&format!("**Key Details:** {}\n\n", details));
        }

        section.push_str(&format!(
            "**Discussion Points:**\n{}\n\n",
            discussion_prompts(category).join("\n")
        ));

        section.push_str(&format!(
            "**Industry Implications:** {}\n\n",
            implications(article.priority())
        ));

        section
    }

    fn render_conclusion(buckets: &Buckets<ScriptCategory>, total: usize) -> String {
        let mut conclusion =
            String::from("## Weekly Analysis & Looking Ahead\n\n### Key Takeaways\n\n");

        for (category, paragraph) in CONCLUSION_THEMES {
            if buckets.count(*category) > 0 {
                conclusion.push_str(paragraph);
                conclusion.push_str("\n\n");
            }
        }

        conclusion.push_str(
            "### Industry Implications\n\nThe developments covered this week reflect several \
             important trends:\n\n",
        );
        for bullet in INDUSTRY_TREND_BULLETS {
            conclusion.push_str(bullet);
            conclusion.push('\n');
        }
        conclusion.push('\n');

        conclusion.push_str(
            "### What to Watch Next Week\n\nBased on this week's developments, here are key \
             areas to monitor:\n\n",
        );
        for bullet in WATCH_LIST_BULLETS {
            conclusion.push_str(bullet);
            conclusion.push('\n');
        }
        conclusion.push('\n');

        conclusion.push_str("### Conclusion\n\n");
        conclusion.push_str(&format!(
            "This week's {} developments underscore the dynamic nature of the AI industry. ",
            total
        ));
        conclusion.push_str(
            "From breakthrough research to major corporate announcements, the pace of change \
             continues to accelerate. As AI capabilities expand and mature, we're seeing \
             increased focus on practical applications, ethical considerations, and \
             competitive positioning.\n\n",
        );
        conclusion.push_str(
            "The industry remains in a period of rapid evolution, with each week bringing \
             significant developments that shape the future of artificial intelligence and \
             its impact on society.\n\n",
        );

        conclusion
    }

    pub fn render_summary(articles: &[Article], date: DateTime<Utc>) -> String {
        info!("Rendering summary document for {} articles", articles.len());

        let mut summary = format!(
            "AI Industry Weekly Summary - {}\n\nOVERVIEW\n========\nThis document summarizes \
             {} key developments in artificial intelligence from the past week.\n\nMAJOR \
             DEVELOPMENTS\n==================\n",
            date.format("%B %d, %Y"),
            articles.len()
        );

        let mut ranked: Vec<&Article> = articles.iter().collect();
        ranked.sort_by(|a, b| rank_order(a, b));

        for (i, article) in ranked.iter().take(TOP_STORY_CAP).enumerate() {
            summary.push_str(&format!("\n{}. {}\n", i + 1, article.title));
            summary.push_str(&format!("   Source: {}\n", article.source));
            let details = clean_summary(&article.summary);
            if !details.is_empty() {
                summary.push_str(&format!("   Details: {}\n", details));
            }
            if !article.priority_level.is_empty() {
                summary.push_str(&format!("   Priority: {}\n", article.priority_level));
            }
        }

        let buckets = SCRIPT_TAXONOMY.bucket(articles);
        summary.push_str("\n\nCATEGORY BREAKDOWN\n==================\n");
        for category in ScriptCategory::SECTION_ORDER {
            let count = buckets.count(category);
            if count > 0 {
                summary.push_str(&format!("{}: {} stories\n", category.name(), count));
            }
        }

        summary
    }
}

fn section_title(category: ScriptCategory) -> &'static str {
    match category {
        ScriptCategory::Breaking => "🚨 Breaking News & Major Announcements",
        ScriptCategory::Research => "🔬 Research Breakthroughs & Academic Developments",
        ScriptCategory::Industry => "🏢 Industry News & Company Updates",
        ScriptCategory::Funding => "💰 Investment & Funding News",
        ScriptCategory::Tools => "🛠️ New Tools & Platforms",
        ScriptCategory::Policy => "📋 Policy, Ethics & Regulation",
        ScriptCategory::Trends => "📈 Market Trends & Analysis",
        ScriptCategory::People => "👥 Leadership & People News",
    }
}

fn section_context(category: ScriptCategory, count: usize) -> String {
    let template = SECTION_CONTEXTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, t)| *t)
        .unwrap_or(GENERIC_CONTEXT);
    template
        .replace("{n}", &count.to_string())
        .replace("{s}", plural(count))
}

fn discussion_prompts(category: ScriptCategory) -> &'static [&'static str; 3] {
    DISCUSSION_PROMPTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, prompts)| prompts)
        .unwrap_or(&GENERIC_PROMPTS)
}

fn priority_banner(priority: Priority) -> &'static str {
    PRIORITY_BANNERS
        .iter()
        .find(|(p, _)| *p == priority)
        .map(|(_, banner)| *banner)
        .unwrap_or("**📢 NOTABLE**")
}

fn implications(priority: Option<Priority>) -> &'static str {
    priority
        .and_then(|p| {
            IMPLICATIONS
                .iter()
                .find(|(q, _)| *q == p)
                .map(|(_, sentence)| *sentence)
        })
        .unwrap_or(GENERIC_IMPLICATION)
}

/// Strip a leading "12. " style numbering and any digest priority glyphs
/// from a title.
fn clean_title(title: &str) -> String {
    let without_number = strip_leading_number(title);
    let without_glyphs: String = without_number
        .chars()
        .filter(|c| !matches!(c, '🔥' | '⭐'))
        .collect();
    without_glyphs.trim().to_string()
}

fn strip_leading_number(title: &str) -> &str {
    let rest = title.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == title.len() {
        return title;
    }
    match rest.strip_prefix('.') {
        Some(tail) => tail.trim_start(),
        None => title,
    }
}

/// Strip the literal "Summary:" token some feeds prefix to the text.
/// Idempotent: already-clean text passes through unchanged.
fn clean_summary(summary: &str) -> &str {
    let trimmed = summary.trim();
    match trimmed.strip_prefix("Summary:") {
        Some(rest) => rest.trim(),
        None => trimmed,
    }
}

/// Descending by relevance score, then by the published timestamp string.
fn rank_order(a: &Article, b: &Article) -> Ordering {
    let score_a = a.relevance_score.unwrap_or(0.0);
    let score_b = b.relevance_score.unwrap_or(0.0);
    score_b
        .partial_cmp(&score_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.published.cmp(&a.published))
}

fn summary_file_name(script_file_name: &str) -> String {
    script_file_name
        .replace("Script", "Summary")
        .replace(".md", ".txt")
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
