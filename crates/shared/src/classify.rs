use crate::models::{Article, Priority};

// Keyword sets shared by the two classification schemes. Matching is plain
// lower-cased substring containment over title + summary.
const RESEARCH_KEYWORDS: &[&str] = &["arxiv", "research", "paper", "study", "academic"];
const POLICY_KEYWORDS: &[&str] = &[
    "regulation",
    "policy",
    "law",
    "ethics",
    "governance",
    "government",
];
const EDUCATION_KEYWORDS: &[&str] = &["tutorial", "guide", "how-to", "course", "learning"];

const BREAKING_KEYWORDS: &[&str] = &["breaking", "announces", "launches", "releases", "unveils"];
const ACADEMIC_KEYWORDS: &[&str] = &[
    "arxiv",
    "research",
    "paper",
    "study",
    "academic",
    "university",
];
const FUNDING_KEYWORDS: &[&str] = &["funding", "investment", "raises", "series", "valuation", "ipo"];
const TRENDS_KEYWORDS: &[&str] = &[
    "trend",
    "market",
    "analysis",
    "forecast",
    "prediction",
    "outlook",
];
const TOOLS_KEYWORDS: &[&str] = &["tool", "app", "platform", "api", "framework", "library"];
const PEOPLE_KEYWORDS: &[&str] = &["ceo", "cto", "founder", "hire", "joins", "interview", "appoint"];

/// How a single classification rule fires.
#[derive(Debug)]
pub enum Trigger {
    /// The article's priority label parses to `Critical`.
    CriticalPriority,
    /// The lower-cased title + summary contains any of these keywords.
    AnyKeyword(&'static [&'static str]),
    /// Critical priority, or any keyword hit.
    CriticalOrAnyKeyword(&'static [&'static str]),
}

impl Trigger {
    fn matches(&self, article: &Article, text: &str) -> bool {
        match self {
            Trigger::CriticalPriority => article.priority() == Some(Priority::Critical),
            Trigger::AnyKeyword(words) => contains_any(text, words),
            Trigger::CriticalOrAnyKeyword(words) => {
                article.priority() == Some(Priority::Critical) || contains_any(text, words)
            }
        }
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

#[derive(Debug)]
pub struct Rule<C: 'static> {
    pub category: C,
    pub trigger: Trigger,
}

/// An ordered rule table. The first matching rule wins; articles matching
/// nothing land in the fallback category, so no article is ever dropped.
#[derive(Debug)]
pub struct Taxonomy<C: 'static> {
    rules: &'static [Rule<C>],
    fallback: C,
}

impl<C: Copy + Eq> Taxonomy<C> {
    pub const fn new(rules: &'static [Rule<C>], fallback: C) -> Self {
        Self { rules, fallback }
    }

    pub fn classify(&self, article: &Article) -> C {
        let text = article.classification_text();
        for rule in self.rules {
            if rule.trigger.matches(article, &text) {
                return rule.category;
            }
        }
        self.fallback
    }

    /// Group a slice of articles by category, preserving input order inside
    /// each bucket. Buckets borrow the articles and live only for one render.
    pub fn bucket<'a>(&self, articles: &'a [Article]) -> Buckets<'a, C> {
        let mut entries: Vec<(C, Vec<&'a Article>)> = self
            .rules
            .iter()
            .map(|rule| (rule.category, Vec::new()))
            .collect();
        entries.push((self.fallback, Vec::new()));

        for article in articles {
            let category = self.classify(article);
            if let Some((_, bucket)) = entries.iter_mut().find(|(c, _)| *c == category) {
                bucket.push(article);
            }
        }

        Buckets { entries }
    }
}

/// Per-render grouping of borrowed articles, one bucket per category.
pub struct Buckets<'a, C> {
    entries: Vec<(C, Vec<&'a Article>)>,
}

impl<'a, C: Copy + Eq> Buckets<'a, C> {
    pub fn get(&self, category: C) -> &[&'a Article] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, bucket)| bucket.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, category: C) -> usize {
        self.get(category).len()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, bucket)| bucket.len()).sum()
    }
}

/// Categories of the 5-way reference scheme used by the digest and the
/// rich document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCategory {
    Critical,
    Research,
    Industry,
    Policy,
    Education,
}

impl ReportCategory {
    /// Section order in the digest and document outputs.
    pub const SECTION_ORDER: [ReportCategory; 5] = [
        ReportCategory::Critical,
        ReportCategory::Research,
        ReportCategory::Industry,
        ReportCategory::Policy,
        ReportCategory::Education,
    ];
}

static REPORT_RULES: [Rule<ReportCategory>; 4] = [
    Rule {
        category: ReportCategory::Critical,
        trigger: Trigger::CriticalPriority,
    },
    Rule {
        category: ReportCategory::Research,
        trigger: Trigger::AnyKeyword(RESEARCH_KEYWORDS),
    },
    Rule {
        category: ReportCategory::Policy,
        trigger: Trigger::AnyKeyword(POLICY_KEYWORDS),
    },
    Rule {
        category: ReportCategory::Education,
        trigger: Trigger::AnyKeyword(EDUCATION_KEYWORDS),
    },
];

/// The 5-way scheme: priority-first, terse, for reference-style reports.
pub static REPORT_TAXONOMY: Taxonomy<ReportCategory> =
    Taxonomy::new(&REPORT_RULES, ReportCategory::Industry);

/// Categories of the 8-way conversational scheme used by the podcast
/// script and its companion summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCategory {
    Breaking,
    Research,
    Industry,
    Funding,
    Tools,
    Policy,
    Trends,
    People,
}

impl ScriptCategory {
    /// Section order in the script output (breaking-news-first flow).
    pub const SECTION_ORDER: [ScriptCategory; 8] = [
        ScriptCategory::Breaking,
        ScriptCategory::Research,
        ScriptCategory::Industry,
        ScriptCategory::Funding,
        ScriptCategory::Tools,
        ScriptCategory::Policy,
        ScriptCategory::Trends,
        ScriptCategory::People,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScriptCategory::Breaking => "Breaking",
            ScriptCategory::Research => "Research",
            ScriptCategory::Industry => "Industry",
            ScriptCategory::Funding => "Funding",
            ScriptCategory::Tools => "Tools",
            ScriptCategory::Policy => "Policy",
            ScriptCategory::Trends => "Trends",
            ScriptCategory::People => "People",
        }
    }
}

static SCRIPT_RULES: [Rule<ScriptCategory>; 7] = [
    Rule {
        category: ScriptCategory::Breaking,
        trigger: Trigger::CriticalOrAnyKeyword(BREAKING_KEYWORDS),
    },
    Rule {
        category: ScriptCategory::Research,
        trigger: Trigger::AnyKeyword(ACADEMIC_KEYWORDS),
    },
    Rule {
        category: ScriptCategory::Funding,
        trigger: Trigger::AnyKeyword(FUNDING_KEYWORDS),
    },
    Rule {
        category: ScriptCategory::Policy,
        trigger: Trigger::AnyKeyword(POLICY_KEYWORDS),
    },
    Rule {
        category: ScriptCategory::Trends,
        trigger: Trigger::AnyKeyword(TRENDS_KEYWORDS),
    },
    Rule {
        category: ScriptCategory::Tools,
        trigger: Trigger::AnyKeyword(TOOLS_KEYWORDS),
    },
    Rule {
        category: ScriptCategory::People,
        trigger: Trigger::AnyKeyword(PEOPLE_KEYWORDS),
    },
];

/// The 8-way scheme: breaking-news-first, for the narrated script.
pub static SCRIPT_TAXONOMY: Taxonomy<ScriptCategory> =
    Taxonomy::new(&SCRIPT_RULES, ScriptCategory::Industry);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;

    fn article(title: &str, summary: &str, priority: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: summary.to_string(),
            source: "Test Source".to_string(),
            link: "https://example.com".to_string(),
            published: "2026-08-01T00:00:00Z".to_string(),
            relevance_score: None,
            priority_level: priority.to_string(),
        }
    }

    // ==================== 5-Way Scheme Tests ====================

    #[test]
    fn test_report_critical_priority_wins() {
        let a = article("Big news", "", "Critical");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Critical);
    }

    #[test]
    fn test_report_critical_beats_keywords() {
        // First rule wins even when a later keyword rule would also match.
        let a = article("New research paper", "An arxiv study.", "Critical");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Critical);
    }

    #[test]
    fn test_report_research_keyword() {
        let a = article("Team publishes paper", "", "Low");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Research);
    }

    #[test]
    fn test_report_policy_keyword_in_summary() {
        let a = article("Brussels acts", "New regulation for models.", "");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Policy);
    }

    #[test]
    fn test_report_education_keyword() {
        let a = article("A hands-on tutorial", "", "");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Education);
    }

    #[test]
    fn test_report_defaults_to_industry() {
        let a = article("Company ships product", "Quarterly numbers.", "Medium");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Industry);
    }

    #[test]
    fn test_report_research_beats_policy_by_rule_order() {
        let a = article("Study of regulation", "", "");
        assert_eq!(REPORT_TAXONOMY.classify(&a), ReportCategory::Research);
    }

    // ==================== 8-Way Scheme Tests ====================

    #[test]
    fn test_script_breaking_on_critical_priority() {
        let a = article("Quiet title", "Nothing matching.", "Critical");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Breaking);
    }

    #[test]
    fn test_script_breaking_on_keyword() {
        let a = article("Vendor unveils model", "", "Low");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Breaking);
    }

    #[test]
    fn test_script_breaking_beats_research() {
        let a = article("University announces breakthrough", "A new paper.", "");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Breaking);
    }

    #[test]
    fn test_script_university_is_research() {
        let a = article("University lab results", "", "");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Research);
    }

    #[test]
    fn test_script_funding_keyword() {
        let a = article("Startup raises $50M Series B", "", "");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Funding);
    }

    #[test]
    fn test_script_trends_keyword() {
        let a = article("Market outlook for 2027", "", "");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Trends);
    }

    #[test]
    fn test_script_tools_keyword() {
        let a = article("A new framework ships", "", "");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Tools);
    }

    #[test]
    fn test_script_people_keyword() {
        let a = article("Lab names new CEO", "", "");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::People);
    }

    #[test]
    fn test_script_defaults_to_industry() {
        let a = article("Company expands datacenter", "More capacity.", "Medium");
        assert_eq!(SCRIPT_TAXONOMY.classify(&a), ScriptCategory::Industry);
    }

    // ==================== Bucketing Tests ====================

    #[test]
    fn test_buckets_are_complete() {
        let articles = vec![
            article("OpenAI launches new model", "", "Critical"),
            article("Interesting findings", "An arxiv study.", ""),
            article("Startup raises $50M Series B", "", ""),
            article("Steel prices", "Totally unrelated.", ""),
        ];

        let buckets = SCRIPT_TAXONOMY.bucket(&articles);
        assert_eq!(buckets.total(), articles.len());

        let counted: usize = ScriptCategory::SECTION_ORDER
            .iter()
            .map(|c| buckets.count(*c))
            .sum();
        assert_eq!(counted, articles.len());
    }

    #[test]
    fn test_buckets_preserve_input_order() {
        let articles = vec![
            article("First product news", "Plain update.", ""),
            article("Second product news", "Plain update.", ""),
        ];
        let buckets = REPORT_TAXONOMY.bucket(&articles);
        let industry = buckets.get(ReportCategory::Industry);
        assert_eq!(industry.len(), 2);
        assert_eq!(industry[0].title, "First product news");
        assert_eq!(industry[1].title, "Second product news");
    }

    #[test]
    fn test_end_to_end_scenario_buckets() {
        let articles = vec![
            article("OpenAI launches new model", "", "Critical"),
            article("Interesting findings", "From an arxiv study.", ""),
            article("Startup raises $50M Series B", "", ""),
        ];

        let buckets = SCRIPT_TAXONOMY.bucket(&articles);
        assert_eq!(buckets.count(ScriptCategory::Breaking), 1);
        assert_eq!(buckets.count(ScriptCategory::Research), 1);
        assert_eq!(buckets.count(ScriptCategory::Funding), 1);
        assert_eq!(buckets.count(ScriptCategory::Industry), 0);
    }

    #[test]
    fn test_empty_input_yields_empty_buckets() {
        let buckets = REPORT_TAXONOMY.bucket(&[]);
        assert_eq!(buckets.total(), 0);
        for category in ReportCategory::SECTION_ORDER {
            assert!(buckets.get(category).is_empty());
        }
    }
}
