use serde::{Deserialize, Serialize};

/// A single collected news item. Produced by the collector, serialized to
/// the dated JSON dump, and consumed read-only by every renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub source: String,
    pub link: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub relevance_score: Option<f64>,
    #[serde(default)]
    pub priority_level: String,
}

/// Editorial priority stamped onto an article by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse the exact labels used in article dumps. Anything else is
    /// `None`, so unrecognized labels fall through to each renderer's
    /// default instead of failing the run.
    pub fn parse(label: &str) -> Option<Priority> {
        match label {
            "Critical" => Some(Priority::Critical),
            "High" => Some(Priority::High),
            "Medium" => Some(Priority::Medium),
            "Low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Article {
    pub fn priority(&self) -> Option<Priority> {
        Priority::parse(&self.priority_level)
    }

    /// Lower-cased title and summary, the text every classification rule
    /// matches against.
    pub fn classification_text(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }

    /// First sentence of the summary: everything up to and including the
    /// first period. A summary without a period gets one appended.
    pub fn first_sentence(&self) -> Option<String> {
        if self.summary.is_empty() {
            return None;
        }
        match self.summary.find('.') {
            Some(end) => Some(self.summary[..=end].to_string()),
            None => Some(format!("{}.", self.summary)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_with_summary(summary: &str) -> Article {
        Article {
            title: "Test Article".to_string(),
            summary: summary.to_string(),
            source: "Test Source".to_string(),
            link: "https://example.com".to_string(),
            published: "2026-08-01T00:00:00Z".to_string(),
            relevance_score: None,
            priority_level: String::new(),
        }
    }

    // ==================== Priority Parsing Tests ====================

    #[test]
    fn test_parse_known_labels() {
        assert_eq!(Priority::parse("Critical"), Some(Priority::Critical));
        assert_eq!(Priority::parse("High"), Some(Priority::High));
        assert_eq!(Priority::parse("Medium"), Some(Priority::Medium));
        assert_eq!(Priority::parse("Low"), Some(Priority::Low));
    }

    #[test]
    fn test_parse_unrecognized_label() {
        assert_eq!(Priority::parse("Urgent"), None);
        assert_eq!(Priority::parse("critical"), None);
        assert_eq!(Priority::parse(""), None);
    }

    #[test]
    fn test_article_priority_from_label() {
        let mut article = article_with_summary("");
        article.priority_level = "High".to_string();
        assert_eq!(article.priority(), Some(Priority::High));

        article.priority_level = "whenever".to_string();
        assert_eq!(article.priority(), None);
    }

    // ==================== First Sentence Tests ====================

    #[test]
    fn test_first_sentence_stops_at_first_period() {
        let article = article_with_summary("First point. Second point. Third.");
        assert_eq!(article.first_sentence(), Some("First point.".to_string()));
    }

    #[test]
    fn test_first_sentence_appends_missing_period() {
        let article = article_with_summary("No terminator here");
        assert_eq!(
            article.first_sentence(),
            Some("No terminator here.".to_string())
        );
    }

    #[test]
    fn test_first_sentence_empty_summary() {
        let article = article_with_summary("");
        assert_eq!(article.first_sentence(), None);
    }

    // ==================== Classification Text Tests ====================

    #[test]
    fn test_classification_text_is_lowercased_title_and_summary() {
        let mut article = article_with_summary("A Study of LLMs.");
        article.title = "OpenAI Launches".to_string();
        assert_eq!(
            article.classification_text(),
            "openai launches a study of llms."
        );
    }
}
