//! Source records read from the scraped-news store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scraped news article. Identity is the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    /// Publication date as found on the page (free-form).
    pub date: Option<String>,
    pub title: String,
    pub body: String,
    pub scraped_at: DateTime<Utc>,
}

impl Article {
    /// Title and body joined the way the article-level scorer reads them.
    #[must_use]
    pub fn full_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}

/// A person cited in one or more articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
}

/// "Person `person_id` is cited in article `article_url`."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticlePersonLink {
    pub article_url: String,
    pub person_id: i64,
}

/// A reader comment left on an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique within its article.
    pub comment_key: String,
    pub article_url: String,
    pub author: Option<String>,
    pub text: String,
    pub timestamp: Option<String>,
}

/// Everything the sentiment pipeline needs, loaded in one bulk read.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub articles: Vec<Article>,
    pub persons: Vec<Person>,
    pub links: Vec<ArticlePersonLink>,
    pub comments: Vec<Comment>,
}

impl Corpus {
    #[must_use]
    pub fn article_index(&self) -> HashMap<&str, &Article> {
        self.articles.iter().map(|a| (a.url.as_str(), a)).collect()
    }

    #[must_use]
    pub fn person_index(&self) -> HashMap<i64, &Person> {
        self.persons.iter().map(|p| (p.id, p)).collect()
    }

    /// Comments grouped by the article they belong to.
    #[must_use]
    pub fn comments_by_article(&self) -> HashMap<&str, Vec<&Comment>> {
        let mut out: HashMap<&str, Vec<&Comment>> = HashMap::new();
        for comment in &self.comments {
            out.entry(comment.article_url.as_str())
                .or_default()
                .push(comment);
        }
        out
    }
}
