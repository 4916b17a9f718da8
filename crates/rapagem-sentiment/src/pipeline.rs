//! Batch orchestration: corpus in, detailed rows and per-person aggregates out.

use std::collections::{BTreeMap, HashMap};

use rapagem_core::{Corpus, Person, TargetNames};

use crate::aggregate::aggregate_all;
use crate::derive::{derive_final, PairContext};
use crate::lexicon::Lexicon;
use crate::scorer::score_targeted;
use crate::stance::classify_stance;
use crate::types::{PairSentiment, PersonAggregate, SentimentResult, METHOD, VERSION};

/// Output of one full run.
#[derive(Debug, Clone)]
pub struct SentimentRun {
    pub pairs: Vec<PairSentiment>,
    pub aggregates: Vec<PersonAggregate>,
}

/// Score every pair and aggregate per person.
#[must_use]
pub fn run_sentiment(lexicon: &Lexicon, corpus: &Corpus) -> SentimentRun {
    let pairs = build_pair_sentiments(lexicon, corpus);
    let aggregates = aggregate_all(&corpus.persons, &pairs);
    tracing::info!(
        pairs = pairs.len(),
        persons = aggregates.len(),
        "sentiment run complete"
    );
    SentimentRun { pairs, aggregates }
}

/// Build one [`PairSentiment`] per (comment, person linked to the comment's article).
///
/// Rows are ordered by article URL, then comment key, then person id, so the
/// same corpus always yields the same rows in the same order. Links or
/// comments that point at unknown records are logged and skipped.
#[must_use]
pub fn build_pair_sentiments(lexicon: &Lexicon, corpus: &Corpus) -> Vec<PairSentiment> {
    let articles = corpus.article_index();
    let persons = corpus.person_index();

    let targets: HashMap<i64, TargetNames> = corpus
        .persons
        .iter()
        .map(|p| {
            let names = TargetNames::from_name(&p.name);
            if names.is_empty() {
                tracing::warn!(
                    person_id = p.id,
                    "person has an empty name; mentions cannot be detected"
                );
            }
            (p.id, names)
        })
        .collect();

    // article url -> persons cited, deduplicated and ordered by id
    let mut cited: BTreeMap<&str, BTreeMap<i64, &Person>> = BTreeMap::new();
    for link in &corpus.links {
        if !articles.contains_key(link.article_url.as_str()) {
            tracing::warn!(
                article_url = %link.article_url,
                person_id = link.person_id,
                "link references unknown article"
            );
            continue;
        }
        let Some(person) = persons.get(&link.person_id) else {
            tracing::warn!(
                article_url = %link.article_url,
                person_id = link.person_id,
                "link references unknown person"
            );
            continue;
        };
        cited
            .entry(link.article_url.as_str())
            .or_default()
            .insert(person.id, person);
    }

    let mut comments_by_article = corpus.comments_by_article();
    for url in comments_by_article.keys() {
        if !articles.contains_key(url) {
            tracing::warn!(article_url = %url, "comments reference unknown article");
        }
    }

    let mut pairs = Vec::new();
    for (url, people) in &cited {
        let Some(comments) = comments_by_article.get_mut(url) else {
            continue;
        };
        comments.sort_by(|a, b| a.comment_key.cmp(&b.comment_key));

        let article_text = articles[url].full_text();
        let article_sentiment: Vec<(&Person, &TargetNames, SentimentResult)> = people
            .values()
            .map(|person| {
                let target = &targets[&person.id];
                (*person, target, score_targeted(lexicon, &article_text, target))
            })
            .collect();

        for comment in comments.iter() {
            let stance = classify_stance(&comment.text);
            for (person, target, article) in &article_sentiment {
                let sentiment = score_targeted(lexicon, &comment.text, target);
                let result = derive_final(&PairContext {
                    comment: &sentiment,
                    article,
                    mentioned: sentiment.mentioned,
                    stance: &stance,
                });
                pairs.push(PairSentiment {
                    person_id: person.id,
                    person_name: person.name.clone(),
                    comment_key: comment.comment_key.clone(),
                    article_url: comment.article_url.clone(),
                    comment_timestamp: comment.timestamp.clone(),
                    comment: sentiment,
                    article: *article,
                    stance,
                    result,
                    method: METHOD,
                    version: VERSION,
                });
            }
        }
    }

    pairs
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
