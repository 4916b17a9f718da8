//! Per-person statistics over final pair labels.

use std::collections::HashMap;

use rapagem_core::Person;

use crate::types::{PairSentiment, PersonAggregate, SentimentLabel};

/// Fold one person's pair rows into counts and 0-100 percentages.
///
/// Rows belonging to other persons are ignored. With no rows every count and
/// percentage is zero.
#[must_use]
pub fn aggregate_person<'a, I>(person: &Person, rows: I) -> PersonAggregate
where
    I: IntoIterator<Item = &'a PairSentiment>,
{
    let mut total = 0_usize;
    let mut positive = 0_usize;
    let mut negative = 0_usize;
    let mut neutral = 0_usize;
    let mut mentioned = 0_usize;

    for row in rows.into_iter().filter(|r| r.person_id == person.id) {
        total += 1;
        match row.result.label {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => neutral += 1,
        }
        if row.mentioned() {
            mentioned += 1;
        }
    }

    PersonAggregate {
        person_id: person.id,
        person_name: person.name.clone(),
        total,
        positive,
        negative,
        neutral,
        pct_positive: percent(positive, total),
        pct_negative: percent(negative, total),
        pct_neutral: percent(neutral, total),
        pct_direct_mention: percent(mentioned, total),
    }
}

/// Aggregate every person, including those with no pairs.
///
/// Ordered by total descending, then name, then id.
#[must_use]
pub fn aggregate_all(persons: &[Person], rows: &[PairSentiment]) -> Vec<PersonAggregate> {
    let mut by_person: HashMap<i64, Vec<&PairSentiment>> = HashMap::new();
    for row in rows {
        by_person.entry(row.person_id).or_default().push(row);
    }

    let mut out: Vec<PersonAggregate> = persons
        .iter()
        .map(|p| {
            let rows = by_person.get(&p.id).map(Vec::as_slice).unwrap_or_default();
            aggregate_person(p, rows.iter().copied())
        })
        .collect();

    out.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.person_name.cmp(&b.person_name))
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    out
}

/// `count / total * 100`, or 0 when `total` is 0.
#[allow(clippy::cast_precision_loss)]
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}
