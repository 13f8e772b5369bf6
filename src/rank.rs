use crate::parse::normalize_query;
use crate::types::{ScoredResult, SearchConfig, SearchableRecord};

/// Score for a candidate that does not contain the query as a subsequence
/// Always greater than any real match and any usable cutoff
pub const NO_MATCH: u64 = u64::MAX;

/// Unmatched stretches of a candidate around the query's characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gaps {
    /// Characters before the first matched character
    pub leading: usize,
    /// Characters between each pair of consecutive matched characters
    pub interior: Vec<usize>,
    /// Characters after the last matched character
    pub trailing: usize,
}

impl Gaps {
    /// Cost of this alignment: linear at the ends, quadratic in between
    pub fn cost(&self) -> u64 {
        let ends = (self.leading as u64).saturating_add(self.trailing as u64);
        let cost = self
            .interior
            .iter()
            .map(|&g| (g as u64).saturating_mul(g as u64))
            .fold(ends, u64::saturating_add);
        cost.min(NO_MATCH - 1)
    }
}

/// Align the query's characters to the earliest possible positions in candidate
///
/// Returns None when the query is not a subsequence of the candidate.
/// Lengths are counted in chars, not bytes.
pub fn match_gaps(query: &str, candidate: &str) -> Option<Gaps> {
    let mut wanted = query.chars().peekable();
    let mut positions = Vec::with_capacity(query.len());
    let mut total = 0usize;

    for (i, c) in candidate.chars().enumerate() {
        total = i + 1;
        if wanted.peek() == Some(&c) {
            wanted.next();
            positions.push(i);
        }
    }

    if wanted.peek().is_some() {
        return None;
    }

    let (first, last) = match (positions.first(), positions.last()) {
        (Some(&first), Some(&last)) => (first, last),
        // Empty query: nothing to place
        _ => {
            return Some(Gaps {
                leading: 0,
                interior: Vec::new(),
                trailing: 0,
            })
        }
    };

    Some(Gaps {
        leading: first,
        interior: positions.windows(2).map(|w| w[1] - w[0] - 1).collect(),
        trailing: total - last - 1,
    })
}

/// Match cost of a lower-cased query against a lower-cased candidate
///
/// 0 is a perfect match. No case folding happens here; callers normalize first.
pub fn fuzzy_score(query: &str, candidate: &str) -> u64 {
    if query.is_empty() || query == candidate {
        return 0;
    }
    match match_gaps(query, candidate) {
        Some(gaps) => gaps.cost(),
        None => NO_MATCH,
    }
}

/// Score every record, drop anything above cutoff, order by ascending score
/// Equal scores keep index order
pub fn rank(query: &str, records: &[SearchableRecord], cutoff: u64) -> Vec<ScoredResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let cutoff = cutoff.min(NO_MATCH - 1);
    let mut results: Vec<ScoredResult> = records
        .iter()
        .filter_map(|record| {
            let score = fuzzy_score(query, &record.search_text);
            (score <= cutoff).then(|| ScoredResult::from_record(record, score))
        })
        .collect();

    // sort_by_key is stable
    results.sort_by_key(|r| r.score);
    results
}

/// Get N best results from a ranked list (0 keeps everything)
pub fn top_n<T>(mut ranked: Vec<T>, n: usize) -> Vec<T> {
    if n > 0 {
        ranked.truncate(n);
    }
    ranked
}

/// Normalize a raw query, rank the index and apply the configured limit
pub fn search(query: &str, records: &[SearchableRecord], config: &SearchConfig) -> Vec<ScoredResult> {
    let query = normalize_query(query);
    top_n(rank(&query, records, config.cutoff), config.limit)
}
