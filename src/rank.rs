use serde::Serialize;

use crate::{
    error::Result,
    ingest::RawResume,
    tfidf::{TermSpace, cosine_similarity},
};

/// One ranked resume: the document text with its similarity score, its
/// position in the ingestion order, and a 1-based display rank.
#[derive(Debug, Clone)]
pub struct RankedResume {
    pub rank: usize,
    /// Ingestion index of the document. This is its identity; it also
    /// serves as the tie-break key for equal scores.
    pub index: usize,
    pub score: f32,
    pub text: String,
}

/// Score every resume against the job description and return the top `n`.
///
/// 1. Fit a fresh term space over the query plus all resumes
/// 2. Weigh the query and each resume into TF-IDF vectors
/// 3. Score each resume by cosine similarity against the query
/// 4. Sort by score descending, ties broken by ingestion index ascending
/// 5. Truncate to `top_n` and assign 1-based ranks
///
/// Both inputs are expected to be already normalized. The function is
/// total: empty queries or resumes simply score 0.0, and the result length
/// is `min(top_n, resumes.len())`.
pub fn rank_resumes(query: &str, resumes: &[String], top_n: usize) -> Vec<RankedResume> {
    let space = TermSpace::fit(
        std::iter::once(query).chain(resumes.iter().map(String::as_str)),
    );
    let query_vector = space.weigh(query);

    tracing::debug!(
        "ranking {} resumes over {} terms",
        resumes.len(),
        space.len()
    );

    let mut scored: Vec<RankedResume> = resumes
        .iter()
        .enumerate()
        .map(|(index, text)| RankedResume {
            rank: 0, // Set later
            index,
            score: cosine_similarity(&query_vector, &space.weigh(text)),
            text: text.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    scored.truncate(top_n);

    for (i, result) in scored.iter_mut().enumerate() {
        result.rank = i + 1;
    }

    scored
}

/// Format results for human-readable terminal output.
pub fn format_human(results: &[RankedResume], sources: &[RawResume]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }

    for r in results {
        let origin = sources.get(r.index).map_or("?", |s| s.origin.as_str());
        println!("{:>3}. [{:.4}] {origin}", r.rank, r.score);
    }
    println!("\n{} result(s)", results.len());
}

#[derive(Serialize)]
struct JsonResult<'a> {
    rank: usize,
    score: f32,
    origin: &'a str,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    result_count: usize,
    results: Vec<JsonResult<'a>>,
}

/// Format results as a single JSON object on stdout.
pub fn format_json(results: &[RankedResume], sources: &[RawResume], query: &str) -> Result<()> {
    let output = JsonOutput {
        query,
        result_count: results.len(),
        results: results
            .iter()
            .map(|r| JsonResult {
                rank: r.rank,
                score: r.score,
                origin: sources.get(r.index).map_or("?", |s| s.origin.as_str()),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::normalize::normalize;

    fn normalized(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| normalize(d)).collect()
    }

    #[test]
    fn best_lexical_match_ranks_first() {
        let resumes = normalized(&[
            "Experienced Python backend developer",
            "Frontend React developer",
            "Chef with 10 years experience",
        ]);
        let results = rank_resumes(&normalize("Python backend developer"), &resumes, 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].index, 0, "python backend resume should rank first");
        assert_eq!(results[1].index, 1, "shared 'developer' term should beat the chef");
        assert!(results[0].score > results[1].score);
        assert!(results[1].score > 0.0);
    }

    #[test]
    fn disjoint_vocabulary_scores_zero() {
        let resumes = normalized(&["chef with years of experience"]);
        let results = rank_resumes(&normalize("python backend developer"), &resumes, 10);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn identical_document_scores_near_one() {
        let resumes = normalized(&[
            "senior rust engineer with systems background",
            "entirely unrelated pastry chef",
        ]);
        let query = normalize("senior rust engineer with systems background");
        let results = rank_resumes(&query, &resumes, 10);

        assert_eq!(results[0].index, 0);
        assert!(
            (results[0].score - 1.0).abs() < 1e-4,
            "identical text should score ~1.0, got {}",
            results[0].score
        );
    }

    #[test]
    fn equal_scores_keep_ingestion_order() {
        let resumes = normalized(&["rust engineer", "rust engineer", "rust engineer"]);
        let results = rank_resumes(&normalize("rust engineer"), &resumes, 10);

        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, [0, 1, 2], "ties should break by ingestion order");
        assert!(results[0].score == results[1].score && results[1].score == results[2].score);
    }

    #[test]
    fn truncates_to_top_n() {
        let resumes = normalized(&[
            "rust developer",
            "rust developer and trainer",
            "rust developer with web experience",
            "gardener",
        ]);
        let results = rank_resumes(&normalize("rust developer"), &resumes, 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn top_n_beyond_corpus_returns_everything() {
        let resumes = normalized(&["rust developer", "gardener"]);
        let results = rank_resumes(&normalize("rust developer"), &resumes, 50);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn ranks_are_one_indexed_and_sequential() {
        let resumes = normalized(&["alpha beta", "beta gamma", "gamma delta", "delta epsilon"]);
        let results = rank_resumes(&normalize("beta gamma delta"), &resumes, 10);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.rank, i + 1);
        }
    }

    #[test]
    fn scores_are_descending() {
        let resumes = normalized(&[
            "python backend developer with flask",
            "python developer",
            "frontend developer",
            "pastry chef",
        ]);
        let results = rank_resumes(&normalize("python backend developer"), &resumes, 10);
        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn empty_corpus_returns_no_results() {
        let results = rank_resumes("python developer", &[], 10);
        assert!(results.is_empty());
    }

    #[test]
    fn empty_query_scores_everything_zero() {
        let resumes = normalized(&["rust developer", "chef"]);
        let results = rank_resumes("", &resumes, 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(results[0].index, 0, "zero scores fall back to ingestion order");
    }

    proptest! {
        #[test]
        fn result_count_and_score_bounds(
            query in ".*",
            docs in prop::collection::vec(".*", 0..8),
            top_n in 0usize..12,
        ) {
            let resumes: Vec<String> = docs.iter().map(|d| normalize(d)).collect();
            let results = rank_resumes(&normalize(&query), &resumes, top_n);

            prop_assert_eq!(results.len(), top_n.min(resumes.len()));
            for r in &results {
                prop_assert!((0.0..=1.0).contains(&r.score));
                prop_assert!(r.index < resumes.len());
            }
            for window in results.windows(2) {
                prop_assert!(window[0].score >= window[1].score);
                if window[0].score == window[1].score {
                    prop_assert!(window[0].index < window[1].index);
                }
            }
        }
    }
}
