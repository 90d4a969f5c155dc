
use crate::cooccurrence::SemanticDescriptors;
use crate::vector::{Measure, SparseVector};
use anyhow::{anyhow, Result};

// score of a pair where either word has no descriptor
const UNKNOWN_WORD_SCORE: f64 = -1.0;

/// Returns the element of `choices` most similar to `word` under `similarity_fn`.
///
/// Choices are scanned in order and only a strictly greater score replaces the current
/// best, so the earliest choice wins ties. A pair where either word has no descriptor
/// scores -1 and `similarity_fn` is not called for it.
///
/// # Panics
///
/// Panics if `choices` is empty.
pub fn most_similar_word<'c, F>(word: &str, choices: &'c [String], descriptors: &SemanticDescriptors, similarity_fn: F) -> &'c str
where
    F: Fn(&SparseVector, &SparseVector) -> f64,
{

    let mut best_choice = choices[0].as_str();
    let mut max_similarity = UNKNOWN_WORD_SCORE;
    let target = descriptors.get(word);

    for choice in choices {

        let similarity = match (target, descriptors.get(choice)) {
            (Some(vec1), Some(vec2)) => similarity_fn(vec1, vec2),
            _ => UNKNOWN_WORD_SCORE
        };

        if similarity > max_similarity {
            max_similarity = similarity;
            best_choice = choice.as_str();
        }
    }

    best_choice
}

/// Nearest-neighbour queries over a descriptor table with a fixed measure.
pub struct Similarity<'a> {
    descriptors: &'a SemanticDescriptors,
    measure: Measure,
}

impl<'a> Similarity<'a> {

    pub fn new(descriptors: &'a SemanticDescriptors, measure: Measure) -> Similarity<'a> {
        Self { descriptors, measure }
    }

    pub fn find_k_most_similar(&self, word: &str, k: usize) -> Result<Vec<(String, f64)>> {

        let vec = self.descriptors.get(word)
        .ok_or_else(|| anyhow!("token: {} has no descriptor in the corpus", word))?;

        // score every other word
        let mut scores: Vec<(&String, f64)> = self.descriptors
        .iter()
        .filter(|(other, _)| other.as_str() != word)
        .map(|(other, other_vec)| (other, self.measure.score(vec, other_vec)))
        .collect();

        // sort by most similar in descending order, ties alphabetically so the output is stable
        scores.sort_by(|(a, s), (b, t)| t.total_cmp(s).then_with(|| a.cmp(b)));
        scores.truncate(k);

        Ok(scores.into_iter().map(|(other, score)| (other.to_owned(), score)).collect())
    }

}
