
use std::collections::HashMap;
use std::f64::consts::SQRT_2;
use std::fmt::Display;
use std::str::FromStr;
use anyhow::bail;

/// A sparse vector of co-occurrence counts, keyed by word. Absent keys are zero.
pub type SparseVector = HashMap<String, usize>;

// returned when a vector has no length, below every score the measures here produce
const ZERO_VECTOR_SCORE: f64 = -1.0;

fn sum_of_squares(vec: &SparseVector) -> f64 {
    vec.values().map(|x| (*x as f64) * (*x as f64)).sum()
}

/// The l2 norm of `vec`, 0 for an empty vector.
pub fn norm(vec: &SparseVector) -> f64 {
    sum_of_squares(vec).sqrt()
}

fn dot(vec1: &SparseVector, vec2: &SparseVector) -> f64 {

    // iterate the shorter side, keys unique to one side contribute nothing
    let (small, large) = if vec1.len() <= vec2.len() { (vec1, vec2) } else { (vec2, vec1) };
    small
    .iter()
    .filter_map(|(k, v)| large.get(k).map(|w| (*v as f64) * (*w as f64)))
    .sum()
}

/// Cosine similarity between two sparse vectors.
///
/// Returns -1.0 when either vector is empty or all zero, which is lower than any
/// similarity two count vectors can actually have.
pub fn cosine_similarity(vec1: &SparseVector, vec2: &SparseVector) -> f64 {

    let base1 = sum_of_squares(vec1);
    let base2 = sum_of_squares(vec2);
    if base1 == 0.0 || base2 == 0.0 {
        return ZERO_VECTOR_SCORE;
    }

    dot(vec1, vec2) / (base1.sqrt() * base2.sqrt())
}

/// Euclidean distance `d` mapped to `1 / (1 + d)`, so identical vectors score 1 and
/// far apart ones approach 0.
pub fn euclidean_similarity(vec1: &SparseVector, vec2: &SparseVector) -> f64 {

    let mut total = 0.0;
    for (k, v) in vec1 {
        let w = vec2.get(k).copied().unwrap_or(0) as f64;
        total += (*v as f64 - w).powi(2);
    }
    for (k, w) in vec2 {
        if !vec1.contains_key(k) {
            total += (*w as f64).powi(2);
        }
    }
    1.0 / (1.0 + total.sqrt())
}

/// Euclidean distance between the two vectors scaled to unit length, mapped onto [0, 1].
///
/// Unit vectors with non-negative components are at most sqrt(2) apart. Returns -1.0
/// when either vector has no length.
pub fn normalized_euclidean_similarity(vec1: &SparseVector, vec2: &SparseVector) -> f64 {

    let n1 = norm(vec1);
    let n2 = norm(vec2);
    if n1 == 0.0 || n2 == 0.0 {
        return ZERO_VECTOR_SCORE;
    }

    // ||a - b||^2 = ||a||^2 + ||b||^2 - 2 a.b, both sides are unit length here
    let squared = (2.0 - 2.0 * dot(vec1, vec2) / (n1 * n2)).max(0.0);
    1.0 - squared.sqrt() / SQRT_2
}

/// The similarity measures that can be selected by name in the run configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measure {
    Cosine,
    Euclidean,
    NormalizedEuclidean,
}

impl Measure {

    pub fn score(&self, vec1: &SparseVector, vec2: &SparseVector) -> f64 {
        match self {
            Measure::Cosine => cosine_similarity(vec1, vec2),
            Measure::Euclidean => euclidean_similarity(vec1, vec2),
            Measure::NormalizedEuclidean => normalized_euclidean_similarity(vec1, vec2),
        }
    }
}

impl FromStr for Measure {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosine" => Ok(Measure::Cosine),
            "euclidean" => Ok(Measure::Euclidean),
            "normalized_euclidean" => Ok(Measure::NormalizedEuclidean),
            _ => bail!("unrecognized similarity measure {}", s)
        }
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Measure::Cosine => "cosine",
            Measure::Euclidean => "euclidean",
            Measure::NormalizedEuclidean => "normalized_euclidean",
        };
        write!(f, "{}", name)
    }
}
