
mod run;
mod config;
mod cooccurrence;
mod vector;
mod similarity;
mod evaluate;

pub use run::Run;
pub use config::{Config, JsonTypes};
pub use cooccurrence::{Counts, SemanticDescriptors};
pub use vector::{cosine_similarity, euclidean_similarity, normalized_euclidean_similarity, norm, Measure, SparseVector};
pub use similarity::{most_similar_word, Similarity};
pub use evaluate::{evaluate, read_questions, run_similarity_test, Evaluation, Question};
