
use crate::cooccurrence::SemanticDescriptors;
use crate::similarity::most_similar_word;
use crate::vector::SparseVector;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

/// One multiple-choice synonym question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub word: String,
    pub answer: String,
    pub choices: Vec<String>,
}

impl Question {

    /// Parses `word answer choice1 ... choiceN`, or `None` for lines with fewer than 3 fields.
    pub fn parse(line: &str) -> Option<Question> {

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return None
        }

        Some(Question {
            word: fields[0].to_string(),
            answer: fields[1].to_string(),
            choices: fields[2..].iter().map(|x| x.to_string()).collect()
        })
    }

}

/// Tally of answered questions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {

    /// Percentage of correct answers, 0.0 when there were no questions.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

}

pub fn read_questions(file_path: &Path) -> Result<Vec<Question>> {

    let mut buf: Vec<u8> = Vec::new();
    let mut f = BufReader::new(File::open(file_path)?);
    f.read_to_end(&mut buf)?;

    // same latin-1 decoding as the corpus, lines may end in \n, \r\n or a bare \r
    let text: String = buf.iter().map(|b| *b as char).collect();
    Ok(text.split(['\n', '\r']).filter_map(Question::parse).collect())
}

pub fn evaluate<F>(questions: &[Question], descriptors: &SemanticDescriptors, similarity_fn: F, pool: &ThreadPool) -> Evaluation
where
    F: Fn(&SparseVector, &SparseVector) -> f64 + Sync,
{

    // the descriptors are read-only here, so questions can be answered independently
    let correct = pool.install(|| {
        questions
        .par_iter()
        .filter(|question| {
            let guess = most_similar_word(&question.word, &question.choices, descriptors, &similarity_fn);
            debug!("{} : guessed {}, answer {}", question.word, guess, question.answer);
            guess == question.answer
        })
        .count()
    });

    Evaluation { correct, total: questions.len() }
}

/// Reads the questions in `file_path` and returns the percentage answered correctly.
pub fn run_similarity_test<F>(file_path: &Path, descriptors: &SemanticDescriptors, similarity_fn: F, pool: &ThreadPool) -> Result<f64>
where
    F: Fn(&SparseVector, &SparseVector) -> f64 + Sync,
{

    let questions = read_questions(file_path)
    .with_context(|| format!("could not load questions from {}", file_path.display()))?;
    let evaluation = evaluate(&questions, descriptors, similarity_fn, pool);
    debug!("{} of {} questions answered correctly", evaluation.correct, evaluation.total);
    Ok(evaluation.percentage())
}


#[cfg(test)]
mod tests {

    use std::fs;
    use rayon::ThreadPoolBuilder;
    use crate::cooccurrence::SemanticDescriptors;
    use crate::vector::cosine_similarity;
    use super::{evaluate, read_questions, run_similarity_test, Evaluation, Question};

    fn descriptors() -> SemanticDescriptors {
        let sentences: Vec<Vec<String>> = [
            &["cat", "dog", "pet"][..],
            &["cat", "dog", "fur"],
            &["tree", "leaf"],
            &["tree", "leaf", "green"],
        ]
        .iter()
        .map(|s| s.iter().map(|w| w.to_string()).collect())
        .collect();
        SemanticDescriptors::build(&sentences)
    }

    #[test]
    fn parse_question_test() {

        let question = Question::parse("  cat dog dog tree \n").unwrap();
        assert_eq!(question.word, "cat");
        assert_eq!(question.answer, "dog");
        assert_eq!(question.choices, vec!["dog".to_string(), "tree".to_string()]);

        assert_eq!(Question::parse("cat dog"), None);
        assert_eq!(Question::parse(""), None);
        assert_eq!(Question::parse("cat dog tree").map(|q| q.choices.len()), Some(1));
    }

    #[test]
    fn percentage_test() {
        assert_eq!(Evaluation::default().percentage(), 0.0);
        assert_eq!(Evaluation { correct: 1, total: 4 }.percentage(), 25.0);
        assert_eq!(Evaluation { correct: 3, total: 3 }.percentage(), 100.0);
    }

    #[test]
    fn evaluation_example_test() {

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let pool = ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let table = descriptors();

        fs::write(&path, "cat dog dog tree\n").unwrap();
        assert_eq!(run_similarity_test(&path, &table, cosine_similarity, &pool).unwrap(), 100.0);

        // lines with fewer than 3 fields are not questions
        fs::write(&path, "cat dog\n\nleaf\n").unwrap();
        assert_eq!(run_similarity_test(&path, &table, cosine_similarity, &pool).unwrap(), 0.0);

        assert!(run_similarity_test(&dir.path().join("missing.txt"), &table, cosine_similarity, &pool).is_err());
    }

    #[test]
    fn line_endings_test() {

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let pool = ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let table = descriptors();

        for text in ["cat dog dog tree\rtree leaf leaf cat\r", "cat dog dog tree\r\ntree leaf leaf cat\r\n"] {
            fs::write(&path, text).unwrap();

            let questions = read_questions(&path).unwrap();
            assert_eq!(questions.len(), 2);
            assert_eq!(questions[0].choices, vec!["dog".to_string(), "tree".to_string()]);
            assert_eq!(questions[1].choices, vec!["leaf".to_string(), "cat".to_string()]);

            assert_eq!(run_similarity_test(&path, &table, cosine_similarity, &pool).unwrap(), 100.0);
        }
    }

    #[test]
    fn parallel_evaluation_test() {

        let table = descriptors();
        let questions: Vec<Question> = [
            "cat dog tree dog",
            "dog cat leaf cat",
            "tree leaf cat leaf",
            "cat tree dog tree",
            "unknownword pet pet fur",
        ]
        .iter()
        .filter_map(|line| Question::parse(line))
        .collect();

        let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let evaluation = evaluate(&questions, &table, cosine_similarity, &pool);

        // the fourth question is labelled wrong, the last falls back to its first choice
        assert_eq!(evaluation, Evaluation { correct: 4, total: 5 });
        assert_eq!(evaluation.percentage(), 80.0);
    }

}
