

use crate::vector::Measure;

use serde_json::Value;
use std::{fs::File, fmt::Display, io::BufReader, path::PathBuf};
use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct JsonTypes {
    pub corpus_files: Vec<PathBuf>,
    pub questions_file: PathBuf,
    pub similarity: Measure,
    pub num_threads: usize
}


impl Display for JsonTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let corpus_files: Vec<String> = self.corpus_files.iter().map(|p| p.display().to_string()).collect();
        write!(f, "using params:
        corpus_files: {:?}
        questions_file: {}
        similarity: {}
        num_threads: {}",
        corpus_files, self.questions_file.display(), self.similarity, self.num_threads)
    }
}

pub struct Config {
    params: JsonTypes
}

impl Config {

    pub fn get_params(&self) -> JsonTypes {
        self.params.clone()
    }

    /// Builds the configuration from the program arguments, which should be a path to a json file only.
    pub fn new(args: &[String]) -> Result<Config> {

        if args.len() != 2 {
            bail!("input should be a path to json file only");
        }

        // parse input json
        let f = File::open(&args[1]).with_context(|| format!("cannot open json file {}", &args[1]))?;
        let json: Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("cannot read json file {}", &args[1]))?;

        Config::from_json(&json)
    }

    pub fn from_json(json: &Value) -> Result<Config> {

        // validate corpus and questions in json
        let corpus_files = match json.get("corpus_files") {
            Some(Value::Array(items)) => items.iter().map(|item| {
                item.as_str().map(PathBuf::from).context("cannot cast corpus file to string")
            }).collect::<Result<Vec<PathBuf>>>()?,
            Some(_) => bail!("corpus_files should be a list of paths"),
            None => bail!("corpus_files was not supplied through json")
        };
        if corpus_files.is_empty() {
            bail!("corpus_files should name at least one file");
        }

        let questions_file = json.get("questions_file")
        .context("questions_file was not supplied through json")?
        .as_str()
        .context("cannot cast questions file to string")?;

        // handle default vs input parameters
        let similarity = match json.get("similarity") {
            Some(similarity) => similarity.as_str().context("given similarity is not a string")?.parse()?,
            None => Measure::Cosine
        };
        let num_threads = match json.get("num_threads") {
            Some(num_threads) => num_threads.as_u64().context("given num_threads is not a positive integer")?,
            None => 1
        };
        if num_threads == 0 {
            bail!("num_threads should be at least 1");
        }

        let params = JsonTypes {
            corpus_files,
            questions_file: PathBuf::from(questions_file),
            similarity,
            num_threads: num_threads as usize
        };

        Ok(Self { params })
    }

}


#[cfg(test)]
mod tests {

    use std::fs;
    use std::path::PathBuf;
    use serde_json::json;
    use crate::vector::Measure;
    use super::Config;

    #[test]
    fn defaults_test() {

        let json = json!({
            "corpus_files": ["wp.txt", "sw.txt"],
            "questions_file": "test.txt"
        });
        let params = Config::from_json(&json).unwrap().get_params();

        assert_eq!(params.corpus_files, vec![PathBuf::from("wp.txt"), PathBuf::from("sw.txt")]);
        assert_eq!(params.questions_file, PathBuf::from("test.txt"));
        assert_eq!(params.similarity, Measure::Cosine);
        assert_eq!(params.num_threads, 1);
    }

    #[test]
    fn overrides_test() {

        let json = json!({
            "corpus_files": ["wp.txt"],
            "questions_file": "test.txt",
            "similarity": "normalized_euclidean",
            "num_threads": 4
        });
        let params = Config::from_json(&json).unwrap().get_params();

        assert_eq!(params.similarity, Measure::NormalizedEuclidean);
        assert_eq!(params.num_threads, 4);
    }

    #[test]
    fn invalid_test() {

        let invalid = [
            json!({ "questions_file": "test.txt" }),
            json!({ "corpus_files": "wp.txt", "questions_file": "test.txt" }),
            json!({ "corpus_files": [], "questions_file": "test.txt" }),
            json!({ "corpus_files": ["wp.txt"] }),
            json!({ "corpus_files": ["wp.txt"], "questions_file": "test.txt", "similarity": "jaccard" }),
            json!({ "corpus_files": ["wp.txt"], "questions_file": "test.txt", "num_threads": 0 }),
            json!({ "corpus_files": ["wp.txt"], "questions_file": "test.txt", "num_threads": -2 }),
        ];

        for json in &invalid {
            assert!(Config::from_json(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn from_args_test() {

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");
        fs::write(&path, r#"{"corpus_files": ["a.txt"], "questions_file": "q.txt"}"#).unwrap();

        let args = vec!["semantic_synonyms".to_string(), path.display().to_string()];
        let params = Config::new(&args).unwrap().get_params();
        assert_eq!(params.corpus_files, vec![PathBuf::from("a.txt")]);

        assert!(Config::new(&args[..1]).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(Config::new(&args).is_err());
    }

}
