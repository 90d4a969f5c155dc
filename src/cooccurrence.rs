
// imports
use crate::vector::SparseVector;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};


/// Maps each word to the counts of the words it shared a sentence with.
///
/// Built once from a batch of sentences and read-only afterwards. A word that
/// never shared a sentence with a different word has no entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SemanticDescriptors {
    table: HashMap<String, SparseVector>,
}

impl SemanticDescriptors {

    pub fn build<S: AsRef<[String]>>(sentences: &[S]) -> Self {

        let mut table: HashMap<String, SparseVector> = HashMap::new();

        for sentence in sentences {

            // repeated words within a sentence count as a single co-occurrence
            let unique_words: HashSet<&String> = sentence.as_ref().iter().collect();
            if unique_words.len() < 2 {
                continue
            }

            for word in &unique_words {
                let descriptor = table.entry((*word).to_owned()).or_default();
                for other_word in &unique_words {
                    if other_word != word {
                        let val = descriptor.entry((*other_word).to_owned()).or_insert(0);
                        *val += 1;
                    }
                }
            }
        }

        Self { table }
    }

    pub fn get(&self, word: &str) -> Option<&SparseVector> {
        self.table.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.table.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SparseVector)> {
        self.table.iter()
    }

}


pub struct Counts {}

impl Counts {

    fn read_file(file_path: &Path) -> Result<String> {

        // gzipped corpora are decompressed on the fly, anything else is read as is
        let mut f = BufReader::new(File::open(file_path)?);
        let mut buf: Vec<u8> = Vec::new();
        if file_path.extension().map_or(false, |ext| ext == "gz") {
            GzDecoder::new(f).read_to_end(&mut buf)?;
        } else {
            f.read_to_end(&mut buf)?;
        }

        // latin-1, every byte is its own code point
        Ok(buf.iter().map(|b| *b as char).collect())
    }

    fn normalize(text: &str) -> String {

        // only '.', '!' and '?' end a sentence, the rest of the punctuation we care about
        // separates words
        text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '-' | ',' | ':' | ';' => ' ',
            '!' | '?' => '.',
            c => c
        })
        .collect()
    }

    /// Splits raw text into sentences of lowercase tokens, dropping empty sentences.
    pub fn parse_text(text: &str) -> Vec<Vec<String>> {

        Counts::normalize(text)
        .split('.')
        .map(Counts::tokenize)
        .filter(|sentence| !sentence.is_empty())
        .collect()
    }

    fn load(file_path: &Path) -> Result<Vec<Vec<String>>> {

        let text = Counts::read_file(file_path)
        .with_context(|| format!("could not read corpus file {}", file_path.display()))?;
        let sentences = Counts::parse_text(&text);
        debug!("{} sentences in {}", sentences.len(), file_path.display());
        Ok(sentences)
    }

    /// Reads every corpus file and collects their sentences, in the order the files were given.
    pub fn load_all<P: AsRef<Path> + Sync>(file_paths: &[P], pool: &ThreadPool) -> Result<Vec<Vec<String>>> {

        let per_file: Vec<Vec<Vec<String>>> = pool.install(|| {
            file_paths
            .par_iter()
            .map(|file_path| Counts::load(file_path.as_ref()))
            .collect::<Result<Vec<_>>>()
        })?;

        Ok(per_file.into_iter().flatten().collect())
    }

    pub fn run<P: AsRef<Path> + Sync>(file_paths: &[P], pool: &ThreadPool) -> Result<SemanticDescriptors> {

        // load sentences from all files, then count co-occurrences once over all of them
        let timer = Instant::now();
        let sentences = Counts::load_all(file_paths, pool)?;
        info!("loaded {} sentences from {} files, took {} ms", sentences.len(), file_paths.len(), timer.elapsed().as_millis());

        let timer = Instant::now();
        let descriptors = SemanticDescriptors::build(&sentences);
        info!("built descriptors for {} words, took {} ms", descriptors.len(), timer.elapsed().as_millis());
        if descriptors.is_empty() {
            warn!("no word shares a sentence with another, every question falls back to its first choice");
        }

        Ok(descriptors)
    }

}


// defines the behavior needed for tokinizing a sentence
trait Tokenizer {
    fn tokenize(sequence: &str) -> Vec<String>;
}

impl Tokenizer for Counts {
    // split on any whitespace, runs of spaces left by punctuation produce no empty tokens.
    // unicode whitespace only, the U+001C..U+001F separators stay inside tokens
    fn tokenize(sequence: &str) -> Vec<String> {
        sequence.split_whitespace().map(|x| x.to_string()).collect()
    }
}
