
use std::{env, fs::File, io::{self, BufRead}};
use anyhow::{bail, Context, Result};
use semantic_synonyms::{Run, Similarity};
use tracing::warn;


// lists the k most similar words to every word in an input file, using the descriptors
// and the similarity measure of a run configuration.
// treated as binary executable so it can be ran independantly from main

fn main() {

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    // arguments to this executable should be:
    // path to the json configuration (its corpus files are loaded)
    // path to input words, one per line
    // number of neighbours to show
    // example: ... args.json Input/words.txt 10
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 { bail!("arguments should be a path to json, a path to words and k"); }
    let k: usize = args[3].parse().with_context(|| format!("k should be a positive integer, got {}", &args[3]))?;

    // read inputs file
    let open_in_file = File::open(&args[2]).with_context(|| format!("could not open input file {}", &args[2]))?;
    let inputs = io::BufReader::new(open_in_file)
    .lines()
    .collect::<io::Result<Vec<String>>>()?;

    Run::init_logging();
    let (params, _, descriptors) = Run::prepare(&args[..2])?;
    let sim_obj = Similarity::new(&descriptors, params.similarity);

    run_similarity(&inputs, k, &sim_obj);
    Ok(())
}

fn run_similarity(inputs: &[String], k: usize, similarity_object: &Similarity) {

    // finding the k most similar words to each of the input tokens

    for token in inputs.iter().map(|x| x.trim()).filter(|x| !x.is_empty()) {

        let token = token.to_lowercase();
        println!("searching {} most similar words to {}", k, token);
        match similarity_object.find_k_most_similar(&token, k) {
            Ok(similarities) => {
                for (i, (similar_token, score)) in similarities.iter().enumerate() {
                    println!("{} : {} ? {} = {}", i, token, similar_token, score);
                }
            },
            Err(e) => warn!("{}", e)
        }
        println!("\n");
    }

}
