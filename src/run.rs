

use crate::config::{Config, JsonTypes};
use crate::cooccurrence::{Counts, SemanticDescriptors};
use crate::evaluate;
use anyhow::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::env;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

// the library and both binaries log at info unless RUST_LOG says otherwise
const DEFAULT_LOG_DIRECTIVES: &str = "semantic_synonyms=info,neighbours=info";


pub struct Run {}

impl Run {

    /// Installs the `tracing` subscriber, `RUST_LOG` overrides the default `info` level.
    pub fn init_logging() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));
        // a subscriber may already be set, e.g. when embedded
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Parses the configuration and builds the descriptors of its corpus, shared by both binaries.
    pub fn prepare(args: &[String]) -> Result<(JsonTypes, ThreadPool, SemanticDescriptors)> {

        info!("building parameters...");
        let params = Config::new(args)?.get_params();
        info!("{}", params);

        let pool = ThreadPoolBuilder::new().num_threads(params.num_threads).build()?;

        info!("starting descriptors building...");
        let descriptors = Counts::run(&params.corpus_files, &pool)?;

        Ok((params, pool, descriptors))
    }

    // runs the main procedure of 2 steps -
    // -> semantic descriptors from the corpus files
    // -> answering the synonym questions
    pub fn run() -> Result<f64> {

        Run::init_logging();
        info!("entering program...");
        let args: Vec<String> = env::args().collect();

        let timer = Instant::now();
        let (params, pool, descriptors) = Run::prepare(&args)?;
        info!("finished descriptors, took {} seconds ...", timer.elapsed().as_secs());

        let timer = Instant::now();
        info!("starting similarity test with {} similarity...", params.similarity);
        let measure = params.similarity;
        let score = evaluate::run_similarity_test(&params.questions_file, &descriptors, |v1, v2| measure.score(v1, v2), &pool)?;
        info!("finished similarity test, took {} seconds ...", timer.elapsed().as_secs());

        Ok(score)
    }

}
