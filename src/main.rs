use semantic_synonyms::Run;

fn main() {

    match Run::run() {
        Ok(score) => println!("{}% of the guesses were correct", score),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
