use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static PASSAGE_DIR: Dir = include_dir!("src/passages");

/// A fixed set of reference passages, embedded in the binary and loaded once
/// at startup. Passages are chosen uniformly at random per session.
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub passages: Vec<String>,
}

impl Corpus {
    pub fn built_in() -> Self {
        read_corpus_from_file("default.json").unwrap()
    }

    pub fn pick(&self, rng: &mut impl Rng) -> &str {
        &self.passages[rng.gen_range(0..self.passages.len())]
    }
}

fn read_corpus_from_file(file_name: &str) -> Result<Corpus, Box<dyn Error>> {
    let file = PASSAGE_DIR
        .get_file(file_name)
        .expect("Passage file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let corpus = from_str(file_as_str).expect("Unable to deserialize passage json");

    Ok(corpus)
}
