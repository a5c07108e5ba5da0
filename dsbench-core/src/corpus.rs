//! Synthetic corpus generation with deterministic seeding
//!
//! A corpus is a text file with one token per line. Tokens are produced by a
//! weighted choice between strategies: structured URI-like keys that share
//! long prefixes, natural-language word salad drawn from the system word
//! list, and (optionally) random alphanumeric gibberish. Mixing the shapes
//! stresses structures whose performance depends on key distribution.
//!
//! Word salad depends on an external word list (`/usr/share/dict/words` by
//! default). There is no built-in fallback: a missing list is reported as
//! [`CorpusError::ResourceUnavailable`].

use crate::error::{CorpusError, CorpusResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the system word list
pub const DEFAULT_WORD_LIST: &str = "/usr/share/dict/words";

/// Default number of tokens in a corpus
pub const DEFAULT_TOKEN_COUNT: usize = 1 << 20;

const SCHEMES: [&str; 2] = ["http", "https"];

const DOMAINS: [&str; 8] = [
    "example.org",
    "example.net",
    "www.example.com",
    "data.example.org",
    "archive.example.edu",
    "localhost",
    "mirror.example.io",
    "static.example.net",
];

const SEGMENTS: [&str; 16] = [
    "index", "docs", "api", "v1", "v2", "users", "items", "search", "static", "images", "archive",
    "tags", "feed", "about", "releases", "download",
];

const MAX_SEGMENTS: usize = 5;
const MAX_WORDS: usize = 7;
const MAX_GIBBERISH_LEN: usize = 63;
const GIBBERISH_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shape of a generated token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStrategy {
    /// `scheme://domain/segment/.../`
    UriLike,
    /// 1-7 dictionary words separated by spaces
    WordSalad,
    /// 1-63 random ASCII letters and digits
    Gibberish,
}

/// Relative weights used to pick a strategy per token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyWeights {
    pub uri_like: f64,
    pub word_salad: f64,
    pub gibberish: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            uri_like: 1.0,
            word_salad: 1.0,
            gibberish: 0.0,
        }
    }
}

impl StrategyWeights {
    fn entries(&self) -> [(TokenStrategy, f64); 3] {
        [
            (TokenStrategy::UriLike, self.uri_like),
            (TokenStrategy::WordSalad, self.word_salad),
            (TokenStrategy::Gibberish, self.gibberish),
        ]
    }

    /// Whether word-salad tokens can be produced with these weights
    #[must_use]
    pub fn needs_word_list(&self) -> bool {
        self.word_salad > 0.0
    }
}

/// Corpus settings as they appear in the `[corpus]` config section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Destination of the corpus file
    pub path: PathBuf,
    /// Number of tokens to write
    pub count: usize,
    /// Word list used for word-salad tokens
    pub word_list: PathBuf,
    /// Seed for reproducible corpora; entropy when absent
    pub seed: Option<u64>,
    pub weights: StrategyWeights,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("corpus.txt"),
            count: DEFAULT_TOKEN_COUNT,
            word_list: PathBuf::from(DEFAULT_WORD_LIST),
            seed: None,
            weights: StrategyWeights::default(),
        }
    }
}

/// Dictionary words loaded once and sampled with replacement
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Load a newline-separated word list
    pub fn load(path: &Path) -> CorpusResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| CorpusError::ResourceUnavailable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let list = Self::from_words(contents.lines());
        if list.is_empty() {
            return Err(CorpusError::ResourceUnavailable {
                path: path.to_path_buf(),
                reason: "word list contains no words".to_string(),
            });
        }

        debug!(path = %path.display(), words = list.len(), "Loaded word list");
        Ok(list)
    }

    /// Build a list from in-memory words, dropping blank entries
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }
}

/// Result of asking for a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusOutcome {
    /// The file already existed and was left untouched
    Reused,
    /// A fresh corpus was written
    Generated { tokens: usize },
}

/// Produces tokens by weighted choice between strategies
#[derive(Debug, Clone)]
pub struct CorpusGenerator {
    strategies: Vec<TokenStrategy>,
    choice: WeightedIndex<f64>,
    words: Option<WordList>,
}

impl CorpusGenerator {
    /// Create a generator from weights and an optional word list
    ///
    /// A word list is required whenever word salad has a non-zero weight.
    pub fn new(weights: &StrategyWeights, words: Option<WordList>) -> CorpusResult<Self> {
        let active: Vec<(TokenStrategy, f64)> = weights
            .entries()
            .into_iter()
            .filter(|(_, weight)| *weight != 0.0)
            .collect();

        if active.is_empty() {
            return Err(CorpusError::InvalidWeights(
                "at least one strategy needs a positive weight".to_string(),
            ));
        }

        if weights.needs_word_list() && words.as_ref().is_none_or(WordList::is_empty) {
            return Err(CorpusError::InvalidWeights(
                "word_salad has a positive weight but no words were provided".to_string(),
            ));
        }

        let choice = WeightedIndex::new(active.iter().map(|(_, weight)| *weight))
            .map_err(|err| CorpusError::InvalidWeights(err.to_string()))?;

        Ok(Self {
            strategies: active.into_iter().map(|(strategy, _)| strategy).collect(),
            choice,
            words,
        })
    }

    /// Create a generator, loading the word list only when it is needed
    pub fn from_config(config: &CorpusConfig) -> CorpusResult<Self> {
        let words = if config.weights.needs_word_list() {
            Some(WordList::load(&config.word_list)?)
        } else {
            None
        };
        Self::new(&config.weights, words)
    }

    /// Pick the strategy for the next token
    pub fn next_strategy<R: Rng>(&self, rng: &mut R) -> TokenStrategy {
        self.strategies[self.choice.sample(rng)]
    }

    /// Produce one token
    pub fn token<R: Rng>(&self, rng: &mut R) -> String {
        match self.next_strategy(rng) {
            TokenStrategy::UriLike => uri_like_token(rng),
            TokenStrategy::WordSalad => match &self.words {
                Some(words) => word_salad_token(words, rng),
                None => uri_like_token(rng),
            },
            TokenStrategy::Gibberish => gibberish_token(rng),
        }
    }

    /// Write `count` tokens to `destination` unless it already exists
    ///
    /// Tokens are written to a sibling `.partial` file that is renamed into
    /// place on success, so a failed run never leaves a truncated corpus.
    pub fn generate<R: Rng>(
        &self,
        count: usize,
        destination: &Path,
        rng: &mut R,
    ) -> CorpusResult<CorpusOutcome> {
        if destination.exists() {
            info!(path = %destination.display(), "Reusing existing corpus");
            return Ok(CorpusOutcome::Reused);
        }

        info!(path = %destination.display(), tokens = count, "Generating corpus");

        let staging = staging_path(destination);
        let write_err = |source: std::io::Error| CorpusError::Write {
            path: destination.to_path_buf(),
            source,
        };

        if let Err(source) = self.write_tokens(count, &staging, rng) {
            let _ = fs::remove_file(&staging);
            return Err(write_err(source));
        }
        fs::rename(&staging, destination).map_err(|source| {
            let _ = fs::remove_file(&staging);
            write_err(source)
        })?;

        Ok(CorpusOutcome::Generated { tokens: count })
    }

    fn write_tokens<R: Rng>(&self, count: usize, path: &Path, rng: &mut R) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(path)?);
        for _ in 0..count {
            writeln!(out, "{}", self.token(rng))?;
        }
        out.flush()
    }
}

/// Generate (or reuse) the corpus described by `config`
///
/// An existing file short-circuits before the word list is touched.
pub fn ensure_corpus(config: &CorpusConfig) -> CorpusResult<CorpusOutcome> {
    if config.path.exists() {
        info!(path = %config.path.display(), "Reusing existing corpus");
        return Ok(CorpusOutcome::Reused);
    }

    let generator = CorpusGenerator::from_config(config)?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generator.generate(config.count, &config.path, &mut rng)
}

/// `scheme://domain/` followed by 1-5 `segment/` parts
pub fn uri_like_token<R: Rng>(rng: &mut R) -> String {
    let scheme = SCHEMES[rng.gen_range(0..SCHEMES.len())];
    let domain = DOMAINS[rng.gen_range(0..DOMAINS.len())];

    let mut token = format!("{scheme}://{domain}/");
    for _ in 0..rng.gen_range(1..=MAX_SEGMENTS) {
        token.push_str(SEGMENTS[rng.gen_range(0..SEGMENTS.len())]);
        token.push('/');
    }
    token
}

/// 1-7 words drawn with replacement, joined by single spaces
pub fn word_salad_token<R: Rng>(words: &WordList, rng: &mut R) -> String {
    let n_words = rng.gen_range(1..=MAX_WORDS);
    let mut token = String::new();
    for i in 0..n_words {
        if i > 0 {
            token.push(' ');
        }
        token.push_str(words.pick(rng));
    }
    token
}

/// 1-63 random ASCII letters and digits
pub fn gibberish_token<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(1..=MAX_GIBBERISH_LEN);
    (0..len)
        .map(|_| char::from(GIBBERISH_CHARS[rng.gen_range(0..GIBBERISH_CHARS.len())]))
        .collect()
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}
