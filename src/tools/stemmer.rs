use rust_stemmers::{Algorithm, Stemmer as SnowballStemmer};

/// English Snowball stemmer. Input is lowercased before stemming.
pub struct Stemmer {
    inner: SnowballStemmer,
}

impl Stemmer {
    pub fn english() -> Self {
        Stemmer {
            inner: SnowballStemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }
}

impl Default for Stemmer {
    fn default() -> Self {
        Stemmer::english()
    }
}

impl std::fmt::Debug for Stemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stemmer").field("algorithm", &"english").finish()
    }
}
