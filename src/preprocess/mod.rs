// Text preprocessing: lowercase, tokenize, drop stopwords and punctuation.
//
// The English stopword list is NLTK's, from the `stop-words` crate, loaded
// once when the Preprocessor is built. Callers share one Preprocessor for
// the life of the process (it's cheap to clone behind an Arc).

pub mod tokenizer;

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use self::tokenizer::tokenize;

/// Turns free text into cleaned, lowercase content-word tokens.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    stop_words: HashSet<String>,
}

impl Preprocessor {
    /// Preprocessor using the standard English stopword list.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(words)
    }

    /// Preprocessor with a custom stopword list. Entries are lowercased.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lowercase and tokenize `text`, keeping only alphanumeric tokens that
    /// aren't stopwords. An empty result is a valid outcome.
    pub fn clean(&self, text: &str) -> Vec<String> {
        tokenize(&text.to_lowercase())
            .into_iter()
            .filter(|t| t.chars().all(char::is_alphanumeric))
            .filter(|t| !self.is_stop_word(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_stopwords_and_punctuation() {
        let pre = Preprocessor::with_stop_words(["the", "of", "a"]);
        assert_eq!(
            pre.clean("The Origin of a Comet's Tail!"),
            vec!["origin", "comet", "tail"]
        );
    }

    #[test]
    fn test_only_stopwords_yields_empty() {
        let pre = Preprocessor::english();
        assert!(pre.clean("The And Of").is_empty());
        assert!(pre.clean("?!  ...").is_empty());
        assert!(pre.clean("").is_empty());
    }

    #[test]
    fn test_hyphenated_and_decimal_tokens_dropped() {
        let pre = Preprocessor::with_stop_words(["the"]);
        assert!(pre.clean("CRISPR-Cas9").is_empty());
        assert_eq!(pre.clean("Deep-sea vents at 3.5 km"), vec!["vents", "at", "km"]);
    }

    #[test]
    fn test_custom_list_is_case_insensitive() {
        let pre = Preprocessor::with_stop_words(["NASA"]);
        assert!(pre.is_stop_word("nasa"));
        assert!(pre.clean("NASA launches probe").contains(&"probe".to_string()));
    }
}
