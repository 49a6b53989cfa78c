// Sentence parser: turns cleaned sentences into word diagrams.
//
// Every word becomes a noun-typed box. Boxes are composed left to right
// into a single wire of the root type ("stairs" composition), so word order
// matters: the same words in a different order compile to a different
// circuit.

use anyhow::Result;

use super::types::AtomicType;

/// A single word box in a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub name: String,
    pub ty: AtomicType,
}

/// Grammatical structure of one sentence: its word boxes in reading order
/// and the type of the wire that leaves the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub words: Vec<Word>,
    pub root: AtomicType,
}

impl Diagram {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parses whitespace-separated sentences into diagrams with a fixed root type.
#[derive(Debug, Clone)]
pub struct SentenceParser {
    root: AtomicType,
}

impl SentenceParser {
    pub fn new(root: AtomicType) -> Self {
        Self { root }
    }

    pub fn root(&self) -> AtomicType {
        self.root
    }

    /// Parse one sentence. An empty (or all-whitespace) sentence has no
    /// grammatical structure and is rejected.
    pub fn sentence_to_diagram(&self, sentence: &str) -> Result<Diagram> {
        let words: Vec<Word> = sentence
            .split_whitespace()
            .map(|w| Word {
                name: w.to_string(),
                ty: AtomicType::Noun,
            })
            .collect();

        if words.is_empty() {
            anyhow::bail!("Cannot parse an empty sentence into a diagram");
        }

        Ok(Diagram {
            words,
            root: self.root,
        })
    }

    /// Parse a batch of sentences, failing on the first one that can't be parsed.
    pub fn sentences_to_diagrams<S: AsRef<str>>(&self, sentences: &[S]) -> Result<Vec<Diagram>> {
        sentences
            .iter()
            .map(|s| self.sentence_to_diagram(s.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_in_reading_order() {
        let parser = SentenceParser::new(AtomicType::Sentence);
        let diagram = parser.sentence_to_diagram("quantum  dots glow").unwrap();
        let names: Vec<&str> = diagram.words.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["quantum", "dots", "glow"]);
        assert_eq!(diagram.root, AtomicType::Sentence);
        assert!(diagram.words.iter().all(|w| w.ty == AtomicType::Noun));
    }

    #[test]
    fn test_empty_sentence_rejected() {
        let parser = SentenceParser::new(AtomicType::Sentence);
        assert!(parser.sentence_to_diagram("   ").is_err());
        assert!(parser.sentences_to_diagrams(&["fine", ""]).is_err());
    }
}
