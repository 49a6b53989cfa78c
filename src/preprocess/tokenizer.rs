// Word tokenizer over Unicode (UAX #29) word boundaries.
//
// Boundaries come from unicode-segmentation, then two adjustments bring the
// output in line with a Treebank-style English tokenizer:
//   - words joined by an intra-word hyphen, slash or plus stay one token
//     ("deep-sea", "CRISPR-Cas9", "and/or")
//   - trailing clitics split off ("comet's" → "comet", "'s";
//     "don't" → "do", "n't")
// Decimals ("3.5") and dotted abbreviations are already single segments.

use unicode_segmentation::UnicodeSegmentation;

const JOINERS: [&str; 3] = ["-", "/", "+"];

const CLITICS: [&str; 7] = ["n't", "'s", "'m", "'d", "'ll", "'re", "'ve"];

/// Tokenize `text` into words and punctuation tokens, in order.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut segments = text.split_word_bounds().peekable();
    // Whether the last token ends right where the current segment starts
    let mut attached = false;

    while let Some(segment) = segments.next() {
        if segment.chars().all(char::is_whitespace) {
            attached = false;
            continue;
        }

        if attached && JOINERS.contains(&segment) {
            let next_is_word = segments
                .peek()
                .is_some_and(|next| next.starts_with(char::is_alphanumeric));
            if let Some(last) = tokens.last_mut() {
                if next_is_word && last.ends_with(char::is_alphanumeric) {
                    last.push_str(segment);
                    if let Some(next) = segments.next() {
                        last.push_str(next);
                    }
                    continue;
                }
            }
        }

        tokens.push(segment.to_string());
        attached = true;
    }

    tokens.into_iter().flat_map(split_clitic).collect()
}

fn split_clitic(token: String) -> Vec<String> {
    for clitic in CLITICS {
        let Some(at) = token.len().checked_sub(clitic.len()) else {
            continue;
        };
        if at > 0 && token.is_char_boundary(at) && token[at..].eq_ignore_ascii_case(clitic) {
            return vec![token[..at].to_string(), token[at..].to_string()];
        }
    }
    vec![token]
}
