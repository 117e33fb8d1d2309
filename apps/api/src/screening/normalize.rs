//! Text Normalizer — turns raw résumé text into the shape the matcher and
//! classifier consume: a filtered token list plus the full lowered string
//! (kept so multi-word skills like "machine learning" stay detectable).

use serde::{Deserialize, Serialize};

/// Normalized view of one input text. Created once per request and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Lowercased alphanumeric tokens of length >= 2, stopwords removed.
    pub tokens: Vec<String>,
    /// The full input, lowercased, punctuation intact. Used for phrase and
    /// substring matching with word boundaries.
    pub lowered: String,
    /// Whitespace-separated word count of the raw input.
    pub word_count: usize,
}

/// Normalizes raw text. Total: empty input yields empty tokens and
/// `word_count = 0`, never an error.
pub fn normalize(raw: &str) -> NormalizedText {
    let lowered = raw.to_lowercase();
    let tokens = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .filter(|t| !is_stop_word(t))
        .map(String::from)
        .collect();

    NormalizedText {
        tokens,
        lowered,
        word_count: raw.split_whitespace().count(),
    }
}

fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
        "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each",
        "else", "every", "few", "for", "from", "had", "has", "have", "he", "her", "here", "him",
        "his", "how", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "might",
        "more", "most", "must", "my", "myself", "no", "nor", "not", "now", "of", "on", "once",
        "only", "or", "other", "our", "out", "over", "own", "same", "shall", "should", "so",
        "some", "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
        "were", "what", "when", "where", "which", "while", "who", "why", "will", "with", "would",
        "you", "your",
    ];

    STOP_WORDS.binary_search(&word).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_lowercased_alphanumeric_runs() {
        let text = normalize("Built REST APIs in Rust, deployed on AWS.");
        assert!(text.tokens.contains(&"rest".to_string()));
        assert!(text.tokens.contains(&"apis".to_string()));
        assert!(text.tokens.contains(&"rust".to_string()));
        assert!(text.tokens.contains(&"aws".to_string()));
    }

    #[test]
    fn test_stopwords_dropped_from_tokens_but_kept_in_lowered() {
        let text = normalize("experience with machine learning and data");
        assert!(!text.tokens.contains(&"with".to_string()));
        assert!(!text.tokens.contains(&"and".to_string()));
        assert!(text.lowered.contains("machine learning"));
    }

    #[test]
    fn test_single_char_tokens_dropped() {
        let text = normalize("a b c rust");
        assert_eq!(text.tokens, vec!["rust"]);
    }

    #[test]
    fn test_empty_input_is_total() {
        let text = normalize("");
        assert!(text.tokens.is_empty());
        assert_eq!(text.word_count, 0);
        assert!(text.lowered.is_empty());
    }

    #[test]
    fn test_word_count_counts_raw_words() {
        let text = normalize("Proficient in Python, SQL, and Tableau");
        assert_eq!(text.word_count, 6);
    }

    #[test]
    fn test_stop_word_list_is_sorted_for_binary_search() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("with"));
        assert!(!is_stop_word("python"));
        assert!(!is_stop_word("tableau"));
    }
}
