//! Frequency-based vendor name fallback.
//!
//! Used only when no vendor pattern matched: the most frequent non-stop-word
//! token that looks like part of a company name wins.

use std::collections::HashMap;

/// Substrings that mark a token as company-like.
pub const COMPANY_SUFFIXES: [&str; 5] = ["ltd", "inc", "corp", "international", "limited"];

/// English stop words discarded before counting.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Lower-cased alphanumeric tokens that are not stop words, in text order.
///
/// Any non-alphanumeric character separates tokens, so `acme,inc` yields
/// both `acme` and `inc`.
pub fn significant_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Pick a vendor name from token frequencies.
///
/// Ties between equally frequent candidates go to the one that occurs first.
pub fn fallback_vendor(text: &str) -> Option<String> {
    let tokens = significant_tokens(text);

    // token -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, token) in tokens.iter().enumerate() {
        counts.entry(token.as_str()).or_insert((0, pos)).0 += 1;
    }

    counts
        .into_iter()
        .filter(|(token, _)| COMPANY_SUFFIXES.iter().any(|s| token.contains(s)))
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .map(|(token, _)| title_case(token))
}

/// Upper-case every letter that follows a non-letter, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
