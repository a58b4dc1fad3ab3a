//! Word-frequency summary for plain text

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word pattern"));

/// Count lowercase words in order of first appearance
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in WORD.find_iter(&lowered) {
        let word = m.as_str();
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    counts
}

/// One `word: count` line per distinct word; empty input gives an empty summary
pub fn summarize(text: &str) -> String {
    word_frequencies(text)
        .into_iter()
        .map(|(word, count)| format!("{word}: {count}\n"))
        .collect()
}
