use regex::Regex;
use std::sync::OnceLock;

fn sentence_end() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?]+\s+").expect("valid sentence pattern"))
}

/// Split `text` into batches of at most `max_chars` characters.
///
/// Batches break after sentence-ending punctuation where possible. A single
/// sentence longer than `max_chars` is cut on character boundaries.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for boundary in sentence_end().find_iter(text) {
        sentences.push(&text[last_end..boundary.end()]);
        last_end = boundary.end();
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for sentence in sentences {
        let sentence_chars = sentence.chars().count();

        if current_chars + sentence_chars > max_chars && !current.is_empty() {
            push_trimmed(&mut batches, &current);
            current.clear();
            current_chars = 0;
        }

        if sentence_chars > max_chars {
            let chars: Vec<char> = sentence.chars().collect();
            for chunk in chars.chunks(max_chars) {
                push_trimmed(&mut batches, &chunk.iter().collect::<String>());
            }
            continue;
        }

        current.push_str(sentence);
        current_chars += sentence_chars;
    }

    push_trimmed(&mut batches, &current);
    batches
}

fn push_trimmed(batches: &mut Vec<String>, batch: &str) {
    let trimmed = batch.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
}
