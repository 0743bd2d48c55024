//! Script-aware query tokenizer.
//!
//! Splits text into same-script word segments. Ideographic scripts carry
//! meaning in shorter units, so their minimum segment length is 2 characters
//! versus 3 for alphabetic scripts.

use unicode_script::{Script, UnicodeScript};

use recall_core::config::defaults::{MIN_ALPHABETIC_SEGMENT, MIN_IDEOGRAPHIC_SEGMENT};

fn is_ideographic(script: Script) -> bool {
    matches!(
        script,
        Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul
    )
}

/// Extract query tags: same-script alphanumeric segments, length-filtered,
/// lowercased, deduplicated, capped at `max_tags`.
pub fn extract_tags(text: &str, max_tags: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_script: Option<Script> = None;

    let mut flush = |segment: &mut String, script: Option<Script>, tags: &mut Vec<String>| {
        if segment.is_empty() {
            return;
        }
        let min_len = match script {
            Some(s) if is_ideographic(s) => MIN_IDEOGRAPHIC_SEGMENT,
            _ => MIN_ALPHABETIC_SEGMENT,
        };
        if segment.chars().count() >= min_len {
            let tag = segment.to_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        segment.clear();
    };

    for c in text.chars() {
        if c.is_alphanumeric() {
            let script = c.script();
            // A script change ends the current segment even without a
            // separator (common at CJK/Latin boundaries).
            if current_script.is_some() && current_script != Some(script) {
                flush(&mut current, current_script, &mut tags);
            }
            current_script = Some(script);
            current.push(c);
        } else {
            flush(&mut current, current_script, &mut tags);
            current_script = None;
        }
    }
    flush(&mut current, current_script, &mut tags);

    tags.truncate(max_tags);
    tags
}
