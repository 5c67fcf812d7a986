use crate::domain::sentence::{GeneratedSentence, SentenceMode};
use once_cell::sync::Lazy;
use regex::Regex;

/// Spoken separator between the two sentences in plain mode.
pub const PAUSE_MARKER: &str = " [pause] ";

static RUBY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<ruby>(.*?)<rt>(.*?)</rt></ruby>").expect("valid ruby pattern"));

/// Replace every `<ruby>base<rt>reading</rt></ruby>` pair with its base text.
///
/// Runs to a fixed point so nested pairs are fully unwrapped, which makes
/// the function idempotent.
pub fn strip_annotations(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = RUBY_PATTERN.replace_all(&current, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Text sent to the speech service for a sentence pair.
pub fn speech_text(sentence: &GeneratedSentence, mode: SentenceMode) -> String {
    match mode {
        SentenceMode::Annotated => strip_annotations(&sentence.sentence1),
        SentenceMode::Plain => format!(
            "{}{}{}",
            strip_annotations(&sentence.sentence1),
            PAUSE_MARKER,
            sentence.sentence2
        ),
    }
}
