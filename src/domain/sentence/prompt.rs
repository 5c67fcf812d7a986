use super::model::SentenceMode;
use crate::domain::card::DueCard;
use crate::infrastructure::repositories::ChatMessage;
use serde_json::json;

const ANNOTATED_INSTRUCTION: &str = "You will be given an Anki note from a flashcard deck. \
You will respond with JSON with two sentences: sentence1 and sentence2. \
sentence1 is a generated sentence in Japanese that will help the person learn the flashcard. \
KANJI MUST INCLUDE RUBY AND RT TAGS WITH FURIGANA, FOR EXAMPLE: <ruby>老人<rt>ろうじん</rt></ruby>, \
BUT HIRAGANA AND KATAKANA SHOULD NEVER BE ENCLOSED IN RUBY TAGS. \
sentence2 is a string of English text and consists of an English translation of sentence1. \
THE JSON RESPONSE MUST ALWAYS USE DOUBLE QUOTES.";

const PLAIN_INSTRUCTION: &str = "You will be given an Anki note from a flashcard deck. \
You will respond with JSON with three items: sentence1, sentence2 and id. \
sentence1 and sentence2 are generated sentences that use the word in context. \
id is the ID of the Anki note. THE JSON MUST ALWAYS USE DOUBLE QUOTES. \
Here is example JSON: {\"sentence1\": \"Hypoparathyroidism is a rare disorder of calcium metabolism \
characterized by hypocalcemia and low serum parathyroid hormone levels.\", \
\"sentence2\": \"Patients with hypoparathyroidism typically present with muscle cramps and tetany \
caused by low blood calcium.\", \"id\": 1671244560415}";

pub fn instruction(mode: SentenceMode) -> &'static str {
    match mode {
        SentenceMode::Annotated => ANNOTATED_INSTRUCTION,
        SentenceMode::Plain => PLAIN_INSTRUCTION,
    }
}

/// `[card id, raw note fields]` as compact JSON, non-ASCII kept as is.
///
/// The whole note goes to the model, separators included, so meaning and
/// example fields can inform the sentences.
pub fn card_payload(card: &DueCard) -> String {
    json!([card.id, card.raw_fields]).to_string()
}

/// System instruction followed by the card payload.
pub fn build_messages(card: &DueCard, mode: SentenceMode) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(instruction(mode)),
        ChatMessage::user(card_payload(card)),
    ]
}
