pub mod azure_tts_repository;
pub mod card_repository;
pub mod chat_repository;
pub mod openai_chat_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod tts_repository;

pub use azure_tts_repository::AzureTtsRepository;
pub use card_repository::{CardRepository, DueQuery};
pub use chat_repository::{ChatMessage, ChatRepository, ChatRole};
pub use openai_chat_repository::OpenAiChatRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::TtsRepository;
