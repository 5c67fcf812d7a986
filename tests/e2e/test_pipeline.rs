use crate::e2e::helpers::assertions::{audio_files, report_card_ids};
use crate::e2e::helpers::fakes::{FakeChat, FakeTts};
use crate::e2e::helpers::{run_date, TestContext};
use anki_sentences::domain::report::REPORT_FILE_NAME;
use anki_sentences::domain::sentence::SentenceMode;
use anki_sentences::error::AppError;
use pretty_assertions::assert_eq;
use std::sync::Arc;

const DECK: i64 = 1_700_000_000_001;
const OTHER_DECK: i64 = 1_700_000_000_002;

#[tokio::test]
async fn test_run_writes_audio_and_report_in_review_order() {
    let ctx = TestContext::setup().await;
    let col = &ctx.collection;
    col.add_reviewed_card(101, DECK, 0, 3, &["荷物", "package"]).await.unwrap();
    col.add_reviewed_card(202, DECK, 1, 2, &["宿題", "homework"]).await.unwrap();
    col.add_reviewed_card(303, DECK, 0, 1, &["全然", "not at all"]).await.unwrap();
    // Due tomorrow
    col.add_card(404, DECK, col.today + 1, 0, &["明日", "tomorrow"]).await.unwrap();
    col.add_review(405, 404, 3, 30).await.unwrap();

    let chat = Arc::new(FakeChat::echo());
    let tts = Arc::new(FakeTts::working());
    let pipeline = ctx.pipeline(chat.clone(), tts.clone()).await;

    let summary = pipeline.run_on(run_date()).await.unwrap();

    assert_eq!(summary.day, ctx.collection.today);
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.output_dir, ctx.output_dir());
    assert_eq!(summary.report_path, ctx.output_dir().join(REPORT_FILE_NAME));

    // Flagged first, then hardest last answer first
    assert_eq!(
        chat.payloads(),
        vec![
            r#"[202,"宿題\u001fhomework"]"#.to_string(),
            r#"[303,"全然\u001fnot at all"]"#.to_string(),
            r#"[101,"荷物\u001fpackage"]"#.to_string(),
        ]
    );
    assert_eq!(tts.spoken(), vec!["宿題です。", "全然です。", "荷物です。"]);
    assert_eq!(
        audio_files(&ctx.output_dir()),
        vec!["speech-101.wav", "speech-202.wav", "speech-303.wav"]
    );

    let html = std::fs::read_to_string(&summary.report_path).unwrap();
    assert_eq!(report_card_ids(&html), vec![202, 303, 101]);
    assert!(html.contains("<ruby>宿題<rt>よみ</rt></ruby>です。"));
    assert!(html.contains("Interval: 30 Ease: 2 Flags: 1"));
    assert!(html.contains("<source src=\"speech-202.wav\" type=\"audio/wav\">"));
    assert!(!html.contains("speech-404"));
}

#[tokio::test]
async fn test_deck_filter_limits_cards() {
    let mut ctx = TestContext::setup().await;
    ctx.config.deck_ids = vec![DECK];
    let col = &ctx.collection;
    col.add_reviewed_card(101, DECK, 0, 3, &["荷物", "package"]).await.unwrap();
    col.add_reviewed_card(202, OTHER_DECK, 0, 1, &["宿題", "homework"]).await.unwrap();

    let chat = Arc::new(FakeChat::echo());
    let pipeline = ctx.pipeline(chat.clone(), Arc::new(FakeTts::working())).await;

    let summary = pipeline.run_on(run_date()).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(
        chat.payloads(),
        vec![r#"[101,"荷物\u001fpackage"]"#.to_string()]
    );
    assert_eq!(audio_files(&ctx.output_dir()), vec!["speech-101.wav"]);
}

#[tokio::test]
async fn test_nothing_due_stops_before_any_call() {
    let ctx = TestContext::setup().await;
    let col = &ctx.collection;
    col.add_card(404, DECK, col.today + 1, 0, &["明日", "tomorrow"]).await.unwrap();
    col.add_review(405, 404, 3, 30).await.unwrap();

    let chat = Arc::new(FakeChat::echo());
    let tts = Arc::new(FakeTts::working());
    let pipeline = ctx.pipeline(chat.clone(), tts.clone()).await;

    let err = pipeline.run_on(run_date()).await.unwrap_err();

    assert!(matches!(err, AppError::EmptyResult { day } if day == ctx.collection.today));
    assert_eq!(err.exit_code(), 0);
    assert!(chat.payloads().is_empty());
    assert!(tts.spoken().is_empty());
    assert!(!ctx.config.output_root.exists());
}

#[tokio::test]
async fn test_malformed_reply_aborts_without_report() {
    let ctx = TestContext::setup().await;
    ctx.collection
        .add_reviewed_card(101, DECK, 0, 3, &["荷物", "package"])
        .await
        .unwrap();

    let raw = r#"{"sentence1": "<ruby>荷物<rt>にもつ</rt></ruby>が届きました。"}"#;
    let tts = Arc::new(FakeTts::working());
    let pipeline = ctx.pipeline(Arc::new(FakeChat::fixed(raw)), tts.clone()).await;

    let err = pipeline.run_on(run_date()).await.unwrap_err();

    assert!(matches!(err, AppError::GenerationFormat { .. }));
    assert_eq!(err.raw_response(), Some(raw));
    assert_eq!(err.exit_code(), 1);
    assert!(tts.spoken().is_empty());
    assert!(audio_files(&ctx.output_dir()).is_empty());
    assert!(!ctx.output_dir().join(REPORT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_speech_failure_keeps_earlier_audio_but_no_report() {
    let ctx = TestContext::setup().await;
    let col = &ctx.collection;
    col.add_reviewed_card(101, DECK, 2, 1, &["一", "one"]).await.unwrap();
    col.add_reviewed_card(202, DECK, 1, 1, &["二", "two"]).await.unwrap();
    col.add_reviewed_card(303, DECK, 0, 1, &["三", "three"]).await.unwrap();

    let chat = Arc::new(FakeChat::echo());
    let tts = Arc::new(FakeTts::failing_on_call(2));
    let pipeline = ctx.pipeline(chat.clone(), tts.clone()).await;

    let err = pipeline.run_on(run_date()).await.unwrap_err();

    assert!(matches!(err, AppError::Synthesis(ref msg) if msg.contains("503")));
    assert_eq!(chat.payloads().len(), 2);
    assert_eq!(tts.spoken().len(), 2);
    assert_eq!(audio_files(&ctx.output_dir()), vec!["speech-101.wav"]);
    assert!(!ctx.output_dir().join(REPORT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_missing_store_is_source_unavailable() {
    let mut ctx = TestContext::setup().await;
    ctx.config.anki_db_path = ctx.collection.path.with_file_name("missing.anki2");

    let chat = Arc::new(FakeChat::echo());
    let pipeline = ctx.pipeline(chat.clone(), Arc::new(FakeTts::working())).await;

    let err = pipeline.run_on(run_date()).await.unwrap_err();

    assert!(matches!(err, AppError::SourceUnavailable(_)));
    assert!(chat.payloads().is_empty());
    assert!(!ctx.config.output_root.exists());
}

#[tokio::test]
async fn test_without_performance_reads_unreviewed_cards() {
    let mut ctx = TestContext::setup().await;
    ctx.config.include_performance = false;
    ctx.config.sentence_mode = SentenceMode::Plain;
    let col = &ctx.collection;
    col.add_card(101, DECK, col.today, 0, &["cat", "animal"]).await.unwrap();

    let tts = Arc::new(FakeTts::working());
    let pipeline = ctx.pipeline(Arc::new(FakeChat::echo()), tts.clone()).await;

    let summary = pipeline.run_on(run_date()).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(
        tts.spoken(),
        vec!["catです。 [pause] Sentence about cat"]
    );
    let html = std::fs::read_to_string(&summary.report_path).unwrap();
    assert_eq!(report_card_ids(&html), vec![101]);
    assert!(html.contains("<th>Sentence 1</th>"));
    assert!(!html.contains("Interval:"));
}

#[tokio::test]
async fn test_run_backs_up_collection() {
    let ctx = TestContext::setup().await;
    ctx.collection
        .add_reviewed_card(101, DECK, 0, 3, &["荷物", "package"])
        .await
        .unwrap();
    let pipeline = ctx
        .pipeline(Arc::new(FakeChat::echo()), Arc::new(FakeTts::working()))
        .await;

    pipeline.run_on(run_date()).await.unwrap();

    let backups: Vec<_> = std::fs::read_dir(&ctx.config.backup_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .collect();
    assert_eq!(backups.len(), 1);
    let original = std::fs::read(&ctx.config.anki_db_path).unwrap();
    assert_eq!(std::fs::read(backups[0].path()).unwrap(), original);
}

#[tokio::test]
async fn test_second_run_overwrites_same_day_output() {
    let ctx = TestContext::setup().await;
    ctx.collection
        .add_reviewed_card(101, DECK, 0, 3, &["荷物", "package"])
        .await
        .unwrap();
    let pipeline = ctx
        .pipeline(Arc::new(FakeChat::echo()), Arc::new(FakeTts::working()))
        .await;

    pipeline.run_on(run_date()).await.unwrap();
    let summary = pipeline.run_on(run_date()).await.unwrap();

    assert_eq!(audio_files(&ctx.output_dir()), vec!["speech-101.wav"]);
    let html = std::fs::read_to_string(&summary.report_path).unwrap();
    assert_eq!(report_card_ids(&html), vec![101]);
}
