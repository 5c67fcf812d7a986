use crate::e2e::helpers::TestContext;
use anki_sentences::domain::card::{days_since_creation, CardPerformance};
use anki_sentences::infrastructure::db::create_pool;
use anki_sentences::infrastructure::repositories::{CardRepository, DueQuery};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;

async fn open(ctx: &TestContext) -> CardRepository {
    ctx.collection.close().await;
    let pool = create_pool(&ctx.collection.path).await.unwrap();
    CardRepository::new(pool)
}

#[tokio::test]
async fn test_collection_day_matches_store_clock() {
    let ctx = TestContext::setup().await;
    let cards = open(&ctx).await;

    let crt = cards.collection_created_at().await.unwrap();
    let now = cards.current_time().await.unwrap();

    assert_eq!(days_since_creation(crt, now), ctx.collection.today);
}

#[tokio::test]
async fn test_latest_review_supplies_performance() {
    let ctx = TestContext::setup().await;
    let col = &ctx.collection;
    col.add_card(101, 1, col.today, 1, &["荷物", "package", "extra"]).await.unwrap();
    col.add_review(1000, 101, 1, 4).await.unwrap();
    col.add_review(2000, 101, 3, 12).await.unwrap();
    let cards = open(&ctx).await;

    let query = DueQuery::new(ctx.collection.today, &[], true);
    assert_eq!(cards.count_due(&query).await.unwrap(), 1);

    let due: Vec<_> = cards.fetch_due(&query).try_collect().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, 101);
    assert_eq!(due[0].fields, vec!["荷物", "package", "extra"]);
    assert_eq!(
        due[0].performance,
        Some(CardPerformance {
            last_interval: 12,
            ease: 3,
            flags: 1,
        })
    );
}

#[tokio::test]
async fn test_unreviewed_cards_need_performance_off() {
    let ctx = TestContext::setup().await;
    let col = &ctx.collection;
    col.add_card(101, 1, col.today, 0, &["cat"]).await.unwrap();
    let cards = open(&ctx).await;

    let with_history = DueQuery::new(ctx.collection.today, &[], true);
    assert_eq!(cards.count_due(&with_history).await.unwrap(), 0);

    let without_history = DueQuery::new(ctx.collection.today, &[], false);
    let due: Vec<_> = cards.fetch_due(&without_history).try_collect().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].performance, None);
}

#[tokio::test]
async fn test_deck_filter_accepts_several_decks() {
    let ctx = TestContext::setup().await;
    let col = &ctx.collection;
    col.add_reviewed_card(101, 1, 0, 3, &["a"]).await.unwrap();
    col.add_reviewed_card(202, 2, 0, 2, &["b"]).await.unwrap();
    col.add_reviewed_card(303, 3, 0, 1, &["c"]).await.unwrap();
    let cards = open(&ctx).await;

    let query = DueQuery::new(ctx.collection.today, &[1, 2], true);
    let ids: Vec<i64> = cards
        .fetch_due(&query)
        .map_ok(|card| card.id)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, vec![202, 101]);
    assert_eq!(cards.count_due(&query).await.unwrap(), 2);
}
