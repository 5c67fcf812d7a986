use crate::domain::card::days_since_creation;
use crate::domain::report::{Report, ReportRow};
use crate::domain::sentence::SentenceServiceApi;
use crate::domain::speech::SpeechServiceApi;
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::{backup_store, check_connection, create_pool};
use crate::infrastructure::repositories::{CardRepository, DueQuery};
use chrono::{DateTime, Local, NaiveDate};
use futures::TryStreamExt;
use std::path::PathBuf;
use std::sync::Arc;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub day: i64,
    pub processed: usize,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
}

struct ProcessedCards {
    day: i64,
    report: Report,
    output_dir: PathBuf,
}

/// Reads today's due cards and runs each through sentence generation,
/// speech synthesis and the report, one card at a time.
pub struct StudyPipeline {
    config: Arc<Config>,
    sentence_service: Arc<dyn SentenceServiceApi>,
    speech_service: Arc<dyn SpeechServiceApi>,
}

impl StudyPipeline {
    pub fn new(
        config: Arc<Config>,
        sentence_service: Arc<dyn SentenceServiceApi>,
        speech_service: Arc<dyn SpeechServiceApi>,
    ) -> Self {
        Self {
            config,
            sentence_service,
            speech_service,
        }
    }

    /// Run for today's wall-clock date.
    pub async fn run(&self) -> AppResult<RunSummary> {
        self.run_on(Local::now().date_naive()).await
    }

    /// Run, writing into the output folder for `run_date`.
    ///
    /// The first error aborts the run; the report is only written after
    /// every due card went through.
    pub async fn run_on(&self, run_date: NaiveDate) -> AppResult<RunSummary> {
        let db_path = &self.config.anki_db_path;
        tracing::info!(path = %db_path.display(), "Opening card store");

        self.backup().await;

        let pool = create_pool(db_path)
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("{}: {}", db_path.display(), e)))?;
        check_connection(&pool).await?;
        tracing::info!("Card store connection verified");

        let cards = CardRepository::new(pool);
        let outcome = self.process_due_cards(&cards, run_date).await;
        cards.close().await;
        tracing::info!("Card store connection closed");

        let processed = outcome?;
        let report_path = processed.report.write(&processed.output_dir).await?;

        let summary = RunSummary {
            day: processed.day,
            processed: processed.report.rows().len(),
            output_dir: processed.output_dir,
            report_path,
        };

        tracing::info!(
            day = summary.day,
            processed = summary.processed,
            output_dir = %summary.output_dir.display(),
            report_path = %summary.report_path.display(),
            "Sentences page saved"
        );

        Ok(summary)
    }

    async fn backup(&self) {
        match backup_store(&self.config.anki_db_path, &self.config.backup_dir).await {
            Ok(path) => tracing::info!(path = %path.display(), "Card store backup written"),
            Err(e) => tracing::warn!(
                error = %e,
                backup_dir = %self.config.backup_dir.display(),
                "Card store backup failed, continuing without it"
            ),
        }
    }

    async fn process_due_cards(
        &self,
        cards: &CardRepository,
        run_date: NaiveDate,
    ) -> AppResult<ProcessedCards> {
        let crt = cards.collection_created_at().await?;
        let now = cards.current_time().await?;
        let day = days_since_creation(crt, now);

        tracing::info!(
            system_time = %Local::now(),
            store_time = %format_store_time(now),
            created = %format_store_time(crt),
            crt = crt,
            day = day,
            "Collection day computed"
        );

        let query = DueQuery::new(day, &self.config.deck_ids, self.config.include_performance);
        tracing::debug!(sql = %query.sql(), deck_ids = ?self.config.deck_ids, "Due card query");

        let total = cards.count_due(&query).await?;
        if total == 0 {
            return Err(AppError::EmptyResult { day });
        }
        tracing::info!(total = total, day = day, "Due cards found");

        let output_dir = self
            .config
            .output_root
            .join(run_date.format("%Y-%m-%d").to_string());
        let mut report = Report::new(self.config.sentence_mode, format_store_time(now));

        let mut due_cards = cards.fetch_due(&query);
        let mut position = 0;
        while let Some(card) = due_cards.try_next().await? {
            position += 1;
            tracing::info!(
                position = position,
                total = total,
                card_id = card.id,
                fields = ?card.fields,
                performance = ?card.performance,
                "Processing card"
            );

            let sentence = self.sentence_service.generate(&card).await?;
            let audio = self
                .speech_service
                .synthesize(&sentence, &output_dir)
                .await?;
            report.push(ReportRow { sentence, audio });
        }

        Ok(ProcessedCards {
            day,
            report,
            output_dir,
        })
    }
}

fn format_store_time(unix_seconds: i64) -> String {
    DateTime::from_timestamp(unix_seconds, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| unix_seconds.to_string())
}
