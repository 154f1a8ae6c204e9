use crate::telemetry::Telemetry;
use chrono::Utc;
use lectio_core::repository::LessonRepository;
use lectio_shared::models::events::LessonsCompletedEvent;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

/// Periodic sweep flipping elapsed SCHEDULED lessons to COMPLETED.
///
/// One UPDATE per tick; re-running over already-completed lessons matches
/// nothing, so the sweep can fire as often as configured.
pub async fn start_completion_worker(
    lessons: Arc<dyn LessonRepository>,
    telemetry: Telemetry,
    interval_seconds: u64,
) {
    let mut ticker = interval(Duration::from_secs(interval_seconds));
    info!(
        "Completion worker started, sweeping every {}s",
        interval_seconds
    );

    loop {
        ticker.tick().await;

        let now = Utc::now();
        match lessons.complete_elapsed(now).await {
            Ok(0) => {}
            Ok(count) => {
                info!("Marked {} elapsed lesson(s) completed", count);
                telemetry.log_lessons_completed(LessonsCompletedEvent {
                    completed_count: count,
                    swept_at: now.timestamp(),
                });
            }
            Err(e) => error!("Completion sweep failed: {}", e),
        }
    }
}
