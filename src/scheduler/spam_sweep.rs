use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::spam::SpamService};

/// Starts the spam tracker sweep scheduler
///
/// Runs every minute, trimming every tracker to the message window and evicting
/// the ones that are empty and past their warning cooldown.
///
/// # Arguments
/// - `spam`: Spam engine whose trackers are swept
pub async fn start_scheduler(spam: SpamService) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Schedule job to run every minute
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let spam = spam.clone();

        Box::pin(async move {
            let evicted = spam.sweep().await;
            if evicted > 0 {
                tracing::debug!("Evicted {} idle spam trackers", evicted);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Spam sweep scheduler started");

    Ok(())
}
