//! Command handlers.

use giotto::{
    BotConfig, GiottoResult, Order, PostHistory, SchedulerError, SchedulerErrorKind,
    build_scheduler,
};
use tokio_util::sync::CancellationToken;

/// Run `count` generation cycles immediately and print their records.
pub async fn run_immediate(config: &BotConfig, count: u32, dry_run: bool) -> GiottoResult<()> {
    let mut scheduler = build_scheduler(config, dry_run).await?;
    let records = scheduler.run_immediate(count).await?;

    println!("Completed {} cycle(s):", records.len());
    for (i, record) in records.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, record.outcome(), record.content_excerpt());
        if let Some(id) = record.remote_id() {
            println!("   remote id: {}", id);
        }
        if let Some(detail) = record.error_detail() {
            println!("   error: {}", detail);
        }
    }

    Ok(())
}

/// Run the schedule loop until Ctrl-C.
///
/// The signal cancels the loop between polls; a cycle already in flight runs
/// to completion and records its outcome first.
pub async fn run_schedule(config: &BotConfig, dry_run: bool) -> GiottoResult<()> {
    let mut scheduler = build_scheduler(config, dry_run).await?;

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, stopping after any in-flight cycle");
            token.cancel();
        }
    });

    scheduler.run_schedule_loop(cancel).await
}

/// Print history records from the last `days` days, most recent first.
pub async fn show_history(config: &BotConfig, days: i64) -> GiottoResult<()> {
    if days <= 0 {
        return Err(SchedulerError::new(SchedulerErrorKind::InvalidArgument(
            format!("days must be positive, got {}", days),
        ))
        .into());
    }

    let history = PostHistory::open(config.schedule().history_file()).await?;
    let records = history.records_within(days, Order::Descending);

    println!("Post history for last {} day(s):", days);
    println!("{}", "=".repeat(50));
    for record in records {
        println!(
            "{} [{}] {}",
            record.timestamp().format("%Y-%m-%d %H:%M:%S"),
            record.slot_label(),
            record.outcome()
        );
        println!("  {}", record.content_excerpt());
        if let Some(id) = record.remote_id() {
            println!("  remote id: {}", id);
        }
        if let Some(detail) = record.error_detail() {
            println!("  error: {}", detail);
        }
        println!("{}", "-".repeat(30));
    }

    Ok(())
}
