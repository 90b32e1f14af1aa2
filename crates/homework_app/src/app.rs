use anyhow::Context;
use chrono::Utc;
use engine_logging::engine_info;
use homework_engine::{
    FetchSettings, NotifySettings, PollSettings, Poller, ReqwestFetcher, TelegramNotifier,
};

use crate::config::Credentials;

/// Build the clients and poll forever. Returns only if setup fails.
pub async fn run(credentials: Credentials) -> anyhow::Result<()> {
    let mut poller = build_poller(credentials, Utc::now().timestamp())?;
    engine_info!(
        "Homework bot started, watching statuses since {}",
        poller.settings().from_date
    );
    poller.run_forever().await;
    Ok(())
}

fn build_poller(credentials: Credentials, now_unix: i64) -> anyhow::Result<Poller> {
    let fetcher = ReqwestFetcher::new(FetchSettings::new(credentials.practicum_token))
        .context("failed to build review API client")?;
    let notifier = TelegramNotifier::new(NotifySettings::new(
        credentials.telegram_token,
        credentials.telegram_chat_id,
    ))
    .context("failed to build Telegram client")?;

    Ok(Poller::new(
        Box::new(fetcher),
        Box::new(notifier),
        PollSettings::starting_at(now_unix),
    ))
}
