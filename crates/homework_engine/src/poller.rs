use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use homework_core::{update, Effect, Msg, NotificationKind, PollState};

use crate::{Fetcher, Notifier};

/// Delay between the end of one cycle and the start of the next.
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);
/// How far back the first request looks for status changes.
pub const LOOKBACK_SECS: i64 = 7 * 24 * 60 * 60;

/// Lower bound of the fetch window for a process started at `now_unix`.
pub fn initial_from_date(now_unix: i64) -> i64 {
    now_unix - LOOKBACK_SECS
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    pub retry_period: Duration,
    /// Reused unchanged by every cycle.
    // TODO: advance to the time of the last successful fetch once the API's
    // `current_date` semantics are confirmed; today every cycle asks for the same window.
    pub from_date: i64,
}

impl PollSettings {
    pub fn starting_at(now_unix: i64) -> Self {
        Self {
            retry_period: RETRY_PERIOD,
            from_date: initial_from_date(now_unix),
        }
    }
}

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleReport {
    pub cycle: u64,
    pub status_notifications: usize,
    pub failure_notifications: usize,
    pub failed: bool,
}

/// Drives fetch, dedup and notify, one cycle at a time.
pub struct Poller {
    fetcher: Box<dyn Fetcher>,
    notifier: Box<dyn Notifier>,
    settings: PollSettings,
    state: PollState,
    cycle: u64,
}

impl Poller {
    pub fn new(
        fetcher: Box<dyn Fetcher>,
        notifier: Box<dyn Notifier>,
        settings: PollSettings,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            settings,
            state: PollState::new(),
            cycle: 0,
        }
    }

    pub fn with_state(mut self, state: PollState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    pub async fn run_cycle(&mut self) -> CycleReport {
        self.cycle += 1;
        engine_logging::set_cycle(self.cycle);

        let msg = match self.fetcher.fetch(self.settings.from_date).await {
            Ok(response) => Msg::ResponseReceived(response),
            Err(err) => {
                engine_warn!("Review API request failed: {}", err.kind);
                Msg::FetchFailed(err.to_string())
            }
        };
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;

        let mut report = CycleReport {
            cycle: self.cycle,
            failed: self.state.last_error().is_some(),
            ..CycleReport::default()
        };
        for effect in effects {
            match effect {
                Effect::Notify { kind, text } => {
                    match kind {
                        NotificationKind::StatusChanged => report.status_notifications += 1,
                        NotificationKind::Failure => report.failure_notifications += 1,
                    }
                    self.notifier.notify(&text).await;
                }
            }
        }

        engine_debug!(
            "Cycle finished: {} status, {} failure notifications",
            report.status_notifications,
            report.failure_notifications
        );
        report
    }

    /// Poll until the process is terminated.
    pub async fn run_forever(&mut self) {
        engine_info!(
            "Polling every {:?} from_date={}",
            self.settings.retry_period,
            self.settings.from_date
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.settings.retry_period).await;
        }
    }
}
