//! Homework engine: network clients and the polling loop.
mod fetch;
mod notify;
mod poller;
mod types;

pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_ENDPOINT};
pub use notify::{Notifier, NotifySettings, TelegramNotifier, DEFAULT_TELEGRAM_API};
pub use poller::{initial_from_date, CycleReport, PollSettings, Poller, LOOKBACK_SECS, RETRY_PERIOD};
pub use types::{FailureKind, FetchError, NotifyError};
