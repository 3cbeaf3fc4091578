//! Third-party API callers built on [`RetryingFetcher`](crate::RetryingFetcher).

pub mod github;
pub mod telegram;

pub use github::{GithubClient, Repository};
pub use telegram::{ContactSubmission, TelegramNotifier};
