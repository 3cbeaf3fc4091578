use std::fmt;

use serde::Deserialize;

use crate::{
    CredentialProvider, FetchError, ReqwestTransport, RequestSpec, Result, RetryConfig,
    RetryingFetcher, Transport,
};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("fetch-retry/", env!("CARGO_PKG_VERSION"));
const MAX_LOGIN_LEN: usize = 39;

/// Public repository as returned by `GET /users/{user}/repos`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: Option<String>,
}

/// Read-only GitHub REST client.
#[derive(Clone)]
pub struct GithubClient<T = ReqwestTransport> {
    fetcher: RetryingFetcher<T>,
    api_base: String,
    token: Option<String>,
}

impl<T> fmt::Debug for GithubClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl<T: Transport> GithubClient<T> {
    /// Creates an unauthenticated client.
    pub fn new(transport: T) -> Self {
        Self {
            fetcher: RetryingFetcher::with_transport(transport)
                .with_config(RetryConfig::data_fetch()),
            api_base: DEFAULT_API_BASE.to_owned(),
            token: None,
        }
    }

    /// Uses `GITHUB_TOKEN` when present. Unauthenticated otherwise.
    pub fn from_credentials(credentials: &dyn CredentialProvider, transport: T) -> Self {
        let client = Self::new(transport);
        match credentials.get("GITHUB_TOKEN") {
            Some(token) => client.with_token(token),
            None => client,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.fetcher = self.fetcher.with_config(config);
        self
    }

    /// Lists a user's public repositories, most recently updated first.
    pub async fn list_repos(&self, user: &str) -> Result<Vec<Repository>> {
        let user = validate_login(user)?;
        let url = format!(
            "{}/users/{}/repos?sort=updated&per_page=100",
            self.api_base, user
        );
        let mut request = RequestSpec::get(url)
            .header("accept", "application/vnd.github+json")
            .header("user-agent", USER_AGENT)
            .header("x-github-api-version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        self.fetcher.fetch(&request).await?.error_for_status()?.json()
    }

    /// Own, non-archived repositories ranked by stars, at most `limit`.
    pub async fn featured_repos(&self, user: &str, limit: usize) -> Result<Vec<Repository>> {
        Ok(rank_featured(self.list_repos(user).await?, limit))
    }
}

/// Accepts GitHub logins only: ASCII alphanumerics and inner hyphens.
fn validate_login(user: &str) -> Result<&str> {
    let login = user.trim();
    let valid = !login.is_empty()
        && login.len() <= MAX_LOGIN_LEN
        && !login.starts_with('-')
        && !login.ends_with('-')
        && login
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    if valid {
        Ok(login)
    } else {
        Err(FetchError::InvalidInput(format!(
            "invalid GitHub login: '{login}'"
        )))
    }
}

fn rank_featured(repos: Vec<Repository>, limit: usize) -> Vec<Repository> {
    let mut featured: Vec<Repository> = repos
        .into_iter()
        .filter(|repo| !repo.fork && !repo.archived)
        .collect();
    featured.sort_by(|a, b| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    featured.truncate(limit);
    featured
}
