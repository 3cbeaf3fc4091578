use std::fmt;

use serde::Serialize;

use crate::{
    CredentialProvider, FetchError, ReqwestTransport, RequestSpec, Response, Result, RetryConfig,
    RetryingFetcher, Transport,
};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Contact-form message relayed to a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FetchError::InvalidInput("name is required".to_owned()));
        }
        if self.message.trim().is_empty() {
            return Err(FetchError::InvalidInput("message is required".to_owned()));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(FetchError::InvalidInput(format!(
                "invalid email address: '{email}'"
            )));
        }
        Ok(())
    }

    /// Renders the submission as Telegram HTML with user text escaped.
    pub fn render_html(&self) -> String {
        format!(
            "<b>New contact message</b>\n<b>Name:</b> {}\n<b>Email:</b> {}\n\n{}",
            escape_html(self.name.trim()),
            escape_html(self.email.trim()),
            escape_html(self.message.trim())
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Sends chat messages through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramNotifier<T = ReqwestTransport> {
    fetcher: RetryingFetcher<T>,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl<T> fmt::Debug for TelegramNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl<T: Transport> TelegramNotifier<T> {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>, transport: T) -> Self {
        Self {
            fetcher: RetryingFetcher::with_transport(transport)
                .with_config(RetryConfig::notification()),
            api_base: DEFAULT_API_BASE.to_owned(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    pub fn from_credentials(credentials: &dyn CredentialProvider, transport: T) -> Result<Self> {
        let bot_token = credentials.require("TELEGRAM_BOT_TOKEN")?;
        let chat_id = credentials.require("TELEGRAM_CHAT_ID")?;
        Ok(Self::new(bot_token, chat_id, transport))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.fetcher = self.fetcher.with_config(config);
        self
    }

    /// Posts `text` (Telegram HTML) to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<Response> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let request = RequestSpec::post(url).json(&SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        })?;

        self.fetcher.fetch(&request).await?.error_for_status()
    }

    /// Validates and relays a contact-form submission.
    pub async fn notify_contact(&self, submission: &ContactSubmission) -> Result<Response> {
        submission.validate()?;
        self.send_message(&submission.render_html()).await
    }
}
