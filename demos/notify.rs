use fetch_retry::{
    services::{ContactSubmission, TelegramNotifier},
    EnvCredentials, ReqwestTransport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let notifier = TelegramNotifier::from_credentials(&EnvCredentials, ReqwestTransport::new())?;

    let submission = ContactSubmission::new(
        "Kit",
        "kit@example.com",
        "Loved the post on backoff strategies!",
    );
    let response = notifier.notify_contact(&submission).await?;

    println!("telegram answered {}: {}", response.status, response.text());
    Ok(())
}
