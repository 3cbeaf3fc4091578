use fetch_retry::{services::GithubClient, EnvCredentials, ReqwestTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let user = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rust-lang".to_owned());

    let github = GithubClient::from_credentials(&EnvCredentials, ReqwestTransport::new());
    let repos = github.featured_repos(&user, 6).await?;

    for repo in repos {
        println!(
            "{:<30} {:>6}★  {}",
            repo.full_name,
            repo.stargazers_count,
            repo.description.unwrap_or_default()
        );
    }

    Ok(())
}
