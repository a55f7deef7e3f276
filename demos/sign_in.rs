use dorm_http::AuthClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let email = std::env::var("DORM_EMAIL")?;
    let password = std::env::var("DORM_PASSWORD")?;

    let auth = AuthClient::from_env()?;
    let session = auth.sign_in(&email, &password).await?;

    println!("signed in as {} ({})", session.username, session.email);
    for role in &session.roles {
        println!("role: {role}");
    }

    Ok(())
}
