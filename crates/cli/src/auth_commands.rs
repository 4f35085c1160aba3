use {anyhow::Result, chrono::Utc, secrecy::Secret};

use crate::app::App;

pub async fn login(app: &App, username: &str, password: String, license_key: String) -> Result<()> {
    let session = app
        .sessions
        .login(username, &Secret::new(password), &Secret::new(license_key))
        .await?;
    println!("Logged in as {} ({:?})", session.subject, session.role);
    Ok(())
}

pub async fn status(app: &App) -> Result<()> {
    match app.sessions.current().await {
        Some(session) => {
            let remaining = session.seconds_remaining(Utc::now().timestamp());
            let hours = remaining / 3600;
            let mins = (remaining % 3600) / 60;
            println!(
                "{} [{:?}] valid ({hours}h {mins}m remaining)",
                session.subject, session.role
            );
        },
        None => println!("No active session."),
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.sessions.logout().await;
    println!("Logged out.");
    Ok(())
}
