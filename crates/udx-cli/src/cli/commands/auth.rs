//! Session command handlers (login, logout, status).

use anyhow::{Context, Result};
use udx_core::config::Config;
use udx_core::directory::{DirectoryClient, DirectoryConfig};
use udx_core::session::{SessionStore, mask_token};

pub async fn login(config: &Config, phone: &str, otp: &str) -> Result<()> {
    let client = DirectoryClient::new(DirectoryConfig::from_config(config));
    let response = client.login(phone, otp).await.context("login")?;

    let store = SessionStore::open_default();
    store.set(&response.token).context("store session")?;

    tracing::info!(token = %mask_token(&response.token), "operator logged in");
    println!("Logged in. Token {}", mask_token(&response.token));
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::open_default();
    let had_session = store.clear().context("clear session")?;
    if had_session {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

/// Shows exactly one of the two entry surfaces: the directory hint when a
/// session exists, the login hint otherwise.
pub fn status() -> Result<()> {
    let store = SessionStore::open_default();
    match store.load().context("load session")? {
        Some(session) => {
            println!(
                "Logged in. Token {} (since {})",
                mask_token(&session.token),
                session.saved_at
            );
            println!("Run `udx users list` to browse the directory.");
        }
        None => {
            println!("Not logged in.");
            println!("Run `udx login --phone <PHONE> --otp <OTP>` to authenticate.");
        }
    }
    Ok(())
}
