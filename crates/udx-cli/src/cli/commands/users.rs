//! User directory command handlers.
//!
//! Every handler loads the stored token first; without one it refuses
//! locally and nothing touches the network. Responses are printed as the
//! server returned them.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use udx_core::config::Config;
use udx_core::directory::{DirectoryClient, DirectoryConfig, validate_phone};
use udx_core::session::SessionStore;

pub async fn list(config: &Config) -> Result<()> {
    let token = require_token()?;
    let users = client(config)
        .list_all(&token)
        .await
        .context("list users")?;
    print_json(&users)
}

pub async fn by_city(config: &Config, city: &str) -> Result<()> {
    let token = require_token()?;
    let users = client(config)
        .list_by_city(city, &token)
        .await
        .with_context(|| format!("list users in '{city}'"))?;
    print_json(&users)
}

pub async fn get(config: &Config, phone: &str) -> Result<()> {
    let token = require_token()?;
    let user = client(config)
        .get_by_phone(phone, &token)
        .await
        .context("fetch user")?;
    print_json(&user)
}

pub async fn set_role(config: &Config, phone: &str, role: &str) -> Result<()> {
    let token = require_token()?;
    let updated = client(config)
        .update_role(phone, role, &token)
        .await
        .context("update role")?;
    print_json(&updated)
}

pub async fn delete(config: &Config, phone: &str, yes: bool) -> Result<()> {
    let token = require_token()?;
    validate_phone(phone).context("delete user")?;

    if !yes && !confirm(&format!("Delete user with phone {phone}? [y/N] "))? {
        println!("Aborted.");
        return Ok(());
    }

    let ack: Value = client(config)
        .delete_by_phone(phone, &token)
        .await
        .context("delete user")?;
    print_json(&ack)
}

/// Loads the stored token, refusing locally when no session exists.
fn require_token() -> Result<String> {
    let store = SessionStore::open_default();
    match store.load().context("load session")? {
        Some(session) => Ok(session.token),
        None => bail!("Not logged in. Run `udx login --phone <PHONE> --otp <OTP>` first."),
    }
}

fn client(config: &Config) -> DirectoryClient {
    DirectoryClient::new(DirectoryConfig::from_config(config))
}

/// Pretty-prints a payload the way the server returned it.
fn print_json<T: serde::Serialize>(payload: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(payload).context("render response")?;
    println!("{rendered}");
    Ok(())
}

/// One-line confirmation prompt; anything but y/yes aborts.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
