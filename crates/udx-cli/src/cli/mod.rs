//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use udx_core::config::Config;
use udx_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "udx")]
#[command(version = "0.1")]
#[command(about = "Admin console for the user-management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with a phone number and OTP
    Login {
        /// Phone number of the operator
        #[arg(long)]
        phone: String,
        /// One-time password sent to that phone
        #[arg(long)]
        otp: String,
    },
    /// Log out (clear the stored session)
    Logout,
    /// Show whether an operator is logged in
    Status,
    /// Operate on the user directory
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum UserCommands {
    /// List all users
    List,
    /// List users registered in a city
    City {
        #[arg(value_name = "CITY")]
        city: String,
    },
    /// Fetch a user by phone number
    Get {
        /// 10-digit phone number
        #[arg(value_name = "PHONE")]
        phone: String,
    },
    /// Update a user's role
    SetRole {
        /// 10-digit phone number
        #[arg(value_name = "PHONE")]
        phone: String,
        /// New role (e.g. provider)
        #[arg(value_name = "ROLE")]
        role: String,
    },
    /// Delete a user
    Delete {
        /// 10-digit phone number
        #[arg(value_name = "PHONE")]
        phone: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init().context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    // default to session status
    let Some(command) = cli.command else {
        return commands::auth::status();
    };

    match command {
        Commands::Login { phone, otp } => commands::auth::login(&config, &phone, &otp).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Status => commands::auth::status(),

        Commands::Users { command } => match command {
            UserCommands::List => commands::users::list(&config).await,
            UserCommands::City { city } => commands::users::by_city(&config, &city).await,
            UserCommands::Get { phone } => commands::users::get(&config, &phone).await,
            UserCommands::SetRole { phone, role } => {
                commands::users::set_role(&config, &phone, &role).await
            }
            UserCommands::Delete { phone, yes } => {
                commands::users::delete(&config, &phone, yes).await
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
