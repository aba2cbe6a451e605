//! Core UDX library (session store, directory client, config).

pub mod config;
pub mod directory;
pub mod logging;
pub mod session;
