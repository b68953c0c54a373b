//! Main entry point for the nlsh assistant.
//!
//! Initializes logging, loads settings, and runs the interactive loop.

use anyhow::Result;

use nlsh::config::Settings;
use nlsh::repl::Repl;
use nlsh::utils;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before anything else
    utils::logger::init_logging();

    let settings = Settings::load();
    let mut repl = Repl::new(settings)?;
    repl.run().await
}
