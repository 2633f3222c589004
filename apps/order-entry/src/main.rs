//! # Termomaz Order Entry Entry Point
//!
//! ```text
//! order-entry [CONFIG_PATH]
//! ```
//!
//! The actual setup is in lib.rs so the command loop can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match order_entry_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("order-entry: {}", e);
            ExitCode::FAILURE
        }
    }
}
