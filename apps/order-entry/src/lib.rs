//! # Termomaz Order Entry
//!
//! Terminal stand-in for the order-entry screen: the cashier types
//! commands, the cart table is redrawn on stdout, and `submit` creates the
//! order on the backend.
//!
//! ## Module Organization
//! ```text
//! order_entry_lib/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── commands.rs     ◄─── Line parser
//! ├── session.rs      ◄─── Cart + client + submitter
//! ├── view.rs         ◄─── Cart table drawn on stdout
//! └── error.rs        ◄─── One-line error type
//! ```

pub mod commands;
pub mod error;
pub mod session;
pub mod view;

use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use termomaz_client::{ClientConfig, HttpOrderGateway, OrderGateway, OrderSubmitter};
use termomaz_core::CartStore;

use commands::Command;
use error::AppError;
use session::{Flow, OrderSession};
use view::TableView;

/// Runs the order-entry screen on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or info,termomaz=debug)       │
/// │  2. Load ClientConfig (first argument, else the platform config dir)   │
/// │  3. Build HttpOrderGateway + OrderSubmitter                            │
/// │  4. Build CartStore drawing through TableView                          │
/// │  5. Read commands until `quit` or end of input                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), AppError> {
    init_tracing();

    info!("Starting Termomaz order entry");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ClientConfig::load(Some(path))?,
        None => ClientConfig::load_or_default(None),
    };

    let gateway = HttpOrderGateway::from_config(&config)?;
    info!(endpoint = %gateway.endpoint(), "Order gateway ready");

    let cart = CartStore::with_view(TableView::new(std::io::stdout()));
    let mut session = OrderSession::new(
        cart,
        OrderSubmitter::new(gateway),
        config.navigation.order_detail_path.clone(),
    );

    let mut out = std::io::stdout();
    writeln!(out, "Termomaz order entry. Type 'help' for commands.")?;

    run_session(&mut session, BufReader::new(tokio::io::stdin()), &mut out).await?;

    info!("Order entry closed");
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command errors are printed as `error: <message>` and the loop goes on.
/// Only failures to write to `out` end it early.
pub async fn run_session<G, R, W>(
    session: &mut OrderSession<G>,
    input: R,
    out: &mut W,
) -> Result<(), AppError>
where
    G: OrderGateway,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let outcome = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => session.execute(command, out).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                warn!(code = %e.code, "{}", e.message);
                writeln!(out, "error: {}", e)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so the cart table on stdout stays readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=termomaz_client=trace` - Trace the submission path only
/// - Default: `info,termomaz=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,termomaz=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use termomaz_client::mock::MockGateway;

    #[tokio::test]
    async fn test_session_loop() {
        let mut session = OrderSession::new(
            CartStore::new(),
            OrderSubmitter::new(MockGateway::accepting("O9")),
            "/orders/{order_id}",
        );
        let input: &[u8] = b"\
# first order
add A 10.00 5 2 Widget
add B 5.00 5 9 Gadget
add B 5.00 5 3 Gadget
total
submit
client C1
submit
total
quit
add A 1 1 1 never
";
        let mut out = Vec::new();

        run_session(&mut session, input, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "error: Not enough stock for B: 5 available, 0 already in cart, 9 requested",
                "TOTAL: 35.00",
                "error: Select a client before submitting the order",
                "Client: C1",
                "Order O9 created. Details: /orders/O9",
                "TOTAL: 0.00",
            ]
        );
        assert_eq!(session.submitter().gateway().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_session_ends_at_eof() {
        let mut session = OrderSession::new(
            CartStore::new(),
            OrderSubmitter::new(MockGateway::accepting("O9")),
            "/orders/{order_id}",
        );
        let mut out = Vec::new();

        run_session(&mut session, &b"add A 1 1 1 Widget"[..], &mut out)
            .await
            .unwrap();

        assert_eq!(session.cart().len(), 1);
        assert!(out.is_empty());
    }
}
