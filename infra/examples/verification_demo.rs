//! Example: Email verification codes end to end
//!
//! Issues a code, delivers it through the configured mail provider and
//! lets you verify it from the terminal. With the default `mock` provider
//! the message is printed to the console.
//!
//! Run with: cargo run --example verification_demo -p mv_infra

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use mv_infra::{initialize, load_config, telemetry::init_tracing};

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    println!("=== Email Verification Demo ===\n");
    println!("{}\n", config.summary());

    let mut services = initialize(config).await?;

    loop {
        println!("\n1) Send code  2) Verify code  3) Sweep expired  4) Show configuration  q) Quit");
        let Some(choice) = prompt("> ")? else { break };

        match choice.trim() {
            "1" => {
                let Some(email) = prompt("Email: ")? else { break };
                let custom = prompt("Custom message (optional): ")?.unwrap_or_default();

                match services.send_verification_code(&email, Some(&custom)).await {
                    Ok(sent) => println!(
                        "✓ Code sent (message {}), expires at {}",
                        sent.message_id,
                        sent.issued.expires_at.format("%H:%M:%S UTC")
                    ),
                    Err(e) => println!("✗ {}", e),
                }
            }
            "2" => {
                let Some(email) = prompt("Email: ")? else { break };
                let Some(code) = prompt("Code: ")? else { break };

                let outcome = services.verify(&email, &code);
                let mark = if outcome.is_success() { "✓" } else { "✗" };
                println!("{} {}", mark, outcome.message());
            }
            "3" => {
                let removed = services.sweep();
                println!("Removed {} expired code(s), {} active", removed, services.pending_count());
            }
            "4" => {
                println!("{}", services.config.summary());
                println!("Active Codes: {}", services.pending_count());
            }
            "q" | "Q" => break,
            other => println!("Unknown option: {}", other),
        }
    }

    services.shutdown();
    println!("Bye!");
    Ok(())
}
