//! Focus Time - a focus timer with lap tracking
//!
//! This is the main entry point for the focus-time console application.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use focus_time::{
    clock::SystemClock,
    config::Config,
    console::{handle_command, render::HELP_TEXT, watch_display, Command},
    state::Session,
    storage::FileStore,
    tasks::tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level; stdout belongs to the console
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_time={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting focus-time v1.0.0");
    info!(
        "Configuration: data_dir={}, tick={}ms",
        config.data_dir.display(),
        config.tick_ms
    );

    // Create the session, hydrating laps from disk
    let store = Arc::new(FileStore::new(&config.data_dir));
    let session = Arc::new(Session::open(store, Arc::new(SystemClock)));

    // Start the tick background task
    let ticker = tokio::spawn(tick_task(
        Arc::downgrade(&session),
        config.tick_period(),
        session.subscribe(),
    ));

    if config.live {
        tokio::spawn(watch_display(session.subscribe()));
    }

    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    let mut signalled = false;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("End of input");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match handle_command(&session, command) {
                    Ok(reply) => {
                        for line in &reply.lines {
                            println!("{}", line);
                        }
                        if reply.quit {
                            break;
                        }
                    }
                    Err(e) => error!("Command failed: {}", e),
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                signalled = true;
                break;
            }
        }
    }

    // Stop ticking before the session goes away
    session.shutdown();
    drop(session);
    if let Err(e) = ticker.await {
        error!("Tick task failed: {}", e);
    }

    info!("Shutdown complete");
    if signalled {
        // A pending stdin read holds a blocking thread the runtime would wait on
        std::process::exit(0);
    }
    Ok(())
}
