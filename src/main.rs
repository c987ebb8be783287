use json_log_follow::{FollowConfig, SinkEvent, follow};
use std::env;
use std::process;
use tokio_stream::StreamExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file_path>", args[0]);
        process::exit(1);
    }

    let file_path = &args[1];

    let (_controller, mut events) = follow(file_path, FollowConfig::default()).await;

    while let Some(event) = events.next().await {
        match event {
            SinkEvent::Batch(entries) => {
                for entry in entries {
                    let marker = if entry.ok { ' ' } else { '!' };
                    println!(
                        "{:>5}{} {:<24} {:<10} {}",
                        entry.sequence, marker, entry.time, entry.id, entry.summary
                    );
                }
            }
            SinkEvent::Clear => {
                println!("--- cleared ---");
            }
        }
    }
}
