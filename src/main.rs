// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use std::env;
use std::process;

use stedi_streams::config::{load_config, validate_config, RuntimeBuilder};
use stedi_streams::engine::StreamingSession;
use stedi_streams::errors::ConfigError;
use stedi_streams::jobs::JobFactory;
use stedi_streams::observability::init_tracing;
use stedi_streams::schema::SchemaRegistry;
use stedi_streams::sinks::ConsoleSink;
use stedi_streams::sources::KafkaSource;

fn print_usage(program: &str) {
    eprintln!("Usage: {} <config.yaml>", program);
    eprintln!("       {} --list-jobs", program);
    eprintln!("Example: {} configs/stedi-events.yaml", program);
}

fn list_jobs() {
    println!("Available jobs:");
    for job in JobFactory::list_available() {
        println!("  {}", job);
    }
    println!();
    println!("Schemas:");
    for schema in SchemaRegistry::builtin().iter() {
        println!("  {}: {}", schema.name(), schema.simple_string());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("stedi-streams");

    let config_path = match args.get(1).map(String::as_str) {
        Some("--list-jobs") if args.len() == 2 => {
            list_jobs();
            return Ok(());
        }
        Some(path) if args.len() == 2 && !path.starts_with("--") => path.to_string(),
        _ => {
            print_usage(program);
            process::exit(1);
        }
    };

    run(&config_path).await
}

async fn run(config_path: &str) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    // Tracing needs the configured level, so validation warnings come after it
    init_tracing(&config.log_level);
    validate_config(&config)
        .map_err(ConfigError::Invalid)
        .with_context(|| format!("Invalid configuration in {}", config_path))?;

    let session = StreamingSession::new(&config.app_name);

    let shutdown = session.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    let source = KafkaSource::connect(&config.source, &config.app_name)
        .await
        .with_context(|| format!("Failed to subscribe to topic '{}'", config.source.topic))?;

    let (job, trigger, console) = RuntimeBuilder::from_config(&config);
    let mut query = session.start(source, job, ConsoleSink::stdout(console), trigger);

    let result = query.await_termination(session.shutdown_token()).await;
    session.stop();

    result.context("Streaming query failed")?;
    Ok(())
}
