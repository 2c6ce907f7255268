//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod ask;
pub mod settings;


use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::ask::run_ask;
use crate::cli::settings::{set_setting, unset_setting, SetContext};
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::server::start_server;
use crate::utils::logging::TranscriptLog;
use crate::utils::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "notebook-chat")]
#[command(version, about = "A browser chat front-end for a notebook question-answering backend")]
#[command(
    long_about = "notebook-chat serves a small chat page in your browser. Each question is \
forwarded to an HTTP backend and the answer is shown as text, an image, a table, or a \
JSON tree depending on what comes back.\n\n\
Configuration:\n\
  notebook-chat config              Show the current settings\n\
  notebook-chat set <key> <value>   Persist a setting\n\
  notebook-chat unset <key>         Remove a setting\n\n\
Environment Variables:\n\
  RUST_LOG          Override the configured log level (e.g. debug, notebook_chat=trace)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the platform default
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend endpoint that answers questions (overrides backend-url)
    #[arg(short = 'b', long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Append a plain-text transcript of every turn to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the chat page (default)
    Serve {
        /// Address to listen on (overrides bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Ask one question and print the answer
    Ask {
        /// The question to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Show the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = Config::resolve_path(args.config.as_deref())?;

    match args.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Set { key, value } => {
            let mut ctx = SetContext {
                config_path: &config_path,
            };
            match set_setting(&key, &value, &mut ctx) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut ctx = SetContext {
                config_path: &config_path,
            };
            match unset_setting(&key, &mut ctx) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Config => {
            let config = Config::load_from_path(&config_path)?;
            println!("Config file: {}", path_display(&config_path));
            config.print_all();
            Ok(())
        }
        Commands::Ask { question } => {
            let config = Config::load_from_path(&config_path)?.with_overrides(args.backend_url, None);
            init_tracing(config.effective_log_level());
            let transcript = open_transcript(args.log.as_deref())?;
            run_ask(question, &config, transcript).await
        }
        Commands::Serve { bind } => {
            let config = Config::load_from_path(&config_path)?.with_overrides(args.backend_url, bind);
            init_tracing(config.effective_log_level());
            let transcript = open_transcript(args.log.as_deref())?;
            start_server(&config, transcript).await
        }
    }
}

fn open_transcript(path: Option<&str>) -> Result<TranscriptLog, Box<dyn Error>> {
    match path {
        Some(path) => TranscriptLog::to_file(path).map_err(|e| {
            format!("Failed to open transcript log {path}: {e}").into()
        }),
        None => Ok(TranscriptLog::disabled()),
    }
}
