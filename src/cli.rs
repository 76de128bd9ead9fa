//! 命令行界面定义
//!
//! 定义了主程序的命令行参数和选项
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "homeserver-config")]
#[command(version)]
#[command(about = "Defaults and verifies homeserver configuration blocks (client API, TURN, media API)")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Configuration file path (defaults to searching standard locations)
    #[arg(short, long, default_value = "config.toml")]
    pub(crate) config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Test configuration file
    Test {
        /// Configuration file path (optional, defaults to --config)
        #[arg(index = 1)]
        config_file: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    Defaults,

    /// Verify a configuration file and log the effective settings
    Show {
        /// Configuration file path (optional, defaults to --config)
        #[arg(index = 1)]
        config_file: Option<PathBuf>,
    },
}
