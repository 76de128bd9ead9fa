//! Homeserver 配置工具主程序
//!
//! Loads the homeserver configuration, applies defaults, overlays the
//! operator's file and verifies every block in one pass. Startup is refused
//! while any violation remains.

mod cli;
mod error;
mod observability;

use clap::Parser;
use homeserver_common::config::{
    ConfigBlock, ConfigErrors, RegistrationPolicy, ServerConfig, TurnCredentialMode,
};
use observability::init_observability;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

macro_rules! bootstrap_info {
    ($($arg:tt)*) => {
        println!($($arg)*);
    };
}

macro_rules! bootstrap_error {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

use cli::{Cli, Commands};
use error::{Error, Result};

/// Application launcher utilities
struct ApplicationLauncher;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Test { config_file }) => {
            let config_path =
                ApplicationLauncher::find_config_file(config_file.as_ref().unwrap_or(&cli.config))?;
            ApplicationLauncher::test_config_file(&config_path)
        }
        Some(Commands::Defaults) => ApplicationLauncher::print_defaults(),
        Some(Commands::Show { config_file }) => {
            let config_path =
                ApplicationLauncher::find_config_file(config_file.as_ref().unwrap_or(&cli.config))?;
            ApplicationLauncher::show_config(&config_path)
        }
        None => {
            let config_path = ApplicationLauncher::find_config_file(&cli.config)?;
            ApplicationLauncher::show_config(&config_path)
        }
    }
}

impl ApplicationLauncher {
    /// Find config file with fallback locations
    fn find_config_file(provided_path: &PathBuf) -> Result<PathBuf> {
        // If the provided path is not the default "config.toml", check if it exists
        if provided_path != Path::new("config.toml") {
            if provided_path.exists() {
                bootstrap_info!("Using provided config file: {:?}", provided_path);
                return Ok(provided_path.clone());
            } else {
                bootstrap_error!("Provided config file not found: {:?}", provided_path);
                return Err(Error::custom(format!(
                    "Config file not found: {provided_path:?}"
                )));
            }
        }

        let fallback_paths = vec![
            // 1. Current working directory
            PathBuf::from("config.toml"),
            // 2. System config directory
            PathBuf::from("/etc/homeserver/config.toml"),
        ];

        bootstrap_info!("Searching for config file in default locations...");

        for path in &fallback_paths {
            if path.exists() {
                bootstrap_info!("Found config file: {:?}", path);
                return Ok(path.clone());
            } else {
                bootstrap_info!("Config not found at: {:?}", path);
            }
        }

        bootstrap_error!("No configuration file found!");
        bootstrap_error!("Please create a config file in one of these locations:");
        for (i, path) in fallback_paths.iter().enumerate() {
            bootstrap_error!("  {}. {:?}", i + 1, path);
        }
        bootstrap_error!("Or specify a custom path with: homeserver-config --config <path>");
        bootstrap_error!("Run `homeserver-config defaults` to print a starting point.");

        Err(Error::custom(
            "No configuration file found. Please create one or specify path with --config",
        ))
    }

    /// Load a config file on top of the defaults and verify every block.
    ///
    /// Every violation is printed before the single failure is returned.
    fn load_verified(config_path: &Path) -> Result<ServerConfig> {
        let config = match ServerConfig::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                bootstrap_error!("❌ 配置加载失败: {}", e);
                return Err(e.into());
            }
        };

        let mut errs = ConfigErrors::new();
        config.verify(&mut errs);
        if !errs.is_empty() {
            bootstrap_error!("❌ 配置验证发现问题:");
            for (i, message) in errs.iter().enumerate() {
                bootstrap_error!("  {}. {}", i + 1, message);
            }
            return Err(Error::service_validation(format!(
                "{} problem(s) in {}",
                errs.len(),
                config_path.display()
            )));
        }

        Ok(config)
    }

    /// 测试配置文件是否有效
    fn test_config_file(config_path: &Path) -> Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();

        match Self::load_verified(config_path) {
            Ok(_) => {
                info!("✅ 配置验证通过: {:?}", config_path);
                Ok(())
            }
            Err(e) => {
                error!("❌ 配置验证失败: {}", e);
                Err(e)
            }
        }
    }

    /// Print the default configuration as TOML
    fn print_defaults() -> Result<()> {
        let mut config = ServerConfig::default();
        config.defaults();
        let rendered = config.to_toml()?;
        println!("{rendered}");
        Ok(())
    }

    /// Verify the config, then log what the route and credential layers
    /// will read from it.
    fn show_config(config_path: &Path) -> Result<()> {
        bootstrap_info!("📄 加载配置文件: {:?}", config_path);
        let config = Self::load_verified(config_path)?;
        bootstrap_info!("✅ 配置加载成功");

        let _observability_guard = init_observability(&config.observability)?;
        Self::display_config_info(&config);
        Ok(())
    }

    fn display_config_info(config: &ServerConfig) {
        let client_api = &config.client_api;
        info!(
            listen = %client_api.listen,
            bind = %client_api.bind,
            "client API"
        );

        match client_api.registration_policy() {
            RegistrationPolicy::Open => info!("registration: open"),
            RegistrationPolicy::SharedSecretOnly => {
                info!("registration: disabled, shared-secret registration only")
            }
            RegistrationPolicy::Closed => info!("registration: closed"),
        }

        if client_api.recaptcha_enabled {
            info!(
                siteverify_api = %client_api.recaptcha_siteverify_api,
                bypass_configured = !client_api.recaptcha_bypass_secret.is_empty(),
                "registration captcha: enabled"
            );
        } else {
            info!("registration captcha: disabled");
        }

        let turn = &client_api.turn;
        if turn.is_enabled() {
            let lifetime = match turn.user_lifetime() {
                Ok(Some(_)) => turn.user_lifetime.clone(),
                Ok(None) => "issuer default".to_string(),
                // verification already rejected bad values
                Err(_) => "invalid".to_string(),
            };
            info!(uris = turn.uris.len(), lifetime = %lifetime, "TURN relay");
            match turn.credential_mode() {
                TurnCredentialMode::SharedSecret => info!("TURN credentials: shared secret"),
                TurnCredentialMode::Static => info!("TURN credentials: static username/password"),
                TurnCredentialMode::Unconfigured => {
                    warn!("TURN URIs are configured but no credential mode is set")
                }
            }
        } else {
            info!("TURN relay: not configured");
        }

        info!(
            listen = %config.media_api.listen,
            bind = %config.media_api.bind,
            "media API"
        );
    }
}
