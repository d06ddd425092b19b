//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::{Parser, Subcommand};
use log::error;
use t_relief_core::core::config::{
    apply_env_overrides, parse_config, read_config, ApplicationCfg, DEFAULT_CONFIG,
};

#[derive(Parser)]
#[command(
    name = "t_relief",
    version,
    about = "vector tile server producing contour lines and hillshade bands from terrain-RGB DEMs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start web server and serve MVT vector tiles
    Serve {
        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<String>,
        /// Bind web server to this address
        #[arg(long)]
        bind: Option<String>,
        /// Bind web server to this port
        #[arg(long)]
        port: Option<u16>,
    },
}

fn load_config(path: Option<&str>) -> Result<ApplicationCfg, String> {
    match path {
        Some(path) => read_config(path),
        None => {
            let mut config = parse_config(DEFAULT_CONFIG.to_string(), "")?;
            apply_env_overrides(&mut config);
            Ok(config)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config, bind, port } => {
            let mut config = match load_config(config.as_deref()) {
                Ok(config) => config,
                Err(err) => {
                    error!("{}", err);
                    std::process::exit(1);
                }
            };
            if bind.is_some() {
                config.webserver.bind = bind;
            }
            if port.is_some() {
                config.webserver.port = port;
            }
            if let Err(err) = t_relief_webserver::server::webserver(config) {
                error!("Server error: {}", err);
                std::process::exit(1);
            }
        }
    }
}
