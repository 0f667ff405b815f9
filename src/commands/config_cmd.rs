use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use tastybites::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                let config = config.redacted();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("base_url: {}", config.base_url.value);
                        println!("  source: {}", config.base_url.source);
                        println!();

                        let api_key = if config.api_key.value.is_empty() {
                            "(not set)"
                        } else {
                            config.api_key.value.as_str()
                        };
                        println!("api_key: {}", api_key);
                        println!("  source: {}", config.api_key.source);
                        println!();

                        println!("database_path: {}", config.database_path.value.display());
                        println!("  source: {}", config.database_path.source);
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("recipes_number: {}", config.recipes_number.value);
                        println!("  source: {}", config.recipes_number.source);
                        println!();

                        println!(
                            "request_timeout_secs: {}",
                            config.request_timeout_secs.value
                        );
                        println!("  source: {}", config.request_timeout_secs.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = config
                    .config_file
                    .clone()
                    .unwrap_or_else(Config::default_config_path);

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'tastybites config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let default_config = r#"# tastybites configuration

# Recipe API (default: https://api.spoonacular.com)
# base_url: https://api.spoonacular.com

# Spoonacular API key (or set TASTYBITES_API_KEY)
api_key: ""

# Recipes requested per search
# recipes_number: 50

# Where cached recipes and preferences live
# database_path: ~/.local/share/tastybites/recipes_database.db
# data_dir: ~/.local/share/tastybites
"#;

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to add your API key.");
                Ok(())
            }
        }
    }
}
