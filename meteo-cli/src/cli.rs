use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select};
use meteo_core::{Config, OutputFormat, WeatherCode, WeatherCodeEntry, WeatherCondition, codes};
use std::path::Path;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Weather code icons and descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the icon for a weather code.
    Icon {
        /// Numeric weather code, e.g. 61.
        #[arg(allow_hyphen_values = true)]
        code: String,
    },

    /// Print the description for a weather code.
    Describe {
        #[arg(allow_hyphen_values = true)]
        code: String,
    },

    /// Print icon and description for a weather code.
    Show {
        #[arg(allow_hyphen_values = true)]
        code: String,

        /// Output format: "text" or "json". Defaults to the configured format.
        #[arg(long)]
        format: Option<String>,
    },

    /// List every known weather code.
    List {
        #[arg(long)]
        format: Option<String>,
    },

    /// Update display preferences. Prompts when no flag is given.
    Configure {
        #[arg(long)]
        format: Option<String>,

        #[arg(long)]
        show_code: Option<bool>,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Icon { code } => {
                warn_if_malformed(&code);
                println!("{}", codes::icon_raw(&code));
            }
            Command::Describe { code } => {
                warn_if_malformed(&code);
                println!("{}", codes::description_raw(&code));
            }
            Command::Show { code, format } => {
                let format = format.as_deref().map(OutputFormat::try_from).transpose()?;
                let condition = condition_for_raw(&code);

                let output = match format {
                    Some(OutputFormat::Json) => {
                        render_condition(&condition, OutputFormat::Json, false)?
                    }
                    _ => {
                        let cfg = preferences();
                        render_condition(
                            &condition,
                            format.unwrap_or(cfg.output),
                            cfg.show_code,
                        )?
                    }
                };
                println!("{output}");
            }
            Command::List { format } => {
                let format = match format {
                    Some(name) => OutputFormat::try_from(name.as_str())?,
                    None => preferences().output,
                };
                println!("{}", render_table(codes::entries(), format)?);
            }
            Command::Configure { format, show_code } => {
                // Starts from defaults when the file is broken, so saving repairs it.
                let mut cfg = preferences();

                if format.is_none() && show_code.is_none() {
                    prompt_preferences(&mut cfg)?;
                } else {
                    if let Some(format) = format {
                        cfg.output = OutputFormat::try_from(format.as_str())?;
                    }
                    if let Some(show_code) = show_code {
                        cfg.show_code = show_code;
                    }
                }

                cfg.save()?;
                println!(
                    "Saved preferences to {}",
                    Config::config_file_path()?.display()
                );
            }
        }

        Ok(())
    }
}

/// Malformed input still gets the fallback output; this only tells the user why.
fn warn_if_malformed(raw: &str) {
    if let Err(err) = raw.parse::<WeatherCode>() {
        tracing::warn!("{err}; showing the unknown-condition fallback");
    }
}

fn condition_for_raw(raw: &str) -> WeatherCondition {
    match raw.parse::<WeatherCode>() {
        Ok(code) => WeatherCondition::resolve(code.value()),
        Err(err) => {
            tracing::warn!("{err}; showing the unknown-condition fallback");
            WeatherCondition::unrecognized()
        }
    }
}

/// Preferences for display commands. A broken config file never stops a lookup.
fn preferences() -> Config {
    match Config::config_file_path() {
        Ok(path) => preferences_from(&path),
        Err(err) => {
            tracing::warn!("{err:#}; using default preferences");
            Config::default()
        }
    }
}

fn preferences_from(path: &Path) -> Config {
    Config::load_from(path).unwrap_or_else(|err| {
        tracing::warn!("{err:#}; using default preferences");
        Config::default()
    })
}

fn render_condition(
    condition: &WeatherCondition,
    format: OutputFormat,
    show_code: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(condition).context("Failed to serialize condition")
        }
        OutputFormat::Text => match condition.code {
            Some(code) if show_code => Ok(format!("{code:>3} {condition}")),
            _ => Ok(condition.to_string()),
        },
    }
}

fn render_table(entries: &[WeatherCodeEntry], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(entries).context("Failed to serialize weather codes")
        }
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|e| format!("{:>3} {} {}", e.code, e.icon, e.description))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn prompt_preferences(cfg: &mut Config) -> anyhow::Result<()> {
    let formats = OutputFormat::all().to_vec();
    let cursor = formats.iter().position(|f| *f == cfg.output).unwrap_or(0);

    cfg.output = Select::new("Default output format:", formats)
        .with_starting_cursor(cursor)
        .prompt()?;

    cfg.show_code = Confirm::new("Prefix text output with the weather code?")
        .with_default(cfg.show_code)
        .prompt()?;

    Ok(())
}
