use std::time::Duration;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use clima_core::{
    Config, FetchError, Province, ScreenState, SearchRejected, WeatherScreen, provider_from_config,
    resolve_province,
};
use inquire::{Select, Text};
use tracing::info;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Current weather for the provinces of Andalusia")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default province, service URL and request timeout.
    ///
    /// Prompts interactively unless at least one option is given.
    Configure {
        /// Default province, e.g. "Sevilla".
        #[arg(long)]
        province: Option<String>,

        /// Base URL of the weather service.
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds; 0 disables it.
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show the current weather for a province.
    Show {
        /// Province name, e.g. "Sevilla". Falls back to the configured default.
        province: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Give up after this many seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Override the configured weather service URL.
        #[arg(long, env = "CLIMA_BASE_URL")]
        base_url: Option<String>,
    },

    /// List the supported provinces and their codes.
    Provinces,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { province, base_url, timeout } => {
                configure(province, base_url, timeout)
            }
            Command::Show { province, json, timeout, base_url } => {
                show(province, json, timeout, base_url).await
            }
            Command::Provinces => {
                print!("{}", output::render_provinces());
                Ok(())
            }
        }
    }
}

fn configure(
    province: Option<String>,
    base_url: Option<String>,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    if province.is_none() && base_url.is_none() && timeout.is_none() {
        prompt_config(&mut cfg)?;
    } else {
        if let Some(name) = province {
            cfg.set_default_province(resolve_province(&name)?);
        }
        if let Some(url) = base_url {
            cfg.set_base_url(&url)?;
        }
        if let Some(secs) = timeout {
            cfg.timeout_secs = (secs > 0).then_some(secs);
        }
    }

    cfg.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_config(cfg: &mut Config) -> anyhow::Result<()> {
    let current = cfg.default_province().ok().flatten();
    let provinces = Province::all().to_vec();
    let start = current
        .and_then(|p| provinces.iter().position(|c| *c == p))
        .unwrap_or(0);

    let province = Select::new("Provincia por defecto:", provinces)
        .with_starting_cursor(start)
        .prompt()
        .context("Province selection aborted")?;
    cfg.set_default_province(province);

    let url = Text::new("URL del servicio:")
        .with_default(&cfg.base_url()?)
        .prompt()
        .context("Base URL prompt aborted")?;
    cfg.set_base_url(&url)?;

    let timeout = Text::new("Tiempo máximo de espera en segundos (0 = sin límite):")
        .with_default(&cfg.timeout_secs.unwrap_or(0).to_string())
        .prompt()
        .context("Timeout prompt aborted")?;
    let secs: u64 = timeout
        .trim()
        .parse()
        .with_context(|| format!("'{timeout}' is not a number of seconds"))?;
    cfg.timeout_secs = (secs > 0).then_some(secs);

    Ok(())
}

async fn show(
    province: Option<String>,
    json: bool,
    timeout: Option<u64>,
    base_url: Option<String>,
) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;
    if let Some(url) = base_url {
        cfg.set_base_url(&url)?;
    }
    if timeout.is_some() {
        cfg.timeout_secs = timeout;
    }

    let query = match province {
        Some(text) => text,
        None => match cfg.default_province()? {
            Some(p) => p.name().to_string(),
            None => Text::new("Ingresa una provincia (Ej: Sevilla):")
                .prompt()
                .context("Province prompt aborted")?,
        },
    };

    let mut screen = WeatherScreen::new();
    screen.set_query(query);

    let ticket = match screen.begin() {
        Ok(t) => t,
        Err(SearchRejected::InvalidProvince(err)) => bail!("{}", err.user_message()),
        Err(SearchRejected::Busy) => bail!("A weather request is already in flight"),
    };

    let provider = provider_from_config(&cfg)?;
    if !json {
        eprintln!("Cargando...");
    }
    let province = ticket.province;
    info!(%province, code = province.code(), "fetching weather");

    let result = match cfg.timeout() {
        Some(limit) => with_timeout(limit, provider.fetch_weather(province)).await,
        None => provider.fetch_weather(province).await,
    };
    screen.finish(ticket, result);

    match screen.state() {
        ScreenState::Loaded { province, weather } => {
            if json {
                println!("{}", output::render_json(*province, weather)?);
            } else {
                print!("{}", output::render_weather(*province, weather));
            }
            Ok(())
        }
        ScreenState::Failed(err) => {
            info!(error = %err, "weather lookup failed");
            bail!("{}", err.user_message())
        }
        other => bail!("Unexpected screen state after search: {other:?}"),
    }
}

async fn with_timeout<F, T>(limit: Duration, fut: F) -> Result<T, FetchError>
where
    F: std::future::Future<Output = Result<T, FetchError>>,
{
    tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
        Err(FetchError::NetworkOrServer(format!("no response after {}s", limit.as_secs())))
    })
}
