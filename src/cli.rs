use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Config, OutputFormat};
use crate::date::DateFormatter;
use crate::output::{self, LiveLine};
use crate::pipeline::{self, Pipeline, PipelineTickers, PipelineView};

#[derive(Parser)]
#[command(name = "pipeview")]
#[command(author, version, about = "CI/CD Pipeline Viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./pipeview.{toml,json,yaml,yml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Locale for dates and durations (e.g. en, de-AT)
    #[arg(short = 'L', long, global = true, env = "PIPEVIEW_LOCALE")]
    locale: Option<String>,

    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render pipeline records read from a JSON file or stdin
    Show {
        /// JSON file with one record or an array of records ('-' for stdin)
        file: Option<PathBuf>,
    },
    /// Write a configuration file with the default settings
    Init {
        /// Target file; the extension picks TOML, JSON or YAML
        #[arg(default_value = "pipeview.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Follow a single pipeline while its time values are live
    Watch {
        /// JSON file with one record ('-' for stdin)
        file: Option<PathBuf>,
    },
    /// Format a duration given in milliseconds
    Duration {
        #[arg(allow_hyphen_values = true)]
        millis: i64,
    },
    /// Describe how long ago an epoch-millisecond timestamp was
    Ago {
        #[arg(allow_hyphen_values = true)]
        epoch_millis: i64,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        if let Commands::Init { path, force } = &self.command {
            return init_config(path, self.locale.as_deref(), *force);
        }

        let config = Config::load(self.config.as_deref())?;
        let locale = self.locale.clone().unwrap_or_else(|| config.locale.clone());
        let formatter = DateFormatter::new().with_locale(&locale);
        info!("Using locale '{}'", formatter.locale().tag());

        match &self.command {
            Commands::Init { .. } => Ok(()),
            Commands::Show { file } => self.execute_show(&config, &formatter, file.as_deref()),
            Commands::Watch { file } => {
                self.execute_watch(&config, &formatter, file.as_deref())
                    .await
            }
            Commands::Duration { millis } => {
                println!("{}", formatter.pretty_duration(*millis));
                println!("{}", formatter.duration_as_number(*millis));
                Ok(())
            }
            Commands::Ago { epoch_millis } => {
                println!("{}", formatter.time_ago(*epoch_millis));
                Ok(())
            }
        }
    }

    fn execute_show(
        &self,
        config: &Config,
        formatter: &DateFormatter,
        file: Option<&Path>,
    ) -> Result<()> {
        let pipelines = read_input(file)?;
        let views: Vec<PipelineView> = pipelines
            .iter()
            .map(|p| PipelineView::render(p, formatter))
            .collect();

        let format = self.format.unwrap_or(config.output.format);
        match format {
            OutputFormat::Table if self.output.is_none() => {
                output::print_pipelines(&views, formatter.locale().tag());
                Ok(())
            }
            _ => self.write_json(config, &views),
        }
    }

    async fn execute_watch(
        &self,
        config: &Config,
        formatter: &DateFormatter,
        file: Option<&Path>,
    ) -> Result<()> {
        let pipeline = read_input(file)?
            .into_iter()
            .next()
            .context("No pipeline record to watch")?;

        let interval = Duration::from_millis(config.watch.tick_interval_ms);
        let mut tickers = PipelineTickers::start(&pipeline, formatter.now_millis(), interval);

        if !tickers.any_ticking() {
            debug!("Pipeline #{} has no live values", pipeline.number);
            println!("{}", live_line(&pipeline, formatter, &tickers));
            return Ok(());
        }

        let line = LiveLine::start(&live_line(&pipeline, formatter, &tickers));

        tokio::select! {
            _ = tokio::signal::ctrl_c() => debug!("Interrupted, stopping watch"),
            () = pipeline::follow(&pipeline, formatter, &mut tickers, |view| {
                line.update(&output::render_live_line(view));
            }) => debug!("Pipeline #{} has settled", pipeline.number),
        }

        line.finish(&live_line(&pipeline, formatter, &tickers));
        Ok(())
    }

    fn write_json<T: serde::Serialize>(&self, config: &Config, value: &T) -> Result<()> {
        let json_output = if self.pretty || config.output.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Pipeline views written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}

fn live_line(pipeline: &Pipeline, formatter: &DateFormatter, tickers: &PipelineTickers) -> String {
    let view = PipelineView::compose(pipeline, formatter, tickers.values());
    output::render_live_line(&view)
}

/// Writes a default configuration to `path`, refusing to replace an existing
/// file unless `force` is set.
fn init_config(path: &Path, locale: Option<&str>, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(locale) = locale {
        config.locale = locale.to_string();
    }
    config.validate()?;
    config.save(path)?;

    info!("Configuration written to: {}", path.display());
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<Vec<Pipeline>> {
    match file {
        Some(path) if path != Path::new("-") => {
            let reader = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            pipeline::read_pipelines(reader)
                .with_context(|| format!("Failed to read pipelines from {}", path.display()))
        }
        _ => {
            let mut stdin = String::new();
            std::io::stdin().read_to_string(&mut stdin)?;
            Ok(pipeline::read_pipelines(stdin.as_bytes())?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_duration_command() {
        let cli = Cli::try_parse_from(["pipeview", "--locale", "de", "duration", "3665000"]).unwrap();
        assert_eq!(cli.locale.as_deref(), Some("de"));
        assert!(matches!(cli.command, Commands::Duration { millis: 3_665_000 }));
    }

    #[test]
    fn test_parse_show_with_format() {
        let cli = Cli::try_parse_from(["pipeview", "show", "pipelines.json", "--format", "json"])
            .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Show { file: Some(_) }));
    }

    #[test]
    fn test_read_input_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"number": 9, "branch": "main"}"#).unwrap();

        let pipelines = read_input(Some(path.as_path())).unwrap();
        assert_eq!(pipelines.len(), 1);
        assert_eq!(pipelines[0].number, 9);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("does-not-exist.json"))).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["pipeview", "init"]).unwrap();
        match cli.command {
            Commands::Init { path, force } => {
                assert_eq!(path, PathBuf::from("pipeview.toml"));
                assert!(!force);
            }
            _ => panic!("expected init command"),
        }
    }

    #[test]
    fn test_init_config_writes_loadable_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pipeview.yaml");

        init_config(&path, Some("de-AT"), false).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.locale, "de-AT");
        assert_eq!(config.watch.tick_interval_ms, 1000);
    }

    #[test]
    fn test_init_config_keeps_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pipeview.toml");
        std::fs::write(&path, "locale = \"fr\"\n").unwrap();

        let err = init_config(&path, None, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(Config::load(Some(path.as_path())).unwrap().locale, "fr");

        init_config(&path, None, true).unwrap();
        assert_eq!(Config::load(Some(path.as_path())).unwrap().locale, "en");
    }
}
