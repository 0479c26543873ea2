//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{serve, ServerConfig};
use crate::collector::TenderCollector;
use crate::config::ScraperConfig;
use crate::error::{Result, ResultExt};
use crate::output::write_csv;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match self.cli.command.clone().unwrap_or(Commands::Scrape) {
            Commands::Scrape => self.scrape(&config).await.map(|_| ()),
            Commands::Serve { host, port } => serve(config, ServerConfig { host, port }).await,
            Commands::Config => self.show_config(&config),
        }
    }

    /// Load configuration and apply CLI overrides
    pub fn load_config(&self) -> Result<ScraperConfig> {
        let mut config = ScraperConfig::load(self.cli.config.as_deref())
            .context("Failed to load configuration")?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply `--max` and `--output`
    fn apply_overrides(&self, config: &mut ScraperConfig) {
        if let Some(max) = self.cli.max {
            config.count_tenders = max;
        }
        if let Some(output) = &self.cli.output {
            config.output_file.clone_from(output);
        }
    }

    /// Collect tenders and write them to CSV, returning the rows written
    ///
    /// An early stop still writes what was collected. Only a failed write is
    /// an error.
    pub async fn scrape(&self, config: &ScraperConfig) -> Result<usize> {
        let collector = TenderCollector::from_config(config)?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping after the current page");
                token.cancel();
            }
        });

        let report = collector
            .collect_with_cancel(config.count_tenders, &cancel)
            .await;
        interrupt.abort();

        if report.stats.stop_reason.is_early() {
            warn!(
                "Collection stopped early ({}), saving {} tenders",
                report.stats.stop_reason,
                report.records.len()
            );
        }

        let written = write_csv(&report.records, &config.output_file)?;
        info!(
            "Done: {} of {} requested tenders written",
            written, config.count_tenders
        );
        Ok(written)
    }

    /// Print the effective configuration
    fn show_config(&self, config: &ScraperConfig) -> Result<()> {
        print!("{}", config.to_yaml()?);
        Ok(())
    }
}
