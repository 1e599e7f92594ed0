//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::json::fields;
use crate::resources::{Entry, Github};
use crate::types::JsonValue;
use anyhow::Context;
use futures::StreamExt;
use tracing::{debug, info};

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
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = self.client_config().context("Failed to load configuration")?;
        debug!("Using API at {}", config.base_url);
        let github = Github::new(config).context("Failed to build HTTP client")?;

        match &self.cli.command {
            Commands::Get { path } => self.get(&github, path).await,
            Commands::List { path, max, params } => {
                let params: Vec<(&str, &str)> = params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                self.list(&github, path, *max, &params).await
            }
            Commands::Patch { path, json } => self.patch(&github, path, json).await,
            Commands::Markdown { text } => {
                let html = github.markdown(text).await.context("Failed to render markdown")?;
                println!("{html}");
                Ok(())
            }
            Commands::RateLimit => {
                let limits = github
                    .rate_limit()
                    .await
                    .context("Failed to fetch rate limit")?;
                self.output(&JsonValue::Object(limits));
                Ok(())
            }
        }
    }

    /// Resolve the client configuration: file, then environment, then flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.client_config_with(|key| std::env::var(key).ok())
    }

    /// Resolve the client configuration with `lookup` standing in for the environment
    pub(crate) fn client_config_with<F>(&self, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.apply_overrides(lookup)?;
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        config.validate()?;
        Ok(config)
    }

    async fn get(&self, github: &Github, path: &str) -> anyhow::Result<()> {
        let json = entry_at(github, path)
            .resource()
            .fetch()
            .await
            .with_context(|| format!("Failed to fetch '{path}'"))?;
        self.output(&JsonValue::Object(json));
        Ok(())
    }

    async fn list(
        &self,
        github: &Github,
        path: &str,
        max: Option<usize>,
        params: &[(&str, &str)],
    ) -> anyhow::Result<()> {
        let pagination = entry_at(github, path).listing(params, Ok);
        let mut stream = pagination.stream().take(max.unwrap_or(usize::MAX));
        let mut count = 0usize;

        while let Some(record) = stream.next().await {
            let record = record.with_context(|| format!("Failed to list '{path}'"))?;
            self.output(&record);
            count += 1;
        }

        info!("Listed {count} records from {path}");
        Ok(())
    }

    async fn patch(&self, github: &Github, path: &str, json: &str) -> anyhow::Result<()> {
        let value: JsonValue = serde_json::from_str(json).context("Invalid --json value")?;
        let object = fields::into_object(value).context("--json must be a JSON object")?;
        entry_at(github, path)
            .resource()
            .patch(object)
            .await
            .with_context(|| format!("Failed to patch '{path}'"))?;
        info!("Patched {path}");
        Ok(())
    }

    /// Output a JSON value
    fn output(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

fn entry_at(github: &Github, path: &str) -> Entry {
    github.entry().path(path)
}
