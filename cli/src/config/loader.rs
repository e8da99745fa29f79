//! Environment-driven configuration loader for the Illie server
//!
//! Values come from the process environment (after the optional `.env` file
//! has been loaded), with command-line flags taking precedence:
//! 1. Flag overrides (`--database-url`, `--model`, `--host`, `--port`)
//! 2. Environment variables
//! 3. Built-in defaults
//!
//! Empty variables are treated as unset.

use anyhow::{anyhow, Context, Result};
use illie_core::agent::{AgentFactory, DEFAULT_MODEL_ID};
use illie_core::config::ModelParams;
use illie_core::{ModelRef, PromptResolver, PromptStoreSchema, Protocol, ResolvedLlmConfig};
use std::str::FromStr;

/// Connection string variables, in priority order
pub const DATABASE_URL_VARS: [&str; 2] = ["DATABASE_URL", "DB_URL"];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7777;

/// Deployment flavour selected by `RUNTIME_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Dev,
    Prd,
}

impl RuntimeEnv {
    /// `dev` selects development mode; anything else is production
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "dev" => RuntimeEnv::Dev,
            _ => RuntimeEnv::Prd,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeEnv::Dev => "dev",
            RuntimeEnv::Prd => "prd",
        }
    }

    /// Whether the host should reload on source changes
    pub fn reload(&self) -> bool {
        matches!(self, RuntimeEnv::Dev)
    }
}

/// Fully loaded server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Configuration store connection string; `None` means built-in instructions only
    pub database_url: Option<String>,
    /// Layout of the prompt row
    pub schema: PromptStoreSchema,
    pub host: String,
    pub port: u16,
    pub runtime_env: RuntimeEnv,
    /// Model the agent is described with
    pub model: ModelRef,
    /// Model client settings; `None` when no API key is configured
    pub llm: Option<ResolvedLlmConfig>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Agent factory wired to this configuration's prompt store and model
    pub fn agent_factory(&self) -> AgentFactory {
        let resolver = PromptResolver::from_connection_string(
            self.database_url.as_deref(),
            self.schema.clone(),
        );
        AgentFactory::new(resolver).with_model(self.model.clone())
    }
}

/// Server configuration loader
#[derive(Debug, Default)]
pub struct ServerConfigLoader {
    database_url_override: Option<String>,
    model_override: Option<String>,
    host_override: Option<String>,
    port_override: Option<u16>,
}

impl ServerConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set database connection string override
    pub fn with_database_url_override(mut self, url: String) -> Self {
        self.database_url_override = Some(url);
        self
    }

    /// Set model override
    pub fn with_model_override(mut self, model: String) -> Self {
        self.model_override = Some(model);
        self
    }

    /// Set bind host override
    pub fn with_host_override(mut self, host: String) -> Self {
        self.host_override = Some(host);
        self
    }

    /// Set bind port override
    pub fn with_port_override(mut self, port: u16) -> Self {
        self.port_override = Some(port);
        self
    }

    /// Load from the process environment
    pub fn load(&self) -> Result<ServerConfig> {
        self.load_from(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables
    pub fn load_from<F>(&self, lookup: F) -> Result<ServerConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = self
            .database_url_override
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| DATABASE_URL_VARS.iter().find_map(|&key| var(key)));

        let schema = self.load_schema(&var)?;

        let host = self
            .host_override
            .clone()
            .or_else(|| var("ILLIE_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match self.port_override {
            Some(port) => port,
            None => parse_var(&var, "ILLIE_PORT")?.unwrap_or(DEFAULT_PORT),
        };

        let runtime_env = RuntimeEnv::parse(var("RUNTIME_ENV").as_deref());

        let protocol = var("ILLIE_PROTOCOL")
            .map(|name| Protocol::parse(&name))
            .unwrap_or(Protocol::OpenAICompat);
        let model_name = self
            .model_override
            .clone()
            .or_else(|| var("ILLIE_MODEL"))
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        let llm = match var("OPENAI_API_KEY") {
            Some(api_key) => Some(self.load_llm(&var, protocol.clone(), api_key, &model_name)?),
            None => None,
        };
        let model = match &llm {
            Some(llm) => llm.model_ref(),
            None => ModelRef::new(protocol.provider(), model_name),
        };

        Ok(ServerConfig {
            database_url,
            schema,
            host,
            port,
            runtime_env,
            model,
            llm,
        })
    }

    fn load_llm(
        &self,
        var: &dyn Fn(&str) -> Option<String>,
        protocol: Protocol,
        api_key: String,
        model_name: &str,
    ) -> Result<ResolvedLlmConfig> {
        let base_url = var("OPENAI_BASE_URL")
            .or_else(|| protocol.default_base_url().map(str::to_string))
            .ok_or_else(|| {
                anyhow!("OPENAI_BASE_URL is required for protocol '{}'", protocol.as_str())
            })?;

        let params = ModelParams {
            max_tokens: parse_var(var, "ILLIE_MAX_TOKENS")?,
            temperature: parse_var(var, "ILLIE_TEMPERATURE")?,
            top_p: parse_var(var, "ILLIE_TOP_P")?,
        };

        let mut resolved =
            ResolvedLlmConfig::new(protocol, base_url, api_key, model_name.to_string())
                .with_params(params);
        if let Some(org) = var("OPENAI_ORG_ID") {
            resolved = resolved.with_header("OpenAI-Organization".to_string(), org);
        }

        resolved
            .validate()
            .map_err(|e| anyhow!("Model configuration validation failed: {}", e))?;
        Ok(resolved)
    }

    fn load_schema(&self, var: &dyn Fn(&str) -> Option<String>) -> Result<PromptStoreSchema> {
        let defaults = PromptStoreSchema::default();
        let row_id = parse_var(var, "PROMPT_ROW_ID")?.unwrap_or(defaults.row_id);

        let schema = PromptStoreSchema {
            table: var("PROMPT_TABLE").unwrap_or(defaults.table),
            id_column: var("PROMPT_ID_COLUMN").unwrap_or(defaults.id_column),
            prompt_column: var("PROMPT_COLUMN").unwrap_or(defaults.prompt_column),
            row_id,
        };
        schema.validate().context("Invalid prompt store schema")?;
        Ok(schema)
    }
}

/// Parse `key` when set; a value that does not parse is an error
fn parse_var<T>(var: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", key, raw))
        })
        .transpose()
}
