use serde::Deserialize;

/// How the shell prints results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unsupported output format: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub log_filter: String,
    pub json_logs: bool,
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "nutriplan=info".into(),
            json_logs: false,
            output: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let log_filter = lookup("RUST_LOG").unwrap_or(defaults.log_filter);
        let json_logs = lookup("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
        let output = match lookup("NUTRIPLAN_OUTPUT") {
            Some(raw) => OutputFormat::parse(&raw)?,
            None => defaults.output,
        };
        Ok(Self {
            log_filter,
            json_logs,
            output,
        })
    }
}
