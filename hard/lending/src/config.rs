use {
    crate::Params,
    anyhow::Context,
    config::{Config, Environment, File},
    std::path::Path,
};

/// Prefix of environment variables that override values read from a file,
/// e.g. `HARD__CHECK_LTV_INDEX_COUNT=20`.
pub const ENV_PREFIX: &str = "HARD";

pub struct ConfigParser;

impl ConfigParser {
    /// Read a config file, layering `HARD__`-prefixed environment variables on
    /// top of it. The format is inferred from the file extension.
    pub fn parse<D>(path: &Path) -> anyhow::Result<D>
    where
        D: serde::de::DeserializeOwned,
    {
        let env_override = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__");

        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(env_override)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Read and validate ledger params.
    pub fn parse_params(path: &Path) -> anyhow::Result<Params> {
        let params: Params = Self::parse(path)
            .with_context(|| format!("failed to read params from {}", path.display()))?;

        params
            .validate()
            .with_context(|| format!("invalid params in {}", path.display()))?;

        Ok(params)
    }
}

// ----------------------------------- tests -----------------------------------
