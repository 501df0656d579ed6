use {
    crate::Result,
    config::{Config, Environment, File},
    serde::de::DeserializeOwned,
    std::path::Path,
};

/// Load a configuration of type `D` from the TOML file at `path`, then apply
/// overrides from environment variables.
///
/// Nested keys are addressed in the environment with a double underscore,
/// e.g. `CHAIN__CONTRACT_ADDRESS` overrides `contract_address` in the `[chain]`
/// table. The file is optional: when it doesn't exist, `D` is built from the
/// environment and its serde defaults alone.
pub fn parse_config<P, D>(path: P) -> Result<D>
where
    P: AsRef<Path>,
    D: DeserializeOwned,
{
    let env_override = Environment::default().separator("__");

    let config = Config::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(env_override)
        .build()?;

    Ok(config.try_deserialize()?)
}

// ----------------------------------- tests -----------------------------------
