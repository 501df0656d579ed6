use {
    std::str::FromStr,
    tracing::{
        level_filters::LevelFilter, metadata::ParseLevelFilterError, Level, Metadata, Subscriber,
    },
    tracing_subscriber::{layer::Context, Layer},
};

/// Targets that log every HTTP round trip to the node.
const TRANSPORT_TARGETS: [&str; 4] = ["hyper", "reqwest", "alloy_", "h2"];

/// A custom tracing subscriber filter that demotes messages from the HTTP and
/// JSON-RPC transport crates to DEBUG.
///
/// Those crates emit an `INFO` level message for every request sent to the
/// node, which is quite noisy. We want our log to focus on the voting session
/// instead.
pub struct CustomLevelFilter {
    max_level: LevelFilter,
}

impl CustomLevelFilter {
    fn allows(&self, target: &str, level: Level) -> bool {
        let is_transport = TRANSPORT_TARGETS
            .iter()
            .any(|prefix| target.starts_with(prefix));

        let effective_level = if is_transport && level < Level::DEBUG {
            Level::DEBUG
        } else {
            level
        };

        effective_level <= self.max_level
    }
}

impl<S> Layer<S> for CustomLevelFilter
where
    S: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.allows(metadata.target(), *metadata.level())
    }
}

impl FromStr for CustomLevelFilter {
    type Err = ParseLevelFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let max_level = s.parse()?;

        Ok(Self { max_level })
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case("info", "voting_session::session", Level::INFO => true; "own info at info")]
    #[test_case("info", "voting_client::facade", Level::DEBUG => false; "own debug at info")]
    #[test_case("info", "hyper_util::client", Level::INFO => false; "transport info at info")]
    #[test_case("info", "alloy_rpc_client::call", Level::WARN => false; "transport warn at info")]
    #[test_case("debug", "reqwest::connect", Level::INFO => true; "transport info at debug")]
    #[test_case("debug", "reqwest::connect", Level::TRACE => false; "transport trace at debug")]
    #[test_case("warn", "voting_cli::chain", Level::WARN => true; "own warn at warn")]
    fn demotes_transport_logs(max_level: &str, target: &str, level: Level) -> bool {
        max_level
            .parse::<CustomLevelFilter>()
            .unwrap()
            .allows(target, level)
    }
}
