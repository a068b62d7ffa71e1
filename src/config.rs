use crate::{
    constants::{DEFAULT_BENCHMARK_DEPTH, DEFAULT_BENCHMARK_GAMES, DEFAULT_MAX_DEPTH},
    engine::{SearchSettings, Strategy},
    types::ChessError,
};

/// Engine configuration parsed from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimax depth in ply.
    pub search_depth: u16,
    /// Which player moves for the computer.
    pub strategy: Strategy,
    /// Fixed seed for the random player. Entropy when unset.
    pub seed: Option<u64>,
    pub benchmark_games: usize,
    pub benchmark_depth: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: DEFAULT_MAX_DEPTH,
            strategy: Strategy::Minimax,
            seed: None,
            benchmark_games: DEFAULT_BENCHMARK_GAMES,
            benchmark_depth: DEFAULT_BENCHMARK_DEPTH,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ChessError> {
    value
        .trim()
        .parse()
        .map_err(|_| ChessError::InvalidConfig(format!("{}={:?}", name, value)))
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Result<Self, ChessError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset variables keep their default; set but unparsable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();

        if let Some(value) = lookup("CHESS_SEARCH_DEPTH") {
            config.search_depth = parse_var("CHESS_SEARCH_DEPTH", &value)?;
        }

        if let Some(value) = lookup("CHESS_STRATEGY") {
            config.strategy = match value.trim().to_ascii_lowercase().as_str() {
                "minimax" => Strategy::Minimax,
                "random" => Strategy::Random,
                _ => {
                    return Err(ChessError::InvalidConfig(format!(
                        "CHESS_STRATEGY={:?}",
                        value
                    )));
                }
            };
        }

        if let Some(value) = lookup("CHESS_SEED") {
            config.seed = Some(parse_var("CHESS_SEED", &value)?);
        }

        if let Some(value) = lookup("CHESS_BENCH_GAMES") {
            config.benchmark_games = parse_var("CHESS_BENCH_GAMES", &value)?;
        }

        if let Some(value) = lookup("CHESS_BENCH_DEPTH") {
            config.benchmark_depth = parse_var("CHESS_BENCH_DEPTH", &value)?;
        }

        Ok(config)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            max_depth: self.search_depth,
            strategy: self.strategy,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.search_depth, 4);
        assert_eq!(config.strategy, Strategy::Minimax);
        assert_eq!(config.seed, None);
        assert_eq!(config.benchmark_games, 100);
        assert_eq!(config.benchmark_depth, 2);
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = EngineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("CHESS_SEARCH_DEPTH", "3"),
            ("CHESS_STRATEGY", "Random"),
            ("CHESS_SEED", "42"),
            ("CHESS_BENCH_GAMES", "10"),
        ]))
        .unwrap();

        assert_eq!(config.search_depth, 3);
        assert_eq!(config.strategy, Strategy::Random);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.benchmark_games, 10);
        assert_eq!(config.benchmark_depth, 2);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let depth = EngineConfig::from_lookup(lookup_from(&[("CHESS_SEARCH_DEPTH", "deep")]));
        assert!(matches!(depth, Err(ChessError::InvalidConfig(_))));

        let strategy = EngineConfig::from_lookup(lookup_from(&[("CHESS_STRATEGY", "alphabeta")]));
        assert!(matches!(strategy, Err(ChessError::InvalidConfig(_))));
    }

    #[test]
    fn search_settings_follow_config() {
        let config = EngineConfig {
            search_depth: 2,
            strategy: Strategy::Random,
            seed: Some(7),
            ..EngineConfig::default()
        };

        let settings = config.search_settings();
        assert_eq!(settings.max_depth, 2);
        assert_eq!(settings.strategy, Strategy::Random);
        assert_eq!(settings.seed, Some(7));
    }
}
