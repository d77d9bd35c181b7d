use thiserror::Error;

use crate::map::NodeId;

/// Errors raised while loading maps, configuring models and generating paths.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid value {value} for setting '{setting}' (expected {expected})")]
    Configuration {
        setting: &'static str,
        value: String,
        expected: String,
    },

    #[error("failed to read map source '{source_id}': {source}")]
    Load {
        source_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("no map nodes in the given map")]
    EmptyGraph,

    #[error(
        "map is not fully connected: only {reachable} out of {total} map nodes can be reached \
         from {start}, e.g. {unreachable} can't be reached"
    )]
    DisconnectedGraph {
        reachable: usize,
        total: usize,
        start: NodeId,
        unreachable: NodeId,
    },

    #[error("tried to get a path before the agent was placed on the map")]
    NotPlaced,

    #[error("Lévy sample {value} is below 1 (lambda = {lambda})")]
    SamplingInvariant { value: f64, lambda: f64 },
}

impl Error {
    pub(crate) fn configuration(
        setting: &'static str,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            setting,
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
