//! Serializable settings for sampling and network runs.

use serde::{Deserialize, Serialize};

/// How the default random source is seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SamplerConfig {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Options for a Bayesian network run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkOptions {
    /// Number of times the scenario function is executed.
    pub samples: usize,
    /// Store a freshly generated population under the run's key.
    pub cache: bool,
    /// Ignore any cached population and regenerate.
    pub reload_cache: bool,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            samples: 1,
            cache: true,
            reload_cache: false,
        }
    }
}

impl NetworkOptions {
    #[must_use]
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn reload_cache(mut self, reload_cache: bool) -> Self {
        self.reload_cache = reload_cache;
        self
    }
}
