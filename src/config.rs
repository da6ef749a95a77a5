use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heap::{builder::HeapBuilder, hash_table, indexed_heap::DEFAULT_ARRAY_CAPACITY};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("array capacity must be greater than zero")]
    ArrayCapacityNotGreaterThanZero,
    #[error("index capacity must be greater than zero")]
    IndexCapacityNotGreaterThanZero,
    #[error("could not parse heap config")]
    Parse(#[from] serde_json::Error),
}

/// Initial sizing for a heap, loadable from JSON. Missing fields take the
/// same defaults as `IndexedHeap::new`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HeapConfig {
    pub array_capacity: usize,
    pub index_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            array_capacity: DEFAULT_ARRAY_CAPACITY,
            index_capacity: hash_table::DEFAULT_CAPACITY,
        }
    }
}

impl HeapConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: HeapConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!("loaded heap config {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array_capacity == 0 {
            return Err(ConfigError::ArrayCapacityNotGreaterThanZero);
        }
        if self.index_capacity == 0 {
            return Err(ConfigError::IndexCapacityNotGreaterThanZero);
        }
        Ok(())
    }

    pub fn builder(&self) -> HeapBuilder {
        HeapBuilder::new()
            .with_array_capacity(self.array_capacity)
            .with_index_capacity(self.index_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, HeapConfig};

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = HeapConfig::from_json(r#"{ "index_capacity": 31 }"#).unwrap();
        assert_eq!(config.array_capacity, 10);
        assert_eq!(config.index_capacity, 31);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = HeapConfig::from_json(r#"{ "array_capacity": 0 }"#);
        assert!(matches!(result, Err(ConfigError::ArrayCapacityNotGreaterThanZero)));
        let result = HeapConfig::from_json(r#"{ "index_capacity": 0 }"#);
        assert!(matches!(result, Err(ConfigError::IndexCapacityNotGreaterThanZero)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            HeapConfig::from_json(r#"{ "array_capacity": "many" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            HeapConfig::from_json(r#"{ "load_factor": 0.5 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = HeapConfig {
            array_capacity: 128,
            index_capacity: 257,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(HeapConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_builder_uses_config() {
        let config = HeapConfig::from_json(r#"{ "array_capacity": 32, "index_capacity": 41 }"#).unwrap();
        let heap = config.builder().build::<String, u64>();
        assert_eq!(heap.capacity(), 32);
        assert_eq!(heap.index_capacity(), 41);
    }
}
