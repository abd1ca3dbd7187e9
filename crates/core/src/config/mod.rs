use serde::{Deserialize, Serialize};

use crate::{AmplitudeDomain, EffectParameters, RoundingPolicy};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Pattern name; unknown names fall back to Circular at processing time.
    pub pattern: String,
    pub speed: f64,
    /// Fixed seed for the randomised patterns. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Domain decoded audio is converted into before processing.
    pub working_domain: AmplitudeDomain,
}

impl Default for AppConfig {
    fn default() -> Self {
        let params = EffectParameters::default();
        Self {
            engine: EngineConfig::default(),
            pattern: params.pattern,
            speed: params.speed,
            seed: None,
            working_domain: AmplitudeDomain::Normalized,
        }
    }
}

impl AppConfig {
    pub fn effect_parameters(&self) -> EffectParameters {
        EffectParameters::new(self.pattern.clone(), self.speed)
    }
}

/// Configuration specific to the effect engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rounding: RoundingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_speed_control() {
        let config = AppConfig::default();
        assert_eq!(config.pattern, "Circular");
        assert_eq!(config.speed, 0.1);
        assert_eq!(config.seed, None);
        assert_eq!(config.engine.rounding, RoundingPolicy::TowardZero);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "pattern": "Echo Effect", "seed": 9, "engine": { "rounding": "nearest-even" } }"#,
        )
        .unwrap();

        assert_eq!(config.pattern, "Echo Effect");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.speed, 0.1);
        assert_eq!(config.working_domain, AmplitudeDomain::Normalized);
        assert_eq!(config.engine.rounding, RoundingPolicy::NearestEven);
    }
}
