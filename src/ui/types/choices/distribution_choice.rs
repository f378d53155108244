use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> Option<u64> {
    Some(DEFAULT_SEED)
}

fn default_two() -> f64 {
    2.0
}

fn default_one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GammaParameters {
    #[serde(default = "default_two")]
    #[schemars(
        title = "Shape",
        description = "Shape parameter k (> 0)",
        range(min = 0.0),
        default = "default_two"
    )]
    pub shape: f64,

    #[serde(default = "default_two")]
    #[schemars(
        title = "Scale",
        description = "Scale parameter theta (> 0)",
        range(min = 0.0),
        default = "default_two"
    )]
    pub scale: f64,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed (None = OS entropy)")]
    pub seed: Option<u64>,
}

impl Default for GammaParameters {
    fn default() -> Self {
        Self {
            shape: 2.0,
            scale: 2.0,
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalParameters {
    #[serde(default)]
    #[schemars(title = "Mean", description = "Location of the distribution")]
    pub mean: f64,

    #[serde(default = "default_one")]
    #[schemars(
        title = "Standard Deviation",
        description = "Spread of the distribution (> 0)",
        range(min = 0.0),
        default = "default_one"
    )]
    pub std_dev: f64,

    #[serde(default)]
    #[schemars(title = "Seed", description = "PRNG seed (None = OS entropy)")]
    pub seed: Option<u64>,
}

impl Default for NormalParameters {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(DistributionKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum DistributionChoice {
    #[strum_discriminants(strum(
        message = "Gamma",
        detailed_message = "Gamma(shape, scale) variates by rejection sampling."
    ))]
    Gamma(GammaParameters),

    #[strum_discriminants(strum(
        message = "Normal",
        detailed_message = "Gaussian deviates with the given mean and standard deviation."
    ))]
    Normal(NormalParameters),
}

impl UIChoice for DistributionChoice {
    type Kind = DistributionKind;

    fn schema() -> Schema {
        schema_for!(DistributionChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a sample distribution:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            DistributionKind::Gamma => {
                serde_json::to_value(GammaParameters::default()).unwrap_or_default()
            }
            DistributionKind::Normal => {
                serde_json::to_value(NormalParameters::default()).unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::EnumMessage;

    #[test]
    fn tagged_enum_serialization() {
        let v = serde_json::to_value(DistributionChoice::Gamma(GammaParameters::default())).unwrap();
        assert_eq!(v, json!({"type": "gamma", "params": {"shape": 2.0, "scale": 2.0, "seed": 42}}));

        let v = serde_json::to_value(DistributionChoice::Normal(NormalParameters::default())).unwrap();
        assert_eq!(v.get("type").and_then(Value::as_str), Some("normal"));
        assert_eq!(v["params"]["seed"], Value::Null);
    }

    #[test]
    fn serde_missing_fields_apply_defaults() {
        let g: GammaParameters = serde_json::from_value(json!({})).unwrap();
        assert_eq!(g, GammaParameters::default());
        let n: NormalParameters = serde_json::from_value(json!({"mean": 3.0})).unwrap();
        assert_eq!(n.mean, 3.0);
        assert_eq!(n.std_dev, 1.0);
        assert_eq!(n.seed, None);
    }

    #[test]
    fn explicit_null_seed_means_unseeded() {
        let c: DistributionChoice =
            serde_json::from_value(json!({"type": "gamma", "params": {"seed": null}})).unwrap();
        assert_eq!(
            c,
            DistributionChoice::Gamma(GammaParameters {
                seed: None,
                ..GammaParameters::default()
            })
        );
    }

    #[test]
    fn default_params_rebuild_through_from_parts() {
        for kind in [DistributionKind::Gamma, DistributionKind::Normal] {
            let v = <DistributionChoice as UIChoice>::default_params(kind);
            let rebuilt = <DistributionChoice as UIChoice>::from_parts(kind, v).unwrap();
            let expected = match kind {
                DistributionKind::Gamma => DistributionChoice::Gamma(GammaParameters::default()),
                DistributionKind::Normal => DistributionChoice::Normal(NormalParameters::default()),
            };
            assert_eq!(rebuilt, expected);
        }
    }

    #[test]
    fn discriminant_messages_available() {
        assert_eq!(DistributionKind::Gamma.get_message(), Some("Gamma"));
        assert!(DistributionKind::Normal.get_detailed_message().is_some());
    }
}
