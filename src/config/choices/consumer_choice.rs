use crate::config::choices::Choice;
use crate::consumers::{DEFAULT_LAG_DEPTH, SubdivisionScheme};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_lag_depth() -> usize {
    DEFAULT_LAG_DEPTH
}

fn default_n_bins() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct MeanParameters {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HistogramParameters {
    #[schemars(
        title = "Minimum",
        description = "Left end of the binned range; smaller samples are not counted"
    )]
    pub min_value: f64,

    #[schemars(
        title = "Maximum",
        description = "Right end of the binned range; larger samples are not counted"
    )]
    pub max_value: f64,

    #[serde(default = "default_n_bins")]
    #[schemars(
        title = "Bins",
        description = "Number of sub-intervals the range is split into",
        default = "default_n_bins",
        range(min = 1)
    )]
    pub n_bins: usize,

    #[serde(default)]
    #[schemars(
        title = "Subdivision",
        description = "Equal-width bins (linear) or equal-ratio bins (logarithmic, needs minimum > 0)"
    )]
    pub scheme: SubdivisionScheme,
}

impl Default for HistogramParameters {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            n_bins: default_n_bins(),
            scheme: SubdivisionScheme::Linear,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AutocovarianceParameters {
    #[serde(default = "default_lag_depth")]
    #[schemars(
        title = "Lag depth",
        description = "Autocovariance is estimated for lags 1..=k",
        default = "default_lag_depth",
        range(min = 1)
    )]
    pub lag_depth: usize,
}

impl Default for AutocovarianceParameters {
    fn default() -> Self {
        Self {
            lag_depth: default_lag_depth(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ConsumerKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ConsumerChoice {
    #[strum_discriminants(strum(
        message = "Mean Value",
        detailed_message = "Running mean of scalar or vector samples."
    ))]
    MeanValue(MeanParameters),

    #[strum_discriminants(strum(
        message = "Histogram",
        detailed_message = "Per-bin counts of a scalar over a fixed range."
    ))]
    Histogram(HistogramParameters),

    #[strum_discriminants(strum(
        message = "Spurious Autocovariance",
        detailed_message = "Online autocovariance estimate for lags 1..=k over a sliding window."
    ))]
    SpuriousAutocovariance(AutocovarianceParameters),
}

impl Choice for ConsumerChoice {
    type Kind = ConsumerKind;

    fn schema() -> Schema {
        schema_for!(ConsumerChoice)
    }

    fn default_params(kind: Self::Kind) -> Value {
        let params = match kind {
            ConsumerKind::MeanValue => serde_json::to_value(MeanParameters::default()),
            ConsumerKind::Histogram => serde_json::to_value(HistogramParameters::default()),
            ConsumerKind::SpuriousAutocovariance => {
                serde_json::to_value(AutocovarianceParameters::default())
            }
        };
        params.unwrap_or(Value::Null)
    }
}
