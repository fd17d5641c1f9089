//! Request model for service creation and prediction.
//!
//! # Design
//! One canonical shape per request, routed through `codec`. Parameter groups
//! (`input`, `mllib`, `output`) are shared between service creation and
//! prediction because the server accepts the same keys in both places.
//!
//! Omission rules:
//! - service `mllib`, `type`, `description`, `parameters`, `parameters.input`,
//!   `model` and `model.repository` are always sent;
//! - service `parameters.mllib` / `parameters.output` are dropped when empty;
//! - predict `service` and `data` are always sent, `parameters` and each of
//!   its groups are dropped when empty;
//! - every other leaf is dropped when it holds its zero value.

use serde::{Deserialize, Serialize};

use crate::codec::{is_false, is_zero_f64, is_zero_i32};
use crate::error::EncodeError;

/// Whether a service is trained with labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MlType {
    #[default]
    Supervised,
    Unsupervised,
}

/// Input connector parameters. Which fields matter depends on `connector`
/// (`image`, `csv`, `txt`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputParameters {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub connector: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub width: i32,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub height: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub bw: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mean: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub std: Vec<f64>,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub crop_size: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub db: bool,

    // csv
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub separator: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "is_false")]
    pub scale: bool,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub label_offset: i32,

    // txt
    #[serde(skip_serializing_if = "is_false")]
    pub characters: bool,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub sequence: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alphabet: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub min_count: i32,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub min_word_length: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub sentences: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub count: bool,
}

impl InputParameters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Backend library parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MllibParameters {
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub nclasses: i32,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub ntargets: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub gpu: bool,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub gpuid: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub activation: String,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub dropout: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub regression: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub finetuning: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mirror: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub rotate: bool,
}

impl MllibParameters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Output shaping parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputParameters {
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub best: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub bbox: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mask: bool,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub confidence_threshold: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub store_config: bool,
}

impl OutputParameters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceParameters {
    pub input: InputParameters,
    #[serde(skip_serializing_if = "MllibParameters::is_empty")]
    pub mllib: MllibParameters,
    #[serde(skip_serializing_if = "OutputParameters::is_empty")]
    pub output: OutputParameters,
}

/// Where the server finds (or creates) the model files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub repository: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub templates: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub weights: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub create_repository: bool,
}

/// Body of `PUT /services/{name}`. `name` travels in the path only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    #[serde(skip)]
    pub name: String,
    pub mllib: String,
    #[serde(rename = "type")]
    pub service_type: MlType,
    pub description: String,
    pub parameters: ServiceParameters,
    pub model: ModelConfig,
}

impl ServiceConfig {
    pub fn new(name: &str, mllib: &str) -> Self {
        Self {
            name: name.to_string(),
            mllib: mllib.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictParameters {
    #[serde(skip_serializing_if = "InputParameters::is_empty")]
    pub input: InputParameters,
    #[serde(skip_serializing_if = "MllibParameters::is_empty")]
    pub mllib: MllibParameters,
    #[serde(skip_serializing_if = "OutputParameters::is_empty")]
    pub output: OutputParameters,
}

impl PredictParameters {
    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.mllib.is_empty() && self.output.is_empty()
    }
}

/// Body of `POST /predict`. `data` holds URIs or inline payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub service: String,
    #[serde(skip_serializing_if = "PredictParameters::is_empty")]
    pub parameters: PredictParameters,
    pub data: Vec<String>,
}

impl PredictRequest {
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
            ..Self::default()
        }
    }

    /// Image prediction with the classic defaults: 227x227 input, best class
    /// only, confidence threshold 0.1.
    pub fn with_image_defaults(service: &str) -> Self {
        let mut predict = Self::new(service);
        predict.parameters.input.width = 227;
        predict.parameters.input.height = 227;
        predict.parameters.output.best = 1;
        predict.parameters.output.confidence_threshold = 0.1;
        predict
    }

    pub fn with_data(mut self, data: &str) -> Self {
        self.data.push(data.to_string());
        self
    }

    /// Checks the service name and that `confidence_threshold` lies in [0, 1].
    pub(crate) fn validate(&self) -> Result<(), EncodeError> {
        validate_service_name(&self.service)?;
        let threshold = self.parameters.output.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(EncodeError::InvalidParameter {
                name: "confidence_threshold",
                reason: format!("{threshold} is outside [0, 1]"),
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_service_name(name: &str) -> Result<(), EncodeError> {
    let path_safe = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if name.is_empty() || !path_safe || name == "." || name == ".." {
        return Err(EncodeError::InvalidServiceName(name.to_string()));
    }
    Ok(())
}
