//! Configuration for artifact loading

use crate::model_loader::{ArtifactPaths, DeviceType};
use crate::tokenizer::TokenizerFormat;
use reviewscope_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where the model and tokenizer artifacts live and how to load them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// SafeTensors model weights
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Tokenizer vocabulary file
    #[serde(default = "default_tokenizer_path")]
    pub tokenizer_path: PathBuf,

    /// Tokenizer file format
    #[serde(default)]
    pub tokenizer_format: TokenizerFormat,

    /// Device to run inference on
    #[serde(default)]
    pub device: DeviceSpec,
}

/// Device specification (for config files).
///
/// Accepts a bare name (`cpu`, `cuda`, `metal`, index 0) or a single-key map
/// selecting a GPU index (`cuda: {index: 1}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeviceSpecRepr", into = "DeviceSpecRepr")]
pub enum DeviceSpec {
    #[default]
    Cpu,
    Cuda {
        index: Option<usize>,
    },
    Metal {
        index: Option<usize>,
    },
}

impl DeviceSpec {
    /// Convert to DeviceType
    pub fn to_device_type(&self) -> DeviceType {
        match self {
            DeviceSpec::Cpu => DeviceType::Cpu,
            DeviceSpec::Cuda { index } => DeviceType::Cuda(index.unwrap_or(0)),
            DeviceSpec::Metal { index } => DeviceType::Metal(index.unwrap_or(0)),
        }
    }

    fn from_name(name: &str, index: Option<usize>) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cpu" => Ok(DeviceSpec::Cpu),
            "cuda" => Ok(DeviceSpec::Cuda { index }),
            "metal" => Ok(DeviceSpec::Metal { index }),
            other => Err(Error::config(format!(
                "unknown device '{other}' (expected cpu, cuda or metal)"
            ))),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DeviceSpec::Cpu => "cpu",
            DeviceSpec::Cuda { .. } => "cuda",
            DeviceSpec::Metal { .. } => "metal",
        }
    }
}

/// On-disk shape of [`DeviceSpec`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DeviceSpecRepr {
    Name(String),
    Indexed(BTreeMap<String, DeviceIndex>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DeviceIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl TryFrom<DeviceSpecRepr> for DeviceSpec {
    type Error = Error;

    fn try_from(repr: DeviceSpecRepr) -> Result<Self> {
        match repr {
            DeviceSpecRepr::Name(name) => Self::from_name(&name, None),
            DeviceSpecRepr::Indexed(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((name, device)), None) => Self::from_name(&name, device.index),
                    _ => Err(Error::config("device map must have exactly one entry")),
                }
            }
        }
    }
}

impl From<DeviceSpec> for DeviceSpecRepr {
    fn from(spec: DeviceSpec) -> Self {
        match spec {
            DeviceSpec::Cuda { index: Some(index) } | DeviceSpec::Metal { index: Some(index) } => {
                let device = DeviceIndex { index: Some(index) };
                DeviceSpecRepr::Indexed(BTreeMap::from([(spec.name().to_string(), device)]))
            }
            _ => DeviceSpecRepr::Name(spec.name().to_string()),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            tokenizer_path: default_tokenizer_path(),
            tokenizer_format: TokenizerFormat::default(),
            device: DeviceSpec::default(),
        }
    }
}

impl ArtifactConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid artifact configuration: {e}")))
    }

    /// Convert to loader paths
    pub fn to_artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model_path.clone(),
            tokenizer: self.tokenizer_path.clone(),
            tokenizer_format: self.tokenizer_format,
            device: self.device.to_device_type(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model/sentiment_model.safetensors")
}

fn default_tokenizer_path() -> PathBuf {
    PathBuf::from("model/review_tokenizer.json")
}
