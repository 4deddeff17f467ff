//! Artifact loading and the process-wide artifact cache

use crate::model::{LstmSentimentModel, SentimentModel};
use crate::tokenizer::{load_tokenizer, TextEncoder, TokenizerFormat};
use candle_core::Device;
use reviewscope_core::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info};

/// Locations of the two artifacts the pipeline needs
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// SafeTensors model weights
    pub model: PathBuf,

    /// Tokenizer vocabulary
    pub tokenizer: PathBuf,

    /// Tokenizer file format
    pub tokenizer_format: TokenizerFormat,

    /// Device to run inference on
    pub device: DeviceType,
}

/// Device type for inference
#[derive(Debug, Clone, Copy)]
pub enum DeviceType {
    /// CPU inference (always available)
    Cpu,
    /// CUDA GPU inference (if available)
    Cuda(usize), // GPU index
    /// Metal (Apple Silicon)
    Metal(usize),
}

impl DeviceType {
    /// Create Candle device from device type
    pub fn create(self) -> Result<Device> {
        match self {
            DeviceType::Cpu => Ok(Device::Cpu),
            DeviceType::Cuda(idx) => Device::new_cuda(idx)
                .map_err(|e| Error::artifact_load(format!("Failed to create CUDA device: {}", e))),
            DeviceType::Metal(idx) => Device::new_metal(idx)
                .map_err(|e| Error::artifact_load(format!("Failed to create Metal device: {}", e))),
        }
    }
}

/// Loaded model and tokenizer, read-only once built
#[derive(Clone)]
pub struct Artifacts {
    model: Arc<dyn SentimentModel>,
    tokenizer: Arc<dyn TextEncoder>,
}

impl Artifacts {
    pub fn new(model: Arc<dyn SentimentModel>, tokenizer: Arc<dyn TextEncoder>) -> Self {
        Self { model, tokenizer }
    }

    /// Load both artifacts from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        check_exists(&paths.tokenizer, "Tokenizer")?;
        check_exists(&paths.model, "Model")?;

        let tokenizer = load_tokenizer(&paths.tokenizer, paths.tokenizer_format)
            .map_err(|e| Error::artifact_load(load_message(&e)))?;

        let device = paths.device.create()?;
        let model = LstmSentimentModel::load(&paths.model, &device)
            .map_err(|e| Error::artifact_load(load_message(&e)))?;

        Ok(Self::new(Arc::new(model), tokenizer))
    }

    pub fn model(&self) -> &dyn SentimentModel {
        self.model.as_ref()
    }

    pub fn tokenizer(&self) -> &dyn TextEncoder {
        self.tokenizer.as_ref()
    }
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifacts")
            .field("model", &self.model.name())
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

fn check_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::artifact_load(format!(
            "{} file not found: {}",
            what,
            path.display()
        )));
    }
    Ok(())
}

/// Strip the variant prefix so memoized messages read naturally
fn load_message(err: &Error) -> String {
    match err {
        Error::ArtifactLoad(msg) | Error::Tokenizer(msg) | Error::Config(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// State of the artifact cache, for health reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// No load attempted yet
    NotLoaded,
    /// Loaded and usable
    Ready,
    /// Load failed; the message is what users see
    Failed(String),
}

type Loader = Box<dyn Fn() -> Result<Artifacts> + Send + Sync>;

/// Lazily loaded, process-wide artifact handle.
///
/// The loader runs at most once. Its outcome, success or failure, is kept
/// for the life of the cache: a failed load is never retried.
pub struct ArtifactCache {
    loader: Loader,
    state: OnceLock<std::result::Result<Arc<Artifacts>, String>>,
}

impl ArtifactCache {
    /// Cache backed by an arbitrary loader
    pub fn new(loader: impl Fn() -> Result<Artifacts> + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            state: OnceLock::new(),
        }
    }

    /// Cache that loads from the given artifact files
    pub fn from_paths(paths: ArtifactPaths) -> Self {
        Self::new(move || Artifacts::load(&paths))
    }

    /// Cache that is already populated
    pub fn preloaded(artifacts: Artifacts) -> Self {
        let cache = Self::new(|| Err(Error::artifact_load("artifacts were preloaded")));
        let _ = cache.state.set(Ok(Arc::new(artifacts)));
        cache
    }

    /// Get the artifacts, loading them on first use
    pub fn get(&self) -> Result<Arc<Artifacts>> {
        self.state
            .get_or_init(|| {
                info!("Loading sentiment model and tokenizer");
                match (self.loader)() {
                    Ok(artifacts) => {
                        info!(
                            model = artifacts.model.name(),
                            tokenizer = artifacts.tokenizer.name(),
                            "Artifacts loaded"
                        );
                        Ok(Arc::new(artifacts))
                    }
                    Err(e) => {
                        let message = load_message(&e);
                        error!("Failed to load artifacts: {}", message);
                        Err(message)
                    }
                }
            })
            .clone()
            .map_err(Error::ArtifactLoad)
    }

    /// Current state, without triggering a load
    pub fn status(&self) -> ArtifactStatus {
        match self.state.get() {
            None => ArtifactStatus::NotLoaded,
            Some(Ok(_)) => ArtifactStatus::Ready,
            Some(Err(message)) => ArtifactStatus::Failed(message.clone()),
        }
    }
}

impl fmt::Debug for ArtifactCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactCache")
            .field("status", &self.status())
            .finish()
    }
}
