use crate::config::Settings;
use crate::error::{FacadeError, Result};
use crate::instrument::{Boundary, observe, observe_sync};
use candle_core::{DType, Device, Tensor};
use candle_nn::{Init, Linear, Module, Optimizer, SGD, VarBuilder, VarMap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;

/// Full-batch passes over the data in [`CandleHelper::train_simple_model`].
pub const TRAINING_EPOCHS: usize = 100;

/// Plain SGD step size.
pub const LEARNING_RATE: f64 = 0.01;

const MANIFEST_FILE: &str = "model.json";
const WEIGHTS_FILE: &str = "weights.safetensors";
const MANIFEST_FORMAT: &str = "ai-megarepo/linear-regression";
const LAYER_PREFIX: &str = "dense";

const INITIALIZE: Boundary = Boundary::new("candle", "initialize", "Candle backend error");
const CREATE: Boundary = Boundary::new("candle", "create_model", "Candle model error");
const TRAIN: Boundary = Boundary::new("candle", "train_simple_model", "Candle training error");
const PREDICT: Boundary = Boundary::new("candle", "predict", "Candle prediction error");
const SAVE: Boundary = Boundary::new("candle", "save_model", "Candle save error");
const LOAD: Boundary = Boundary::new("candle", "load_model", "Candle load error");

fn tensor_err(e: candle_core::Error) -> FacadeError {
    FacadeError::InferenceError(e.to_string())
}

/// Architecture and training metadata written next to the weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ModelManifest {
    format: String,
    input_units: usize,
    units: usize,
    optimizer: String,
    learning_rate: f64,
    loss: String,
}

impl ModelManifest {
    fn current() -> Self {
        Self {
            format: MANIFEST_FORMAT.to_string(),
            input_units: 1,
            units: 1,
            optimizer: "sgd".to_string(),
            learning_rate: LEARNING_RATE,
            loss: "mean_squared_error".to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.format != MANIFEST_FORMAT {
            return Err(FacadeError::Load(format!(
                "Unsupported model format '{}'",
                self.format
            )));
        }
        if self.input_units != 1 || self.units != 1 {
            return Err(FacadeError::Load(format!(
                "Expected a 1 -> 1 dense model, found {} -> {}",
                self.input_units, self.units
            )));
        }
        Ok(())
    }
}

/// A single dense unit (`y = w * x + b`) with its parameters and device.
///
/// Obtained from [`CandleHelper::create_model`],
/// [`CandleHelper::train_simple_model`], or [`CandleHelper::load_model`].
pub struct RegressionModel {
    varmap: VarMap,
    layer: Linear,
    device: Device,
    learning_rate: f64,
}

impl RegressionModel {
    fn new(device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device).pp(LAYER_PREFIX);
        // Zero initialization keeps training reproducible.
        let weight = vb
            .get_with_hints((1, 1), "weight", Init::Const(0.0))
            .map_err(tensor_err)?;
        let bias = vb
            .get_with_hints(1, "bias", Init::Const(0.0))
            .map_err(tensor_err)?;

        Ok(Self {
            varmap,
            layer: Linear::new(weight, Some(bias)),
            device,
            learning_rate: LEARNING_RATE,
        })
    }

    /// Current `(weight, bias)`.
    pub fn parameters(&self) -> Result<(f32, f32)> {
        let weight = self
            .layer
            .weight()
            .flatten_all()
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(tensor_err)?;
        let bias = match self.layer.bias() {
            Some(b) => b.to_vec1::<f32>().map_err(tensor_err)?,
            None => vec![0.0],
        };
        Ok((weight[0], bias[0]))
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Run `epochs` full-batch SGD steps on mean-squared error and return the
    /// last loss.
    fn fit(&self, xs: &Tensor, ys: &Tensor, epochs: usize) -> Result<f32> {
        let mut optimizer =
            SGD::new(self.varmap.all_vars(), self.learning_rate).map_err(tensor_err)?;
        let mut last_loss = f32::NAN;
        for _ in 0..epochs {
            let predictions = self.layer.forward(xs).map_err(tensor_err)?;
            let loss = candle_nn::loss::mse(&predictions, ys).map_err(tensor_err)?;
            optimizer.backward_step(&loss).map_err(tensor_err)?;
            last_loss = loss.to_scalar::<f32>().map_err(tensor_err)?;
        }
        Ok(last_loss)
    }
}

impl std::fmt::Debug for RegressionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegressionModel")
            .field("device", &self.device)
            .field("learning_rate", &self.learning_rate)
            .finish_non_exhaustive()
    }
}

/// Local regression helper backed by [Candle](https://github.com/huggingface/candle).
///
/// The backend device is chosen from [`Settings::numeric`] the first time it
/// is needed, or on an explicit [`initialize`](Self::initialize), and then
/// reused by every model this helper creates.
pub struct CandleHelper {
    backend: String,
    device: Mutex<Option<Device>>,
    #[cfg(test)]
    setup_runs: AtomicU32,
}

impl Default for CandleHelper {
    fn default() -> Self {
        Self::with_backend(crate::config::DEFAULT_BACKEND)
    }
}

impl CandleHelper {
    pub fn new(settings: &Settings) -> Self {
        Self::with_backend(&settings.numeric.backend)
    }

    pub fn with_backend(backend: &str) -> Self {
        Self {
            backend: backend.to_string(),
            device: Mutex::new(None),
            #[cfg(test)]
            setup_runs: AtomicU32::new(0),
        }
    }

    /// Select the backend device once. Later and overlapping calls are no-ops.
    pub async fn initialize(&self) -> Result<()> {
        observe(INITIALIZE, async { self.device().await.map(|_| ()) }).await
    }

    pub async fn is_initialized(&self) -> bool {
        self.device.lock().await.is_some()
    }

    async fn device(&self) -> Result<Device> {
        let mut slot = self.device.lock().await;
        if let Some(device) = slot.as_ref() {
            return Ok(device.clone());
        }

        let device = select_device(&self.backend)?;
        #[cfg(test)]
        self.setup_runs.fetch_add(1, Ordering::SeqCst);
        tracing::info!(backend = %self.backend, device = ?device, "Numeric backend initialized");
        *slot = Some(device.clone());
        Ok(device)
    }

    /// Build an untrained 1 -> 1 dense model (SGD, mean-squared error).
    pub async fn create_model(&self) -> Result<RegressionModel> {
        observe(CREATE, async { RegressionModel::new(self.device().await?) }).await
    }

    /// Fit a fresh model to `xs -> ys` for [`TRAINING_EPOCHS`] full-batch epochs.
    ///
    /// `xs` and `ys` must be non-empty and of equal length.
    pub async fn train_simple_model(&self, xs: &[f32], ys: &[f32]) -> Result<RegressionModel> {
        observe(TRAIN, async {
            if xs.len() != ys.len() {
                return Err(FacadeError::Validation(format!(
                    "xs and ys must have the same length ({} != {})",
                    xs.len(),
                    ys.len()
                )));
            }
            if xs.is_empty() {
                return Err(FacadeError::Validation(
                    "training data must not be empty".to_string(),
                ));
            }

            let model = RegressionModel::new(self.device().await?)?;
            let final_loss = {
                let x = Tensor::from_slice(xs, (xs.len(), 1), &model.device).map_err(tensor_err)?;
                let y = Tensor::from_slice(ys, (ys.len(), 1), &model.device).map_err(tensor_err)?;
                model.fit(&x, &y, TRAINING_EPOCHS)?
                // x and y are released here.
            };
            tracing::debug!(
                samples = xs.len(),
                epochs = TRAINING_EPOCHS,
                loss = final_loss,
                "Regression model trained"
            );
            Ok(model)
        })
        .await
    }

    /// One forward pass on a single scalar input.
    pub fn predict(&self, model: &RegressionModel, input: f32) -> Result<f32> {
        observe_sync(PREDICT, || {
            let output = {
                let x = Tensor::new(&[[input]], &model.device).map_err(tensor_err)?;
                model
                    .layer
                    .forward(&x)
                    .and_then(|y| y.flatten_all())
                    .and_then(|y| y.to_vec1::<f32>())
                    .map_err(tensor_err)?
            };
            output.first().copied().ok_or_else(|| {
                FacadeError::InferenceError("model produced no output".to_string())
            })
        })
    }

    /// Write the model to the directory at `path` (a `file://` prefix is
    /// accepted). The directory is created if missing.
    pub async fn save_model(&self, model: &RegressionModel, path: &str) -> Result<()> {
        observe(SAVE, async {
            let dir = resolve_model_dir(path);
            std::fs::create_dir_all(&dir).map_err(|e| {
                FacadeError::Load(format!("Failed to create '{}': {}", dir.display(), e))
            })?;

            let manifest = ModelManifest {
                learning_rate: model.learning_rate,
                ..ModelManifest::current()
            };
            let manifest_json = serde_json::to_string_pretty(&manifest)
                .map_err(|e| FacadeError::Load(e.to_string()))?;
            write_file(&dir.join(MANIFEST_FILE), manifest_json.as_bytes())?;

            model
                .varmap
                .save(dir.join(WEIGHTS_FILE))
                .map_err(|e| FacadeError::Load(e.to_string()))?;

            tracing::debug!(path = %dir.display(), "Regression model saved");
            Ok(())
        })
        .await
    }

    /// Restore a model written by [`save_model`](Self::save_model) onto this
    /// helper's backend device.
    pub async fn load_model(&self, path: &str) -> Result<RegressionModel> {
        observe(LOAD, async {
            let dir = resolve_model_dir(path);
            let manifest_path = dir.join(MANIFEST_FILE);
            let contents = std::fs::read_to_string(&manifest_path).map_err(|e| {
                FacadeError::Load(format!(
                    "Failed to read '{}': {}",
                    manifest_path.display(),
                    e
                ))
            })?;
            let manifest: ModelManifest = serde_json::from_str(&contents)
                .map_err(|e| FacadeError::Load(format!("Invalid model manifest: {}", e)))?;
            manifest.validate()?;

            let mut model = RegressionModel::new(self.device().await?)?;
            model.learning_rate = manifest.learning_rate;
            model
                .varmap
                .load(dir.join(WEIGHTS_FILE))
                .map_err(|e| FacadeError::Load(e.to_string()))?;

            tracing::debug!(path = %dir.display(), "Regression model loaded");
            Ok(model)
        })
        .await
    }

    #[cfg(test)]
    fn setup_runs(&self) -> u32 {
        self.setup_runs.load(Ordering::SeqCst)
    }
}

fn select_device(backend: &str) -> Result<Device> {
    match backend.trim().to_ascii_lowercase().as_str() {
        "cpu" => Ok(Device::Cpu),
        "cuda" | "gpu" => Device::new_cuda(0)
            .map_err(|e| FacadeError::Config(format!("CUDA backend unavailable: {}", e))),
        other => Err(FacadeError::Config(format!(
            "Unsupported numeric backend '{}' (expected 'cpu' or 'cuda')",
            other
        ))),
    }
}

fn resolve_model_dir(path: &str) -> PathBuf {
    PathBuf::from(path.strip_prefix("file://").unwrap_or(path))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents)
        .map_err(|e| FacadeError::Load(format!("Failed to write '{}': {}", path.display(), e)))
}
