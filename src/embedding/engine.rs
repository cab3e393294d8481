// Embedding engine - local sentence embeddings via Candle
use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};

pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_REVISION: &str = "main";

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";
const SENTENCE_CONFIG_FILE: &str = "sentence_bert_config.json";

/// Where to load model files from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Directory holding config.json, tokenizer.json and model.safetensors
    Local(PathBuf),
    /// Hugging Face Hub repository, cached locally after first download
    Hub { model_id: String, revision: String },
}

impl Default for ModelSource {
    fn default() -> Self {
        ModelSource::Hub {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: DEFAULT_REVISION.to_string(),
        }
    }
}

/// Resolved on-disk paths of the model files
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
    /// sentence-transformers settings; absent for plain BERT checkpoints
    pub sentence_config: Option<PathBuf>,
}

/// The part of `sentence_bert_config.json` the engine needs
#[derive(Debug, Deserialize)]
struct SentenceConfig {
    max_seq_length: Option<usize>,
}

impl ModelFiles {
    /// Resolve files for `source`, downloading from the hub if needed
    pub fn fetch(source: &ModelSource) -> Result<Self> {
        match source {
            ModelSource::Local(dir) => Self::from_dir(dir),
            ModelSource::Hub { model_id, revision } => {
                let api = Api::new().context("Failed to create HuggingFace API client")?;
                let repo = api.repo(Repo::with_revision(
                    model_id.clone(),
                    RepoType::Model,
                    revision.clone(),
                ));

                let config = repo.get(CONFIG_FILE)
                    .with_context(|| format!("Failed to download {} config", model_id))?;
                let tokenizer = repo.get(TOKENIZER_FILE)
                    .with_context(|| format!("Failed to download {} tokenizer", model_id))?;
                let weights = repo.get(WEIGHTS_FILE)
                    .with_context(|| format!("Failed to download {} weights", model_id))?;
                let sentence_config = match repo.get(SENTENCE_CONFIG_FILE) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        log::debug!("No {} for {}: {}", SENTENCE_CONFIG_FILE, model_id, e);
                        None
                    }
                };

                Ok(Self { config, tokenizer, weights, sentence_config })
            }
        }
    }

    fn from_dir(dir: &Path) -> Result<Self> {
        let files = Self {
            config: dir.join(CONFIG_FILE),
            tokenizer: dir.join(TOKENIZER_FILE),
            weights: dir.join(WEIGHTS_FILE),
            sentence_config: Some(dir.join(SENTENCE_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        for path in [&files.config, &files.tokenizer, &files.weights] {
            anyhow::ensure!(path.is_file(), "Model file not found: {}", path.display());
        }
        Ok(files)
    }

    /// Token limit applied before pooling.
    ///
    /// sentence-transformers models pool over `max_seq_length` tokens, which
    /// is often shorter than the position table; plain BERT checkpoints use
    /// `max_position_embeddings`.
    pub fn max_seq_length(&self, max_position_embeddings: usize) -> Result<usize> {
        let Some(path) = &self.sentence_config else {
            return Ok(max_position_embeddings);
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: SentenceConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(settings
            .max_seq_length
            .map_or(max_position_embeddings, |len| len.min(max_position_embeddings)))
    }
}

/// Sentence embedding engine backed by a BERT-family model
pub struct EmbeddingEngine {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl EmbeddingEngine {
    /// Load the model (downloads on first use when sourced from the hub)
    pub fn load(source: &ModelSource) -> Result<Self> {
        let device = Device::Cpu;
        let files = ModelFiles::fetch(source)?;

        let config_contents = std::fs::read_to_string(&files.config)
            .context("Failed to read model config")?;
        let config: Config = serde_json::from_str(&config_contents)
            .context("Failed to parse model config")?;
        let max_len = files.max_seq_length(config.max_position_embeddings)?;
        let dimension = config.hidden_size;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_len,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;
        tokenizer.with_padding(None);

        // SAFETY: the weights file is not modified while mapped
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DType::F32, &device)
                .context("Failed to load model weights")?
        };
        let model = BertModel::load(vb, &config).context("Failed to create BERT model")?;

        log::info!("Loaded embedding model ({} dims, max {} tokens)", dimension, max_len);

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension,
        })
    }

    /// Generate embedding for a single text
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .pop()
            .context("Model returned no embedding")
    }

    /// Generate embeddings for multiple texts in one forward pass
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self.tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let max_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);
        let batch_size = texts.len();

        // Pad to the longest sequence in the batch
        let mut flat_ids = vec![0u32; batch_size * max_len];
        let mut flat_mask = vec![0u32; batch_size * max_len];
        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let row = i * max_len;
            flat_ids[row..row + ids.len()].copy_from_slice(ids);
            flat_mask[row..row + mask.len()].copy_from_slice(mask);
        }

        let token_ids = Tensor::from_vec(flat_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(flat_mask, (batch_size, max_len), &self.device)?;
        let token_type_ids = token_ids.zeros_like()?;

        let hidden = self.model
            .forward(&token_ids, &token_type_ids, Some(&attention_mask))
            .context("Model forward pass failed")?;

        let pooled = Self::mean_pool(&hidden, &attention_mask)?;

        Ok(pooled.to_vec2::<f32>()?)
    }

    /// Mean pooling with attention mask
    fn mean_pool(embeddings: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask_expanded = attention_mask
            .unsqueeze(2)?
            .expand(embeddings.shape())?
            .to_dtype(embeddings.dtype())?;

        let sum_embeddings = (embeddings * &mask_expanded)?.sum(1)?;
        let sum_mask = mask_expanded.sum(1)?.clamp(1e-9, f64::MAX)?;

        Ok(sum_embeddings.broadcast_div(&sum_mask)?)
    }

    /// Embedding dimension (hidden size of the loaded model)
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
