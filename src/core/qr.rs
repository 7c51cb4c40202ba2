use crate::core::process::run_tool;
use crate::domain::ports::QrEncoder;
use crate::utils::error::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::collections::HashMap;

/// Encodes URLs with the `qrencode` command line tool.
#[derive(Debug, Clone)]
pub struct QrencodeCli {
    bin: String,
}

impl QrencodeCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl QrEncoder for QrencodeCli {
    async fn encode_png(&self, url: &str) -> Result<Vec<u8>> {
        let output = run_tool(&self.bin, ["-t", "PNG", "-o", "-", url]).await?;
        Ok(output.stdout)
    }
}

/// Base64 PNG images keyed by QR title, shared by every rank in one run.
pub struct QrCache {
    encoder: Box<dyn QrEncoder>,
    images: HashMap<String, String>,
}

impl QrCache {
    pub fn new(encoder: Box<dyn QrEncoder>) -> Self {
        Self {
            encoder,
            images: HashMap::new(),
        }
    }

    /// Returns the cached image for `title`, encoding `url` only on first use.
    pub async fn get_or_encode(&mut self, title: &str, url: &str) -> Result<String> {
        if let Some(image) = self.images.get(title) {
            return Ok(image.clone());
        }

        tracing::debug!("Encoding QR code '{}' for {}", title, url);
        let png = self.encoder.encode_png(url).await?;
        let image = STANDARD.encode(png);
        self.images.insert(title.to_string(), image.clone());
        Ok(image)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
