use crate::config::ToolPaths;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path)
        -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn inventory_path(&self) -> &Path;
    fn template_dir(&self) -> &Path;
    fn output_dir(&self) -> PathBuf;
    /// Show every technique instead of collapsing headers.
    fn full(&self) -> bool;
    /// Leave the revision out of file names.
    fn evergreen(&self) -> bool;
    fn tools(&self) -> &ToolPaths;
}

/// HTML to DOCX/PDF conversion and PDF plumbing.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Writes `<stem>.docx` for `html` into `out_dir`.
    async fn html_to_docx(&self, html: &Path, out_dir: &Path) -> Result<()>;
    async fn html_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()>;
    async fn merge_pdfs(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;
    /// `Ok(None)` when the tool ran but the count could not be determined.
    async fn page_count(&self, pdf: &Path) -> Result<Option<u32>>;
}

#[async_trait]
pub trait QrEncoder: Send + Sync {
    async fn encode_png(&self, url: &str) -> Result<Vec<u8>>;
}
