use crate::config::ToolPaths;
use crate::core::process::{run_tool, spawn_tool};
use crate::domain::ports::DocumentConverter;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Converter backed by LibreOffice Writer, WeasyPrint and poppler-utils.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    tools: ToolPaths,
}

impl ExternalConverter {
    pub fn new(tools: ToolPaths) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl DocumentConverter for ExternalConverter {
    async fn html_to_docx(&self, html: &Path, out_dir: &Path) -> Result<()> {
        run_tool(
            &self.tools.writer,
            [
                OsStr::new("--convert-to"),
                OsStr::new("docx"),
                html.as_os_str(),
                OsStr::new("--outdir"),
                out_dir.as_os_str(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn html_to_pdf(&self, html: &Path, pdf: &Path) -> Result<()> {
        run_tool(
            &self.tools.weasyprint,
            [
                OsStr::new("--pdf-variant"),
                OsStr::new("pdf/ua-1"),
                html.as_os_str(),
                pdf.as_os_str(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn merge_pdfs(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let args = inputs
            .iter()
            .map(|p| p.as_os_str())
            .chain(std::iter::once(output.as_os_str()));
        run_tool(&self.tools.pdfunite, args).await?;
        Ok(())
    }

    async fn page_count(&self, pdf: &Path) -> Result<Option<u32>> {
        let output = spawn_tool(&self.tools.pdfinfo, [pdf.as_os_str()]).await?;
        if !output.status.success() {
            tracing::debug!(
                "{} exited with {} for {}",
                self.tools.pdfinfo,
                output.status,
                pdf.display()
            );
            return Ok(None);
        }
        Ok(parse_page_count(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Reads the `Pages:` line of `pdfinfo` output.
pub fn parse_page_count(info: &str) -> Option<u32> {
    info.lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|value| value.trim().parse().ok())
}
