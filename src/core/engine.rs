use crate::core::duplex::{pad_for_duplex, BLANK_PAGE_HTML};
use crate::core::inventory::read_inventory;
use crate::core::qr::QrCache;
use crate::core::render::{qr_code_row, SheetKind};
use crate::core::template::Template;
use crate::domain::model::{InventorySnapshot, DEFAULT_REVISION};
use crate::domain::ports::{ConfigProvider, DocumentConverter, QrEncoder, Storage};
use crate::domain::rank::{Rank, MATRIX_COLUMN, RANKS, SUPPLEMENTAL_COLUMN};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Files produced by one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Component PDFs in merge order.
    pub documents: Vec<PathBuf>,
    pub everything: PathBuf,
    pub everything_doublesided: PathBuf,
    pub revision: String,
}

pub struct SheetEngine<S: Storage, C: ConfigProvider, D: DocumentConverter> {
    storage: S,
    config: C,
    converter: D,
    qr_cache: QrCache,
}

impl<S: Storage, C: ConfigProvider, D: DocumentConverter> SheetEngine<S, C, D> {
    pub fn new(storage: S, config: C, converter: D, qr_encoder: Box<dyn QrEncoder>) -> Self {
        Self {
            storage,
            config,
            converter,
            qr_cache: QrCache::new(qr_encoder),
        }
    }

    /// Generates every rank's sheets, the supplemental sheet and the skills
    /// matrix, then merges them. Ranks are processed one after another and
    /// the first failure stops the run.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let output_dir = self.config.output_dir();
        let inventory = self.storage.read_file(self.config.inventory_path()).await?;
        let mut documents = Vec::new();
        let mut revision = DEFAULT_REVISION.to_string();

        for rank in &RANKS {
            tracing::info!("Generating {}", rank.title);
            let snapshot = read_inventory(&inventory[..], rank.code, &mut self.qr_cache).await?;

            for kind in SheetKind::PER_RANK {
                let pdf = self
                    .publish(kind, Some(rank), &snapshot, &output_dir)
                    .await?;
                documents.push(pdf);
            }
            revision = snapshot.revision;
        }

        for (kind, column) in [
            (SheetKind::Supplemental, SUPPLEMENTAL_COLUMN),
            (SheetKind::Matrix, MATRIX_COLUMN),
        ] {
            tracing::info!("Generating {}", kind.display_name());
            let snapshot = read_inventory(&inventory[..], column, &mut self.qr_cache).await?;
            let pdf = self.publish(kind, None, &snapshot, &output_dir).await?;
            documents.push(pdf);
            revision = snapshot.revision;
        }

        let suffix = self.revision_suffix(&revision);
        let everything = output_dir.join(format!("everything{}.pdf", suffix));
        tracing::info!("Merging {} documents into {}", documents.len(), everything.display());
        self.converter.merge_pdfs(&documents, &everything).await?;

        let everything_doublesided =
            output_dir.join(format!("everything_doublesided{}.pdf", suffix));
        self.merge_doublesided(&documents, &output_dir, &everything_doublesided)
            .await?;

        Ok(RunSummary {
            documents,
            everything,
            everything_doublesided,
            revision,
        })
    }

    /// Renders one sheet to HTML, writes it and converts it to DOCX and PDF.
    /// Returns the PDF path.
    async fn publish(
        &self,
        kind: SheetKind,
        rank: Option<&Rank>,
        snapshot: &InventorySnapshot,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let content = kind.render(snapshot, self.config.full());
        let template_path = self.config.template_dir().join(kind.template_file());
        let template = Template::load(&self.storage, &template_path).await?;

        let html = match rank {
            Some(rank) => {
                let qr_codes = qr_code_row(snapshot);
                template.safe_substitute(&[
                    ("title", rank.title),
                    ("content", content.as_str()),
                    ("tables", content.as_str()),
                    ("revision", snapshot.revision.as_str()),
                    ("qr_codes", qr_codes.as_str()),
                ])
            }
            None => template.safe_substitute(&[
                ("content", content.as_str()),
                ("tables", content.as_str()),
                ("revision", snapshot.revision.as_str()),
            ]),
        };

        let stem = match rank {
            Some(rank) => format!("{}-{}", rank.slug, kind.name()),
            None => kind.name().to_string(),
        };
        let base = format!("{}{}", stem, self.revision_suffix(&snapshot.revision));

        let html_path = output_dir.join(format!("{}.html", base));
        tracing::debug!("Writing {} from {}", html_path.display(), template.name());
        self.storage.write_file(&html_path, html.as_bytes()).await?;

        self.converter.html_to_docx(&html_path, output_dir).await?;
        let pdf_path = output_dir.join(format!("{}.pdf", base));
        self.converter.html_to_pdf(&html_path, &pdf_path).await?;

        Ok(pdf_path)
    }

    /// Merge where every component starts on a fresh sheet of paper.
    async fn merge_doublesided(
        &self,
        documents: &[PathBuf],
        output_dir: &Path,
        output: &Path,
    ) -> Result<()> {
        let blank_html = output_dir.join("blank.html");
        let blank_pdf = output_dir.join("blank.pdf");
        self.storage
            .write_file(&blank_html, BLANK_PAGE_HTML.as_bytes())
            .await?;
        self.converter.html_to_pdf(&blank_html, &blank_pdf).await?;
        self.storage.remove_file(&blank_html).await?;

        let mut counted = Vec::with_capacity(documents.len());
        for document in documents {
            let pages = self.converter.page_count(document).await?;
            counted.push((document.clone(), pages));
        }

        let padded = pad_for_duplex(&counted, &blank_pdf);
        tracing::info!(
            "Merging {} documents ({} blank pages) into {}",
            documents.len(),
            padded.len() - documents.len(),
            output.display()
        );
        self.converter.merge_pdfs(&padded, output).await?;

        self.storage.remove_file(&blank_pdf).await
    }

    fn revision_suffix(&self, revision: &str) -> String {
        if self.config.evergreen() {
            String::new()
        } else {
            format!("-{}", revision)
        }
    }
}
