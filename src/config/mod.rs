pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::Path;

pub const DEFAULT_WRITER: &str = "oowriter";
pub const DEFAULT_WEASYPRINT: &str = "weasyprint";
pub const DEFAULT_PDFUNITE: &str = "pdfunite";
pub const DEFAULT_PDFINFO: &str = "pdfinfo";
pub const DEFAULT_QRENCODE: &str = "qrencode";

/// Output directory when file names carry the revision.
pub const DATED_OUTPUT_DIR: &str = "test_sheets";
pub const EVERGREEN_OUTPUT_DIR: &str = "evergreen_sheets";

/// Binaries the converter and QR encoder shell out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
#[serde(default)]
pub struct ToolPaths {
    #[cfg_attr(feature = "cli", arg(long = "writerbin", default_value = DEFAULT_WRITER, help = "Binary for LibreOffice Writer"))]
    pub writer: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_WEASYPRINT))]
    pub weasyprint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_PDFUNITE))]
    pub pdfunite: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_PDFINFO))]
    pub pdfinfo: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_QRENCODE))]
    pub qrencode: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            writer: DEFAULT_WRITER.to_string(),
            weasyprint: DEFAULT_WEASYPRINT.to_string(),
            pdfunite: DEFAULT_PDFUNITE.to_string(),
            pdfinfo: DEFAULT_PDFINFO.to_string(),
            qrencode: DEFAULT_QRENCODE.to_string(),
        }
    }
}

pub fn default_output_dir(evergreen: bool) -> PathBuf {
    PathBuf::from(if evergreen {
        EVERGREEN_OUTPUT_DIR
    } else {
        DATED_OUTPUT_DIR
    })
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "belt-sheets")]
#[command(about = "Generate rank test sheets from a technique inventory")]
pub struct CliConfig {
    #[arg(long, default_value = "inventory.csv")]
    pub inventory: PathBuf,

    #[arg(long, default_value = ".", help = "Directory holding the *_template.html files")]
    pub templates: PathBuf,

    #[arg(long, help = "Defaults to test_sheets, or evergreen_sheets with --evergreen")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Don't collapse headers")]
    pub full: bool,

    #[arg(long, help = "Don't append the revision to filenames")]
    pub evergreen: bool,

    #[command(flatten)]
    pub tools: ToolPaths,

    #[arg(
        long,
        help = "TOML settings file; its paths and tools replace the matching flags"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn inventory_path(&self) -> &Path {
        &self.inventory
    }

    fn template_dir(&self) -> &Path {
        &self.templates
    }

    fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(self.evergreen))
    }

    fn full(&self) -> bool {
        self.full
    }

    fn evergreen(&self) -> bool {
        self.evergreen
    }

    fn tools(&self) -> &ToolPaths {
        &self.tools
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::{validate_existing_dir, validate_existing_file, validate_path};

        validate_existing_file("inventory", &self.inventory)?;
        validate_existing_dir("templates", &self.templates)?;
        validate_path("output_dir", &self.output_dir())?;
        self.tools.validate()
    }
}

impl crate::utils::validation::Validate for ToolPaths {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::validate_non_empty_string;

        validate_non_empty_string("tools.writer", &self.writer)?;
        validate_non_empty_string("tools.weasyprint", &self.weasyprint)?;
        validate_non_empty_string("tools.pdfunite", &self.pdfunite)?;
        validate_non_empty_string("tools.pdfinfo", &self.pdfinfo)?;
        validate_non_empty_string("tools.qrencode", &self.qrencode)
    }
}
