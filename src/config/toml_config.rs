use crate::config::{default_output_dir, ToolPaths};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SheetError};
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: PathsConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub tools: ToolPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub inventory: PathBuf,
    #[serde(default = "default_template_dir")]
    pub templates: PathBuf,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub full: bool,
    #[serde(default)]
    pub evergreen: bool,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(".")
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SheetError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SheetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unset names as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SheetError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Command line switches only ever turn these modes on.
    pub fn apply_flags(&mut self, full: bool, evergreen: bool) {
        self.sheets.full |= full;
        self.sheets.evergreen |= evergreen;
    }
}

impl ConfigProvider for TomlConfig {
    fn inventory_path(&self) -> &Path {
        &self.paths.inventory
    }

    fn template_dir(&self) -> &Path {
        &self.paths.templates
    }

    fn output_dir(&self) -> PathBuf {
        self.paths
            .output
            .clone()
            .unwrap_or_else(|| default_output_dir(self.sheets.evergreen))
    }

    fn full(&self) -> bool {
        self.sheets.full
    }

    fn evergreen(&self) -> bool {
        self.sheets.evergreen
    }

    fn tools(&self) -> &ToolPaths {
        &self.tools
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("paths.inventory", &self.paths.inventory)?;
        validate_path("paths.templates", &self.paths.templates)?;
        validate_path("paths.output", &self.output_dir())?;
        self.tools.validate()
    }
}
