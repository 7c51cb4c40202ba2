use crate::domain::ports::Storage;
use crate::utils::error::{Result, SheetError};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|([_a-zA-Z][_a-zA-Z0-9]*)|\{([_a-zA-Z][_a-zA-Z0-9]*)\})")
        .expect("placeholder pattern is valid")
});

/// Static HTML shell with `$name` / `${name}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub async fn load<S: Storage>(storage: &S, path: &Path) -> Result<Self> {
        let name = path.display().to_string();
        let bytes = storage.read_file(path).await?;
        let source = String::from_utf8(bytes).map_err(|e| SheetError::TemplateError {
            template: name.clone(),
            message: format!("not valid UTF-8: {}", e),
        })?;
        Ok(Self { name, source })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fills the known placeholders. Unknown names stay as written, `$$`
    /// becomes `$`, and values are inserted without any escaping.
    pub fn safe_substitute(&self, values: &[(&str, &str)]) -> String {
        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures| {
                if caps.get(1).is_some() {
                    return "$".to_string();
                }
                let key = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
                values
                    .iter()
                    .find(|(name, _)| Some(*name) == key)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
