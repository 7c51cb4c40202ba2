use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Inventory is missing required column '{column}'")]
    MissingColumnError { column: String },

    #[error("Malformed inventory row at line {line}: {message}")]
    MalformedRowError { line: u64, message: String },

    #[error("External tool '{tool}' could not be started: {source}")]
    ToolSpawnError {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External tool '{tool}' failed ({status}): {stderr}")]
    ToolFailedError {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Template error in '{template}': {message}")]
    TemplateError { template: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    ExternalTool,
    Configuration,
    System,
}

impl SheetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SheetError::CsvError(_)
            | SheetError::MissingColumnError { .. }
            | SheetError::MalformedRowError { .. }
            | SheetError::TemplateError { .. } => ErrorCategory::Input,
            SheetError::ToolSpawnError { .. } | SheetError::ToolFailedError { .. } => {
                ErrorCategory::ExternalTool
            }
            SheetError::ConfigError { .. } | SheetError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            SheetError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SheetError::CsvError(e) => format!("The inventory CSV could not be read: {}", e),
            SheetError::MissingColumnError { column } => {
                format!("The inventory has no '{}' column", column)
            }
            SheetError::MalformedRowError { line, message } => {
                format!("Inventory line {} is not valid: {}", line, message)
            }
            SheetError::ToolSpawnError { tool, .. } => {
                format!("Could not run '{}'", tool)
            }
            SheetError::ToolFailedError { tool, status, .. } => {
                format!("'{}' exited with {}", tool, status)
            }
            SheetError::TemplateError { template, message } => {
                format!("Template '{}' is not usable: {}", template, message)
            }
            SheetError::ConfigError { message } => format!("Configuration problem: {}", message),
            SheetError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SheetError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SheetError::CsvError(_) => "Re-export the inventory as plain comma-separated CSV",
            SheetError::MissingColumnError { .. } => {
                "Check the header row: it needs Type, Label and one column per rank code"
            }
            SheetError::MalformedRowError { .. } => {
                "Make sure every section starts with a T row and QR rows use title=url"
            }
            SheetError::ToolSpawnError { .. } => {
                "Install the tool or point the matching --<tool> flag at its binary"
            }
            SheetError::ToolFailedError { .. } => "Run the tool by hand on the same file to see why",
            SheetError::TemplateError { .. } => "Check the --templates directory",
            SheetError::ConfigError { .. } | SheetError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML config file"
            }
            SheetError::IoError(_) => "Check that the paths exist and are writable",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::ExternalTool => 3,
            ErrorCategory::System => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
