pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, ToolPaths};
pub use core::{
    converter::ExternalConverter,
    engine::{RunSummary, SheetEngine},
    inventory::read_inventory,
    qr::{QrCache, QrencodeCli},
    render::SheetKind,
};
pub use utils::error::{Result, SheetError};
