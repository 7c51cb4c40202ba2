pub mod converter;
pub mod duplex;
pub mod engine;
pub mod inventory;
pub mod process;
pub mod qr;
pub mod render;
pub mod template;
pub mod text;

pub use crate::domain::model::{Header, InventorySnapshot, Table, Technique};
pub use crate::domain::ports::{ConfigProvider, DocumentConverter, QrEncoder, Storage};
pub use crate::utils::error::Result;
