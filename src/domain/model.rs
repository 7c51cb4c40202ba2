/// Marker for a plain entry, also the type of every table's implicit header.
pub const PLAIN: &str = "X";
/// Technique introduced at this rank.
pub const NEW: &str = "N";
/// Header whose non-plain techniques are listed individually.
pub const COUNTED: &str = "C";
/// Header the candidate may choose from.
pub const OPTIONAL: &str = "O";

pub const DEFAULT_REVISION: &str = "No Revision";

/// What a single inventory row means, decided by its `Type` cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Revision,
    QrCode,
    Comment,
    Table,
    Subtitle,
    Header,
    Technique(String),
}

impl RowKind {
    pub fn parse(type_cell: &str) -> Self {
        match type_cell {
            "R" => RowKind::Revision,
            "Q" => RowKind::QrCode,
            "#" => RowKind::Comment,
            "T" => RowKind::Table,
            "S" => RowKind::Subtitle,
            "H" => RowKind::Header,
            other => RowKind::Technique(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technique {
    pub label: String,
    pub r#type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub label: String,
    pub r#type: String,
    pub techniques: Vec<Technique>,
}

impl Header {
    pub fn new(label: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            r#type: r#type.into(),
            techniques: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub subtitle: Option<String>,
    pub headers: Vec<Header>,
}

impl Table {
    /// A fresh table always carries an unlabelled plain header so techniques
    /// listed before the first `H` row have somewhere to go.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            headers: vec![Header::new("", PLAIN)],
        }
    }

    /// Caption text with the subtitle appended on its own line.
    pub fn caption(&self) -> String {
        match &self.subtitle {
            Some(subtitle) => format!(
                "{}<br/><span class=\"subtitle\">{}</span>",
                self.title, subtitle
            ),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub title: String,
    pub png_base64: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub revision: String,
    pub tables: Vec<Table>,
    pub qr_codes: Vec<QrCode>,
}

impl Default for InventorySnapshot {
    fn default() -> Self {
        Self {
            revision: DEFAULT_REVISION.to_string(),
            tables: Vec::new(),
            qr_codes: Vec::new(),
        }
    }
}

impl InventorySnapshot {
    /// Records a QR image, keeping the position of the first occurrence.
    pub fn add_qr_code(&mut self, title: String, png_base64: String) {
        match self.qr_codes.iter_mut().find(|qr| qr.title == title) {
            Some(existing) => existing.png_base64 = png_base64,
            None => self.qr_codes.push(QrCode { title, png_base64 }),
        }
    }

    pub fn technique_count(&self) -> usize {
        self.tables
            .iter()
            .flat_map(|t| &t.headers)
            .map(|h| h.techniques.len())
            .sum()
    }
}
