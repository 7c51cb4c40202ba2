//! HTML fragments for each sheet kind.
//!
//! Every kind walks the snapshot the same way (tables in order, empty headers
//! skipped, header row only when the header has a label) and differs only in
//! the markup it emits, so each kind is a [`TableLayout`] driven by [`render`].

pub mod matrix;
pub mod supplemental;
pub mod technique_list;
pub mod test_sheet;

use crate::domain::model::{Header, InventorySnapshot, Table, Technique, NEW, PLAIN};

pub use matrix::MatrixLayout;
pub use supplemental::SupplementalLayout;
pub use technique_list::TechniqueListLayout;
pub use test_sheet::TestSheetLayout;

pub trait TableLayout: Sync {
    fn open_table(&self, out: &mut String, table: &Table);

    fn header_row(&self, out: &mut String, header: &Header);

    /// Writes the row for `technique` if it is visible; returns whether it was.
    fn technique_row(
        &self,
        out: &mut String,
        header: &Header,
        technique: &Technique,
        full: bool,
    ) -> bool;

    fn close_header(&self, _out: &mut String, _header: &Header, _rows: usize) {}

    fn close_table(&self, out: &mut String, table: &Table);
}

/// Renders every table of `snapshot`, one fragment per table joined by newlines.
pub fn render(layout: &dyn TableLayout, snapshot: &InventorySnapshot, full: bool) -> String {
    snapshot
        .tables
        .iter()
        .map(|table| render_table(layout, table, full))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(layout: &dyn TableLayout, table: &Table, full: bool) -> String {
    let mut out = String::new();
    layout.open_table(&mut out, table);

    for header in table.headers.iter().filter(|h| !h.is_empty()) {
        if !header.label.is_empty() {
            layout.header_row(&mut out, header);
        }

        let mut rows = 0;
        for technique in &header.techniques {
            if layout.technique_row(&mut out, header, technique, full) {
                rows += 1;
            }
        }
        layout.close_header(&mut out, header, rows);
    }

    layout.close_table(&mut out, table);
    out
}

/// Highlights new techniques and tags any other non-plain type.
pub(crate) fn decorate_label(label: &str, r#type: &str) -> String {
    if r#type == NEW {
        format!("<span class=\"new\">{}</span>", label)
    } else if r#type != PLAIN {
        format!("{} ({})", label, r#type)
    } else {
        label.to_string()
    }
}

/// Title span plus optional subtitle, as used by the list-style sheets.
pub(crate) fn list_title(out: &mut String, table: &Table) {
    out.push_str(&format!("  <span class=\"title\">{}</span>\n", table.title));
    if let Some(subtitle) = &table.subtitle {
        out.push_str(&format!("<br/><span class=\"subtitle\">{}</span>", subtitle));
    }
    out.push_str("<ul>\n");
}

/// Table row showing every QR code of the snapshot with its title.
pub fn qr_code_row(snapshot: &InventorySnapshot) -> String {
    let cells: Vec<String> = snapshot
        .qr_codes
        .iter()
        .map(|qr| {
            format!(
                "{title}<br><img src=\"data:img/png;base64, {}\" alt=\"{title}\">",
                qr.png_base64,
                title = qr.title
            )
        })
        .collect();
    format!("<tr><td>{}</td></tr>", cells.join("</td><td>"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Techniques,
    Test,
    Supplemental,
    Matrix,
}

impl SheetKind {
    /// Kinds produced for every rank, in output order.
    pub const PER_RANK: [SheetKind; 2] = [SheetKind::Techniques, SheetKind::Test];

    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Techniques => "techniques",
            SheetKind::Test => "test",
            SheetKind::Supplemental => "supplemental",
            SheetKind::Matrix => "matrix",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SheetKind::Techniques => "Technique List",
            SheetKind::Test => "Test Sheet",
            SheetKind::Supplemental => "Supplemental Sheet",
            SheetKind::Matrix => "Skills Matrix",
        }
    }

    pub fn template_file(self) -> String {
        format!("{}_template.html", self.name())
    }

    pub fn layout(self) -> &'static dyn TableLayout {
        match self {
            SheetKind::Techniques => &TechniqueListLayout,
            SheetKind::Test => &TestSheetLayout,
            SheetKind::Supplemental => &SupplementalLayout,
            SheetKind::Matrix => &MatrixLayout,
        }
    }

    pub fn render(self, snapshot: &InventorySnapshot, full: bool) -> String {
        render(self.layout(), snapshot, full)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::model::{Header, InventorySnapshot, Table, Technique};

    pub fn technique(label: &str, r#type: &str) -> Technique {
        Technique {
            label: label.to_string(),
            r#type: r#type.to_string(),
        }
    }

    pub fn header(label: &str, r#type: &str, techniques: Vec<Technique>) -> Header {
        let mut header = Header::new(label, r#type);
        header.techniques = techniques;
        header
    }

    pub fn snapshot(tables: Vec<Table>) -> InventorySnapshot {
        InventorySnapshot {
            tables,
            ..InventorySnapshot::default()
        }
    }
}
