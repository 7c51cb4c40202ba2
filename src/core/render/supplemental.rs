use super::{list_title, TableLayout};
use crate::core::text::display_units;
use crate::domain::model::{Header, Table, Technique};
use crate::domain::rank::find_rank;

/// Rank whose labels are drawn letter by letter in the temp belt colours.
const TEMP: &str = "T";

/// Cross-rank reference sheet: each item is coloured by the rank it belongs to.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplementalLayout;

fn style_for(r#type: &str) -> &'static str {
    match find_rank(r#type) {
        Some(rank) => rank.style,
        None => {
            tracing::warn!("No supplemental style for type '{}'", r#type);
            "technique"
        }
    }
}

fn supplemental_label(technique: &Technique) -> String {
    match technique.r#type.as_str() {
        TEMP => display_units(&technique.label)
            .into_iter()
            .map(|unit| format!("<span class=\"temp\">{}</span>", unit))
            .collect(),
        "2" => format!("{} (2nd Dan)", technique.label),
        "3" => format!("{} (3rd Dan)", technique.label),
        _ => technique.label.clone(),
    }
}

impl TableLayout for SupplementalLayout {
    fn open_table(&self, out: &mut String, table: &Table) {
        list_title(out, table);
    }

    fn header_row(&self, out: &mut String, header: &Header) {
        out.push_str(&format!("  <li class=\"section\">{}</li>\n", header.label));
    }

    fn technique_row(
        &self,
        out: &mut String,
        _header: &Header,
        technique: &Technique,
        _full: bool,
    ) -> bool {
        out.push_str(&format!(
            "  <li class=\"{}\">{}</li>\n",
            style_for(&technique.r#type),
            supplemental_label(technique)
        ));
        true
    }

    fn close_table(&self, out: &mut String, _table: &Table) {
        out.push_str("</ul>");
    }
}
