use super::{decorate_label, list_title, TableLayout};
use crate::domain::model::{Header, Table, Technique};

/// Study list: every technique the rank covers, grouped by section.
#[derive(Debug, Clone, Copy, Default)]
pub struct TechniqueListLayout;

impl TableLayout for TechniqueListLayout {
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
            "  <li class=\"technique\">{}</li>\n",
            decorate_label(&technique.label, &technique.r#type)
        ));
        true
    }

    fn close_table(&self, out: &mut String, _table: &Table) {
        out.push_str("</ul>");
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::SheetKind;
    use super::*;

    #[test]
    fn test_list_markup() {
        let mut table = Table::new("Basics");
        table.subtitle = Some("Part 1".to_string());
        table.headers[0].techniques.push(technique("Bow", "X"));
        table.headers.push(header(
            "Kicks",
            "C",
            vec![technique("Front Kick", "X"), technique("Side Kick", "N")],
        ));
        let html = SheetKind::Techniques.render(&snapshot(vec![table]), false);

        let expected = "  <span class=\"title\">Basics</span>
<br/><span class=\"subtitle\">Part 1</span><ul>
  <li class=\"technique\">Bow</li>
  <li class=\"section\">Kicks</li>
  <li class=\"technique\">Front Kick</li>
  <li class=\"technique\"><span class=\"new\">Side Kick</span></li>
</ul>";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_list_never_collapses() {
        let mut table = Table::new("Weapons");
        table.headers.push(header("Bo", "O", vec![technique("Bo Form", "X")]));
        let html = SheetKind::Techniques.render(&snapshot(vec![table]), false);

        assert!(html.contains("<li class=\"technique\">Bo Form</li>"));
        assert!(!html.contains("&nbsp;"));
    }
}
