use super::{decorate_label, TableLayout};
use crate::core::text::nbsp;
use crate::domain::model::{Header, Table, Technique, COUNTED, OPTIONAL, PLAIN};

/// Scored grading form: one row per visible header and technique, with empty
/// score and comment cells for the examiner.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestSheetLayout;

const BLANK_ROW: &str = "    <tr><td>&nbsp;</td><td></td><td></td></tr>\n";

/// Whether a technique gets its own scoring row. Plain headers always expand;
/// counted headers only list techniques with a non-plain type.
pub fn technique_visible(header: &Header, technique: &Technique, full: bool) -> bool {
    full || header.r#type == PLAIN || (header.r#type == COUNTED && technique.r#type != PLAIN)
}

impl TableLayout for TestSheetLayout {
    fn open_table(&self, out: &mut String, table: &Table) {
        out.push_str("<table width=\"100%\" border=\"1\" class=\"ttable\">\n");
        out.push_str(&format!("  <caption>{}</caption>\n", table.caption()));
        out.push_str("  <colgroup><col class=\"narrow\"/><col class=\"score\"/><col/></colgroup>\n");
        out.push_str("  <thead>\n");
        out.push_str("    <tr><td>&nbsp;</td><th>Score</th><th>Comments</th></tr>\n");
        out.push_str("  </thead>\n");
        out.push_str("  <tbody>\n");
    }

    fn header_row(&self, out: &mut String, header: &Header) {
        let mut label = header.label.clone();
        if header.r#type == OPTIONAL {
            label.push_str(" (optional)");
        }
        out.push_str(&format!(
            "    <tr><td class=\"theader\">{}</td><td></td><td></td></tr>\n",
            nbsp(&label)
        ));
    }

    fn technique_row(
        &self,
        out: &mut String,
        header: &Header,
        technique: &Technique,
        full: bool,
    ) -> bool {
        if !technique_visible(header, technique, full) {
            return false;
        }
        let label = decorate_label(&nbsp(&technique.label), &technique.r#type);
        out.push_str(&format!("    <tr><td>{}</td><td></td><td></td></tr>\n", label));
        true
    }

    fn close_header(&self, out: &mut String, header: &Header, rows: usize) {
        // keep a scoring line for collapsed sections
        if rows == 0 && (header.r#type == COUNTED || header.r#type == OPTIONAL) {
            out.push_str(BLANK_ROW);
        }
    }

    fn close_table(&self, out: &mut String, _table: &Table) {
        out.push_str("  </tbody>\n");
        out.push_str("</table>");
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::SheetKind;
    use super::*;

    fn basics(headers: Vec<Header>) -> Table {
        let mut table = Table::new("Basics");
        table.headers.extend(headers);
        table
    }

    fn body_rows(html: &str) -> Vec<&str> {
        html.lines()
            .filter(|l| l.starts_with("    <tr>") && !l.contains("<th>"))
            .collect()
    }

    #[test]
    fn test_full_table_markup() {
        let mut table = basics(vec![header(
            "Hand Techniques",
            "X",
            vec![
                technique("Front Punch", "X"),
                technique("Knife Hand", "N"),
                technique("Spear Hand", "2"),
            ],
        )]);
        table.subtitle = Some("Part 1".to_string());
        let html = SheetKind::Test.render(&snapshot(vec![table]), false);

        let expected = "\
<table width=\"100%\" border=\"1\" class=\"ttable\">
  <caption>Basics<br/><span class=\"subtitle\">Part 1</span></caption>
  <colgroup><col class=\"narrow\"/><col class=\"score\"/><col/></colgroup>
  <thead>
    <tr><td>&nbsp;</td><th>Score</th><th>Comments</th></tr>
  </thead>
  <tbody>
    <tr><td class=\"theader\">Hand&nbsp;Techniques</td><td></td><td></td></tr>
    <tr><td>Front&nbsp;Punch</td><td></td><td></td></tr>
    <tr><td><span class=\"new\">Knife&nbsp;Hand</span></td><td></td><td></td></tr>
    <tr><td>Spear&nbsp;Hand (2)</td><td></td><td></td></tr>
  </tbody>
</table>";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_counted_header_lists_only_non_plain() {
        let table = basics(vec![header(
            "Kicks",
            "C",
            vec![technique("Front Kick", "X"), technique("Side Kick", "N")],
        )]);
        let html = SheetKind::Test.render(&snapshot(vec![table]), false);
        let rows = body_rows(&html);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Kicks"));
        assert!(rows[1].contains("Side&nbsp;Kick"));
        assert!(!html.contains("Front&nbsp;Kick"));
    }

    #[test]
    fn test_counted_header_without_visible_rows_gets_one_blank_row() {
        let table = basics(vec![header(
            "Kicks",
            "C",
            vec![technique("Front Kick", "X"), technique("Side Kick", "X")],
        )]);
        let html = SheetKind::Test.render(&snapshot(vec![table]), false);
        let rows = body_rows(&html);

        assert_eq!(rows.len(), 2);
        assert_eq!(html.matches(BLANK_ROW).count(), 1);
    }

    #[test]
    fn test_optional_header_collapses_to_blank_row() {
        let table = basics(vec![header(
            "Weapons",
            "O",
            vec![technique("Bo Form", "N")],
        )]);
        let html = SheetKind::Test.render(&snapshot(vec![table]), false);

        assert!(html.contains("Weapons&nbsp;(optional)"));
        assert!(!html.contains("Bo&nbsp;Form"));
        assert_eq!(html.matches(BLANK_ROW).count(), 1);
    }

    #[test]
    fn test_full_shows_every_technique_without_blank_rows() {
        let table = basics(vec![
            header("Kicks", "C", vec![technique("Front Kick", "X")]),
            header("Weapons", "O", vec![technique("Bo Form", "X")]),
            header("Drills", "Z", vec![technique("Shadow Drill", "X")]),
        ]);
        let html = SheetKind::Test.render(&snapshot(vec![table]), true);

        assert!(html.contains("Front&nbsp;Kick"));
        assert!(html.contains("Bo&nbsp;Form"));
        assert!(html.contains("Shadow&nbsp;Drill"));
        assert_eq!(html.matches(BLANK_ROW).count(), 0);
    }

    #[test]
    fn test_other_header_types_collapse_silently() {
        let table = basics(vec![header("Drills", "Z", vec![technique("Shadow Drill", "N")])]);
        let html = SheetKind::Test.render(&snapshot(vec![table]), false);

        assert_eq!(body_rows(&html).len(), 1);
        assert_eq!(html.matches(BLANK_ROW).count(), 0);
    }

    #[test]
    fn test_tables_keep_inventory_order() {
        let first = basics(vec![header("A", "X", vec![technique("One", "X"), technique("Two", "X")])]);
        let second = Table::new("Forms");
        let html = SheetKind::Test.render(&snapshot(vec![first, second]), false);

        let one = html.find("One").unwrap();
        let two = html.find("Two").unwrap();
        let forms = html.find("<caption>Forms").unwrap();
        assert!(one < two && two < forms);
        assert!(html.contains("</table>\n<table"));
    }
}
