use super::TableLayout;
use crate::core::text::nbsp;
use crate::domain::model::{Header, Table, Technique};
use crate::domain::rank::RANKS;

/// Skills matrix across the whole ladder. A technique's type names the rank
/// where it is first earned; that column and every later one are marked.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixLayout;

impl TableLayout for MatrixLayout {
    fn open_table(&self, out: &mut String, table: &Table) {
        out.push_str("<table class=\"ttable\">\n");
        out.push_str(&format!(
            "  <colgroup><col/>{}</colgroup>\n",
            "<col class=\"narrow\"/>".repeat(RANKS.len())
        ));
        let columns: String = RANKS
            .iter()
            .map(|rank| format!("<th>{}</th>", rank.code))
            .collect();
        out.push_str(&format!("  <thead><th>{}</th>{}</thead>", table.title, columns));
    }

    fn header_row(&self, out: &mut String, header: &Header) {
        out.push_str(&format!(
            "  <tr><td class=\"theader\">{}</td><td colspan='{}'/></tr>\n",
            nbsp(&header.label),
            RANKS.len()
        ));
    }

    fn technique_row(
        &self,
        out: &mut String,
        _header: &Header,
        technique: &Technique,
        _full: bool,
    ) -> bool {
        out.push_str(&format!("  <tr><td>{}</td>", nbsp(&technique.label)));
        let mut earned = false;
        for rank in &RANKS {
            earned |= rank.code == technique.r#type;
            let attr = if rank.tier_start { "class=\"graybg\"" } else { "" };
            let mark = if earned { "X" } else { "&nbsp;" };
            out.push_str(&format!("<td {}>{}</td>", attr, mark));
        }
        out.push_str("</tr>\n");
        true
    }

    fn close_table(&self, out: &mut String, _table: &Table) {
        out.push_str("</table>");
    }
}
