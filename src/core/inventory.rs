use crate::core::qr::QrCache;
use crate::core::text::fix_text;
use crate::domain::model::{Header, InventorySnapshot, RowKind, Table, Technique};
use crate::utils::error::{Result, SheetError};
use csv::StringRecord;
use std::io::Read;

pub const TYPE_COLUMN: &str = "Type";
pub const LABEL_COLUMN: &str = "Label";

/// Builds the table/header/technique tree for one inventory column.
///
/// `column` is a rank code or one of the special sheet columns. Rows whose
/// label or `column` cell is empty are left out, so each rank only sees the
/// items marked for it. QR rows go through `qr_cache`, which outlives the
/// call so each code is encoded once per run.
pub async fn read_inventory<R: Read>(
    source: R,
    column: &str,
    qr_cache: &mut QrCache,
) -> Result<InventorySnapshot> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let type_idx = column_index(&headers, TYPE_COLUMN)?;
    let label_idx = column_index(&headers, LABEL_COLUMN)?;
    let marker_idx = column_index(&headers, column)?;

    let mut snapshot = InventorySnapshot::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let raw_label = record.get(label_idx).unwrap_or_default();
        let label = fix_text(raw_label);
        let marker = fix_text(record.get(marker_idx).unwrap_or_default());
        let kind = RowKind::parse(&fix_text(record.get(type_idx).unwrap_or_default()));

        match kind {
            RowKind::Revision => {
                if !label.is_empty() {
                    snapshot.revision = label;
                }
            }
            RowKind::QrCode => {
                let (title, url) = raw_label.split_once('=').ok_or_else(|| {
                    SheetError::MalformedRowError {
                        line,
                        message: format!("QR label '{}' is not of the form title=url", label),
                    }
                })?;
                let title = fix_text(title.trim());
                let image = qr_cache.get_or_encode(&title, url.trim()).await?;
                snapshot.add_qr_code(title, image);
            }
            RowKind::Comment => {}
            _ if label.is_empty() || marker.is_empty() => {}
            RowKind::Table => snapshot.tables.push(Table::new(label)),
            RowKind::Subtitle => current_table(&mut snapshot, line)?.subtitle = Some(label),
            RowKind::Header => current_table(&mut snapshot, line)?
                .headers
                .push(Header::new(label, marker)),
            RowKind::Technique(_) => {
                let header = current_table(&mut snapshot, line)?
                    .headers
                    .last_mut()
                    .ok_or_else(|| orphan_row(line))?;
                header.techniques.push(Technique {
                    label,
                    r#type: marker,
                });
            }
        }
    }

    tracing::debug!(
        "Column '{}': {} tables, {} techniques, revision '{}'",
        column,
        snapshot.tables.len(),
        snapshot.technique_count(),
        snapshot.revision
    );

    Ok(snapshot)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| SheetError::MissingColumnError {
            column: name.to_string(),
        })
}

fn current_table(snapshot: &mut InventorySnapshot, line: u64) -> Result<&mut Table> {
    snapshot.tables.last_mut().ok_or_else(|| orphan_row(line))
}

fn orphan_row(line: u64) -> SheetError {
    SheetError::MalformedRowError {
        line,
        message: "row appears before any T (table) row".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DEFAULT_REVISION, PLAIN};
    use crate::domain::ports::QrEncoder;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct EchoEncoder {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl QrEncoder for EchoEncoder {
        async fn encode_png(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(url.as_bytes().to_vec())
        }
    }

    fn cache() -> (QrCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = QrCache::new(Box::new(EchoEncoder {
            calls: calls.clone(),
        }));
        (cache, calls)
    }

    const INVENTORY: &str = "\
Type,Label,Y,O,S,M
R,2024-03-01,,,,
#,Ignore me,X,X,X,X
T,Basics,X,X,Y,Y
S,Stances & Blocks,X,,,
H,Stances,X,C,Y,Y
,Front Stance,X,X,Y,Y
,Back Stance,N,X,Y,Y
,Horse Stance,,N,O,O
H,Blocks,,X,,
,Low Block,,N,O,O
,,X,X,X,X
T,Forms,,X,O,O
,Chon-Ji,,N,O,O
";

    #[tokio::test]
    async fn test_builds_tables_for_rank() {
        let (mut qr, _) = cache();
        let snapshot = read_inventory(INVENTORY.as_bytes(), "Y", &mut qr).await.unwrap();

        assert_eq!(snapshot.revision, "2024-03-01");
        assert_eq!(snapshot.tables.len(), 1);

        let table = &snapshot.tables[0];
        assert_eq!(table.title, "Basics");
        assert_eq!(table.subtitle.as_deref(), Some("Stances &amp; Blocks"));
        assert_eq!(table.headers.len(), 2);
        assert_eq!(table.headers[0].label, "");
        assert_eq!(table.headers[0].r#type, PLAIN);
        assert!(table.headers[0].is_empty());

        let stances = &table.headers[1];
        assert_eq!(stances.label, "Stances");
        assert_eq!(stances.r#type, "X");
        assert_eq!(
            stances.techniques,
            vec![
                Technique {
                    label: "Front Stance".to_string(),
                    r#type: "X".to_string()
                },
                Technique {
                    label: "Back Stance".to_string(),
                    r#type: "N".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_builds_multiple_tables_for_rank() {
        let (mut qr, _) = cache();
        let snapshot = read_inventory(INVENTORY.as_bytes(), "O", &mut qr).await.unwrap();

        let titles: Vec<&str> = snapshot.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Basics", "Forms"]);

        let basics = &snapshot.tables[0];
        assert_eq!(basics.subtitle, None);
        let labels: Vec<&str> = basics.headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["", "Stances", "Blocks"]);
        assert_eq!(basics.headers[1].r#type, "C");
        assert_eq!(basics.headers[1].techniques.len(), 3);
        assert_eq!(basics.headers[2].techniques[0].r#type, "N");
        assert_eq!(snapshot.tables[1].headers[0].techniques[0].label, "Chon-Ji");
    }

    #[tokio::test]
    async fn test_every_kept_technique_has_label_and_marker() {
        let (mut qr, _) = cache();
        for column in ["Y", "O", "S", "M"] {
            let snapshot = read_inventory(INVENTORY.as_bytes(), column, &mut qr).await.unwrap();
            for technique in snapshot.tables.iter().flat_map(|t| &t.headers).flat_map(|h| &h.techniques) {
                assert!(!technique.label.is_empty());
                assert!(!technique.r#type.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_table_excluded_for_rank_keeps_previous_table_current() {
        let (mut qr, _) = cache();
        let csv = "Type,Label,Y\nT,Basics,X\nT,Forms,\n,Kick,X\n";
        let snapshot = read_inventory(csv.as_bytes(), "Y", &mut qr).await.unwrap();
        assert_eq!(snapshot.tables.len(), 1);
        assert_eq!(snapshot.tables[0].headers[0].techniques[0].label, "Kick");
    }

    #[tokio::test]
    async fn test_default_revision() {
        let (mut qr, _) = cache();
        let csv = "Type,Label,Y\nT,Basics,X\n,Kick,X\n";
        let snapshot = read_inventory(csv.as_bytes(), "Y", &mut qr).await.unwrap();
        assert_eq!(snapshot.revision, DEFAULT_REVISION);
        assert_eq!(snapshot.technique_count(), 1);
    }

    #[tokio::test]
    async fn test_qr_rows_are_cached_across_reads() {
        let (mut qr, calls) = cache();
        let csv = "Type,Label,Y,O\nQ,Board=https://example.com/?a=1&b=2,,\nT,Basics,X,X\n";

        let yellow = read_inventory(csv.as_bytes(), "Y", &mut qr).await.unwrap();
        let orange = read_inventory(csv.as_bytes(), "O", &mut qr).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(yellow.qr_codes.len(), 1);
        assert_eq!(yellow.qr_codes[0].title, "Board");
        assert_eq!(yellow.qr_codes, orange.qr_codes);
        assert_eq!(yellow.technique_count(), 0);

        use base64::{engine::general_purpose::STANDARD, Engine};
        let decoded = STANDARD.decode(&yellow.qr_codes[0].png_base64).unwrap();
        assert_eq!(decoded, b"https://example.com/?a=1&b=2");
    }

    #[tokio::test]
    async fn test_missing_rank_column_is_fatal() {
        let (mut qr, _) = cache();
        let err = read_inventory(INVENTORY.as_bytes(), "b", &mut qr).await.unwrap_err();
        assert!(matches!(err, SheetError::MissingColumnError { column } if column == "b"));
    }

    #[tokio::test]
    async fn test_missing_label_column_is_fatal() {
        let (mut qr, _) = cache();
        let err = read_inventory("Type,Y\nT,X\n".as_bytes(), "Y", &mut qr).await.unwrap_err();
        assert!(matches!(err, SheetError::MissingColumnError { column } if column == "Label"));
    }

    #[tokio::test]
    async fn test_technique_before_table_is_fatal() {
        let (mut qr, _) = cache();
        let err = read_inventory("Type,Label,Y\n,Kick,X\n".as_bytes(), "Y", &mut qr)
            .await
            .unwrap_err();
        assert!(matches!(err, SheetError::MalformedRowError { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_qr_label_without_url_is_fatal() {
        let (mut qr, _) = cache();
        let err = read_inventory("Type,Label,Y\nQ,Board,\n".as_bytes(), "Y", &mut qr)
            .await
            .unwrap_err();
        assert!(matches!(err, SheetError::MalformedRowError { .. }));
    }

    #[tokio::test]
    async fn test_cells_are_trimmed_and_header_bom_ignored() {
        let (mut qr, _) = cache();
        let csv = "\u{feff}Type,Label,Y\n T , Basics ,  X \n, Side \u{2013} Kick , N\n";
        let snapshot = read_inventory(csv.as_bytes(), "Y", &mut qr).await.unwrap();
        assert_eq!(snapshot.tables[0].title, "Basics");
        assert_eq!(snapshot.tables[0].headers[0].techniques[0].label, "Side - Kick");
        assert_eq!(snapshot.tables[0].headers[0].techniques[0].r#type, "N");
    }

    #[tokio::test]
    async fn test_ragged_row_is_csv_error() {
        let (mut qr, _) = cache();
        let err = read_inventory("Type,Label,Y\nT,Basics\n".as_bytes(), "Y", &mut qr)
            .await
            .unwrap_err();
        assert!(matches!(err, SheetError::CsvError(_)));
    }
}
