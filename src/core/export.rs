// LogTint - core/export.rs
//
// CSV and JSON export of classified spans.
// Core layer: writes to any Write trait object.

use crate::core::model::{ClassificationSummary, ClassifiedDocument};
use crate::core::position::OffsetIndex;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One exported span.
///
/// `start`/`end` are UTF-8 byte offsets, `char_start`/`char_end` count
/// Unicode scalars and `utf16_start`/`utf16_end` count UTF-16 code units.
/// Line and column are zero-based, column in chars.
#[derive(Debug, Serialize)]
pub struct SpanRecord<'a> {
    pub kind: &'static str,
    pub start: usize,
    pub end: usize,
    pub char_start: usize,
    pub char_end: usize,
    pub utf16_start: usize,
    pub utf16_end: usize,
    pub line: usize,
    pub column: usize,
    pub text: &'a str,
}

/// One exported document.
#[derive(Debug, Serialize)]
pub struct DocumentRecord<'a> {
    pub source: &'a str,
    pub summary: ClassificationSummary,
    pub spans: Vec<SpanRecord<'a>>,
}

const CSV_HEADER: [&str; 11] = [
    "source",
    "kind",
    "start",
    "end",
    "char_start",
    "char_end",
    "utf16_start",
    "utf16_end",
    "line",
    "column",
    "text",
];

fn span_records(doc: &ClassifiedDocument) -> Vec<SpanRecord<'_>> {
    let index = OffsetIndex::new(&doc.text);
    doc.result
        .iter()
        .map(|s| {
            let pos = index.position(s.start);
            SpanRecord {
                kind: s.kind.config_key(),
                start: s.start,
                end: s.end,
                char_start: index.char_offset(s.start),
                char_end: index.char_offset(s.end),
                utf16_start: index.utf16_offset(s.start),
                utf16_end: index.utf16_offset(s.end),
                line: pos.line,
                column: pos.column,
                text: s.text(&doc.text),
            }
        })
        .collect()
}

/// Export spans of all documents to CSV.
///
/// Writes: source, kind, start, end, char_start, char_end, utf16_start,
/// utf16_end, line, column, text.
/// Returns the number of span rows written.
pub fn export_csv<W: Write>(
    documents: &[ClassifiedDocument],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for doc in documents {
        for record in span_records(doc) {
            csv_writer
                .write_record([
                    doc.source.as_str(),
                    record.kind,
                    &record.start.to_string(),
                    &record.end.to_string(),
                    &record.char_start.to_string(),
                    &record.char_end.to_string(),
                    &record.utf16_start.to_string(),
                    &record.utf16_end.to_string(),
                    &record.line.to_string(),
                    &record.column.to_string(),
                    record.text,
                ])
                .map_err(|e| ExportError::Csv {
                    path: export_path.to_path_buf(),
                    source: e,
                })?;
            count += 1;
        }
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export all documents to JSON (array of document objects).
///
/// Returns the number of spans written.
pub fn export_json<W: Write>(
    documents: &[ClassifiedDocument],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let records: Vec<DocumentRecord<'_>> = documents
        .iter()
        .map(|doc| DocumentRecord {
            source: &doc.source,
            summary: doc.result.summary(&doc.text),
            spans: span_records(doc),
        })
        .collect();
    let count = records.iter().map(|r| r.spans.len()).sum();

    serde_json::to_writer_pretty(&mut writer, &records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer).map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify;

    fn make_doc(source: &str, text: &str) -> ClassifiedDocument {
        ClassifiedDocument {
            source: source.to_string(),
            text: text.to_string(),
            result: classify(text),
        }
    }

    #[test]
    fn test_csv_export() {
        let docs = vec![
            make_doc("a.log", "[2024-01-15 10:30:00.123456] Data: 01"),
            make_doc("b.log", "\nFrame ID: 7F, late"),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&docs, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 5 + 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with(
            "source,kind,start,end,char_start,char_end,utf16_start,utf16_end,line,column,text"
        ));
        assert!(output.contains("a.log,date,1,11,1,11,1,11,0,1,2024-01-15"));
        assert!(output.contains("b.log,frame_id_payload,1,13,1,13,1,13,1,0,Frame ID: 7F"));
    }

    #[test]
    fn test_csv_non_ascii_offsets() {
        // 'é' is 2 bytes, 1 char, 1 UTF-16 unit; '𝄞' is 4 bytes, 1 char, 2 units.
        let docs = vec![make_doc("x", "é Data: 01\n𝄞 Data: 02")];
        let mut buf = Vec::new();
        export_csv(&docs, &mut buf, Path::new("out.csv")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("x,data_header,3,8,2,7,2,7,0,2,Data:"), "{output}");
        assert!(output.contains("x,data_payload,3,12,2,11,2,11,0,2,\"Data: 01\n\""), "{output}");
        assert!(output.contains("x,data_header,17,22,13,18,14,19,1,2,Data:"), "{output}");
    }

    #[test]
    fn test_csv_quotes_multiline_text() {
        let docs = vec![make_doc("m.log", "Data: 01\n02")];
        let mut buf = Vec::new();
        export_csv(&docs, &mut buf, Path::new("out.csv")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"Data: 01\n02\""));
    }

    #[test]
    fn test_json_export() {
        let docs = vec![make_doc("a.log", "[2024-01-15 10:30:00.123456] Frame ID: 1A")];
        let mut buf = Vec::new();
        let count = export_json(&docs, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 5);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let doc = &value[0];
        assert_eq!(doc["source"], "a.log");
        assert_eq!(doc["summary"]["timestamps"], 1);
        assert_eq!(doc["spans"][0]["kind"], "date");
        assert_eq!(doc["spans"][4]["text"], "Frame ID: 1A");
    }

    #[test]
    fn test_json_char_offsets() {
        let docs = vec![make_doc("a.log", "é Data: 01")];
        let mut buf = Vec::new();
        export_json(&docs, &mut buf, Path::new("out.json")).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let payload = &value[0]["spans"][1];
        assert_eq!(payload["kind"], "data_payload");
        assert_eq!(payload["start"], 3);
        assert_eq!(payload["end"], 11);
        assert_eq!(payload["char_start"], 2);
        assert_eq!(payload["char_end"], 10);
        assert_eq!(payload["utf16_end"], 10);
    }

    #[test]
    fn test_json_export_empty() {
        let mut buf = Vec::new();
        let count = export_json(&[], &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "[]");
    }
}
