//! Minimal CSV reader for published spreadsheet exports.
//!
//! Handles quoted fields, doubled quotes inside quotes, and `\n` / `\r\n` /
//! `\r` row endings. The first row is the header; every following row
//! becomes a map from trimmed header to trimmed value.

use crate::item::RawRow;

/// Split CSV text into rows of raw fields.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows
}

/// Parse CSV text into header-keyed records.
///
/// Missing trailing cells read as empty strings. Cells beyond the header
/// width are dropped. When two headers trim to the same name, the leftmost
/// non-empty cell wins.
pub fn parse_records(text: &str) -> Vec<RawRow> {
    let mut rows = parse_rows(text).into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    rows.map(|row| {
        let mut record = RawRow::with_capacity(headers.len());
        for (i, key) in headers.iter().enumerate() {
            let value = row.get(i).map_or("", |v| v.trim());
            let slot = record.entry(key.clone()).or_default();
            if slot.is_empty() {
                *slot = value.to_string();
            }
        }
        record
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("  \n ").is_empty());
        assert!(parse_records("").is_empty());
    }

    #[test]
    fn test_simple_rows() {
        let rows = parse_rows("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let rows = parse_rows("a,b\n1,2");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_quoted_fields() {
        let rows = parse_rows("name,price\n\"Бампер, урд\",\"125,000\"\n\"He said \"\"hi\"\"\",1\n");
        assert_eq!(rows[1], vec!["Бампер, урд", "125,000"]);
        assert_eq!(rows[2], vec!["He said \"hi\"", "1"]);
    }

    #[test]
    fn test_newline_inside_quotes() {
        let rows = parse_rows("a,b\n\"line one\nline two\",x\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "line one\nline two");
    }

    #[test]
    fn test_crlf() {
        let rows = parse_rows("a,b\r\n1,2\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_records_trim_and_pad() {
        let records = parse_records(" Барааны нэр , TOK код ,OEM\n  Prius бампер ,TOK123\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Барааны нэр"], "Prius бампер");
        assert_eq!(records[0]["TOK код"], "TOK123");
        assert_eq!(records[0]["OEM"], "");
    }

    #[test]
    fn test_records_duplicate_headers() {
        let records = parse_records("Нэр, Нэр \n,Толь\nБампер,Толь\n");
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["Нэр"], "Толь");
        assert_eq!(records[1]["Нэр"], "Бампер");
    }

    #[test]
    fn test_records_extra_cells_dropped() {
        let records = parse_records("a\n1,2,3\n");
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["a"], "1");
    }
}
