//! Dataset fixtures and content generators

use std::io::{Cursor, Write};
use std::path::PathBuf;

/// Short text with repeated words
pub const SAMPLE_TEXT: &str = "The cat sat. The dog sat.";

/// Expected word-frequency summary for [`SAMPLE_TEXT`]
pub const SAMPLE_TEXT_SUMMARY: &str = "the: 2\ncat: 1\nsat: 2\ndog: 1\n";

/// CSV with a quoted field and three data rows
pub const SAMPLE_CSV: &str = "Country name,Regional indicator,Ladder score\n\
Finland,Western Europe,7.8087\n\
\"Korea, Republic of\",East Asia,5.8724\n\
Denmark,Western Europe,7.6456\n";

/// Expected summary for [`SAMPLE_CSV`]
pub const SAMPLE_CSV_SUMMARY: &str =
    "Number of rows: 3\nColumns: ['Country name', 'Regional indicator', 'Ladder score']\n";

/// JSON document shaped like the open-notify astronaut feed
pub const SAMPLE_JSON: &str = r#"{"message": "success", "number": 2, "people": [{"craft": "ISS", "name": "x"}, {"craft": "ISS", "name": "y"}]}"#;

/// A cell in a generated worksheet
pub enum XlsxCell<'a> {
    /// Inline string
    Str(&'a str),
    /// Number
    Num(f64),
}

fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

fn sheet_xml(rows: &[Vec<XlsxCell<'_>>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letter(c), r + 1);
            match cell {
                XlsxCell::Str(s) => xml.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{s}</t></is></c>"#
                )),
                XlsxCell::Num(n) => {
                    xml.push_str(&format!(r#"<c r="{reference}"><v>{n}</v></c>"#))
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Build a single-sheet xlsx workbook in memory
pub fn minimal_xlsx(rows: &[Vec<XlsxCell<'_>>]) -> Vec<u8> {
    let files: [(&str, String); 5] = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        zip.start_file(name, zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Small cattle workbook: a text column and a numeric column
pub fn cattle_xlsx() -> Vec<u8> {
    use XlsxCell::{Num, Str};
    minimal_xlsx(&[
        vec![Str("breed"), Str("weight")],
        vec![Str("Angus"), Num(500.0)],
        vec![Str("Hereford"), Num(620.0)],
        vec![Str("Jersey"), Num(410.0)],
    ])
}

/// Path of a checked-in file under `tests/data`
pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Legacy BIFF8 `.xls` workbook with the same sheet as [`cattle_xlsx`]
pub fn cattle_xls() -> Vec<u8> {
    std::fs::read(data_file("cattle.xls")).expect("tests/data/cattle.xls is checked in")
}

/// Expected summary for the cattle sheet
pub const CATTLE_SUMMARY: &str = "\
Number of rows: 3
Columns: ['breed', 'weight']
           weight
count    3.000000
mean   510.000000
std    105.356538
min    410.000000
25%    455.000000
50%    500.000000
75%    560.000000
max    620.000000";
