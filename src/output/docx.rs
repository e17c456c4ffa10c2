//! DOCX Writer
//!
//! WordprocessingML（.docx）パッケージを生成するモジュール。
//! ZIPアーカイブに最小構成のパーツを書き込みます。
//!
//! パッケージ構成:
//! - `[Content_Types].xml`
//! - `_rels/.rels`
//! - `word/document.xml`（本文）
//! - `word/styles.xml`（`Heading1`スタイル）
//! - `word/_rels/document.xml.rels`
//! - `docProps/core.xml`（タイトル、作成日時）
//! - `docProps/app.xml`

use chrono::Utc;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::DocumentOptions;
use crate::error::NodalError;
use crate::types::ResultRecord;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const APPLICATION: &str = "bank-nodal";
const HEADING_STYLE: &str = "Heading1";

/// DOCX形式のフォーマッター
pub struct DocxFormatter;

impl DocxFormatter {
    pub(crate) fn render<W: Write>(
        &self,
        records: &[ResultRecord],
        options: &DocumentOptions,
        writer: &mut W,
    ) -> Result<(), NodalError> {
        let package = build_package(records, options)?;
        writer.write_all(&package)?;
        writer.flush()?;
        Ok(())
    }
}

/// パッケージ全体をZIPアーカイブとして組み立てる
fn build_package(
    records: &[ResultRecord],
    options: &DocumentOptions,
) -> Result<Vec<u8>, NodalError> {
    let parts: [(&str, Vec<u8>); 7] = [
        ("[Content_Types].xml", content_types_xml()?),
        ("_rels/.rels", package_rels_xml()?),
        ("word/document.xml", document_xml(records, &options.title)?),
        ("word/styles.xml", styles_xml()?),
        ("word/_rels/document.xml.rels", document_rels_xml()?),
        ("docProps/core.xml", core_xml(options)?),
        ("docProps/app.xml", app_xml()?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts.iter() {
        zip.start_file(*name, file_options)?;
        zip.write_all(content)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// XMLパーツを書き込むための小さなヘルパー
struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    fn new() -> Result<Self, NodalError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), NodalError> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), NodalError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), NodalError> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    /// テキストのみを持つ要素（テキストはエスケープされる）
    fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<(), NodalError> {
        self.start(name, attrs)?;
        let sanitized = sanitize_xml_text(text);
        self.writer
            .write_event(Event::Text(BytesText::new(&sanitized)))?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// XML 1.0で許可されない制御文字を除去する
fn sanitize_xml_text(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || !c.is_control() || c as u32 >= 0x80)
        .filter(|&c| !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
        .collect()
}

/// 本文パーツ（word/document.xml）
///
/// 見出し段落1つの後、レコードごとに4段落と空段落1つを出力します。
fn document_xml(records: &[ResultRecord], title: &str) -> Result<Vec<u8>, NodalError> {
    let mut xml = XmlPart::new()?;
    xml.start("w:document", &[("xmlns:w", NS_W)])?;
    xml.start("w:body", &[])?;

    // 見出し
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:pStyle", &[("w:val", HEADING_STYLE)])?;
    xml.end("w:pPr")?;
    write_run(&mut xml, title)?;
    xml.end("w:p")?;

    for record in records {
        for (label, value) in record.labeled_fields() {
            xml.start("w:p", &[])?;
            write_run(&mut xml, &format!("{}: {}", label, value))?;
            xml.end("w:p")?;
        }
        // レコード間の空行
        xml.empty("w:p", &[])?;
    }

    // US Letter、余白1インチ
    xml.start("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")?;

    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

fn write_run(xml: &mut XmlPart, text: &str) -> Result<(), NodalError> {
    xml.start("w:r", &[])?;
    xml.text_element("w:t", &[("xml:space", "preserve")], text)?;
    xml.end("w:r")
}

fn styles_xml() -> Result<Vec<u8>, NodalError> {
    let mut xml = XmlPart::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:sz", &[("w:val", "22")])?;
    xml.end("w:rPr")?;
    xml.end("w:style")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:styleId", HEADING_STYLE)],
    )?;
    xml.empty("w:name", &[("w:val", "heading 1")])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:next", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:keepNext", &[])?;
    xml.empty("w:spacing", &[("w:before", "480"), ("w:after", "0")])?;
    xml.empty("w:outlineLvl", &[("w:val", "0")])?;
    xml.end("w:pPr")?;
    xml.start("w:rPr", &[])?;
    xml.empty("w:b", &[])?;
    xml.empty("w:color", &[("w:val", "365F91")])?;
    xml.empty("w:sz", &[("w:val", "28")])?;
    xml.end("w:rPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.finish())
}

fn content_types_xml() -> Result<Vec<u8>, NodalError> {
    let mut xml = XmlPart::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part_name, content_type) in overrides {
        xml.empty(
            "Override",
            &[("PartName", part_name), ("ContentType", content_type)],
        )?;
    }

    xml.end("Types")?;
    Ok(xml.finish())
}

fn package_rels_xml() -> Result<Vec<u8>, NodalError> {
    relationships_xml(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

fn document_rels_xml() -> Result<Vec<u8>, NodalError> {
    relationships_xml(&[("rId1", REL_STYLES, "styles.xml")])
}

fn relationships_xml(relationships: &[(&str, &str, &str)]) -> Result<Vec<u8>, NodalError> {
    let mut xml = XmlPart::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for (id, rel_type, target) in relationships {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", rel_type), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn core_xml(options: &DocumentOptions) -> Result<Vec<u8>, NodalError> {
    let timestamp = options
        .timestamp
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();

    let mut xml = XmlPart::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], &options.title)?;
    xml.text_element("dc:creator", &[], APPLICATION)?;
    xml.text_element(
        "dcterms:created",
        &[("xsi:type", "dcterms:W3CDTF")],
        &timestamp,
    )?;
    xml.text_element(
        "dcterms:modified",
        &[("xsi:type", "dcterms:W3CDTF")],
        &timestamp,
    )?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_xml() -> Result<Vec<u8>, NodalError> {
    let mut xml = XmlPart::new()?;
    xml.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.text_element("Application", &[], APPLICATION)?;
    xml.end("Properties")?;
    Ok(xml.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(package: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    /// 本文の段落テキストを順番に取り出す（空段落は空文字列）
    fn paragraphs(document: &str) -> Vec<String> {
        use quick_xml::events::Event;
        use quick_xml::Reader;

        let mut reader = Reader::from_str(document);
        let mut result = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"w:p" => current = Some(String::new()),
                Event::Empty(e) if e.name().as_ref() == b"w:p" => result.push(String::new()),
                Event::End(e) if e.name().as_ref() == b"w:p" => {
                    result.push(current.take().unwrap_or_default())
                }
                Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
                Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
                Event::Text(t) if in_text => {
                    if let Some(p) = current.as_mut() {
                        p.push_str(&t.unescape().unwrap());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        result
    }

    fn sample_records() -> Vec<ResultRecord> {
        vec![
            ResultRecord {
                bank_name: "abc bank".to_string(),
                customer_email: "cs@abc.com".to_string(),
                nodal_email: String::new(),
                grievance_email: "grv@abc.com".to_string(),
            },
            ResultRecord::not_found("XYZ Bank"),
        ]
    }

    #[test]
    fn test_package_contains_all_parts() {
        let package = build_package(&[], &DocumentOptions::default()).unwrap();
        let archive = ZipArchive::new(Cursor::new(package.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "docProps/app.xml",
                "docProps/core.xml",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_empty_document_has_only_heading() {
        let package = build_package(&[], &DocumentOptions::default()).unwrap();
        let document = read_part(&package, "word/document.xml");
        assert_eq!(paragraphs(&document), vec!["Banks Email (Nodal)"]);
        assert!(document.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    }

    #[test]
    fn test_document_blocks_in_order() {
        let package = build_package(&sample_records(), &DocumentOptions::default()).unwrap();
        let document = read_part(&package, "word/document.xml");
        assert_eq!(
            paragraphs(&document),
            vec![
                "Banks Email (Nodal)",
                "Bank Name: abc bank",
                "Customer Email: cs@abc.com",
                "Nodal Email: ",
                "Grievance Email: grv@abc.com",
                "",
                "Bank Name: XYZ Bank",
                "Customer Email: ",
                "Nodal Email: ",
                "Grievance Email: ",
                "",
            ]
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let records = vec![ResultRecord::not_found("A&B <Bank>")];
        let package = build_package(&records, &DocumentOptions::default()).unwrap();
        let document = read_part(&package, "word/document.xml");
        assert!(document.contains("Bank Name: A&amp;B &lt;Bank&gt;"));
        assert_eq!(paragraphs(&document)[1], "Bank Name: A&B <Bank>");
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(sanitize_xml_text("a\u{1}b\tc"), "ab\tc");
        assert_eq!(sanitize_xml_text("日本語"), "日本語");
    }

    #[test]
    fn test_fixed_timestamp_is_reproducible() {
        let options = DocumentOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            ..DocumentOptions::default()
        };
        let first = build_package(&sample_records(), &options).unwrap();
        let second = build_package(&sample_records(), &options).unwrap();
        assert_eq!(first, second);

        let core = read_part(&first, "docProps/core.xml");
        assert!(core.contains("2024-01-02T03:04:05Z"));
        assert!(core.contains("<dc:title>Banks Email (Nodal)</dc:title>"));
    }

    #[test]
    fn test_document_part_independent_of_timestamp() {
        let a = DocumentOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            ..DocumentOptions::default()
        };
        let b = DocumentOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            ..DocumentOptions::default()
        };
        let doc_a = read_part(&build_package(&sample_records(), &a).unwrap(), "word/document.xml");
        let doc_b = read_part(&build_package(&sample_records(), &b).unwrap(), "word/document.xml");
        assert_eq!(doc_a, doc_b);
    }
}
