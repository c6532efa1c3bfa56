//! DOCX Writer
//!
//! `Document`をOffice Open XML WordprocessingML（.docx）パッケージに書き出します。
//! パッケージはZIPアーカイブで、各パーツのXMLはquick-xmlで生成します。
//! 同じドキュメントからは常に同じバイト列が生成されます（タイムスタンプ固定、作成日時なし）。

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{Alignment, Document, StyledBlock, TextStyle};
use crate::error::CartelError;

use super::OutputArtifact;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
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

/// 区切り線（段落の下罫線）の太さ（1/8pt単位）
const RULE_SIZE: &str = "12";

/// 既定の本文フォントサイズ（半ポイント）
const DEFAULT_SIZE_HALF_POINTS: &str = "22";

type XmlWriter = Writer<Vec<u8>>;
type XmlResult = Result<(), quick_xml::Error>;

/// DOCXシリアライザー
#[derive(Debug, Default)]
pub(crate) struct DocxSerializer;

impl DocxSerializer {
    /// ドキュメントをDOCXバイト列に変換し、ファイル名と組にして返す
    ///
    /// # 引数
    ///
    /// * `document` - 組み立て済みのドキュメント
    /// * `file_name` - 検証済みの出力ファイル名（拡張子付き）
    ///
    /// # 戻り値
    ///
    /// * `Ok(OutputArtifact)` - 書き出しに成功した場合
    /// * `Err(CartelError::Serialization)` - XML生成またはZIP書き込みの内部エラー
    pub fn serialize(
        &self,
        document: &Document,
        file_name: String,
    ) -> Result<OutputArtifact, CartelError> {
        let parts: [(&str, Vec<u8>); 7] = [
            ("[Content_Types].xml", xml_part(write_content_types)?),
            ("_rels/.rels", xml_part(write_package_relationships)?),
            ("docProps/core.xml", xml_part(|w| write_core_properties(w, document))?),
            ("docProps/app.xml", xml_part(write_app_properties)?),
            ("word/_rels/document.xml.rels", xml_part(write_document_relationships)?),
            ("word/styles.xml", xml_part(write_styles)?),
            ("word/document.xml", xml_part(|w| write_document(w, document))?),
        ];

        let bytes = pack(&parts)?;
        debug!("serialized '{}': {} bytes", file_name, bytes.len());

        Ok(OutputArtifact::new(bytes, file_name))
    }
}

/// パーツをZIPアーカイブにまとめる
fn pack(parts: &[(&str, Vec<u8>)]) -> Result<Vec<u8>, CartelError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in parts {
        zip.start_file(*name, options)
            .map_err(|e| CartelError::Serialization(format!("{}: {}", name, e)))?;
        zip.write_all(data)
            .map_err(|e| CartelError::Serialization(format!("{}: {}", name, e)))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| CartelError::Serialization(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// XML宣言付きで1つのパーツを生成
fn xml_part<F>(body: F) -> Result<Vec<u8>, CartelError>
where
    F: FnOnce(&mut XmlWriter) -> XmlResult,
{
    let mut writer = Writer::new(Vec::new());
    write_with_declaration(&mut writer, body)
        .map_err(|e| CartelError::Serialization(e.to_string()))?;
    Ok(writer.into_inner())
}

fn write_with_declaration<F>(w: &mut XmlWriter, body: F) -> XmlResult
where
    F: FnOnce(&mut XmlWriter) -> XmlResult,
{
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    body(w)
}

fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> XmlResult {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    w.write_event(Event::Start(elem))
}

fn end(w: &mut XmlWriter, name: &str) -> XmlResult {
    w.write_event(Event::End(BytesEnd::new(name)))
}

fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> XmlResult {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    w.write_event(Event::Empty(elem))
}

fn text_element(w: &mut XmlWriter, name: &str, text: &str) -> XmlResult {
    start(w, name, &[])?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}

fn write_content_types(w: &mut XmlWriter) -> XmlResult {
    start(w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    empty(
        w,
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    empty(
        w,
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
    for (part, content_type) in overrides {
        empty(
            w,
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    end(w, "Types")
}

fn write_relationships(w: &mut XmlWriter, rels: &[(&str, &str, &str)]) -> XmlResult {
    start(w, "Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for &(id, rel_type, target) in rels {
        empty(
            w,
            "Relationship",
            &[("Id", id), ("Type", rel_type), ("Target", target)],
        )?;
    }
    end(w, "Relationships")
}

fn write_package_relationships(w: &mut XmlWriter) -> XmlResult {
    write_relationships(
        w,
        &[
            ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
            ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
            ("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
        ],
    )
}

fn write_document_relationships(w: &mut XmlWriter) -> XmlResult {
    write_relationships(w, &[("rId1", REL_STYLES, "styles.xml")])
}

fn write_core_properties(w: &mut XmlWriter, document: &Document) -> XmlResult {
    start(
        w,
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
    text_element(w, "dc:title", &xml_safe(document.title()))?;
    end(w, "cp:coreProperties")
}

fn write_app_properties(w: &mut XmlWriter) -> XmlResult {
    start(
        w,
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    text_element(w, "Application", env!("CARGO_PKG_NAME"))?;
    end(w, "Properties")
}

fn write_styles(w: &mut XmlWriter) -> XmlResult {
    start(w, "w:styles", &[("xmlns:w", NS_MAIN)])?;
    start(w, "w:docDefaults", &[])?;
    start(w, "w:rPrDefault", &[])?;
    start(w, "w:rPr", &[])?;
    empty(
        w,
        "w:rFonts",
        &[
            ("w:ascii", "Calibri"),
            ("w:hAnsi", "Calibri"),
            ("w:eastAsia", "Calibri"),
            ("w:cs", "Calibri"),
        ],
    )?;
    empty(w, "w:sz", &[("w:val", DEFAULT_SIZE_HALF_POINTS)])?;
    empty(w, "w:szCs", &[("w:val", DEFAULT_SIZE_HALF_POINTS)])?;
    end(w, "w:rPr")?;
    end(w, "w:rPrDefault")?;
    end(w, "w:docDefaults")?;

    start(
        w,
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ],
    )?;
    empty(w, "w:name", &[("w:val", "Normal")])?;
    empty(w, "w:qFormat", &[])?;
    end(w, "w:style")?;
    end(w, "w:styles")
}

fn write_document(w: &mut XmlWriter, document: &Document) -> XmlResult {
    start(w, "w:document", &[("xmlns:w", NS_MAIN)])?;
    start(w, "w:body", &[])?;

    for block in document.blocks() {
        match block {
            StyledBlock::Heading { text, style } | StyledBlock::Body { text, style } => {
                write_text_paragraph(w, text, style)?
            }
            StyledBlock::Rule => write_rule(w)?,
            StyledBlock::Spacer => empty(w, "w:p", &[])?,
        }
    }

    write_section_properties(w, document)?;
    end(w, "w:body")?;
    end(w, "w:document")
}

fn write_text_paragraph(w: &mut XmlWriter, text: &str, style: &TextStyle) -> XmlResult {
    start(w, "w:p", &[])?;
    if style.alignment == Alignment::Center {
        start(w, "w:pPr", &[])?;
        empty(w, "w:jc", &[("w:val", "center")])?;
        end(w, "w:pPr")?;
    }

    start(w, "w:r", &[])?;
    start(w, "w:rPr", &[])?;
    if style.bold {
        empty(w, "w:b", &[])?;
    }
    if style.italic {
        empty(w, "w:i", &[])?;
    }
    let size = style.size_half_points().to_string();
    empty(w, "w:sz", &[("w:val", size.as_str())])?;
    empty(w, "w:szCs", &[("w:val", size.as_str())])?;
    end(w, "w:rPr")?;

    write_run_content(w, text)?;

    end(w, "w:r")?;
    end(w, "w:p")
}

/// ランの中身を書き出す
///
/// 改行（`\n`、`\r\n`、単独の`\r`）は`<w:br/>`、タブは`<w:tab/>`に変換します。
/// テキストが空でも空の`<w:t>`を1つ出力します。
fn write_run_content(w: &mut XmlWriter, text: &str) -> XmlResult {
    let mut segment = String::new();
    let mut wrote_any = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let element = match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                "w:br"
            }
            '\n' => "w:br",
            '\t' => "w:tab",
            c => {
                if is_xml_char(c) {
                    segment.push(c);
                }
                continue;
            }
        };

        if !segment.is_empty() {
            write_text_segment(w, &segment)?;
            segment.clear();
        }
        empty(w, element, &[])?;
        wrote_any = true;
    }

    if !segment.is_empty() || !wrote_any {
        write_text_segment(w, &segment)?;
    }
    Ok(())
}

fn write_text_segment(w: &mut XmlWriter, segment: &str) -> XmlResult {
    start(w, "w:t", &[("xml:space", "preserve")])?;
    w.write_event(Event::Text(BytesText::new(segment)))?;
    end(w, "w:t")
}

fn write_rule(w: &mut XmlWriter) -> XmlResult {
    start(w, "w:p", &[])?;
    start(w, "w:pPr", &[])?;
    start(w, "w:pBdr", &[])?;
    empty(
        w,
        "w:bottom",
        &[
            ("w:val", "single"),
            ("w:sz", RULE_SIZE),
            ("w:space", "1"),
            ("w:color", "auto"),
        ],
    )?;
    end(w, "w:pBdr")?;
    end(w, "w:pPr")?;
    end(w, "w:p")
}

fn write_section_properties(w: &mut XmlWriter, document: &Document) -> XmlResult {
    let (width, height) = document.page_size().dimensions_twips();
    let width = width.to_string();
    let height = height.to_string();
    let margin = cm_to_twips(document.margin_cm()).to_string();

    start(w, "w:sectPr", &[])?;
    empty(w, "w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    empty(
        w,
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    end(w, "w:sectPr")
}

/// センチメートルをtwip（1/20ポイント）に変換
pub(crate) fn cm_to_twips(cm: f64) -> u32 {
    (cm * 1440.0 / 2.54).round() as u32
}

/// XML 1.0で使用できる文字かどうか
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// XML 1.0で使用できない文字を取り除く
fn xml_safe(text: &str) -> String {
    text.chars().filter(|c| is_xml_char(*c)).collect()
}
