//! テスト共通ヘルパー
//!
//! rust_xlsxwriterによる入力フィクスチャの生成と、生成されたDOCXの読み戻しを提供します。

#![allow(dead_code)]

use quick_xml::events::Event;
use quick_xml::Reader;
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::{Cursor, Read};

/// 英語の必須列ヘッダー
pub const HEADERS: [&str; 4] = ["Title", "Artist", "Creation Date", "Description"];

/// 文字列セルだけのワークブックを生成する
///
/// 空文字列のセルは書き込まず、空セルとして扱われるようにします。
pub fn workbook(headers: &[&str], rows: &[&[&str]]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(r as u32 + 1, col as u16, *value)?;
            }
        }
    }

    workbook.save_to_buffer()
}

/// 英語ヘッダーのワークブックを生成する
pub fn artworks(rows: &[&[&str]]) -> Vec<u8> {
    workbook(&HEADERS, rows).unwrap()
}

/// `n`件の作品行を持つワークブックを生成する
pub fn many_artworks(n: u32) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for i in 1..=n {
        worksheet
            .write_string(i, 0, format!("Œuvre {}", i))
            .unwrap();
        worksheet
            .write_string(i, 1, format!("Artiste {}", i % 17))
            .unwrap();
        worksheet.write_number(i, 2, 1850.0 + (i % 150) as f64).unwrap();
        worksheet
            .write_string(i, 3, "Huile sur toile, 65 x 81 cm. Collection particulière.")
            .unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

/// 読み戻した段落
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// フォントサイズ（半ポイント）
    pub size: Option<u32>,
    pub centered: bool,
    /// 下罫線（区切り線）を持つ段落
    pub rule: bool,
}

impl Paragraph {
    /// 作品名（太字・14pt）
    pub fn is_title(&self) -> bool {
        self.bold && self.size == Some(28)
    }

    /// 作家・制作年（斜体・11pt）
    pub fn is_attribution(&self) -> bool {
        self.italic && self.size == Some(22)
    }

    /// 解説文（標準・11pt）
    pub fn is_description(&self) -> bool {
        !self.bold && !self.italic && self.size == Some(22)
    }

    /// 空段落
    pub fn is_spacer(&self) -> bool {
        *self == Paragraph::default()
    }
}

/// DOCXパッケージから1つのパーツを文字列として読み出す
pub fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

/// DOCXパッケージに含まれるパーツ名
pub fn part_names(docx: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// 本文の段落を順に読み出す
pub fn paragraphs(docx: &[u8]) -> Vec<Paragraph> {
    let xml = read_part(docx, "word/document.xml");
    let mut reader = Reader::from_str(&xml);
    let mut result = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current = Some(Paragraph::default()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"w:p" {
                    result.push(Paragraph::default());
                    continue;
                }
                let Some(p) = current.as_mut() else {
                    continue;
                };
                match e.name().as_ref() {
                    b"w:b" => p.bold = true,
                    b"w:i" => p.italic = true,
                    b"w:sz" => {
                        p.size = e
                            .try_get_attribute("w:val")
                            .unwrap()
                            .and_then(|a| std::str::from_utf8(&a.value).ok()?.parse().ok());
                    }
                    b"w:jc" => p.centered = true,
                    b"w:bottom" => p.rule = true,
                    b"w:br" => p.text.push('\n'),
                    b"w:tab" => p.text.push('\t'),
                    _ => {}
                }
            }
            Event::Text(t) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.text.push_str(&t.unescape().unwrap());
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(p) = current.take() {
                        result.push(p);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    result
}

/// 作品名の段落テキストを順に取り出す
pub fn titles(docx: &[u8]) -> Vec<String> {
    paragraphs(docx)
        .into_iter()
        .filter(Paragraph::is_title)
        .map(|p| p.text)
        .collect()
}
