use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractionError;

/// Extracts paragraph text from a DOCX container, one paragraph per line.
pub fn extract_docx_text(file_name: &str, data: &[u8]) -> Result<String, ExtractionError> {
    read_document_xml(data)
        .and_then(|xml| paragraphs_from_xml(&xml))
        .map(|lines| lines.join("\n"))
        .map_err(|e| ExtractionError::Docx {
            file: file_name.to_string(),
            message: e.to_string(),
        })
}

fn read_document_xml(data: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut document_file = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;
    Ok(xml)
}

fn paragraphs_from_xml(xml: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"w:tab" {
                    current.push('\t');
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    let line = current.trim();
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                    current.clear();
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Event::Text(e) if in_text_run => {
                current.push_str(&e.xml_content()?);
            }
            Event::GeneralRef(e) if in_text_run => {
                if let Some(ch) = e.resolve_char_ref()? {
                    current.push(ch);
                } else if let Some(value) = resolve_predefined_entity(&e.decode()?) {
                    current.push_str(value);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(lines)
}
