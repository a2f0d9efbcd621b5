use super::ExtractionError;

/// Extracts the text of every page, in page order.
///
/// Each page's text fragments are collapsed onto one line joined by single
/// spaces and every page is terminated by a newline.
pub fn extract_pdf_text(file_name: &str, data: &[u8]) -> Result<String, ExtractionError> {
    let pages =
        pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| ExtractionError::Pdf {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

    Ok(join_pages(pages))
}

fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(&join_fragments(page.as_ref()));
        text.push('\n');
    }
    text
}

fn join_fragments(page: &str) -> String {
    page.lines()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
