//! DOCX content extraction using docx-rs.
//!
//! Produces the document's raw text: every paragraph, including those inside
//! table cells, in document order and each followed by a blank line. No
//! other reformatting is applied.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FormatKind};
use crate::Extractor;
use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};

/// DOCX content extractor using docx-rs library.
///
/// Wraps synchronous docx-rs calls in spawn_blocking to avoid blocking the
/// async runtime.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create new DOCX extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract text synchronously (called within spawn_blocking).
    fn extract_sync(content: &[u8]) -> ExtractResult<(String, usize)> {
        let docx = docx_rs::read_docx(content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let mut text = String::new();
        let mut paragraphs = 0;

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    Self::push_paragraph(&mut text, p);
                    paragraphs += 1;
                }
                DocumentChild::Table(t) => {
                    paragraphs += Self::push_table(&mut text, t);
                }
                _ => {
                    // Bookmarks, section properties and the like carry no text
                }
            }
        }

        Ok((text, paragraphs))
    }

    /// Run a parse on the blocking pool. A panic inside `parse` surfaces as
    /// a DOCX error rather than unwinding into the caller.
    async fn parse_blocking<T, F>(parse: F) -> ExtractResult<T>
    where
        F: FnOnce() -> ExtractResult<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(parse)
            .await
            .map_err(|e| ExtractError::Docx(format!("DOCX parser aborted: {}", e)))?
    }

    fn push_paragraph(out: &mut String, p: &docx_rs::Paragraph) {
        Self::push_paragraph_children(out, &p.children);
        out.push_str("\n\n");
    }

    fn push_paragraph_children(out: &mut String, children: &[ParagraphChild]) {
        for child in children {
            match child {
                ParagraphChild::Run(r) => {
                    for run_child in &r.children {
                        match run_child {
                            RunChild::Text(t) => out.push_str(&t.text),
                            RunChild::Tab(_) => out.push('\t'),
                            RunChild::Break(_) => out.push('\n'),
                            _ => {}
                        }
                    }
                }
                // Hyperlink children are ParagraphChild, so reuse same logic
                ParagraphChild::Hyperlink(h) => Self::push_paragraph_children(out, &h.children),
                _ => {}
            }
        }
    }

    /// Returns the number of paragraphs written.
    fn push_table(out: &mut String, t: &docx_rs::Table) -> usize {
        let mut paragraphs = 0;
        for row in &t.rows {
            let TableChild::TableRow(r) = row;
            for cell in &r.cells {
                let TableRowChild::TableCell(c) = cell;
                for content in &c.children {
                    match content {
                        TableCellContent::Paragraph(p) => {
                            Self::push_paragraph(out, p);
                            paragraphs += 1;
                        }
                        TableCellContent::Table(nested) => {
                            paragraphs += Self::push_table(out, nested);
                        }
                        _ => {}
                    }
                }
            }
        }
        paragraphs
    }
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let (text, paragraphs) = Self::parse_blocking(move || Self::extract_sync(&content)).await?;

        Ok(ExtractedContent::new(text, FormatKind::WordModern, self.name())
            .with_metadata("paragraphs", paragraphs)
            .with_metadata("original_size", content_len))
    }

    fn format(&self) -> FormatKind {
        FormatKind::WordModern
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}
