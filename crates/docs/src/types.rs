use serde::{Deserialize, Serialize};

/// A document visible in a team's Drive folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: String,
    pub name: String,
    pub created_time: String,
}

/// A document fetched from the Docs API, flattened to plain text.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub title: String,
    pub text: String,
}

// Raw wire shapes. Google sends camelCase and omits empty fields.

#[derive(Debug, Deserialize)]
pub(crate) struct FileListResponse {
    #[serde(default)]
    pub files: Vec<DriveFileRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriveFileRaw {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub created_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentRaw {
    pub title: Option<String>,
    pub body: Option<DocumentBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentBody {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StructuralElement {
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParagraphElement {
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextRun {
    #[serde(default)]
    pub content: String,
}

/// Concatenates every text run in document order. Structural elements that
/// are not paragraphs (tables, section breaks) carry no text runs and are
/// skipped.
pub(crate) fn flatten_text(content: &[StructuralElement]) -> String {
    let mut text = String::new();
    for element in content {
        let Some(paragraph) = &element.paragraph else {
            continue;
        };
        for piece in &paragraph.elements {
            if let Some(run) = &piece.text_run {
                text.push_str(&run.content);
            }
        }
    }
    text
}
