//! Document converter boundary and the built-in native JSON format.
//!
//! Parsing markup into a tree and serializing it back are external
//! concerns; the engine only sees [`Document`]s. The one converter shipped
//! here speaks the native nested-JSON tree format through a DTO layer kept
//! separate from the arena model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::{AttrMap, Document, ElementKind, NodeId};

/// Errors from parsing or rendering a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source text could not be parsed.
    #[error("failed to parse document: {message}")]
    Parse {
        /// Parse failure message.
        message: String,
    },

    /// The tree could not be rendered.
    #[error("failed to render document: {message}")]
    Render {
        /// Render failure message.
        message: String,
    },

    /// The converter does not understand the requested format.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// The rejected format name.
        format: String,
    },
}

/// Converts between raw text and [`Document`] trees.
pub trait DocumentConverter: Send + Sync {
    /// Parses `source` in the given format into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the format is unsupported or the
    /// source is malformed.
    fn parse(&self, source: &str, format: &str) -> Result<Document, ConvertError>;

    /// Renders a tree back to text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the format is unsupported or
    /// serialization fails.
    fn render(&self, doc: &Document, format: &str) -> Result<String, ConvertError>;
}

/// DTO layer for the native JSON tree format.
///
/// These types exist solely for serde; they are converted to and from the
/// arena model below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentDto {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, String>,
    #[serde(default)]
    content: Vec<ElementDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
enum ElementDto {
    Para {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Plain {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Header {
        level: u8,
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Image {
        url: String,
        #[serde(default)]
        title: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: AttrMap,
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Link {
        url: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Table {
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        header: Option<Vec<Vec<String>>>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    OrderedList {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Strong {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Emph {
        #[serde(default)]
        content: Vec<ElementDto>,
    },
    Str {
        text: String,
    },
    Space,
    SoftBreak,
    Div {
        #[serde(default)]
        classes: Vec<String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: AttrMap,
        #[serde(default)]
        content: Vec<ElementDto>,
    },
}

/// Built-in converter for the native JSON tree format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl JsonConverter {
    /// Creates the converter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_format(format: &str) -> Result<(), ConvertError> {
        if format.is_empty() || format == "json" {
            Ok(())
        } else {
            Err(ConvertError::UnsupportedFormat {
                format: format.to_string(),
            })
        }
    }
}

impl DocumentConverter for JsonConverter {
    fn parse(&self, source: &str, format: &str) -> Result<Document, ConvertError> {
        Self::check_format(format)?;
        let dto: DocumentDto =
            serde_json::from_str(source).map_err(|e| ConvertError::Parse {
                message: e.to_string(),
            })?;

        let mut doc = Document::new();
        doc.metadata = dto.metadata;
        let root = doc.root();
        for element in &dto.content {
            let node = build_node(&mut doc, element);
            doc.append_child(root, node);
        }
        Ok(doc)
    }

    fn render(&self, doc: &Document, format: &str) -> Result<String, ConvertError> {
        Self::check_format(format)?;
        let dto = DocumentDto {
            metadata: doc.metadata.clone(),
            content: doc
                .children(doc.root())
                .iter()
                .map(|child| to_dto(doc, *child))
                .collect(),
        };
        serde_json::to_string_pretty(&dto).map_err(|e| ConvertError::Render {
            message: e.to_string(),
        })
    }
}

fn build_node(doc: &mut Document, dto: &ElementDto) -> NodeId {
    const NO_CHILDREN: &[ElementDto] = &[];
    let (kind, children) = match dto {
        ElementDto::Para { content } => (ElementKind::Para, content.as_slice()),
        ElementDto::Plain { content } => (ElementKind::Plain, content.as_slice()),
        ElementDto::Header { level, content } => (
            ElementKind::Header {
                level: (*level).clamp(1, 6),
            },
            content.as_slice(),
        ),
        ElementDto::Image {
            url,
            title,
            attrs,
            content,
        } => (
            ElementKind::Image {
                url: url.clone(),
                title: title.clone(),
                attrs: attrs.clone(),
            },
            content.as_slice(),
        ),
        ElementDto::Link {
            url,
            title,
            content,
        } => (
            ElementKind::Link {
                url: url.clone(),
                title: title.clone(),
            },
            content.as_slice(),
        ),
        ElementDto::Table {
            caption,
            header,
            rows,
        } => (
            ElementKind::Table {
                caption: caption.clone(),
                header: header.clone(),
                rows: rows.clone(),
            },
            NO_CHILDREN,
        ),
        ElementDto::BulletList { content } => (ElementKind::BulletList, content.as_slice()),
        ElementDto::OrderedList { content } => (ElementKind::OrderedList, content.as_slice()),
        ElementDto::ListItem { content } => (ElementKind::ListItem, content.as_slice()),
        ElementDto::Strong { content } => (ElementKind::Strong, content.as_slice()),
        ElementDto::Emph { content } => (ElementKind::Emph, content.as_slice()),
        ElementDto::Str { text } => (ElementKind::Str(text.clone()), NO_CHILDREN),
        ElementDto::Space => (ElementKind::Space, NO_CHILDREN),
        ElementDto::SoftBreak => (ElementKind::SoftBreak, NO_CHILDREN),
        ElementDto::Div {
            classes,
            attrs,
            content,
        } => (
            ElementKind::Div {
                classes: classes.clone(),
                attrs: attrs.clone(),
            },
            content.as_slice(),
        ),
    };

    let node = doc.alloc(kind);
    for child_dto in children {
        let child = build_node(doc, child_dto);
        doc.append_child(node, child);
    }
    node
}

fn to_dto(doc: &Document, node: NodeId) -> ElementDto {
    let content = || {
        doc.children(node)
            .iter()
            .map(|child| to_dto(doc, *child))
            .collect::<Vec<_>>()
    };
    match doc.kind(node) {
        // The root never occurs below itself.
        ElementKind::Doc => ElementDto::Para { content: content() },
        ElementKind::Para => ElementDto::Para { content: content() },
        ElementKind::Plain => ElementDto::Plain { content: content() },
        ElementKind::Header { level } => ElementDto::Header {
            level: *level,
            content: content(),
        },
        ElementKind::Image { url, title, attrs } => ElementDto::Image {
            url: url.clone(),
            title: title.clone(),
            attrs: attrs.clone(),
            content: content(),
        },
        ElementKind::Link { url, title } => ElementDto::Link {
            url: url.clone(),
            title: title.clone(),
            content: content(),
        },
        ElementKind::Table {
            caption,
            header,
            rows,
        } => ElementDto::Table {
            caption: caption.clone(),
            header: header.clone(),
            rows: rows.clone(),
        },
        ElementKind::BulletList => ElementDto::BulletList { content: content() },
        ElementKind::OrderedList => ElementDto::OrderedList { content: content() },
        ElementKind::ListItem => ElementDto::ListItem { content: content() },
        ElementKind::Strong => ElementDto::Strong { content: content() },
        ElementKind::Emph => ElementDto::Emph { content: content() },
        ElementKind::Str(text) => ElementDto::Str { text: text.clone() },
        ElementKind::Space => ElementDto::Space,
        ElementKind::SoftBreak => ElementDto::SoftBreak,
        ElementKind::Div { classes, attrs } => ElementDto::Div {
            classes: classes.clone(),
            attrs: attrs.clone(),
            content: content(),
        },
    }
}
