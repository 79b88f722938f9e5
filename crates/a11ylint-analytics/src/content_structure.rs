//! Content structure analyzer - element counts and composition ratios.

use a11ylint_core::{
    Analyzer, AnalyzerResult, Document, ElementKind, ElementType, Metric, MetricCategory, NodeId,
};

/// Analyzer id for content-structure.
pub const ANALYZER_ID: &str = "content-structure";

/// Analyzer name for content-structure.
pub const ANALYZER_NAME: &str = "Content Structure";

/// Counts images, tables, headings, links, and paragraph text.
#[derive(Default)]
pub struct ContentStructureAnalyzer {
    image_count: usize,
    table_count: usize,
    heading_count: usize,
    link_count: usize,
    word_count: usize,
    para_count: usize,
}

impl ContentStructureAnalyzer {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Analyzer for ContentStructureAnalyzer {
    fn analyzer_id(&self) -> &'static str {
        ANALYZER_ID
    }

    fn analyzer_name(&self) -> &'static str {
        ANALYZER_NAME
    }

    fn category(&self) -> MetricCategory {
        MetricCategory::ContentStructure
    }

    fn element_types(&self) -> &'static [ElementType] {
        &[
            ElementType::Image,
            ElementType::Table,
            ElementType::Header,
            ElementType::Para,
            ElementType::Plain,
            ElementType::Link,
        ]
    }

    fn analyze(&mut self, doc: &Document, node: NodeId) {
        match doc.kind(node) {
            ElementKind::Image { .. } => self.image_count += 1,
            ElementKind::Table { .. } => self.table_count += 1,
            ElementKind::Header { .. } => self.heading_count += 1,
            ElementKind::Link { .. } => self.link_count += 1,
            ElementKind::Para | ElementKind::Plain => {
                self.para_count += 1;
                self.word_count += doc.stringify(node).split_whitespace().count();
            }
            _ => {}
        }
    }

    fn finalize(&mut self, _doc: &Document) -> AnalyzerResult {
        let category = MetricCategory::ContentStructure;
        let img_to_text = (self.image_count as f64 / (self.word_count.max(1)) as f64 * 1000.0
            * 100.0)
            .round()
            / 100.0;
        let heading_density = (self.heading_count as f64 / (self.para_count.max(1)) as f64
            * 100.0
            * 10.0)
            .round()
            / 10.0;

        let metrics = vec![
            Metric::new("image_count", "Images", self.image_count, category),
            Metric::new("table_count", "Tables", self.table_count, category),
            Metric::new("heading_count", "Headings", self.heading_count, category),
            Metric::new("link_count", "Links", self.link_count, category),
            Metric::new("image_to_text_ratio", "Image-to-Text Ratio", img_to_text, category)
                .with_unit("images per 1000 words")
                .with_interpretation("Higher values indicate more visual content"),
            Metric::new("heading_density", "Heading Density", heading_density, category)
                .with_unit("%")
                .with_interpretation("Headings-to-paragraphs. Higher = organized"),
        ];
        AnalyzerResult::new(ANALYZER_ID, ANALYZER_NAME, category, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(doc: &Document) -> AnalyzerResult {
        let mut analyzer = ContentStructureAnalyzer::new();
        let interests = analyzer.element_types().to_vec();
        for node in doc.preorder() {
            if interests.contains(&doc.kind(node).element_type()) {
                analyzer.analyze(doc, node);
            }
        }
        analyzer.finalize(doc)
    }

    #[test]
    fn counts_each_element_kind() {
        let mut doc = Document::new();
        let root = doc.root();

        let header = doc.alloc(ElementKind::Header { level: 1 });
        let title = doc.alloc_str("Title");
        doc.append_child(header, title);
        doc.append_child(root, header);

        let para = doc.alloc(ElementKind::Para);
        let text = doc.alloc_str("four words of text");
        doc.append_child(para, text);
        let img = doc.alloc(ElementKind::Image {
            url: "x.png".to_string(),
            title: String::new(),
            attrs: Default::default(),
        });
        doc.append_child(para, img);
        doc.append_child(root, para);

        let table = doc.alloc(ElementKind::Table {
            caption: None,
            header: None,
            rows: vec![],
        });
        doc.append_child(root, table);

        let result = run(&doc);
        assert_eq!(result.metric("image_count").unwrap().value.as_f64(), Some(1.0));
        assert_eq!(result.metric("table_count").unwrap().value.as_f64(), Some(1.0));
        assert_eq!(result.metric("heading_count").unwrap().value.as_f64(), Some(1.0));
        assert_eq!(
            result.metric("heading_density").unwrap().value.as_f64(),
            Some(100.0)
        );
    }

    #[test]
    fn image_ratio_is_per_thousand_words() {
        let mut doc = Document::new();
        let root = doc.root();
        let para = doc.alloc(ElementKind::Para);
        let words: String = vec!["word"; 100].join(" ");
        let text = doc.alloc_str(words);
        doc.append_child(para, text);
        let img = doc.alloc(ElementKind::Image {
            url: "x.png".to_string(),
            title: String::new(),
            attrs: Default::default(),
        });
        doc.append_child(para, img);
        doc.append_child(root, para);

        let result = run(&doc);
        assert_eq!(
            result.metric("image_to_text_ratio").unwrap().value.as_f64(),
            Some(10.0)
        );
    }

    #[test]
    fn empty_document_has_zero_counts() {
        let doc = Document::new();
        let result = run(&doc);
        assert_eq!(result.metric("image_count").unwrap().value.as_f64(), Some(0.0));
        assert_eq!(
            result.metric("image_to_text_ratio").unwrap().value.as_f64(),
            Some(0.0)
        );
    }
}
