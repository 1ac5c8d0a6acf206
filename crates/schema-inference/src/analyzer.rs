//! Schema inference over a sample of documents.

use crate::stats::FieldStats;
use panel_core::{classify, DocValue, Document, TypeTag};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Inferred summary keyed by dot-joined field path.
pub type SchemaSummary = BTreeMap<String, FieldSummary>;

/// Inferred type/shape summary of one field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    /// Dominant type: highest count, first-seen type on ties
    #[serde(rename = "type")]
    pub dominant: TypeTag,

    /// Count of the dominant type
    pub occurrences: usize,

    /// Documents in the sample
    pub total_docs: usize,

    /// `occurrences / total_docs`
    pub frequency: f64,

    /// Every observed type with its count, in first-seen order
    #[serde(serialize_with = "serialize_type_counts")]
    pub all_types: Vec<(TypeTag, usize)>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FieldStats>,
}

impl FieldSummary {
    /// Count recorded for `tag`, zero when never observed.
    pub fn count_of(&self, tag: &TypeTag) -> usize {
        self.all_types
            .iter()
            .find(|(t, _)| t == tag)
            .map_or(0, |(_, count)| *count)
    }
}

fn serialize_type_counts<S: Serializer>(
    counts: &[(TypeTag, usize)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (tag, count) in counts {
        map.serialize_entry(&tag.name(), count)?;
    }
    map.end()
}

#[derive(Debug, Default)]
struct FieldAccumulator {
    type_counts: Vec<(TypeTag, usize)>,
    stats: Option<FieldStats>,
}

impl FieldAccumulator {
    fn count(&mut self, tag: TypeTag) {
        match self.type_counts.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, count)) => *count += 1,
            None => self.type_counts.push((tag, 1)),
        }
    }

    fn dominant(&self) -> (TypeTag, usize) {
        let mut best: Option<&(TypeTag, usize)> = None;
        for entry in &self.type_counts {
            if best.map_or(true, |(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.cloned()
            .unwrap_or_else(|| (TypeTag::Other("mixed".to_string()), 0))
    }
}

/// Incremental schema analyzer.
///
/// Feed documents with [`observe`](Self::observe), then call
/// [`finish`](Self::finish). Nested objects are walked with their path as
/// prefix; arrays are counted as `array` and never descended into.
#[derive(Debug, Default)]
pub struct SchemaAnalyzer {
    enhanced: bool,
    documents: usize,
    fields: BTreeMap<String, FieldAccumulator>,
}

impl SchemaAnalyzer {
    /// Analyzer producing type summaries only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer that also collects per-field statistics.
    pub fn enhanced() -> Self {
        Self {
            enhanced: true,
            ..Self::default()
        }
    }

    /// Number of documents observed so far.
    pub fn documents_seen(&self) -> usize {
        self.documents
    }

    /// Walk one document.
    pub fn observe(&mut self, doc: &Document) {
        self.documents += 1;
        self.walk(doc, None);
    }

    fn walk(&mut self, doc: &Document, prefix: Option<&str>) {
        for (key, value) in doc {
            let path = match prefix {
                Some(parent) => format!("{parent}.{key}"),
                None => key.clone(),
            };

            let enhanced = self.enhanced;
            let acc = self.fields.entry(path.clone()).or_default();
            acc.count(classify(value));
            if enhanced {
                acc.stats.get_or_insert_with(FieldStats::default).observe(value);
            }

            if let DocValue::Object(nested) = value {
                self.walk(nested, Some(&path));
            }
        }
    }

    /// Reduce the observations to a summary per field path.
    pub fn finish(self) -> SchemaSummary {
        let total = self.documents;
        let summary: SchemaSummary = self
            .fields
            .into_iter()
            .map(|(path, acc)| {
                let (dominant, occurrences) = acc.dominant();
                let frequency = if total == 0 {
                    0.0
                } else {
                    occurrences as f64 / total as f64
                };
                let stats = acc.stats.map(|mut stats| {
                    stats.is_required = frequency >= 1.0;
                    stats
                });

                let field = FieldSummary {
                    dominant,
                    occurrences,
                    total_docs: total,
                    frequency,
                    all_types: acc.type_counts,
                    stats,
                };
                (path, field)
            })
            .collect();

        tracing::debug!(
            "Inferred {} field paths from {} documents",
            summary.len(),
            total
        );
        summary
    }
}

/// Infer a field summary over a document sample.
///
/// An empty sample yields an empty summary. With `enhanced` set every field
/// also carries [`FieldStats`].
pub fn analyze(documents: &[Document], enhanced: bool) -> SchemaSummary {
    let mut analyzer = if enhanced {
        SchemaAnalyzer::enhanced()
    } else {
        SchemaAnalyzer::new()
    };
    for doc in documents {
        analyzer.observe(doc);
    }
    analyzer.finish()
}
