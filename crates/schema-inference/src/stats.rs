//! Per-field statistics gathered during an enhanced inference walk.

use crate::patterns::{detect_pattern, detect_widget, PatternKind, Widget};
use panel_core::{classify, DocValue, TypeTag};
use serde::Serialize;

/// Distinct sampled values kept per field.
pub const MAX_UNIQUE_VALUES: usize = 10;

/// Example values kept per field.
pub const MAX_EXAMPLES: usize = 5;

/// Aggregate over the observed values of one field path.
///
/// `avg_length` and `avg_value` are streaming approximations: each new
/// observation is averaged with the previous result, `(prev + new) / 2`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_length: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_value: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unique_values: Vec<String>,

    pub is_required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternKind>,

    pub form_type: Widget,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,

    /// Tag of the first element of the last non-empty array observed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_items: Option<TypeTag>,
}

fn running_average(current: Option<f64>, value: f64) -> f64 {
    match current {
        Some(avg) => (avg + value) / 2.0,
        None => value,
    }
}

fn push_capped_unique(list: &mut Vec<String>, value: &str, cap: usize) {
    if list.len() < cap && !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}

impl FieldStats {
    /// Fold one observed value into the statistics.
    pub fn observe(&mut self, value: &DocValue) {
        match value {
            DocValue::String(s) => self.observe_string(s),
            DocValue::Int32(_) | DocValue::Int64(_) | DocValue::Double(_) => {
                if let Some(n) = value.as_f64() {
                    self.observe_number(n);
                }
            }
            DocValue::Bool(_) => self.form_type = Widget::Checkbox,
            DocValue::DateTime(_) => self.form_type = Widget::Date,
            DocValue::Array(items) => {
                self.form_type = Widget::Array;
                if let Some(first) = items.first() {
                    self.array_items = Some(classify(first));
                }
            }
            DocValue::ObjectId(hex) => {
                self.form_type = Widget::Text;
                if self.examples.len() < MAX_EXAMPLES {
                    self.examples.push(hex.clone());
                }
            }
            DocValue::Null
            | DocValue::Object(_)
            | DocValue::Binary(_)
            | DocValue::Other { .. } => self.form_type = Widget::Text,
        }
    }

    fn observe_string(&mut self, s: &str) {
        let length = s.chars().count();
        self.min_length = Some(self.min_length.map_or(length, |m| m.min(length)));
        self.max_length = Some(self.max_length.map_or(length, |m| m.max(length)));
        self.avg_length = Some(running_average(self.avg_length, length as f64));

        push_capped_unique(&mut self.unique_values, s, MAX_UNIQUE_VALUES);
        push_capped_unique(&mut self.examples, s, MAX_EXAMPLES);

        self.form_type = detect_widget(s);
        if let Some(pattern) = detect_pattern(s) {
            self.pattern = Some(pattern);
        }
    }

    fn observe_number(&mut self, n: f64) {
        self.min_value = Some(self.min_value.map_or(n, |m| m.min(n)));
        self.max_value = Some(self.max_value.map_or(n, |m| m.max(n)));
        self.avg_value = Some(running_average(self.avg_value, n));
        self.form_type = Widget::Number;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_stats() {
        let mut stats = FieldStats::default();
        for s in ["abc", "abcdef", "abc"] {
            stats.observe(&DocValue::string(s));
        }

        assert_eq!(stats.min_length, Some(3));
        assert_eq!(stats.max_length, Some(6));
        // (3 + 6) / 2 = 4.5, then (4.5 + 3) / 2 = 3.75
        assert_eq!(stats.avg_length, Some(3.75));
        assert_eq!(stats.unique_values, vec!["abc", "abcdef"]);
        assert_eq!(stats.examples, vec!["abc", "abcdef"]);
        assert_eq!(stats.form_type, Widget::Text);
        assert!(stats.min_value.is_none());
    }

    #[test]
    fn test_running_average_is_not_true_mean() {
        let mut stats = FieldStats::default();
        for n in [10, 20, 40] {
            stats.observe(&DocValue::Int32(n));
        }

        assert_eq!(stats.min_value, Some(10.0));
        assert_eq!(stats.max_value, Some(40.0));
        assert_eq!(stats.avg_value, Some(27.5));
        assert_eq!(stats.form_type, Widget::Number);
    }

    #[test]
    fn test_caps() {
        let mut stats = FieldStats::default();
        for i in 0..25 {
            stats.observe(&DocValue::String(format!("value-{i}")));
        }

        assert_eq!(stats.unique_values.len(), MAX_UNIQUE_VALUES);
        assert_eq!(stats.examples.len(), MAX_EXAMPLES);
        assert_eq!(stats.examples[0], "value-0");
    }

    #[test]
    fn test_pattern_sticks_once_detected() {
        let mut stats = FieldStats::default();
        stats.observe(&DocValue::string("ada@example.com"));
        stats.observe(&DocValue::string("not an email"));

        assert_eq!(stats.pattern, Some(PatternKind::Email));
        assert_eq!(stats.form_type, Widget::Text);
    }

    #[test]
    fn test_non_string_widgets() {
        let mut stats = FieldStats::default();
        stats.observe(&DocValue::Bool(true));
        assert_eq!(stats.form_type, Widget::Checkbox);

        stats.observe(&DocValue::Array(vec![DocValue::Int32(1), DocValue::string("x")]));
        assert_eq!(stats.form_type, Widget::Array);
        assert_eq!(stats.array_items, Some(TypeTag::Number));

        stats.observe(&DocValue::Array(vec![]));
        assert_eq!(stats.array_items, Some(TypeTag::Number));
    }

    #[test]
    fn test_identifier_examples_are_appended() {
        let mut stats = FieldStats::default();
        let hex = "65a1b2c3d4e5f60718293a4b".to_string();
        stats.observe(&DocValue::ObjectId(hex.clone()));
        stats.observe(&DocValue::ObjectId(hex.clone()));

        assert_eq!(stats.form_type, Widget::Text);
        assert_eq!(stats.examples, vec![hex.clone(), hex]);
        assert!(stats.unique_values.is_empty());
    }
}
