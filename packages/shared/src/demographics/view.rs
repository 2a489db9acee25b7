use serde::Serialize;
use serde_json::Value;

use crate::demographics::extraction::{split_segments, Field, RecordContext, FIELD_RULES};

/// Placeholder shown for a field with no data at any known location.
pub const NO_DATA: &str = "Sin Dato";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayField {
    pub field: Field,
    pub label: &'static str,
    /// One chip per pipe-delimited segment, or just [`NO_DATA`].
    pub chips: Vec<String>,
    pub has_data: bool,
}

/// Displayable summary of a demographic record, one entry per known field in
/// a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicView {
    pub fields: Vec<DisplayField>,
}

impl DemographicView {
    pub fn from_record(record: &Value) -> Self {
        let ctx = RecordContext::new(record);
        let fields = FIELD_RULES
            .iter()
            .map(|rules| {
                let chips = ctx
                    .extract(rules.rules)
                    .map(|value| split_segments(&value))
                    .unwrap_or_default();
                let has_data = !chips.is_empty();
                DisplayField {
                    field: rules.field,
                    label: rules.label,
                    chips: if has_data {
                        chips
                    } else {
                        vec![NO_DATA.to_string()]
                    },
                    has_data,
                }
            })
            .collect();
        DemographicView { fields }
    }

    pub fn get(&self, field: Field) -> Option<&DisplayField> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// `Label: chip | chip`, one line per field.
    pub fn render_text(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{}: {}", f.label, f.chips.join(" | ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
