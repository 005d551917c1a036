use crate::lifecycle::columns::{build_columns, Column, LifecycleFieldConfig, Translator};
use crate::lifecycle::fetcher::LifecycleResult;
use crate::lifecycle::normalizer::LifecycleEvent;
use crate::lifecycle::pagination::PaginationState;
use crate::lifecycle::LifecycleType;

/// Display state of one lifecycle page: which entity, which columns, the last
/// fetch result and the pager.
#[derive(Debug, Clone)]
pub struct LifecycleView {
    pub kind: LifecycleType,
    pub id: String,
    pub title: String,
    pub columns: Vec<Column>,
    pub custom_fields: Vec<Column>,
    pub selected_custom: Vec<String>,
    pub pagination: PaginationState,
    result: Option<LifecycleResult>,
}

impl LifecycleView {
    pub fn new(kind: LifecycleType, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            title: title.into(),
            columns: Vec::new(),
            custom_fields: Vec::new(),
            selected_custom: Vec::new(),
            pagination: PaginationState::default(),
            result: None,
        }
    }

    pub fn with_columns(mut self, fields: &LifecycleFieldConfig, translator: &dyn Translator) -> Self {
        self.columns = build_columns(&fields.mandatory_fields, translator);
        self.custom_fields = build_columns(&fields.custom_fields, translator);
        self
    }

    /// Replaces the displayed events with a fresh fetch and returns to page 1.
    pub fn apply(&mut self, result: LifecycleResult) {
        self.result = Some(result);
        self.pagination.set_page(1);
    }

    pub fn is_loaded(&self) -> bool {
        self.result.is_some()
    }

    /// False once a fetch came back invalid; the view then shows an error.
    pub fn show_result(&self) -> bool {
        self.result.as_ref().map_or(true, |r| r.valid)
    }

    pub fn events(&self) -> &[LifecycleEvent] {
        match &self.result {
            Some(result) => &result.events,
            None => &[],
        }
    }

    pub fn page(&self) -> &[LifecycleEvent] {
        self.pagination.current_slice(self.events())
    }

    pub fn toggle_custom(&mut self, field_id: &str) {
        if let Some(pos) = self.selected_custom.iter().position(|id| id == field_id) {
            self.selected_custom.remove(pos);
        } else if self.custom_fields.iter().any(|c| c.id == field_id) {
            self.selected_custom.push(field_id.to_string());
        }
    }

    /// Mandatory columns followed by the selected custom ones, in config order.
    pub fn displayed_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .chain(
                self.custom_fields
                    .iter()
                    .filter(|c| self.selected_custom.contains(&c.id)),
            )
            .collect()
    }
}
