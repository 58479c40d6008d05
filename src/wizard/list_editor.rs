//! Bounded editor for lists of uniform sub-records (FAQs, platforms, ...)

use super::field::{FieldValue, FormField};
use super::validation::{validate_fields, FieldErrors, ValidationContext};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Errors for every record, keyed by record id
pub type RecordErrors = BTreeMap<Uuid, FieldErrors>;

/// One entry in the list
#[derive(Debug, Clone)]
pub struct SubRecord {
    pub id: Uuid,
    pub fields: Vec<FormField>,
}

impl SubRecord {
    fn new(template: fn() -> Vec<FormField>) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields: template(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Record as a name -> text map, skipping empty fields
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|f| match f.value()? {
                FieldValue::Text(s) => Some((f.name.to_string(), s)),
                FieldValue::Number(n) => Some((f.name.to_string(), n.to_string())),
                FieldValue::Date(d) => Some((f.name.to_string(), d.to_string())),
                FieldValue::Records(_) => None,
            })
            .collect()
    }
}

/// Outcome of validating the whole list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListValidation {
    pub valid: bool,
    pub errors: RecordErrors,
}

/// Holds between `min` and `max` records built from a field template
#[derive(Debug, Clone)]
pub struct ListEditor {
    pub item_label: &'static str,
    template: fn() -> Vec<FormField>,
    min: usize,
    max: usize,
    records: Vec<SubRecord>,
    errors: RecordErrors,
    /// Selected record
    pub selected: usize,
    /// Focused field within the selected record
    pub active_field: usize,
}

impl ListEditor {
    /// Create an editor pre-populated with `min` blank records
    pub fn new(
        item_label: &'static str,
        min: usize,
        max: usize,
        template: fn() -> Vec<FormField>,
    ) -> Self {
        let max = max.max(min).max(1);
        let records = (0..min).map(|_| SubRecord::new(template)).collect();
        Self {
            item_label,
            template,
            min,
            max,
            records,
            errors: RecordErrors::new(),
            selected: 0,
            active_field: 0,
        }
    }

    pub fn records(&self) -> &[SubRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.min, self.max)
    }

    pub fn can_add(&self) -> bool {
        self.records.len() < self.max
    }

    pub fn can_remove(&self) -> bool {
        self.records.len() > self.min
    }

    pub fn errors(&self) -> &RecordErrors {
        &self.errors
    }

    pub fn error_for(&self, id: Uuid, field: &str) -> Option<&str> {
        self.errors
            .get(&id)
            .and_then(|e| e.get(field))
            .map(String::as_str)
    }

    /// Append a blank record. No-op once the upper bound is reached.
    pub fn add(&mut self) -> Option<Uuid> {
        if !self.can_add() {
            return None;
        }
        let record = SubRecord::new(self.template);
        let id = record.id;
        self.records.push(record);
        Some(id)
    }

    /// Delete the record with `id`. No-op if that would go below the lower bound.
    pub fn remove(&mut self, id: Uuid) -> bool {
        if !self.can_remove() {
            return false;
        }
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return false;
        };
        self.records.remove(index);
        self.errors.remove(&id);
        if index < self.selected {
            self.selected -= 1;
        } else if self.selected >= self.records.len() {
            self.selected = self.records.len().saturating_sub(1);
            self.active_field = 0;
        }
        true
    }

    /// Set one field of one record, clearing that field's error
    pub fn update(&mut self, id: Uuid, field: &str, value: impl Into<String>) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        let Some(target) = record.field_mut(field) else {
            return false;
        };
        target.set_input(value);
        self.clear_error(id, field);
        true
    }

    fn clear_error(&mut self, id: Uuid, field: &str) {
        if let Some(errors) = self.errors.get_mut(&id) {
            errors.remove(field);
            if errors.is_empty() {
                self.errors.remove(&id);
            }
        }
    }

    /// Check every record; the errors are also kept for display
    pub fn validate_all(&mut self, ctx: &ValidationContext) -> ListValidation {
        let errors: RecordErrors = self
            .records
            .iter()
            .filter_map(|r| {
                let errors = validate_fields(&r.fields, ctx);
                (!errors.is_empty()).then_some((r.id, errors))
            })
            .collect();
        self.errors = errors.clone();
        ListValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// All records as a payload value
    pub fn value(&self) -> FieldValue {
        FieldValue::Records(self.records.iter().map(SubRecord::to_map).collect())
    }

    pub fn selected_record(&self) -> Option<&SubRecord> {
        self.records.get(self.selected)
    }

    /// Remove the selected record (cursor helper for the UI)
    pub fn remove_selected(&mut self) -> bool {
        match self.selected_record().map(|r| r.id) {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    /// Add a record and move the cursor onto it
    pub fn add_and_select(&mut self) -> bool {
        if self.add().is_none() {
            return false;
        }
        self.selected = self.records.len() - 1;
        self.active_field = 0;
        true
    }

    /// Move focus to the next field, wrapping onto the next record
    pub fn next_field(&mut self) {
        let Some(record) = self.records.get(self.selected) else {
            return;
        };
        if self.active_field + 1 < record.fields.len() {
            self.active_field += 1;
        } else {
            self.active_field = 0;
            self.selected = (self.selected + 1) % self.records.len();
        }
    }

    /// Move focus to the previous field, wrapping onto the previous record
    pub fn prev_field(&mut self) {
        if self.records.is_empty() {
            return;
        }
        if self.active_field > 0 {
            self.active_field -= 1;
        } else {
            self.selected = if self.selected == 0 {
                self.records.len() - 1
            } else {
                self.selected - 1
            };
            self.active_field = self.records[self.selected].fields.len().saturating_sub(1);
        }
    }

    /// Focused field of the selected record
    pub fn active_field_mut(&mut self) -> Option<(Uuid, &mut FormField)> {
        let record = self.records.get_mut(self.selected)?;
        let id = record.id;
        record.fields.get_mut(self.active_field).map(|f| (id, f))
    }

    /// Run `edit` on the focused field, then clear its error
    pub fn edit_active(&mut self, edit: impl FnOnce(&mut FormField)) {
        let cleared = match self.active_field_mut() {
            Some((id, field)) => {
                edit(field);
                Some((id, field.name))
            }
            None => None,
        };
        if let Some((id, name)) = cleared {
            self.clear_error(id, name);
        }
    }

    /// Replace all records with stored values, respecting the bounds
    pub fn load(&mut self, entries: &[BTreeMap<String, String>]) {
        let mut records: Vec<SubRecord> = entries
            .iter()
            .take(self.max)
            .map(|entry| {
                let mut record = SubRecord::new(self.template);
                for field in &mut record.fields {
                    if let Some(value) = entry.get(field.name) {
                        field.set_input(value.clone());
                    }
                }
                record
            })
            .collect();
        while records.len() < self.min {
            records.push(SubRecord::new(self.template));
        }
        self.records = records;
        self.errors.clear();
        self.selected = 0;
        self.active_field = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn faq_fields() -> Vec<FormField> {
        vec![
            FormField::text("question", "Question").required(),
            FormField::multiline("answer", "Answer").required(),
        ]
    }

    fn faqs() -> ListEditor {
        ListEditor::new("FAQ", 1, 5, faq_fields)
    }

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap())
    }

    #[test]
    fn test_starts_with_minimum_records() {
        let editor = faqs();
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.bounds(), (1, 5));
    }

    #[test]
    fn test_add_is_noop_at_upper_bound() {
        let mut editor = faqs();
        for _ in 0..4 {
            assert!(editor.add().is_some());
        }
        assert_eq!(editor.len(), 5);
        assert!(editor.add().is_none());
        assert_eq!(editor.len(), 5);
    }

    #[test]
    fn test_remove_is_noop_at_lower_bound() {
        let mut editor = faqs();
        let id = editor.records()[0].id;
        assert!(!editor.remove(id));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut editor = faqs();
        editor.add();
        assert!(!editor.remove(Uuid::new_v4()));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut editor = faqs();
        let a = editor.add().unwrap();
        let b = editor.add().unwrap();
        assert_ne!(a, b);
        assert_ne!(editor.records()[0].id, a);
    }

    #[test]
    fn test_remove_clears_errors_for_record() {
        let mut editor = faqs();
        let second = editor.add().unwrap();
        let result = editor.validate_all(&ctx());
        assert!(!result.valid);
        assert!(editor.errors().contains_key(&second));

        assert!(editor.remove(second));
        assert!(!editor.errors().contains_key(&second));
        assert_eq!(editor.errors().len(), 1);
    }

    #[test]
    fn test_update_clears_field_error() {
        let mut editor = faqs();
        let id = editor.records()[0].id;
        editor.validate_all(&ctx());
        assert!(editor.error_for(id, "question").is_some());
        assert!(editor.error_for(id, "answer").is_some());

        assert!(editor.update(id, "question", "When is the TGE?"));
        assert!(editor.error_for(id, "question").is_none());
        assert!(editor.error_for(id, "answer").is_some());
        assert_eq!(
            editor.records()[0].field("question").unwrap().input,
            "When is the TGE?"
        );
    }

    #[test]
    fn test_update_unknown_field() {
        let mut editor = faqs();
        let id = editor.records()[0].id;
        assert!(!editor.update(id, "nope", "x"));
        assert!(!editor.update(Uuid::new_v4(), "question", "x"));
    }

    #[test]
    fn test_validate_all_reports_per_record() {
        let mut editor = faqs();
        let first = editor.records()[0].id;
        editor.update(first, "question", "Q");
        editor.update(first, "answer", "A");
        let second = editor.add().unwrap();
        editor.update(second, "question", "Only a question");

        let result = editor.validate_all(&ctx());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[&second].get("answer"),
            Some(&"Answer is required".to_string())
        );
    }

    #[test]
    fn test_validate_all_passes() {
        let mut editor = faqs();
        let id = editor.records()[0].id;
        editor.update(id, "question", "Q");
        editor.update(id, "answer", "A");
        let result = editor.validate_all(&ctx());
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_value_drops_ids() {
        let mut editor = faqs();
        let id = editor.records()[0].id;
        editor.update(id, "question", "Q");
        editor.update(id, "answer", "A\n");
        let FieldValue::Records(records) = editor.value() else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("question"), Some(&"Q".to_string()));
        assert_eq!(records[0].get("answer"), Some(&"A".to_string()));
        assert!(!records[0].contains_key("id"));
    }

    #[test]
    fn test_cursor_wraps_across_records() {
        let mut editor = faqs();
        editor.add();
        editor.next_field();
        assert_eq!((editor.selected, editor.active_field), (0, 1));
        editor.next_field();
        assert_eq!((editor.selected, editor.active_field), (1, 0));
        editor.prev_field();
        assert_eq!((editor.selected, editor.active_field), (0, 1));
    }

    #[test]
    fn test_remove_selected_moves_cursor() {
        let mut editor = faqs();
        editor.add_and_select();
        assert_eq!(editor.selected, 1);
        assert!(editor.remove_selected());
        assert_eq!(editor.selected, 0);
        assert!(!editor.remove_selected());
    }

    #[test]
    fn test_remove_before_cursor_keeps_selection() {
        let mut editor = faqs();
        let first = editor.records()[0].id;
        editor.add();
        let third = editor.add().unwrap();
        editor.selected = 2;
        editor.active_field = 1;

        assert!(editor.remove(first));
        assert_eq!(editor.selected, 1);
        assert_eq!(editor.active_field, 1);
        assert_eq!(editor.selected_record().map(|r| r.id), Some(third));
    }

    #[test]
    fn test_load_respects_bounds() {
        let mut editor = ListEditor::new("Platform", 1, 2, faq_fields);
        let entry: BTreeMap<String, String> =
            [("question".to_string(), "Q".to_string())].into_iter().collect();
        editor.load(&[entry.clone(), entry.clone(), entry]);
        assert_eq!(editor.len(), 2);

        editor.load(&[]);
        assert_eq!(editor.len(), 1);
    }
}
