use crate::core::ControlId;
use crate::core::value::FieldValue;
use crate::form::Form;
use crate::form::payload::FormPayload;

/// One named input of a form. Fields with an empty name are rendered but
/// never submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    name: String,
    label: String,
    default: FieldValue,
    value: FieldValue,
}

impl FormField {
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            default: FieldValue::empty(),
            value: FieldValue::empty(),
        }
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        self.default = value.clone();
        self.value = value;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn default_value(&self) -> &FieldValue {
        &self.default
    }

    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
    }

    /// Mutable access to the text of a text field, `None` for file fields.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.value {
            FieldValue::Text(text) => Some(text),
            FieldValue::Binary(_) => None,
        }
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
    }
}

/// In-memory form container: an ordered list of fields behind a fixed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    id: ControlId,
    fields: Vec<FormField>,
}

impl FormState {
    pub fn new(id: impl Into<ControlId>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push_field(&mut self, field: FormField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn field_at_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    /// Sets the value of the named field. Returns `false` when no such field exists.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        let Some(field) = self.field_mut(name) else {
            return false;
        };
        field.set_value(value);
        true
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|field| field.value.as_text())
    }
}

impl Form for FormState {
    fn id(&self) -> ControlId {
        self.id.clone()
    }

    fn payload(&self) -> FormPayload {
        self.fields
            .iter()
            .filter(|field| !field.name.is_empty())
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect()
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }
}
