use crate::model::api::FieldErrorDto;

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn into_dto(self) -> FieldErrorDto {
        FieldErrorDto {
            field: self.field,
            message: self.message,
        }
    }
}
