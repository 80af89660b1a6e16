//! Article form validation
//!
//! Pure validation of the three editable article fields plus the form state
//! the calling layer keeps between edits and submission attempts. Nothing in
//! this module talks to the article API: a form that fails validation never
//! produces a payload, so it can never reach the repository.

use crate::article::{Article, ArticleFields, ArticlePayload, ArticleStatus};
use std::fmt;

/// Minimum trimmed length of a title
pub const TITLE_MIN_LENGTH: usize = 20;

/// Minimum trimmed length of the content
pub const CONTENT_MIN_LENGTH: usize = 200;

/// Minimum trimmed length of a category
pub const CATEGORY_MIN_LENGTH: usize = 3;

/// A validated article field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Content,
    Category,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Content, Field::Category];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Category => "category",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Content => "Content",
            Field::Category => "Category",
        }
    }

    pub fn minimum(&self) -> usize {
        match self {
            Field::Title => TITLE_MIN_LENGTH,
            Field::Content => CONTENT_MIN_LENGTH,
            Field::Category => CATEGORY_MIN_LENGTH,
        }
    }

    fn value<'a>(&self, fields: &'a ArticleFields) -> &'a str {
        match self {
            Field::Title => &fields.title,
            Field::Content => &fields.content,
            Field::Category => &fields.category,
        }
    }

    fn value_mut<'a>(&self, fields: &'a mut ArticleFields) -> &'a mut String {
        match self {
            Field::Title => &mut fields.title,
            Field::Content => &mut fields.content,
            Field::Category => &mut fields.category,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Empty after trimming
    Required,
    /// Non-empty but shorter than the field minimum
    TooShort,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::Required => "required",
            ValidationErrorKind::TooShort => "too_short",
        }
    }
}

/// A single field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationErrorKind,
}

impl FieldError {
    pub fn message(&self) -> String {
        match self.kind {
            ValidationErrorKind::Required => format!("{} is required", self.field.label()),
            ValidationErrorKind::TooShort => format!(
                "{} must be at least {} characters",
                self.field.label(),
                self.field.minimum()
            ),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of validating a form, one optional error slot per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub title: Option<FieldError>,
    pub content: Option<FieldError>,
    pub category: Option<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.slot(field).as_ref()
    }

    /// Errors in form order (title, content, category)
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        [&self.title, &self.content, &self.category]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
    }

    pub fn clear(&mut self, field: Field) {
        *self.slot_mut(field) = None;
    }

    fn slot(&self, field: Field) -> &Option<FieldError> {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
            Field::Category => &self.category,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<FieldError> {
        match field {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
            Field::Category => &mut self.category,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors().map(FieldError::message).collect();
        f.write_str(&messages.join("; "))
    }
}

fn check_field(field: Field, value: &str) -> Option<FieldError> {
    let length = value.trim().chars().count();

    let kind = if length == 0 {
        ValidationErrorKind::Required
    } else if length < field.minimum() {
        ValidationErrorKind::TooShort
    } else {
        return None;
    };

    Some(FieldError { field, kind })
}

/// Validate all three fields independently
pub fn validate(fields: &ArticleFields) -> ValidationResult {
    let mut result = ValidationResult::default();
    for field in Field::ALL {
        *result.slot_mut(field) = check_field(field, field.value(fields));
    }
    result
}

/// Form state held by whichever view is creating or editing an article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    fields: ArticleFields,
    errors: ValidationResult,
}

impl ArticleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: ArticleFields) -> Self {
        Self {
            fields,
            errors: ValidationResult::default(),
        }
    }

    /// Prefill the form with an existing article
    pub fn from_article(article: &Article) -> Self {
        Self::from_fields(article.fields())
    }

    pub fn fields(&self) -> &ArticleFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Replace a field value, dropping any error previously shown for it
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        *field.value_mut(&mut self.fields) = value.into();
        self.errors.clear(field);
    }

    /// Validate the current values and build the submission payload
    ///
    /// Validation runs on every call. The typed values are kept either way so
    /// a failed attempt can be corrected and resubmitted.
    pub fn submit(&mut self, status: ArticleStatus) -> Result<ArticlePayload, ValidationResult> {
        self.errors = validate(&self.fields);
        if self.errors.is_valid() {
            Ok(self.fields.clone().into_payload(status))
        } else {
            Err(self.errors.clone())
        }
    }
}
