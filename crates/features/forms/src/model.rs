//! Input-collection contract derived from server field schemas.

use crate::payload::{CreatePayload, serialize};
use crate::{CoreFields, CustomValue, FormError};
use csync_domain::{EntityRef, FieldKind, FieldSchema, RecordId};
use tracing::debug;

/// How one custom field collects its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSlot {
    Text,
    /// Exactly one of `options`; `allow_empty` adds an unselected sentinel.
    SingleChoice { options: Vec<String>, allow_empty: bool },
    /// Any subset of `options`.
    MultiChoice { options: Vec<String> },
}

impl InputSlot {
    #[must_use]
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text,
            FieldKind::SelectOne { options } => {
                Self::SingleChoice { options: options.clone(), allow_empty: true }
            },
            FieldKind::Radio { options } => {
                Self::SingleChoice { options: options.clone(), allow_empty: false }
            },
            FieldKind::Checkbox { options } => Self::MultiChoice { options: options.clone() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub slug: String,
    pub label: String,
    pub slot: InputSlot,
}

/// The creation form: fixed core fields plus one input per custom field, and the tag/list
/// catalogs selections are made from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    inputs: Vec<FieldInput>,
    tags: Vec<EntityRef>,
    lists: Vec<EntityRef>,
}

impl FormModel {
    #[must_use]
    pub fn build(schemas: &[FieldSchema], tags: Vec<EntityRef>, lists: Vec<EntityRef>) -> Self {
        let inputs = schemas
            .iter()
            .map(|schema| FieldInput {
                slug: schema.slug.clone(),
                label: schema.label.clone(),
                slot: InputSlot::for_kind(&schema.kind),
            })
            .collect::<Vec<_>>();
        debug!(inputs = inputs.len(), tags = tags.len(), lists = lists.len(), "form model built");
        Self { inputs, tags, lists }
    }

    #[must_use]
    pub fn inputs(&self) -> &[FieldInput] {
        &self.inputs
    }

    #[must_use]
    pub fn input(&self, slug: &str) -> Option<&FieldInput> {
        self.inputs.iter().find(|input| input.slug == slug)
    }

    #[must_use]
    pub fn tags(&self) -> &[EntityRef] {
        &self.tags
    }

    #[must_use]
    pub fn lists(&self) -> &[EntityRef] {
        &self.lists
    }

    /// Interprets textual answers (`slug=value` pairs) according to each field's slot.
    ///
    /// Checkbox answers may be comma-separated and may repeat the slug; selections merge.
    pub fn parse_answers<'a>(
        &self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Vec<(String, CustomValue)>, FormError> {
        let mut answers: Vec<(String, CustomValue)> = Vec::new();

        for (slug, raw) in pairs {
            let input = self.known(slug)?;
            let value = match &input.slot {
                InputSlot::Text => CustomValue::Text(raw.to_owned()),
                InputSlot::SingleChoice { .. } => {
                    CustomValue::Choice(Some(raw.trim().to_owned()).filter(|v| !v.is_empty()))
                },
                InputSlot::MultiChoice { .. } => CustomValue::Multi(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_owned)
                        .collect(),
                ),
            };

            match (answers.iter_mut().find(|(s, _)| s == slug), value) {
                (Some((_, CustomValue::Multi(existing))), CustomValue::Multi(more)) => {
                    existing.extend(more);
                },
                (Some((_, slot)), value) => *slot = value,
                (None, value) => answers.push((slug.to_owned(), value)),
            }
        }

        Ok(answers)
    }

    /// Validates answers against the schema and catalogs, then serializes.
    ///
    /// # Errors
    /// * [`FormError::Validation`] for a missing email.
    /// * [`FormError::UnknownField`] for a slug not in the schema.
    /// * [`FormError::InvalidOption`] for a choice outside the field's options, a value of
    ///   the wrong shape for its slot, or a tag/list id not in the catalog.
    pub fn submit(
        &self,
        core: &CoreFields,
        custom: Vec<(String, CustomValue)>,
        tag_ids: &[RecordId],
        list_ids: &[RecordId],
    ) -> Result<CreatePayload, FormError> {
        if core.email.trim().is_empty() {
            return Err(FormError::Validation { message: "Email is required".into(), context: None });
        }

        for (slug, value) in &custom {
            check_answer(self.known(slug)?, value)?;
        }
        check_selection("tags", &self.tags, tag_ids)?;
        check_selection("lists", &self.lists, list_ids)?;

        serialize(core, custom, tag_ids, list_ids)
    }

    fn known(&self, slug: &str) -> Result<&FieldInput, FormError> {
        self.input(slug)
            .ok_or_else(|| FormError::UnknownField { field: slug.to_owned(), context: None })
    }
}

/// Empty answers always pass; they are dropped at serialization.
fn check_answer(input: &FieldInput, value: &CustomValue) -> Result<(), FormError> {
    if value.is_empty() {
        return Ok(());
    }
    match (&input.slot, value) {
        (InputSlot::Text, CustomValue::Text(_)) => Ok(()),
        (InputSlot::SingleChoice { options, .. }, CustomValue::Choice(Some(choice))) => {
            contains(options, choice)
                .then_some(())
                .ok_or_else(|| FormError::invalid_option(&input.slug, choice))
        },
        (InputSlot::MultiChoice { options }, CustomValue::Multi(selected)) => selected
            .iter()
            .filter(|s| !s.trim().is_empty())
            .find(|s| !contains(options, s))
            .map_or(Ok(()), |bad| Err(FormError::invalid_option(&input.slug, bad))),
        (_, other) => Err(FormError::invalid_option(&input.slug, format!("{other:?}"))),
    }
}

fn contains(options: &[String], value: &str) -> bool {
    let value = value.trim();
    options.iter().any(|o| o == value)
}

fn check_selection(field: &str, catalog: &[EntityRef], ids: &[RecordId]) -> Result<(), FormError> {
    match ids.iter().find(|id| !catalog.iter().any(|entity| &entity.id == *id)) {
        Some(missing) => Err(FormError::invalid_option(field, missing.to_string())),
        None => Ok(()),
    }
}
