//! Confirmation-form inspection.

use scraper::ElementRef;

use crate::error::{Result, ScrapeError};

/// One `<input>` of a form, with HTML defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// `type` attribute, `"text"` when absent.
    pub kind: String,
    pub name: Option<String>,
    /// `value` attribute, empty when absent.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDescriptor {
    /// Lower-cased `action`; empty means "submit to the page itself".
    pub action: String,
    /// Lower-cased `method`, `"post"` when absent.
    pub method: String,
    pub fields: Vec<FormField>,
}

impl FormDescriptor {
    /// Reduce fields to `(name, value)` pairs for submission.
    ///
    /// A repeated name keeps its first position and takes the last value.
    /// Fails on the first input without a name.
    pub fn submission_payload(&self) -> Result<Vec<(String, String)>> {
        let mut payload: Vec<(String, String)> = Vec::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            let name = field
                .name
                .as_ref()
                .ok_or(ScrapeError::MissingFieldName { index })?;
            match payload.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => v.clone_from(&field.value),
                None => payload.push((name.clone(), field.value.clone())),
            }
        }
        Ok(payload)
    }
}

pub fn inspect_form(form: ElementRef<'_>) -> FormDescriptor {
    let el = form.value();
    let fields = form
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "input")
        .map(|input| {
            let input = input.value();
            FormField {
                kind: input.attr("type").unwrap_or("text").to_string(),
                name: input.attr("name").map(str::to_string),
                value: input.attr("value").unwrap_or_default().to_string(),
            }
        })
        .collect();

    FormDescriptor {
        action: el.attr("action").unwrap_or_default().to_lowercase(),
        method: el.attr("method").unwrap_or("post").to_lowercase(),
        fields,
    }
}
