//! Generic form renderer
//!
//! Maps a [`FormSchema`] onto HTML controls. The browser script serializes
//! the controls back to JSON using the `data-kind` attribute of each one, so
//! the body the API receives has the types the schema expects.

use crate::backend::pages::layout::escape;
use crate::shared::forms::{FieldKind, FieldSpec, FormSchema};

/// Render a form with its default action and no prefilled values
pub fn render_form(schema: &FormSchema) -> String {
    render_form_with(schema, None, &[])
}

/// Render a form, optionally overriding the action and prefilling fields
pub fn render_form_with(schema: &FormSchema, action: Option<&str>, values: &[(&str, &str)]) -> String {
    let action = action.unwrap_or(schema.action);
    let redirect = schema
        .redirect
        .map(|r| format!(r#" data-redirect="{}""#, escape(r)))
        .unwrap_or_default();

    let controls: String = schema
        .fields
        .iter()
        .map(|field| {
            let value = values.iter().find(|(name, _)| *name == field.name).map(|(_, v)| *v);
            render_field(schema.id, field, value)
        })
        .collect();

    format!(
        r#"<form id="{id}" class="api-form" data-form action="{action}" method="post" data-method="{method}"{redirect}>
    <h2>{title}</h2>
{controls}    <button type="submit">{submit}</button>
</form>
"#,
        id = escape(schema.id),
        action = escape(action),
        method = escape(schema.method),
        title = escape(schema.title),
        submit = escape(schema.submit_label),
    )
}

fn render_field(form_id: &str, field: &FieldSpec, value: Option<&str>) -> String {
    let id = format!("{}-{}", form_id, field.name);
    let mut attrs = format!(r#"id="{}" name="{}""#, escape(&id), escape(field.name));
    if field.required {
        attrs.push_str(" required");
    }
    if let Some(min) = field.min_len {
        attrs.push_str(&format!(r#" minlength="{}""#, min));
    }
    if let Some(max) = field.max_len {
        attrs.push_str(&format!(r#" maxlength="{}""#, max));
    }
    if let Some(placeholder) = field.placeholder {
        attrs.push_str(&format!(r#" placeholder="{}""#, escape(placeholder)));
    }
    let value_attr = value
        .map(|v| format!(r#" value="{}""#, escape(v)))
        .unwrap_or_default();

    let control = match field.kind {
        FieldKind::Hidden => {
            return format!(r#"    <input type="hidden" data-kind="text" {attrs}{value_attr}>
"#);
        }
        FieldKind::TextArea => format!(
            r#"<textarea data-kind="text" {attrs}>{}</textarea>"#,
            escape(value.unwrap_or_default())
        ),
        FieldKind::Checkbox => {
            let checked = if value == Some("true") { " checked" } else { "" };
            format!(r#"<input type="checkbox" data-kind="checkbox" {attrs}{checked}>"#)
        }
        FieldKind::Number => format!(r#"<input type="number" step="any" data-kind="number" {attrs}{value_attr}>"#),
        FieldKind::DateTime => format!(r#"<input type="datetime-local" data-kind="datetime" {attrs}{value_attr}>"#),
        FieldKind::Select(options) => {
            let options: String = options
                .iter()
                .map(|option| {
                    let selected = if value == Some(*option) { " selected" } else { "" };
                    format!(r#"<option value="{0}"{1}>{0}</option>"#, escape(option), selected)
                })
                .collect();
            let placeholder = if field.required { "" } else { r#"<option value="">-</option>"# };
            format!(r#"<select data-kind="text" {attrs}>{placeholder}{options}</select>"#)
        }
        FieldKind::Email => format!(r#"<input type="email" data-kind="text" {attrs}{value_attr}>"#),
        FieldKind::Password => format!(r#"<input type="password" data-kind="text" {attrs}>"#),
        FieldKind::Text => format!(r#"<input type="text" data-kind="text" {attrs}{value_attr}>"#),
    };

    format!(
        r#"    <label for="{id}">{label}</label>
    {control}
"#,
        id = escape(&id),
        label = escape(field.label),
    )
}
