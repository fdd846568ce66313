//! Index page rendering
//!
//! The page is a fixed HTML template with `{{variable}}` placeholders.
//! Substitution is a single pass, so text inserted for one placeholder is
//! never expanded again.
//!
//! # Security
//!
//! - Only whitelisted variable names may appear in the template
//! - Text values are HTML-escaped
//! - JSON values have every `<` escaped so they cannot close the `<script>` block

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;

use crate::models::Icon;

lazy_static! {
    /// Pattern for matching template variables: {{variable_name}}
    static ref VAR_PATTERN: Regex = Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex pattern");
}

/// Template shipped with the crate
pub const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Variables the index template may reference
const ALLOWED_VARIABLES: &[&str] = &["app_name", "base_url", "icons", "config_json", "oauth_init"];

/// Template rendering errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template contains disallowed variables: {0}")]
    DisallowedVariables(String),

    #[error("Failed to serialize template value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Values substituted into the index page
#[derive(Debug, Clone)]
pub struct IndexFields<'a> {
    pub base_url: &'a str,
    pub app_name: &'a str,
    pub icons: &'a [Icon],
    pub config: &'a serde_json::Map<String, serde_json::Value>,
    pub oauth_config: Option<&'a serde_json::Value>,
}

/// Render the index page from [`INDEX_TEMPLATE`]
pub fn render_index(fields: &IndexFields<'_>) -> Result<String, TemplateError> {
    render_with(INDEX_TEMPLATE, fields)
}

/// Render an arbitrary template with the index page variables
pub fn render_with(template: &str, fields: &IndexFields<'_>) -> Result<String, TemplateError> {
    validate_template_variables(template)?;

    let config_json = script_json(fields.config)?;
    let oauth_init = match fields.oauth_config {
        Some(oauth) => format!("        ui.initOAuth({});", script_json(oauth)?),
        None => String::new(),
    };
    let icons = render_icons(fields.base_url, fields.icons);
    let base_url = escape_html(fields.base_url);
    let app_name = escape_html(fields.app_name);

    let rendered = VAR_PATTERN.replace_all(template, |caps: &Captures<'_>| {
        match &caps[1] {
            "app_name" => app_name.clone(),
            "base_url" => base_url.clone(),
            "icons" => icons.clone(),
            "config_json" => config_json.clone(),
            "oauth_init" => oauth_init.clone(),
            // Unreachable after validation
            _ => String::new(),
        }
    });

    Ok(rendered.into_owned())
}

/// Ensure every variable in the template is one we know how to fill
pub fn validate_template_variables(template: &str) -> Result<(), TemplateError> {
    let disallowed: Vec<&str> = VAR_PATTERN
        .captures_iter(template)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter(|name| !ALLOWED_VARIABLES.contains(name))
        .collect();

    if disallowed.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::DisallowedVariables(disallowed.join(", ")))
    }
}

/// Serialize a value for inline use inside a `<script>` element
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, TemplateError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn render_icons(base_url: &str, icons: &[Icon]) -> String {
    icons
        .iter()
        .map(|icon| {
            let href = match icon.href.strip_prefix("./") {
                Some(relative) => format!("{}/{}", base_url, relative),
                None => icon.href.clone(),
            };
            format!(
                "    <link rel=\"icon\" type=\"image/png\" href=\"{}\" sizes=\"{}\" />",
                escape_html(&href),
                escape_html(&icon.sizes)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
