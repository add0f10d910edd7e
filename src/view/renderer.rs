//! Template renderer module
//!
//! Thin wrapper around a `minijinja::Environment` that resolves a logical
//! view name to a template file and merges the request's view-model into it.
//! HTML escaping happens here and only here; handlers never escape anything.

use minijinja::{path_loader, Environment};
use serde_json::Value;

use super::greeter::Greeter;
use super::model::Model;
use crate::config::TemplatesConfig;
use crate::session::Session;

/// Renders logical views against templates loaded from a directory.
///
/// The environment is rebuilt wholesale on template reload, so a `Renderer`
/// never mutates after construction.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Build a renderer for the configured template directory.
    ///
    /// The greeter service is wired in as the template function `greet`, and
    /// the chrono-backed `datefmt` filter is registered for timestamp
    /// formatting. Templates are loaded lazily from disk on first use.
    #[must_use]
    pub fn new(templates: &TemplatesConfig, greeter: Greeter) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(&templates.dir));
        env.add_function("greet", move |name: String| greeter.greet(&name));
        env.add_filter("datefmt", datefmt);
        Self { env }
    }

    /// Render a view with a prepared context.
    ///
    /// The view name maps to `<templates.dir>/<view>.html`. A missing
    /// template or a template-level failure surfaces as the engine's error;
    /// the dispatcher turns it into the framework-default 500.
    pub fn render(&self, view: &str, ctx: &Value) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(&format!("{view}.html"))?;
        template.render(ctx)
    }
}

/// Assemble the per-request render context.
///
/// Model attributes sit at the top level. Two reserved objects mirror the
/// built-in accessors of the template layer: `session` (the client's session
/// attributes) and `param` (decoded query parameters, first value wins).
#[must_use]
pub fn build_context(model: &Model, session: &Session, query: &[(String, String)]) -> Value {
    let mut ctx = serde_json::Map::new();
    for (key, value) in model.iter() {
        ctx.insert(key.to_string(), value.clone());
    }

    let session_attrs: serde_json::Map<String, Value> = session
        .attributes()
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    ctx.insert("session".to_string(), Value::Object(session_attrs));

    let mut params = serde_json::Map::new();
    for (key, value) in query {
        params
            .entry(key.clone())
            .or_insert_with(|| Value::String(value.clone()));
    }
    ctx.insert("param".to_string(), Value::Object(params));

    Value::Object(ctx)
}

/// `datefmt` filter: format an RFC 3339 timestamp with a strftime pattern.
fn datefmt(value: String, fmt: Option<String>) -> Result<String, minijinja::Error> {
    let parsed = chrono::DateTime::parse_from_rfc3339(&value).map_err(|e| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            format!("datefmt expects an RFC 3339 timestamp: {e}"),
        )
    })?;
    let fmt = fmt.unwrap_or_else(|| "%Y-%m-%d %H:%M:%S".to_string());
    Ok(parsed.format(&fmt).to_string())
}
