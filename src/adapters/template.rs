use std::sync::OnceLock;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::Value;

use crate::domain::{AppError, TemplateRenderer};

/// Template renderer using Minijinja.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        template_name: &str,
        template: &str,
        context: &Value,
    ) -> Result<String, AppError> {
        let env = ENV.get_or_init(|| {
            let mut env = Environment::new();
            env.set_undefined_behavior(UndefinedBehavior::Strict);
            env.set_auto_escape_callback(|_| AutoEscape::None);
            env
        });

        env.render_named_str(template_name, template, context)
            .map_err(|err| template_render_error(template_name, err))
    }
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn template_render_error(template_name: &str, err: minijinja::Error) -> AppError {
    let mut reason = err.to_string();
    if let Some(detail) = err.detail() {
        if !reason.contains(detail) {
            reason = format!("{} ({})", reason, detail);
        }
    }
    AppError::Render { template: template_name.to_string(), reason }
}
