use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::json;

use crate::model::{Task, User};

// Row shape handed to the listing template
#[derive(Debug, serde::Serialize)]
struct TaskRow<'a> {
    id: i64,
    content: &'a str,
    added: String,
}

impl<'a> From<&'a Task> for TaskRow<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id,
            content: &task.content,
            added: task.date_created.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Server-side HTML templates, compiled once at startup.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string("index", include_str!("../templates/index.hbs"))?;
        registry.register_template_string("update", include_str!("../templates/update.hbs"))?;
        Ok(Self { registry })
    }

    /// Task listing plus the current user.
    pub fn index(&self, tasks: &[Task], users: &[User]) -> Result<String, RenderError> {
        let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
        self.registry
            .render("index", &json!({ "tasks": rows, "users": users }))
    }

    /// Edit form for a single task.
    pub fn update(&self, task: &Task) -> Result<String, RenderError> {
        self.registry.render("update", &json!({ "task": task }))
    }
}
