// Form fields are optional so a missing field reaches the store as NULL
// and is reported as a constraint failure instead of an extractor rejection.

// Struct representing the form body for creating a new Task
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateTaskSchema {
    pub content: Option<String>,
}

// Struct representing the form body for updating a Task
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UpdateTaskSchema {
    pub content: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReplaceUserSchema {
    pub username: Option<String>,
    pub password: Option<String>,
}
