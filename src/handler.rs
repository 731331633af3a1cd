use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};

use crate::{
    error::{AppError, AppResult},
    schema::{CreateTaskSchema, ReplaceUserSchema, UpdateTaskSchema},
    AppState,
};

const ADD_TASK_FAILED: &str = "There was an issue adding your task.";
const DELETE_TASK_FAILED: &str = "There was a problem deleting your task.";
const UPDATE_TASK_FAILED: &str = "There was a problem updating your task.";
const ADD_USER_FAILED: &str = "There was an issue adding the user.";

// Handler for the listing page, served on both `/` and `/user/`
pub async fn index(State(data): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let tasks = data.store.list_tasks().await?;
    let users = data.store.list_users().await?;
    Ok(Html(data.templates.index(&tasks, &users)?))
}

// Handler for creating a new Task
pub async fn create_task(
    State(data): State<Arc<AppState>>,
    Form(body): Form<CreateTaskSchema>,
) -> AppResult<Redirect> {
    data.store
        .insert_task(body.content.as_deref())
        .await
        .map_err(AppError::write(ADD_TASK_FAILED))?;
    Ok(Redirect::to("/"))
}

// Handler for deleting a Task by ID
pub async fn delete_task(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
) -> AppResult<Redirect> {
    data.store
        .delete_task(id)
        .await
        .map_err(AppError::write(DELETE_TASK_FAILED))?;
    Ok(Redirect::to("/"))
}

// Handler for the edit form of a Task
pub async fn edit_task(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
) -> AppResult<Html<String>> {
    let task = data.store.get_task(id).await?;
    Ok(Html(data.templates.update(&task)?))
}

// Handler for updating the content of a Task by ID
pub async fn update_task(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
    Form(body): Form<UpdateTaskSchema>,
) -> AppResult<Redirect> {
    data.store
        .update_task_content(id, body.content.as_deref())
        .await
        .map_err(AppError::write(UPDATE_TASK_FAILED))?;
    Ok(Redirect::to("/"))
}

// Handler for replacing the current user
pub async fn replace_user(
    State(data): State<Arc<AppState>>,
    Form(body): Form<ReplaceUserSchema>,
) -> AppResult<Redirect> {
    data.store
        .replace_user(body.username.as_deref(), body.password.as_deref())
        .await
        .map_err(AppError::write(ADD_USER_FAILED))?;
    Ok(Redirect::to("/"))
}
