use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

/// Errors returned by route handlers, rendered as plain-text responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A write failed. `message` is the text shown to the client.
    #[error("{message}: {source}")]
    Write {
        message: &'static str,
        source: StoreError,
    },

    #[error("failed to load data: {0}")]
    Read(#[from] StoreError),

    #[error("failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl AppError {
    pub fn write(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Write { message, source }
    }
}

fn not_found(id: i64) -> Response {
    (StatusCode::NOT_FOUND, format!("Task with ID: {} not found", id)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Write { source: StoreError::NotFound { id }, .. }
            | AppError::Read(StoreError::NotFound { id }) => not_found(id),
            AppError::Write {
                message,
                source: StoreError::Constraint(detail),
            } => {
                tracing::warn!(%detail, "{}", message);
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            AppError::Write {
                message,
                source: StoreError::Database(err),
            } => {
                tracing::error!("Database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            AppError::Read(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was an issue loading your tasks.",
                )
                    .into_response()
            }
            AppError::Render(err) => {
                tracing::error!("Template error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was an issue rendering the page.",
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_task_is_404() {
        let err = AppError::write("there was a problem")(StoreError::NotFound { id: 4 });

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Task with ID: 4 not found");
    }

    #[tokio::test]
    async fn constraint_is_400_with_route_message() {
        let err = AppError::write("There was an issue adding your task.")(
            StoreError::Constraint("NOT NULL constraint failed: tasks.content".into()),
        );

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "There was an issue adding your task."
        );
    }

    #[tokio::test]
    async fn database_failure_is_500_without_details() {
        let err = AppError::write("error adding new user")(StoreError::Database(
            sqlx::Error::PoolClosed,
        ));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "error adding new user");
    }

    #[tokio::test]
    async fn failed_listing_is_500() {
        let err = AppError::Read(StoreError::Database(sqlx::Error::PoolClosed));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "There was an issue loading your tasks."
        );
    }

    #[tokio::test]
    async fn missing_task_lookup_is_404() {
        let err = AppError::from(StoreError::NotFound { id: 9 });

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Task with ID: 9 not found");
    }
}
