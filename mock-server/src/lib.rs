//! In-memory todo service speaking the same JSON contract as the real
//! backend. Used by integration tests and for running the client locally.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const MAX_TITLE_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Body of both `POST /todos` and `PUT /todos/{id}`.
#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Insertion-ordered, so `GET /todos` answers in creation order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(todos));
    Router::new()
        .route("/", get(root))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

/// The two records a fresh local server starts with.
pub fn sample_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: "1".to_string(),
            title: "Learn Rust".to_string(),
            completed: false,
        },
        Todo {
            id: "2".to_string(),
            title: "Build Todo App".to_string(),
            completed: false,
        },
    ]
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "todo API listening");
    }
    axum::serve(listener, app).await
}

fn valid_title(title: &str) -> bool {
    let title = title.trim();
    !title.is_empty() && title.chars().count() <= MAX_TITLE_CHARS
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Todo API is running!" }))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if !valid_title(&input.title) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        completed: input.completed,
    };
    debug!(id = %todo.id, "created todo");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    if !valid_title(&input.title) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.completed = input.completed;
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
