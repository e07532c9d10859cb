use crate::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let service = &state.config().service;
    format!(
        r#"Welcome to the Book Store API
Service: {name}
Version: {version}

Available endpoints:
  - GET    /isAlive                   - Liveness probe
  - GET    /info                      - Host name
  - GET    /version                   - Service version
  - GET    /echoWithDelay?message=M   - Echo M after a random 0-29s delay
  - GET    /randomError               - Random 200, 404 or 500
  - GET    /metrics                   - Prometheus metrics
  - GET    /api/books                 - List up to 5 books
  - GET    /api/books/{{isbn}}          - Fetch a book by ISBN
  - POST   /api/books?id=&isbn=&title=&price=&author_name=&author_lastname=
  - PUT    /api/books/{{isbn}}?id=&price= - Update a book's price by id
  - DELETE /api/deletebook?isbn=      - Delete every book with that ISBN
  - DELETE /api/deletebooks           - Delete all books
"#,
        name = service.name,
        version = service.version,
    )
}
