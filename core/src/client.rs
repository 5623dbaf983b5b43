//! Request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the base URL. Every endpoint is split into a
//! `build_*` method producing an [`HttpRequest`] and a `parse_*` method
//! consuming an [`HttpResponse`], so the client never does I/O itself.

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ErrorDetail, Todo, UpdateTodo, Welcome};

/// Stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url("/"))
    }

    pub fn build_list_todos(&self, skip: i64, limit: i64) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            self.url(&format!("/todos/?skip={skip}&limit={limit}")),
        )
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url(&format!("/todos/{id}")))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(input).map_err(ClientError::Serialization)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url("/todos/")).with_json(body))
    }

    pub fn build_update_todo(
        &self,
        id: i64,
        input: &UpdateTodo,
    ) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(input).map_err(ClientError::Serialization)?;
        Ok(HttpRequest::new(HttpMethod::Put, self.url(&format!("/todos/{id}"))).with_json(body))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url(&format!("/todos/{id}")))
    }

    pub fn build_list_by_status(&self, completed: bool) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            self.url(&format!("/todos/completed/{completed}")),
        )
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Welcome, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        parse_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(&response, 204)
    }

    pub fn parse_list_by_status(&self, response: HttpResponse) -> Result<Vec<Todo>, ClientError> {
        parse_json(response, 200)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ClientError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(ClientError::Deserialization)
}

/// Map an unexpected status to `NotFound` or `Http`, pulling the server's
/// `detail` out of the body when it is there.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ClientError> {
    if response.status == expected {
        return Ok(());
    }
    let detail = error_detail(&response.body);
    if response.status == 404 {
        return Err(ClientError::NotFound { detail });
    }
    Err(ClientError::Http {
        status: response.status,
        detail,
    })
}

fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorDetail>(body) {
        Ok(ErrorDetail {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorDetail { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}
