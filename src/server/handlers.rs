// src/server/handlers.rs

use actix_web::{HttpResponse, web};
use tracing::{debug, warn};

use crate::engine::Agent;
use crate::errors::{AgentError, Result};
use crate::types::Command;

/// `PUT|POST /exec`
pub async fn exec(agent: web::Data<Agent>, body: web::Bytes) -> Result<HttpResponse> {
    let command = parse_command(&body)?;
    let submission = agent.exec(command).await?;
    Ok(HttpResponse::Ok().json(submission))
}

/// `GET /status/{id}`
pub async fn status(agent: web::Data<Agent>, id: web::Path<String>) -> Result<HttpResponse> {
    let exec = agent.status(&id)?;
    Ok(HttpResponse::Ok().json(exec))
}

/// `GET /status/` with no ID segment.
pub async fn missing_status_id() -> Result<HttpResponse> {
    Err(AgentError::BadRequest(
        "Invalid request, missing command ID".to_string(),
    ))
}

/// `PUT|POST /findandstop`
pub async fn find_and_stop(agent: web::Data<Agent>, body: web::Bytes) -> Result<HttpResponse> {
    let command = parse_command(&body)?;
    let exec = agent.find_and_stop(&command.command).await.map_err(|e| {
        warn!(process = %command.command, error = %e, "find-and-stop failed");
        e
    })?;
    Ok(HttpResponse::Ok().json(exec))
}

pub async fn only_put_or_post() -> Result<HttpResponse> {
    Err(AgentError::MethodNotAllowed(
        "Only PUT or POST methods are supported".to_string(),
    ))
}

pub async fn only_get() -> Result<HttpResponse> {
    Err(AgentError::MethodNotAllowed(
        "Only GET method is supported".to_string(),
    ))
}

fn parse_command(body: &[u8]) -> Result<Command> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting malformed command body");
        AgentError::BadRequest(e.to_string())
    })
}
