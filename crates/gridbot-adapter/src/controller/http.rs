//! HTTP Controller - JSON API over the game service
//!
//! | Route                              | Success |
//! |------------------------------------|---------|
//! | `POST   /api/games`                | 201     |
//! | `GET    /api/games/{id}`           | 200     |
//! | `POST   /api/games/{id}/moves`     | 201     |
//! | `GET    /api/games/{id}/moves`     | 200     |
//! | `PUT    /api/games/{id}/process`   | 200     |
//! | `DELETE /api/games/{id}`           | 204     |
//!
//! Unknown games answer 404, unrecognized moves 400.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use gridbot_domain::{Direction, Grid, Position, SessionId, TimeCost};
use gridbot_usecase::{GameError, GameService, ProcessReport, SessionSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

type SharedService = Arc<GameService>;

/// Build the API router around a shared service
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/games", post(create_game))
        .route("/api/games/{game_id}", get(get_game_state).delete(end_game))
        .route("/api/games/{game_id}/moves", get(get_moves).post(add_move))
        .route("/api/games/{game_id}/process", put(process_moves))
        .with_state(service)
}

// ========== Wire types ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedGame {
    pub game_id: String,
}

/// Grid rows top to bottom, position as `[x, y]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub grid: Vec<Vec<String>>,
    pub position: [usize; 2],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMoveRequest {
    #[serde(rename = "move", default)]
    pub direction: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingMoves {
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    pub moves_processed: usize,
    pub new_position: [usize; 2],
    pub invalid_moves: Vec<String>,
    pub time_cost: TimeCost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn position_json(position: Position) -> [usize; 2] {
    [position.x(), position.y()]
}

fn grid_json(grid: &Grid) -> Vec<Vec<String>> {
    grid.rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.symbol().to_string()).collect())
        .collect()
}

fn symbols(moves: &[Direction]) -> Vec<String> {
    moves.iter().map(|m| m.symbol().to_string()).collect()
}

impl From<SessionSnapshot> for GameState {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            game_id: snapshot.id.to_string(),
            grid: grid_json(&snapshot.grid),
            position: position_json(snapshot.position),
        }
    }
}

impl From<ProcessReport> for ProcessResult {
    fn from(report: ProcessReport) -> Self {
        Self {
            moves_processed: report.moves_processed,
            new_position: position_json(report.new_position),
            invalid_moves: symbols(&report.invalid_moves),
            time_cost: report.time_cost,
        }
    }
}

// ========== Errors ==========

/// A [`GameError`] on its way to the client
#[derive(Debug)]
pub struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GameError::SessionNotFound { .. } => {
                (StatusCode::NOT_FOUND, "Game not found".to_string())
            }
            GameError::InvalidMoveValue { .. } => {
                (StatusCode::BAD_REQUEST, "Invalid move".to_string())
            }
            GameError::Repository(err) => {
                error!(error = %err, "session store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ========== Handlers ==========

async fn health() -> &'static str {
    "ok"
}

async fn create_game(
    State(service): State<SharedService>,
) -> Result<(StatusCode, Json<CreatedGame>), ApiError> {
    let id = service.create_session()?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedGame {
            game_id: id.to_string(),
        }),
    ))
}

async fn get_game_state(
    State(service): State<SharedService>,
    Path(game_id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let snapshot = service.session_state(&SessionId::new(game_id))?;
    Ok(Json(snapshot.into()))
}

/// The body is parsed leniently so that an unknown game is still a 404
/// whatever the client sent.
async fn add_move(
    State(service): State<SharedService>,
    Path(game_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let request: AddMoveRequest = serde_json::from_slice(&body).unwrap_or_default();
    let raw = request
        .direction
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();

    service.enqueue_move(&SessionId::new(game_id), raw).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody {
            message: "Move added to queue".to_string(),
        }),
    ))
}

async fn get_moves(
    State(service): State<SharedService>,
    Path(game_id): Path<String>,
) -> Result<Json<PendingMoves>, ApiError> {
    let moves = service.pending_moves(&SessionId::new(game_id))?;
    Ok(Json(PendingMoves {
        moves: symbols(&moves),
    }))
}

async fn process_moves(
    State(service): State<SharedService>,
    Path(game_id): Path<String>,
) -> Result<Json<ProcessResult>, ApiError> {
    let report = service.process_moves(&SessionId::new(game_id)).await?;
    Ok(Json(report.into()))
}

async fn end_game(
    State(service): State<SharedService>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.end_session(&SessionId::new(game_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
