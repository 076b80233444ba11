use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use lifegrid::config::Params;
use lifegrid::patterns::PatternKind;
use lifegrid::{LifeError, RunState, Session, render};

const CELL_PX: usize = 10;

type AppState = Arc<Mutex<Session>>;

#[derive(Deserialize)]
struct NewSessionRequest {
    width: Option<usize>,
    height: Option<usize>,
    initial_speed: Option<u32>,
    alive_probability: Option<f64>,
    pattern: Option<String>,
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct CellRequest {
    row: isize,
    col: isize,
}

#[derive(Deserialize)]
struct PlaceRequest {
    row: isize,
    col: isize,
    pattern: Option<String>,
}

#[derive(Deserialize)]
struct PatternRequest {
    pattern: String,
}

#[derive(Deserialize)]
struct RandomizeRequest {
    probability: Option<f64>,
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: u32,
}

#[derive(Serialize)]
struct Snapshot {
    width: usize,
    height: usize,
    rows: Vec<Vec<u8>>,
    live: usize,
    generation: u64,
    state: RunState,
    running: bool,
    speed: u32,
    pattern: PatternKind,
    /// Whether the last request changed anything.
    changed: bool,
    data_url: String,
}

enum ApiError {
    Life(LifeError),
    Internal(String),
}

impl From<LifeError> for ApiError {
    fn from(e: LifeError) -> Self {
        ApiError::Life(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Life(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        warn!("request failed: {message}");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

type ApiResult = Result<Json<Snapshot>, ApiError>;

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .map_err(|e| ApiError::Internal(format!("PNG encode failed: {e}")))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn snapshot(session: &Session, changed: bool) -> Result<Snapshot, ApiError> {
    let grid = session.grid();
    let (width, height) = grid.dimensions();
    let (img_w, img_h) = render::image_size(grid, CELL_PX);
    let data_url = encode_png(&render::render_grid(grid, CELL_PX), img_w, img_h)?;

    Ok(Snapshot {
        width,
        height,
        rows: grid
            .rows()
            .map(|r| r.iter().map(|&c| c as u8).collect())
            .collect(),
        live: session.live_cells(),
        generation: session.generation(),
        state: session.state(),
        running: session.is_running(),
        speed: session.speed(),
        pattern: session.pattern(),
        changed,
        data_url,
    })
}

fn parse_pattern(name: Option<&str>) -> Result<Option<PatternKind>, LifeError> {
    name.map(str::parse).transpose()
}

/// Lock the session and run `op` plus the snapshot render on the blocking
/// pool. `op` returns whether it changed anything.
async fn with_session<F>(state: &AppState, op: F) -> ApiResult
where
    F: FnOnce(&mut Session) -> Result<bool, ApiError> + Send + 'static,
{
    let mut session = state.clone().lock_owned().await;
    let snap = tokio::task::spawn_blocking(move || {
        let changed = op(&mut session)?;
        snapshot(&session, changed)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("session worker failed: {e}")))??;
    Ok(Json(snap))
}

async fn state_handler(State(state): State<AppState>) -> ApiResult {
    with_session(&state, |_| Ok(false)).await
}

async fn new_session_handler(
    State(state): State<AppState>,
    Json(req): Json<NewSessionRequest>,
) -> ApiResult {
    let defaults = Params::default();
    let params = Params {
        width: req.width.unwrap_or(defaults.width),
        height: req.height.unwrap_or(defaults.height),
        initial_speed: req.initial_speed.unwrap_or(defaults.initial_speed),
        alive_probability: req.alive_probability.unwrap_or(defaults.alive_probability),
        pattern: parse_pattern(req.pattern.as_deref())?.unwrap_or(defaults.pattern),
        seed: req.seed.or(defaults.seed),
    };
    with_session(&state, move |session| {
        *session = Session::new(&params)?;
        info!("new {}x{} session", params.width, params.height);
        Ok(true)
    })
    .await
}

async fn toggle_handler(State(state): State<AppState>, Json(req): Json<CellRequest>) -> ApiResult {
    with_session(&state, move |session| Ok(session.toggle(req.row, req.col)?)).await
}

async fn place_handler(State(state): State<AppState>, Json(req): Json<PlaceRequest>) -> ApiResult {
    let kind = parse_pattern(req.pattern.as_deref())?;
    with_session(&state, move |session| Ok(session.place(req.row, req.col, kind)?)).await
}

async fn pattern_handler(
    State(state): State<AppState>,
    Json(req): Json<PatternRequest>,
) -> ApiResult {
    let kind: PatternKind = req.pattern.parse()?;
    with_session(&state, move |session| {
        session.set_pattern(kind);
        Ok(true)
    })
    .await
}

async fn randomize_handler(
    State(state): State<AppState>,
    Json(req): Json<RandomizeRequest>,
) -> ApiResult {
    with_session(&state, move |session| Ok(session.randomize(req.probability)?)).await
}

async fn clear_handler(State(state): State<AppState>) -> ApiResult {
    with_session(&state, |session| {
        session.clear()?;
        Ok(true)
    })
    .await
}

async fn start_handler(State(state): State<AppState>) -> ApiResult {
    with_session(&state, |session| Ok(session.start())).await
}

async fn stop_handler(State(state): State<AppState>) -> ApiResult {
    with_session(&state, |session| Ok(session.stop())).await
}

async fn step_handler(State(state): State<AppState>) -> ApiResult {
    with_session(&state, |session| Ok(session.step())).await
}

async fn speed_handler(State(state): State<AppState>, Json(req): Json<SpeedRequest>) -> ApiResult {
    with_session(&state, move |session| {
        session.set_speed(req.speed)?;
        Ok(true)
    })
    .await
}

/// Advance the session at its current speed. The speed is re-read every tick.
async fn ticker(state: AppState) {
    loop {
        let interval = state.lock().await.tick_interval();
        tokio::time::sleep(interval).await;
        let mut session = state.clone().lock_owned().await;
        if let Err(e) = tokio::task::spawn_blocking(move || session.tick()).await {
            warn!("tick failed: {e}");
        }
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/state", get(state_handler))
        .route("/api/new", post(new_session_handler))
        .route("/api/toggle", post(toggle_handler))
        .route("/api/place", post(place_handler))
        .route("/api/pattern", post(pattern_handler))
        .route("/api/randomize", post(randomize_handler))
        .route("/api/clear", post(clear_handler))
        .route("/api/start", post(start_handler))
        .route("/api/stop", post(stop_handler))
        .route("/api/step", post(step_handler))
        .route("/api/speed", post(speed_handler))
        .fallback_service(ServeDir::new("frontend"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let session = Session::new(&Params::default()).map_err(std::io::Error::other)?;
    let state: AppState = Arc::new(Mutex::new(session));

    tokio::spawn(ticker(state.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("lifegrid server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await
}
