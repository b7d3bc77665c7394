use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::Reply;
use warp::http::StatusCode;
use warp::reply::Response;

use crate::auth::{AuthError, AuthService, ROLE_HEADER, USERNAME_HEADER, UserContext};
use crate::session_manager::{SessionError, SessionManager};
use game_core::GameCatalog;
use game_persistence::repositories::{ProgressRepository, UserRepository};
use game_types::{
    CompleteGameRequest, CompletionEvent, GameCategory, GameError, OpenSessionRequest,
    ProgressSummary, SignInRequest, SignUpRequest, WidgetInput,
};

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<u64>,
}

#[derive(Deserialize)]
struct GamesQuery {
    category: Option<String>,
}

pub mod auth;
pub mod config;
pub mod progress_recorder;
pub mod session_manager;

const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
    user_repository: Arc<UserRepository>,
    progress_repository: Arc<ProgressRepository>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let catalog = session_manager.catalog().clone();

    // Clone for filters
    let session_manager_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    let catalog_filter = warp::any().map({
        let catalog = catalog.clone();
        move || catalog.clone()
    });

    let auth_filter = warp::any().map({
        let auth_service = auth_service.clone();
        move || auth_service.clone()
    });

    let user_repository_filter = warp::any().map({
        let user_repository = user_repository.clone();
        move || user_repository.clone()
    });

    let progress_filter = warp::any().map({
        let progress_repository = progress_repository.clone();
        move || progress_repository.clone()
    });

    let user_context = warp::header::optional::<String>(USERNAME_HEADER)
        .and(warp::header::optional::<String>(ROLE_HEADER))
        .map(UserContext::from_headers);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Catalog endpoints
    let list_games = warp::path!("games")
        .and(warp::get())
        .and(warp::query::<GamesQuery>())
        .and(catalog_filter.clone())
        .and_then(handle_list_games);

    let get_game = warp::path!("games" / String)
        .and(warp::get())
        .and(catalog_filter.clone())
        .and_then(handle_get_game);

    // Session endpoints
    let open_session = warp::path!("sessions")
        .and(warp::post())
        .and(user_context.clone())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(session_manager_filter.clone())
        .and_then(handle_open_session);

    let get_session = warp::path!("sessions" / Uuid)
        .and(warp::get())
        .and(session_manager_filter.clone())
        .and_then(handle_get_session);

    let session_input = warp::path!("sessions" / Uuid / "input")
        .and(warp::post())
        .and(user_context.clone())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(session_manager_filter.clone())
        .and_then(handle_session_input);

    let close_session = warp::path!("sessions" / Uuid)
        .and(warp::delete())
        .and(user_context.clone())
        .and(session_manager_filter.clone())
        .and_then(handle_close_session);

    // Progress endpoints
    let complete_game = warp::path!("progress" / "complete")
        .and(warp::post())
        .and(user_context.clone())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(catalog_filter.clone())
        .and(user_repository_filter.clone())
        .and(progress_filter.clone())
        .and_then(handle_complete_game);

    let progress_summary = warp::path!("progress" / "summary")
        .and(warp::get())
        .and(user_context.clone())
        .and(progress_filter.clone())
        .and_then(handle_progress_summary);

    // Leaderboard endpoint
    let leaderboard = warp::path("leaderboard")
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(user_repository_filter.clone())
        .and_then(handle_leaderboard_request);

    // Auth endpoints
    let sign_up = warp::path!("auth" / "signup")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(auth_filter.clone())
        .and_then(handle_sign_up);

    let sign_in = warp::path!("auth" / "signin")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(auth_filter.clone())
        .and_then(handle_sign_in);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", USERNAME_HEADER, ROLE_HEADER])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    health
        .or(list_games)
        .or(get_game)
        .or(open_session)
        .or(get_session)
        .or(session_input)
        .or(close_session)
        .or(complete_game)
        .or(progress_summary)
        .or(leaderboard)
        .or(sign_up)
        .or(sign_in)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::log("eco_arcade"))
}

/// Turn warp rejections into the same `{"error": ...}` body the handlers use
async fn handle_rejection(err: warp::Rejection) -> Result<Response, Infallible> {
    let (status, message) =
        if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
            (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
        } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
            (StatusCode::BAD_REQUEST, format!("Invalid query: {}", e))
        } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
            (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            )
        } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
            (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected a JSON body".to_string(),
            )
        } else if let Some(e) = err.find::<warp::filters::cors::CorsForbidden>() {
            (StatusCode::FORBIDDEN, e.to_string())
        } else if err.is_not_found() {
            (StatusCode::NOT_FOUND, "Not found".to_string())
        } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
            (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            )
        } else {
            tracing::error!("Unhandled rejection: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        };

    let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
        GameError::InternalError { message }
    } else {
        GameError::InvalidInput { message }
    };
    Ok(error_reply(error, status))
}

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

fn error_reply(error: GameError, status: StatusCode) -> Response {
    json_reply(&serde_json::json!({ "error": error.message() }), status)
}

fn authentication_required() -> Response {
    error_reply(GameError::AuthenticationRequired, StatusCode::UNAUTHORIZED)
}

fn session_error_reply(err: SessionError) -> Response {
    match err {
        SessionError::NotFound(session_id) => error_reply(
            GameError::SessionNotFound {
                session_id: session_id.to_string(),
            },
            StatusCode::NOT_FOUND,
        ),
        SessionError::NotOwner(_) => error_reply(
            GameError::InvalidInput {
                message: err.to_string(),
            },
            StatusCode::FORBIDDEN,
        ),
    }
}

async fn handle_list_games(
    query: GamesQuery,
    catalog: Arc<GameCatalog>,
) -> Result<Response, warp::Rejection> {
    let Some(category) = query.category else {
        return Ok(json_reply(&catalog.list(), StatusCode::OK));
    };

    match GameCategory::parse(&category) {
        Some(category) => Ok(json_reply(&catalog.by_category(category), StatusCode::OK)),
        None => Ok(error_reply(
            GameError::InvalidInput {
                message: format!("Unknown category: {}", category),
            },
            StatusCode::BAD_REQUEST,
        )),
    }
}

async fn handle_get_game(
    game_id: String,
    catalog: Arc<GameCatalog>,
) -> Result<Response, warp::Rejection> {
    match catalog.lookup(&game_id) {
        Some(game) => Ok(json_reply(game, StatusCode::OK)),
        None => Ok(error_reply(
            GameError::GameNotFound { game_id },
            StatusCode::NOT_FOUND,
        )),
    }
}

async fn handle_open_session(
    context: Option<UserContext>,
    request: OpenSessionRequest,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    let Some(context) = context else {
        return Ok(authentication_required());
    };

    match session_manager.open_session(&context, request).await {
        Some(view) => Ok(json_reply(&view, StatusCode::CREATED)),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn handle_get_session(
    session_id: Uuid,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    match session_manager.get_session(session_id).await {
        Some(view) => Ok(json_reply(&view, StatusCode::OK)),
        None => Ok(session_error_reply(SessionError::NotFound(session_id))),
    }
}

async fn handle_session_input(
    session_id: Uuid,
    context: Option<UserContext>,
    input: WidgetInput,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    let Some(context) = context else {
        return Ok(authentication_required());
    };

    match session_manager
        .handle_input(session_id, &context, &input)
        .await
    {
        Ok(response) => Ok(json_reply(&response, StatusCode::OK)),
        Err(err) => Ok(session_error_reply(err)),
    }
}

async fn handle_close_session(
    session_id: Uuid,
    context: Option<UserContext>,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    let Some(context) = context else {
        return Ok(authentication_required());
    };

    match session_manager.close_session(session_id, &context).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Ok(session_error_reply(err)),
    }
}

async fn handle_complete_game(
    context: Option<UserContext>,
    request: CompleteGameRequest,
    catalog: Arc<GameCatalog>,
    user_repository: Arc<UserRepository>,
    progress_repository: Arc<ProgressRepository>,
) -> Result<Response, warp::Rejection> {
    let Some(context) = context else {
        return Ok(authentication_required());
    };

    let Some(game) = catalog.lookup(&request.game_id) else {
        return Ok(error_reply(
            GameError::GameNotFound {
                game_id: request.game_id,
            },
            StatusCode::NOT_FOUND,
        ));
    };

    if let Some(points) = request.points.filter(|points| *points != game.points) {
        tracing::warn!(
            "{} reported {} points for '{}', recording configured {}",
            context.username,
            points,
            game.id,
            game.points
        );
    }

    match user_repository.find_profile(&context.username).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_reply(
                GameError::InvalidInput {
                    message: format!("User not found: {}", context.username),
                },
                StatusCode::NOT_FOUND,
            ));
        }
        Err(err) => {
            tracing::error!("Failed to look up {}: {}", context.username, err);
            return Ok(error_reply(
                GameError::InternalError {
                    message: "Failed to record completion".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
    }

    let event = CompletionEvent {
        game_id: game.id.clone(),
        points: game.points,
        score_percent: request.score_percent.map(|score| score.min(100)),
    };

    if let Err(err) = progress_repository
        .record_completion(&context.username, &event, game.category)
        .await
    {
        tracing::error!(
            "Failed to record completion of '{}' for {}: {}",
            event.game_id,
            context.username,
            err
        );
        return Ok(error_reply(
            GameError::InternalError {
                message: "Failed to record completion".to_string(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    let summary = load_summary(&progress_repository, &context.username).await;
    Ok(json_reply(&summary, StatusCode::OK))
}

async fn handle_progress_summary(
    context: Option<UserContext>,
    progress_repository: Arc<ProgressRepository>,
) -> Result<Response, warp::Rejection> {
    let Some(context) = context else {
        return Ok(authentication_required());
    };

    let summary = load_summary(&progress_repository, &context.username).await;
    Ok(json_reply(&summary, StatusCode::OK))
}

/// The listing page polls this, so storage failures degrade to an empty summary
async fn load_summary(progress_repository: &ProgressRepository, username: &str) -> ProgressSummary {
    match progress_repository
        .summary(username, chrono::Utc::now())
        .await
    {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!("Failed to load progress summary for {}: {}", username, err);
            ProgressSummary::default()
        }
    }
}

async fn handle_leaderboard_request(
    query: LeaderboardQuery,
    user_repository: Arc<UserRepository>,
) -> Result<Response, warp::Rejection> {
    let limit = query.limit.unwrap_or(10).min(100); // Default 10, max 100

    match user_repository.get_leaderboard(limit).await {
        Ok(leaderboard) => Ok(json_reply(&leaderboard, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Failed to fetch leaderboard: {}", err);
            Ok(error_reply(
                GameError::InternalError {
                    message: "Failed to fetch leaderboard".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

fn auth_error_reply(err: AuthError) -> Response {
    match err {
        AuthError::InvalidInput(message) => {
            error_reply(GameError::InvalidInput { message }, StatusCode::BAD_REQUEST)
        }
        AuthError::UsernameTaken(username) => {
            error_reply(GameError::UsernameTaken { username }, StatusCode::CONFLICT)
        }
        AuthError::InvalidCredentials => {
            error_reply(GameError::InvalidCredentials, StatusCode::UNAUTHORIZED)
        }
        AuthError::Storage(err) => {
            tracing::error!("Auth storage failure: {}", err);
            error_reply(
                GameError::InternalError {
                    message: "Authentication failed".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

async fn handle_sign_up(
    request: SignUpRequest,
    auth_service: Arc<AuthService>,
) -> Result<Response, warp::Rejection> {
    match auth_service.sign_up(request).await {
        Ok(profile) => Ok(json_reply(&profile, StatusCode::CREATED)),
        Err(err) => Ok(auth_error_reply(err)),
    }
}

async fn handle_sign_in(
    request: SignInRequest,
    auth_service: Arc<AuthService>,
) -> Result<Response, warp::Rejection> {
    match auth_service.sign_in(request).await {
        Ok(profile) => Ok(json_reply(&profile, StatusCode::OK)),
        Err(err) => Ok(auth_error_reply(err)),
    }
}
