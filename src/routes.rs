use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    error::{AppResult, no_store_headers},
    models::{MovieForm, ValidationErrors},
    session::SESSION_COOKIE,
    templates,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/Home/Index", get(home))
        .route("/Home/About", get(about))
        .route("/Home/Error", get(error))
        .route("/Movies", get(collection))
        .route("/Movies/Index", get(collection))
        .route("/Movies/Add", get(add_form).post(add_submit))
}

pub async fn home() -> Html<String> {
    Html(templates::home_page())
}

pub async fn about() -> Html<String> {
    Html(templates::about_page())
}

pub async fn error(headers: HeaderMap) -> Response {
    // The request-id middleware stamps x-request-id onto every request.
    let request_id = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let mut resp = Html(templates::error_page(request_id.as_deref())).into_response();
    no_store_headers(&mut resp);
    resp
}

pub async fn collection(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let movies = state.store.list_all().await?;

    let notice = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.take_notice(cookie.value()).await,
        None => None,
    };

    Ok(Html(templates::collection_page(&movies, notice.as_deref())))
}

pub async fn add_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (session_id, jar) = state.sessions.ensure(jar).await;
    let token = state.sessions.csrf_token(&session_id).await.unwrap_or_default();

    let page = templates::add_movie_page(&MovieForm::default(), &ValidationErrors::default(), &token);
    (jar, Html(page))
}

pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    let Some(session_id) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return Ok(bad_token_response());
    };
    if !state.sessions.verify_token(&session_id, &form.csrf_token).await {
        return Ok(bad_token_response());
    }

    match form.validate() {
        Err(errors) => {
            // Re-render with the submitted values and all violations; the
            // store is never touched on this path.
            let token = state.sessions.csrf_token(&session_id).await.unwrap_or_default();
            Ok(Html(templates::add_movie_page(&form, &errors, &token)).into_response())
        }
        Ok(new_movie) => {
            let movie = state.store.append(new_movie).await?;
            state
                .sessions
                .set_notice(
                    &session_id,
                    format!("\"{}\" has been added to the collection.", movie.title),
                )
                .await;
            Ok(Redirect::to("/Movies").into_response())
        }
    }
}

fn bad_token_response() -> Response {
    let mut resp =
        (StatusCode::BAD_REQUEST, Html(templates::error_page(None))).into_response();
    no_store_headers(&mut resp);
    resp
}
