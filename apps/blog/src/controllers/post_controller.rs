//! Post pages: list, show, create, edit and delete
//!
//! Handlers never touch SQL. They validate through [`PostForm`], call the
//! [`PostStore`](crate::models::PostStore) and either render a page or
//! redirect.

use crate::models::today;
use crate::requests::{duplicate_title_error, field_messages, PostForm};
use crate::state::AppState;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use quill_http::{Context, HttpError, HttpResult, CSRF_FIELD};
use quill_validation::ValidationErrors;
use tracing::{debug, info, warn};

/// First `post_id` in a query string; later repeats are ignored
pub fn first_post_id(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(name, _)| name == "post_id")
        .map(|(_, value)| value.as_str())
}

/// Which form page is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    fn action(self) -> String {
        match self {
            FormMode::Create => "/add/".to_string(),
            FormMode::Edit(id) => format!("/edit/{}", id),
        }
    }
}

/// URL of the show page for post `id`
pub fn show_url(id: i64) -> String {
    format!("/post/?post_id={}", id)
}

/// Parse a post id from a path or query value
pub fn parse_post_id(raw: &str) -> HttpResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| HttpError::bad_request(format!("'{}' is not a valid post id.", raw)))
}

fn log_rejection(errors: &ValidationErrors, post_id: Option<i64>) {
    if errors.has_field_errors(CSRF_FIELD) {
        warn!(?post_id, "Rejected a post form with an invalid security token");
    } else {
        debug!(?post_id, errors = %errors, "Rejected post form");
    }
}

fn render_form(
    state: &AppState,
    form: &PostForm,
    errors: &ValidationErrors,
    mode: FormMode,
    status: StatusCode,
) -> HttpResult<Response> {
    let mut context = Context::new();
    context.insert("form", &form.with_token(&state.signer));
    context.insert("errors", &field_messages(errors));
    context.insert("is_edit", &matches!(mode, FormMode::Edit(_)));
    context.insert("action", &mode.action());

    let page = state.render("make-post.html", &context)?;
    Ok((status, page).into_response())
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> HttpResult<Html<String>> {
    let posts = state.posts.list_all().await?;

    let mut context = Context::new();
    context.insert("all_posts", &posts);
    state.render("index.html", &context)
}

/// `GET /post/?post_id=<id>`
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> HttpResult<Html<String>> {
    let raw = first_post_id(&query)
        .ok_or_else(|| HttpError::bad_request("A post_id is required."))?;
    let id = parse_post_id(raw)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| HttpError::not_found(format!("Post {}", id)))?;

    let mut context = Context::new();
    context.insert("post", &post);
    state.render("post.html", &context)
}

/// `GET /add/`
pub async fn create(State(state): State<AppState>) -> HttpResult<Response> {
    render_form(
        &state,
        &PostForm::default(),
        &ValidationErrors::new(),
        FormMode::Create,
        StatusCode::OK,
    )
}

/// `POST /add/`
pub async fn store(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> HttpResult<Response> {
    let fields = match form.validate_submission(&state.signer).await {
        Ok(fields) => fields,
        Err(errors) => {
            log_rejection(&errors, None);
            return render_form(
                &state,
                &form,
                &errors,
                FormMode::Create,
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    match state.posts.insert(&fields.into_new_post(today())).await {
        Ok(post) => {
            info!(post_id = post.id, "Post created");
            Ok(Redirect::to(&show_url(post.id)).into_response())
        }
        Err(err) if err.is_unique_violation_on("title") => {
            debug!(title = %form.title, "Rejected new post with a duplicate title");
            render_form(
                &state,
                &form,
                &duplicate_title_error(),
                FormMode::Create,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /edit/<post_id>`
pub async fn edit(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> HttpResult<Response> {
    let id = parse_post_id(&post_id)?;
    let post = state.posts.get_by_id(id).await?;

    render_form(
        &state,
        &PostForm::from_post(&post),
        &ValidationErrors::new(),
        FormMode::Edit(id),
        StatusCode::OK,
    )
}

/// `POST|PATCH /edit/<post_id>`
pub async fn update(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Form(form): Form<PostForm>,
) -> HttpResult<Response> {
    let id = parse_post_id(&post_id)?;
    // 404 before validation: there is nothing to edit
    state.posts.get_by_id(id).await?;

    let fields = match form.validate_submission(&state.signer).await {
        Ok(fields) => fields,
        Err(errors) => {
            log_rejection(&errors, Some(id));
            return render_form(
                &state,
                &form,
                &errors,
                FormMode::Edit(id),
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    match state.posts.update(id, &fields.into_changes()).await {
        Ok(post) => {
            info!(post_id = post.id, "Post updated");
            Ok(Redirect::to(&show_url(post.id)).into_response())
        }
        Err(err) if err.is_unique_violation_on("title") => {
            debug!(post_id = id, title = %form.title, "Rejected post edit with a duplicate title");
            render_form(
                &state,
                &form,
                &duplicate_title_error(),
                FormMode::Edit(id),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET|POST|DELETE /delete/<post_id>`
pub async fn destroy(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> HttpResult<Redirect> {
    let id = parse_post_id(&post_id)?;
    state.posts.delete(id).await?;

    info!(post_id = id, "Post deleted");
    Ok(Redirect::to("/"))
}
