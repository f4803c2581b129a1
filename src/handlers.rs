use crate::analytics::{chart_series, record_visit};
use crate::chart::layout_bars;
use crate::errors::AppError;
use crate::models::{
    SeriesResponse, SignupRejection, SignupRequest, SignupResponse, SummaryResponse, VisitResponse,
};
use crate::signup;
use crate::state::AppState;
use crate::storage::save_state;
use crate::ui::{render_dashboard, render_signup};
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Local, Utc};

/// Dashboard. Viewing the page is what counts as a visit, so this both
/// records the hit and renders the updated numbers.
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let date = today_string();
    let mut data = state.data.lock().await;
    record_visit(&mut data, &date);
    save_state(&state.data_path, &data).await?;

    let bars = layout_bars(&chart_series(&data, &date));
    Ok(Html(render_dashboard(
        &date,
        data.total_visits,
        data.today_visits,
        data.users.len() as u64,
        Local::now().year(),
        &bars,
    )))
}

pub async fn signup_page() -> Html<String> {
    Html(render_signup(
        &SignupRequest::default(),
        &Default::default(),
        false,
    ))
}

/// Form-encoded signup. Failures re-render the page with inline errors
/// beneath the offending fields; success shows the success box.
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(request): Form<SignupRequest>,
) -> Result<Html<String>, AppError> {
    let mut data = state.data.lock().await;
    let errors = signup::validate(&request, &data.users);
    if !errors.is_empty() {
        return Ok(Html(render_signup(&request, &errors, false)));
    }

    let user = signup::new_user(&request, Utc::now().to_rfc3339());
    data.users.push(user);
    save_state(&state.data_path, &data).await?;

    Ok(Html(render_signup(
        &SignupRequest::default(),
        &Default::default(),
        true,
    )))
}

pub async fn api_visit(State(state): State<AppState>) -> Result<Json<VisitResponse>, AppError> {
    let date = today_string();
    let mut data = state.data.lock().await;
    record_visit(&mut data, &date);
    save_state(&state.data_path, &data).await?;

    Ok(Json(VisitResponse {
        date,
        total_visits: data.total_visits,
        today_visits: data.today_visits,
    }))
}

pub async fn api_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let date = today_string();
    let data = state.data.lock().await;
    // Counts for a day that has not been visited yet read as zero.
    let today_visits = if data.day_stamp == date {
        data.today_visits
    } else {
        0
    };

    Json(SummaryResponse {
        date,
        total_visits: data.total_visits,
        today_visits,
        registered_users: data.users.len() as u64,
    })
}

pub async fn api_series(State(state): State<AppState>) -> Json<SeriesResponse> {
    let date = today_string();
    let data = state.data.lock().await;
    Json(SeriesResponse {
        points: chart_series(&data, &date),
    })
}

pub async fn api_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Response, AppError> {
    let mut data = state.data.lock().await;
    let errors = signup::validate(&request, &data.users);
    if !errors.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SignupRejection { errors }),
        )
            .into_response());
    }

    let user = signup::new_user(&request, Utc::now().to_rfc3339());
    let response = SignupResponse {
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.clone(),
    };
    data.users.push(user);
    save_state(&state.data_path, &data).await?;

    Ok(Json(response).into_response())
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
