use axum::{
    Form, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{Html, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

const PAGE_TEMPLATE: &str = include_str!("../../templates/index.html");
const DOWNLOAD_FILENAME: &str = "research.txt";

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    pub content: String,
}

pub fn research_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(run_research))
        .route("/download", post(download))
}

async fn index() -> Html<String> {
    render_page(None)
}

#[instrument(skip_all)]
async fn run_research(
    State(state): State<AppState>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    let query = form
        .query
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty());

    // No query supplied: render the bare form without touching the agent.
    let Some(query) = query else {
        return render_page(None);
    };

    let report = state.service().run(query).await;
    render_page(Some(&report))
}

async fn download(Form(form): Form<DownloadForm>) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
        )
        .body(Body::from(form.content))
        .map_err(AppError::internal)
}

fn render_page(report: Option<&str>) -> Html<String> {
    let section = match report {
        Some(body) => {
            let escaped = escape_html(body);
            format!(
                "<section class=\"result\">\n\
                 <pre class=\"report\">{escaped}</pre>\n\
                 <form method=\"post\" action=\"/download\">\n\
                 <input type=\"hidden\" name=\"content\" value=\"{escaped}\">\n\
                 <button type=\"submit\">Download report</button>\n\
                 </form>\n\
                 </section>"
            )
        }
        None => String::new(),
    };

    Html(PAGE_TEMPLATE.replace("{{report_section}}", &section))
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
