//! Server-rendered pages for the interactive recommender, built as plain
//! strings with interpolated text escaped.

use axum::{extract::State, response::Html};

use super::{params::RequestParams, AppState};

/// Input form page
pub async fn recommender_form() -> Html<String> {
    Html(page(
        "Movie recommender",
        r#"<h1>Movie recommender</h1>
<form action="/results" method="post">
  <label for="title">Movie title</label>
  <input type="text" id="title" name="title" placeholder="e.g. Batman">
  <button type="submit">Recommend</button>
</form>"#
            .to_string(),
    ))
}

/// Results page, or the excluded-title page when there is nothing to show.
///
/// A title can fail to produce results because it is missing, matches no
/// catalog entry, or was excluded from the trained vocabulary (too few
/// ratings); all three render the same way for the reader.
pub async fn results(State(state): State<AppState>, params: RequestParams) -> Html<String> {
    let Some(query) = params.get("title") else {
        return excluded_page("");
    };

    let result = state
        .recommender
        .recommend_by_title(query, state.recommendations);

    match result.resolved_title {
        Some(resolved) if !result.recommendations.is_empty() => {
            results_page(query, &resolved, &result.recommendations)
        }
        _ => excluded_page(query),
    }
}

fn results_page(query: &str, resolved: &str, recommendations: &[String]) -> Html<String> {
    let items: String = recommendations
        .iter()
        .map(|title| format!("  <li>{}</li>\n", escape(title)))
        .collect();

    Html(page(
        "Recommendations",
        format!(
            "<h1>Because you liked {}</h1>\n<p>Query: {}</p>\n<ol>\n{}</ol>\n<a href=\"/recommender\">Try another title</a>",
            escape(resolved),
            escape(query),
            items
        ),
    ))
}

fn excluded_page(query: &str) -> Html<String> {
    Html(page(
        "No recommendations",
        format!(
            "<h1>No recommendations for \u{201c}{}\u{201d}</h1>\n<p>The title was not found, or it has too few ratings to appear in the model.</p>\n<a href=\"/recommender\">Try another title</a>",
            escape(query)
        ),
    ))
}

fn page(title: &str, body: String) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
