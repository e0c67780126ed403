//! Discovery endpoint listing the available routes.

use axum::response::Html;

use super::API_PREFIX;

/// Routes advertised by `GET /`, relative to the API prefix
pub const ROUTES: [&str; 5] = ["precipitation", "stations", "tobs", "<start>", "<start>/<end>"];

/// Handle GET / requests
pub async fn index_handler() -> Html<String> {
    let mut body = String::from("Available Routes:<br/>");
    for route in ROUTES {
        // Placeholders would otherwise be read as tags
        let route = route.replace('<', "&lt;").replace('>', "&gt;");
        body.push_str(&format!("{}/{}<br/>", API_PREFIX, route));
    }
    Html(body)
}
