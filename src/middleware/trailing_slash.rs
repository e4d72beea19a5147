use crate::config::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// With `REMOVE_SLASH` on, `/api/main/` permanently redirects to `/api/main`.
pub async fn remove_trailing_slash(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if state.config.remove_slash {
        if let Some(location) = stripped_location(req.uri()) {
            return Redirect::permanent(&location).into_response();
        }
    }
    next.run(req).await
}

fn stripped_location(uri: &Uri) -> Option<String> {
    let path = uri.path();
    if path == "/" || !path.ends_with('/') {
        return None;
    }

    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    Some(match uri.query() {
        Some(query) => format!("{}?{}", trimmed, query),
        None => trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(uri: &str) -> Option<String> {
        stripped_location(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn strips_and_keeps_query() {
        assert_eq!(location("/api/main/").as_deref(), Some("/api/main"));
        assert_eq!(location("/api/main/?page=2").as_deref(), Some("/api/main?page=2"));
    }

    #[test]
    fn leaves_root_and_clean_paths() {
        assert_eq!(location("/"), None);
        assert_eq!(location("/api/main"), None);
    }
}
