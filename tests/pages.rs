//! End-to-end dispatch tests
//!
//! Drive the full request pipeline in-process (no sockets): route lookup,
//! session resolution, page execution and rendering against the repository's
//! own `templates/` directory.

use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::{Method, Request, Response, StatusCode};
use template_tour::config::{AppState, Config};
use template_tour::handler::handle_request;

fn test_state() -> Arc<AppState> {
    let config = Config::load_from("no-such-config-file").unwrap();
    Arc::new(AppState::new(&config))
}

fn peer_addr() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

async fn request(
    state: &Arc<AppState>,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
) -> Response<http_body_util::Full<hyper::body::Bytes>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    let req = builder.body(()).unwrap();
    handle_request(req, Arc::clone(state), peer_addr())
        .await
        .unwrap()
}

async fn get_body(state: &Arc<AppState>, uri: &str) -> String {
    let resp = request(state, Method::GET, uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    body_string(resp).await
}

async fn body_string(resp: Response<http_body_util::Full<hyper::body::Bytes>>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_every_route_renders_html_200() {
    let state = test_state();
    let paths: Vec<&'static str> = state.routes.routes().iter().map(|r| r.path).collect();
    assert!(!paths.is_empty());

    for path in paths {
        let resp = request(&state, Method::GET, path, None).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
        assert_eq!(
            resp.headers()["Content-Type"],
            "text/html; charset=utf-8",
            "GET {path}"
        );
        let body = body_string(resp).await;
        assert!(!body.is_empty(), "GET {path} returned an empty body");
    }
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let state = test_state();
    let resp = request(&state, Method::GET, "/basic/no-such-page", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_get_method_is_405() {
    let state = test_state();
    let resp = request(&state, Method::POST, "/basic/each", None).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
}

#[tokio::test]
async fn test_options_is_204() {
    let state = test_state();
    let resp = request(&state, Method::OPTIONS, "/basic/each", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_head_drops_body_keeps_content_length() {
    let state = test_state();
    let resp = request(&state, Method::HEAD, "/basic/text-basic", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_length: usize = resp.headers()["Content-Length"]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(content_length > 0);
    assert!(body_string(resp).await.is_empty());
}

#[tokio::test]
async fn test_session_cookie_round_trip() {
    let state = test_state();

    // First visit: the session is fresh, so the response hands out a cookie
    // and the page already sees the attribute the handler just wrote.
    let resp = request(&state, Method::GET, "/basic/basic-objects", None).await;
    let cookie = resp.headers()["Set-Cookie"].to_str().unwrap().to_string();
    let session_pair = cookie.split(';').next().unwrap().to_string();
    assert!(session_pair.starts_with("tour_session="));
    assert!(body_string(resp).await.contains("Hello Session"));

    // Second visit with the cookie: same session, no new cookie.
    let resp = request(&state, Method::GET, "/basic/basic-objects", Some(&session_pair)).await;
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert!(body_string(resp).await.contains("Hello Session"));
}

#[tokio::test]
async fn test_query_parameters_reach_the_template() {
    let state = test_state();
    let resp = request(
        &state,
        Method::GET,
        "/basic/basic-objects?paramData=HelloParam",
        None,
    )
    .await;
    assert!(body_string(resp).await.contains("HelloParam"));
}

#[tokio::test]
async fn test_escaping_end_to_end() {
    let state = test_state();
    let body = get_body(&state, "/basic/text-unescaped").await;
    // The same model value appears escaped and raw.
    assert!(body.contains("Hello &lt;b&gt;Spring!"));
    assert!(body.contains("Hello <b>Spring!</b>"));
}

#[tokio::test]
async fn test_template_service_invocation() {
    let state = test_state();
    let body = get_body(&state, "/basic/basic-objects").await;
    assert!(body.contains("Hello Spring!"));
}

#[tokio::test]
async fn test_iteration_lists_all_users() {
    let state = test_state();
    let body = get_body(&state, "/basic/each").await;
    for name in ["userA", "userB", "userC"] {
        assert!(body.contains(name), "missing {name}");
    }
    for age in ["10", "20", "30"] {
        assert!(body.contains(age), "missing age {age}");
    }
}

#[tokio::test]
async fn test_condition_classifies_users() {
    let state = test_state();
    let body = get_body(&state, "/basic/condition").await;
    assert!(body.contains("minor"));
    assert!(body.contains("adult"));
    assert!(body.contains("twenty"));
}

#[tokio::test]
async fn test_comments_are_stripped_or_kept() {
    let state = test_state();
    let body = get_body(&state, "/basic/comments").await;
    assert!(body.contains("<!-- an HTML comment passes through to the client -->"));
    assert!(!body.contains("renderer comment"));
    // Raw block leaves the expression text alone.
    assert!(body.contains("{{ data }}"));
}

#[tokio::test]
async fn test_javascript_serializes_model() {
    let state = test_state();
    let body = get_body(&state, "/basic/javascript").await;
    assert!(body.contains("const users ="));
    assert!(body.contains("userA"));
}

#[tokio::test]
async fn test_fragment_composition() {
    let state = test_state();
    let body = get_body(&state, "/template/fragment").await;
    assert!(body.contains("shared footer fragment"));
    assert!(body.contains("param1 = data1"));
    assert!(body.contains("param2 = data2"));
}

#[tokio::test]
async fn test_layout_composition() {
    let state = test_state();
    let body = get_body(&state, "/template/layout").await;
    assert!(body.contains("<title>layout main</title>"));
    assert!(body.contains("decorated page"));
    assert!(body.contains("this content is decorated by the shared layout"));
    // The base layout pulls in the shared footer as well.
    assert!(body.contains("shared footer fragment"));
}

#[tokio::test]
async fn test_index_links_every_demo() {
    let state = test_state();
    let body = get_body(&state, "/").await;
    for path in ["/basic/text-basic", "/basic/javascript", "/template/layout"] {
        assert!(body.contains(path), "index is missing a link to {path}");
    }
}

#[tokio::test]
async fn test_renderer_reload_keeps_serving() {
    let state = test_state();
    let before = get_body(&state, "/basic/text-basic").await;
    state.reload_renderer().await;
    let after = get_body(&state, "/basic/text-basic").await;
    assert_eq!(before, after);
}
