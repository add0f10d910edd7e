//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method gate, route lookup,
//! session resolution, page execution, rendering and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{HeaderMap, Method, Request, Response};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::pages::PageRequest;
use crate::routing::{Route, RouteLookup};
use crate::view::renderer::build_context;

/// Main entry point for HTTP request handling.
///
/// Generic over the body type because no route reads a request body.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = http_version(req.version());
    let is_head = method == Method::HEAD;

    let response = match check_http_method(&method, state.config.http.enable_cors) {
        Some(resp) => resp,
        None => match state.routes.lookup(&method, &path) {
            RouteLookup::NotFound => http::build_404_response(),
            RouteLookup::MethodNotAllowed => http::build_405_response(),
            RouteLookup::Found(route) => {
                serve_page(route, &path, query.as_deref(), req.headers(), is_head, &state).await
            }
        },
    };

    if state.cached_access_log.load(Ordering::Relaxed) {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.query = query;
        entry.http_version = version;
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Run a matched page handler and render its result.
async fn serve_page(
    route: &Route,
    path: &str,
    query: Option<&str>,
    headers: &HeaderMap,
    is_head: bool,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let page_request = PageRequest::new(path, query);

    // 1. Resolve the client's session from its cookie
    let cookie_header = headers.get("cookie").and_then(|v| v.to_str().ok());
    let (mut session, is_new) = state.sessions.resolve(cookie_header).await;

    // 2. The handler builds the model and picks the view
    let page = (route.page)(&page_request, &mut session);

    // 3. Merge model + session + params and render
    let ctx = build_context(&page.model, &session, &page_request.query);
    let rendered = state.renderer.read().await.render(page.view, &ctx);

    // 4. Persist session changes, hand a fresh id to new clients
    let set_cookie = is_new.then(|| state.sessions.set_cookie(&session));
    state.sessions.commit(session).await;

    match rendered {
        Ok(html) => http::build_html_response(
            html,
            is_head,
            set_cookie.as_deref(),
            &state.config.http.server_name,
        ),
        Err(e) => {
            logger::log_render_error(page.view, &e);
            http::build_500_response()
        }
    }
}

fn http_version(version: hyper::Version) -> String {
    if version == hyper::Version::HTTP_10 {
        "1.0".to_string()
    } else if version == hyper::Version::HTTP_2 {
        "2".to_string()
    } else {
        "1.1".to_string()
    }
}
