//! Page handlers module
//!
//! Every route is a pure function of `(request, session)` producing a
//! view-model and a view name. Handlers build literals only; rendering,
//! routing and session storage live elsewhere.

pub mod basic;
pub mod template;

use crate::session::Session;
use crate::view::{Model, View};

/// The request data page handlers can see: path and decoded query pairs.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl PageRequest {
    #[must_use]
    pub fn new(path: &str, query: Option<&str>) -> Self {
        let query: Vec<(String, String)> = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self {
            path: path.to_string(),
            query,
        }
    }
}

/// What a page handler produces: the model to render and the view to render
/// it with.
#[derive(Debug)]
pub struct PageResponse {
    pub model: Model,
    pub view: View,
}

impl PageResponse {
    #[must_use]
    pub const fn new(model: Model, view: View) -> Self {
        Self { model, view }
    }
}

/// Page handler signature used by the route table.
pub type PageFn = fn(&PageRequest, &mut Session) -> PageResponse;

/// Homepage listing all demo routes.
pub fn index(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    PageResponse::new(Model::new(), "index")
}
