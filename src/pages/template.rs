//! Composition demos
//!
//! Both handlers carry no model data; partial inclusion and layout
//! decoration happen entirely in the templates.

use super::{PageRequest, PageResponse};
use crate::session::Session;
use crate::view::Model;

/// Fragment composition: the view pulls in a shared partial.
pub fn fragment(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    PageResponse::new(Model::new(), "template/fragment/fragment-main")
}

/// Layout composition: the view extends a shared base layout.
pub fn layout(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    PageResponse::new(Model::new(), "template/layout/layout-main")
}
