//! Basic template demos
//!
//! One handler per template-language feature: text output, escaping,
//! expression access styles, built-in objects, date utilities, links,
//! literals, operators, attributes, iteration, conditions, comments,
//! blocks and inline script data.

use serde::Serialize;
use serde_json::json;

use super::{PageRequest, PageResponse};
use crate::session::Session;
use crate::view::Model;

/// Demo domain object. Immutable after construction, used only as payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub age: u32,
}

impl User {
    #[must_use]
    pub fn new(username: &str, age: u32) -> Self {
        Self {
            username: username.to_string(),
            age,
        }
    }
}

/// Plain text output.
pub fn text_basic(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("data", "Hello Spring!");
    PageResponse::new(model, "basic/text-basic")
}

/// Raw markup in the model; the template decides escaped vs. unescaped
/// output. Escaping itself is strictly the renderer's job.
pub fn text_unescaped(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("data", "Hello <b>Spring!</b>");
    PageResponse::new(model, "basic/text-unescaped")
}

/// Three equivalent access styles: direct object, list index, map key.
/// The same user is reachable through all three.
pub fn variable(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let user_a = User::new("userA", 10);
    let user_b = User::new("userB", 10);

    let list = vec![user_a.clone(), user_b.clone()];
    let map = json!({ "userA": &user_a, "userB": &user_b });

    let mut model = Model::new();
    model.insert("user", &user_a);
    model.insert("users", &list);
    model.insert("userMap", map);
    PageResponse::new(model, "basic/variable")
}

/// Built-in context objects: the template reads `session.*`, `param.*` and
/// calls the wired-in greeter service. The handler only seeds the session.
pub fn basic_objects(_req: &PageRequest, session: &mut Session) -> PageResponse {
    session.set("sessionData", "Hello Session");
    PageResponse::new(Model::new(), "basic/basic-objects")
}

/// Date utilities: the template formats the raw timestamp.
pub fn date(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("localDateTime", chrono::Local::now());
    PageResponse::new(model, "basic/date")
}

/// Query-parameterized links built in the template.
pub fn link(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("param1", "data1");
    model.insert("param2", "data2");
    PageResponse::new(model, "basic/link")
}

/// Literal expressions.
pub fn literal(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("data", "Spring!");
    PageResponse::new(model, "basic/literal")
}

/// Operator expressions, including a null value.
pub fn operation(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("nullData", serde_json::Value::Null);
    model.insert("data", "Spring!");
    PageResponse::new(model, "basic/operation")
}

/// Attribute setting happens entirely in the template; no model data.
pub fn attribute(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    PageResponse::new(Model::new(), "basic/attribute")
}

/// Iteration.
pub fn each(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    add_users(&mut model);
    PageResponse::new(model, "basic/each")
}

/// Conditional rendering.
pub fn condition(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    add_users(&mut model);
    PageResponse::new(model, "basic/condition")
}

/// Comment handling: pass-through, stripped and raw variants live in the
/// template.
pub fn comments(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("data", "Spring!");
    PageResponse::new(model, "basic/comments")
}

/// Block grouping without a wrapper element.
pub fn block(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    add_users(&mut model);
    PageResponse::new(model, "basic/block")
}

/// Data serialized into embedded script content. Quoting and escaping are
/// the renderer's responsibility.
pub fn javascript(_req: &PageRequest, _session: &mut Session) -> PageResponse {
    let mut model = Model::new();
    model.insert("user", User::new("userA", 10));
    add_users(&mut model);
    PageResponse::new(model, "basic/javascript")
}

/// Shared fixture: the fixed three-user list used by the iteration,
/// condition and block demos.
fn add_users(model: &mut Model) {
    let users = vec![
        User::new("userA", 10),
        User::new("userB", 20),
        User::new("userC", 30),
    ];
    model.insert("users", users);
}
