//! Route table module
//!
//! Built once at startup and owned by the shared application state. Lookup
//! distinguishes an unknown path from a known path hit with the wrong
//! method so the dispatcher can answer 404 vs. 405.

use hyper::Method;

use crate::pages::{self, PageFn};

/// One routing entry: method, exact path, handler.
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub page: PageFn,
}

impl Route {
    fn get(path: &'static str, page: PageFn) -> Self {
        Self {
            method: Method::GET,
            path,
            page,
        }
    }
}

/// Result of a table lookup.
pub enum RouteLookup<'a> {
    Found(&'a Route),
    /// Path exists but not for this method.
    MethodNotAllowed,
    NotFound,
}

/// The complete HTTP surface of the application.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        let routes = vec![
            Route::get("/", pages::index),
            Route::get("/basic/text-basic", pages::basic::text_basic),
            Route::get("/basic/text-unescaped", pages::basic::text_unescaped),
            Route::get("/basic/variable", pages::basic::variable),
            Route::get("/basic/basic-objects", pages::basic::basic_objects),
            Route::get("/basic/date", pages::basic::date),
            Route::get("/basic/link", pages::basic::link),
            Route::get("/basic/literal", pages::basic::literal),
            Route::get("/basic/operation", pages::basic::operation),
            Route::get("/basic/attribute", pages::basic::attribute),
            Route::get("/basic/each", pages::basic::each),
            Route::get("/basic/condition", pages::basic::condition),
            Route::get("/basic/comments", pages::basic::comments),
            Route::get("/basic/block", pages::basic::block),
            Route::get("/basic/javascript", pages::basic::javascript),
            Route::get("/template/fragment", pages::template::fragment),
            Route::get("/template/layout", pages::template::layout),
        ];
        Self { routes }
    }

    /// Find the route for `(method, path)`. HEAD is served by GET routes;
    /// the dispatcher drops the body.
    pub fn lookup(&self, method: &Method, path: &str) -> RouteLookup<'_> {
        let mut path_known = false;
        for route in &self.routes {
            if route.path != path {
                continue;
            }
            path_known = true;
            let head_as_get = *method == Method::HEAD && route.method == Method::GET;
            if route.method == *method || head_as_get {
                return RouteLookup::Found(route);
            }
        }
        if path_known {
            RouteLookup::MethodNotAllowed
        } else {
            RouteLookup::NotFound
        }
    }

    /// All routes, in table order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_documented_route_is_present() {
        let table = RouteTable::new();
        assert_eq!(table.routes().len(), 17);

        for path in [
            "/",
            "/basic/text-basic",
            "/basic/text-unescaped",
            "/basic/variable",
            "/basic/basic-objects",
            "/basic/date",
            "/basic/link",
            "/basic/literal",
            "/basic/operation",
            "/basic/attribute",
            "/basic/each",
            "/basic/condition",
            "/basic/comments",
            "/basic/block",
            "/basic/javascript",
            "/template/fragment",
            "/template/layout",
        ] {
            assert!(
                matches!(table.lookup(&Method::GET, path), RouteLookup::Found(_)),
                "missing route: {path}"
            );
        }
    }

    #[test]
    fn test_head_is_served_by_get_routes() {
        let table = RouteTable::new();
        assert!(matches!(
            table.lookup(&Method::HEAD, "/basic/each"),
            RouteLookup::Found(_)
        ));
    }

    #[test]
    fn test_known_path_wrong_method() {
        let table = RouteTable::new();
        assert!(matches!(
            table.lookup(&Method::POST, "/basic/each"),
            RouteLookup::MethodNotAllowed
        ));
    }

    #[test]
    fn test_unknown_path() {
        let table = RouteTable::new();
        assert!(matches!(
            table.lookup(&Method::GET, "/basic/nope"),
            RouteLookup::NotFound
        ));
        // Exact match only: no prefix routing.
        assert!(matches!(
            table.lookup(&Method::GET, "/basic/each/extra"),
            RouteLookup::NotFound
        ));
    }
}
