//! Declarative route tables and auth/role gating.
//!
//! DESIGN
//! ======
//! There are two tables. The signed-out table only knows the login,
//! register and password-reset views. The signed-in table knows everything else, with each route
//! optionally naming a [`Capability`] the user must hold. A route the user
//! lacks the capability for is skipped as if it were not in the table, so
//! `/admin` for a student falls through to the same redirect as any unknown
//! path.
//!
//! [`resolve`] is a pure function of `(path, user)`. Callers re-run it
//! whenever either changes; nothing about the decision is cached.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::user::{Capability, User};

/// Every page the router can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    TextbookList,
    TextbookViewer,
    Games,
    Profile,
    AccessibilitySettings,
    Admin,
}

/// One row of a route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteSpec {
    /// Path pattern; `:name` segments capture a value.
    pub pattern: &'static str,
    pub view: View,
    pub requires: Option<Capability>,
}

/// Ordered route list plus where to send anything that does not match.
#[derive(Clone, Copy, Debug)]
pub struct RouteTable {
    pub routes: &'static [RouteSpec],
    pub fallback: &'static str,
}

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

pub static UNAUTHENTICATED: RouteTable = RouteTable {
    routes: &[
        RouteSpec { pattern: "/login", view: View::Login, requires: None },
        RouteSpec { pattern: "/register", view: View::Register, requires: None },
        RouteSpec { pattern: "/forgot-password", view: View::ForgotPassword, requires: None },
    ],
    fallback: LOGIN_PATH,
};

pub static AUTHENTICATED: RouteTable = RouteTable {
    routes: &[
        RouteSpec { pattern: "/", view: View::Dashboard, requires: None },
        RouteSpec { pattern: "/dashboard", view: View::Dashboard, requires: None },
        RouteSpec { pattern: "/textbooks", view: View::TextbookList, requires: None },
        RouteSpec { pattern: "/textbooks/:id", view: View::TextbookViewer, requires: None },
        RouteSpec { pattern: "/games", view: View::Games, requires: None },
        RouteSpec { pattern: "/profile", view: View::Profile, requires: None },
        RouteSpec { pattern: "/accessibility", view: View::AccessibilitySettings, requires: None },
        RouteSpec { pattern: "/admin", view: View::Admin, requires: Some(Capability::Administer) },
    ],
    fallback: DASHBOARD_PATH,
};

/// Values captured from `:name` segments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(&'static str, String)>);

impl RouteParams {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the router should do for a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render { view: View, params: RouteParams },
    Redirect(&'static str),
}

impl Resolution {
    #[must_use]
    pub fn view(&self) -> Option<View> {
        match self {
            Self::Render { view, .. } => Some(*view),
            Self::Redirect(_) => None,
        }
    }
}

impl RouteTable {
    /// First route matching `path` whose capability is held.
    #[must_use]
    pub fn dispatch(&self, path: &str, capabilities: &[Capability]) -> Resolution {
        self.routes
            .iter()
            .filter(|route| route.requires.is_none_or(|cap| capabilities.contains(&cap)))
            .find_map(|route| {
                match_pattern(route.pattern, path).map(|params| Resolution::Render { view: route.view, params })
            })
            .unwrap_or(Resolution::Redirect(self.fallback))
    }
}

/// Pick the table for `user` and dispatch `path` against it.
#[must_use]
pub fn resolve(path: &str, user: Option<&User>) -> Resolution {
    match user {
        None => UNAUTHENTICATED.dispatch(path, &[]),
        Some(user) => AUTHENTICATED.dispatch(path, user.role.capabilities()),
    }
}

/// Match `path` against `pattern`, returning captured params on success.
///
/// Query strings and fragments are ignored, as are empty segments, so
/// `/textbooks/` and `/textbooks?page=2` both match `/textbooks`.
#[must_use]
pub fn match_pattern(pattern: &'static str, path: &str) -> Option<RouteParams> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);
    let mut params = Vec::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(RouteParams(params)),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    params.push((name, actual.to_owned()));
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
