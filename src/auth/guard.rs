//! Route guard and role-based visibility.
//!
//! The guard is evaluated before a protected page is constructed and returns
//! its decision as a value; the shell executes the redirect. Centralizing the
//! check here keeps the check-and-redirect contract identical across pages.
//!
//! Role checks are display-time filters only. The backend enforces actual
//! authorization and will reject calls the UI would have hidden.

use crate::models::Role;

use super::Session;

/// Outcome of the pre-mount authentication check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    RedirectToLogin,
}

/// Decide whether a protected page may mount.
pub fn check(session: &Session) -> RouteDecision {
    if session.is_authenticated() {
        RouteDecision::Proceed
    } else {
        RouteDecision::RedirectToLogin
    }
}

/// Author management (listing, promote/demote) is presented to admins only.
pub fn can_manage_authors(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Content creation and editing controls are presented to admins and authors.
pub fn can_edit_content(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Author)
}

/// Navigation entries a shell should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Authors,
    Categories,
    Posts,
}

impl NavItem {
    pub fn title(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::Authors => "Authors",
            NavItem::Categories => "Categories",
            NavItem::Posts => "Posts",
        }
    }
}

/// Navigation for the given role. The Authors entry appears for admins only.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    let mut items = vec![NavItem::Dashboard];
    if can_manage_authors(role) {
        items.push(NavItem::Authors);
    }
    items.push(NavItem::Categories);
    items.push(NavItem::Posts);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use std::path::PathBuf;

    fn storage() -> PathBuf {
        std::env::temp_dir().join(format!("inkdesk-guard-{}", std::process::id()))
    }

    fn session_with_role(role: Role) -> Session {
        let mut session = Session::new(storage());
        session.login(
            User {
                id: "u1".to_string(),
                username: "someone".to_string(),
                email: "someone@example.com".to_string(),
                role,
            },
            "tok".to_string(),
        );
        session
    }

    #[test]
    fn test_guard_redirects_when_logged_out() {
        let session = Session::new(storage());
        assert_eq!(check(&session), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn test_guard_proceeds_when_logged_in() {
        let session = session_with_role(Role::Author);
        assert_eq!(check(&session), RouteDecision::Proceed);
    }

    #[test]
    fn test_author_nav_hides_author_management() {
        let items = nav_items(Role::Author);
        assert!(!items.contains(&NavItem::Authors));
        assert!(items.contains(&NavItem::Posts));
    }

    #[test]
    fn test_admin_nav_shows_author_management() {
        let items = nav_items(Role::Admin);
        assert!(items.contains(&NavItem::Authors));
    }

    #[test]
    fn test_edit_content_tiers() {
        assert!(can_edit_content(Role::Admin));
        assert!(can_edit_content(Role::Author));
        assert!(!can_edit_content(Role::User));
        assert!(!can_edit_content(Role::Guest));
    }
}
