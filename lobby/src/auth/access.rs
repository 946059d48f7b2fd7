//! Where a session may go: the route guard in front of the dashboards.

use super::models::Session;
use crate::models::Role;

/// Dashboard variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Resident,
    Doorman,
    Syndic,
    Admin,
}

impl From<Role> for DashboardKind {
    fn from(role: Role) -> Self {
        match role {
            Role::Business => DashboardKind::Admin,
            Role::Doorman => DashboardKind::Doorman,
            Role::Syndic => DashboardKind::Syndic,
            Role::Resident | Role::Unknown => DashboardKind::Resident,
        }
    }
}

/// Route guard decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Still checking the session; show a loading screen
    Loading,
    /// Nobody signed in; send to the sign-in page
    SignIn,
    /// Business account without a subscription; send to the plan catalogue
    Plans,
    Dashboard(DashboardKind),
}

impl Access {
    pub fn for_session(session: &Session) -> Self {
        if session.is_loading() {
            return Access::Loading;
        }

        let user = match session.user() {
            Some(user) if session.is_authenticated() => user,
            _ => return Access::SignIn,
        };

        match DashboardKind::from(user.role) {
            DashboardKind::Admin if !user.has_subscription() => Access::Plans,
            kind => Access::Dashboard(kind),
        }
    }
}
