use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::{RequireAuth, RequireRoute},
        layout::Layout,
    },
    pages::{
        ActivitiesPage, ClientsPage, DashboardPage, EmployeesPage, HolidaysPage, LeadersPage,
        LoginPage, ProjectionsPage, ProjectsPage, ReportsPage, RolesPage, UsersPage,
    },
    state::{auth::AuthProvider, menu::ACTIVITIES_PATH, session::SessionStore},
    utils::navigation::LOGIN_PATH,
};

pub const DASHBOARD_PATH: &str = "/menu/dashboard";
pub const PROJECTS_PATH: &str = "/menu/projects";
pub const PROJECTIONS_PATH: &str = "/menu/projections";
pub const REPORTS_PATH: &str = "/menu/reports";
pub const CLIENTS_PATH: &str = "/menu/clients";
pub const EMPLOYEES_PATH: &str = "/menu/employees";
pub const LEADERS_PATH: &str = "/menu/leaders";
pub const HOLIDAYS_PATH: &str = "/menu/holidays";
pub const ROLES_PATH: &str = "/menu/roles";
pub const USERS_PATH: &str = "/menu/users";

/// Every page behind the session guard.
pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    DASHBOARD_PATH,
    ACTIVITIES_PATH,
    PROJECTS_PATH,
    PROJECTIONS_PATH,
    REPORTS_PATH,
    CLIENTS_PATH,
    EMPLOYEES_PATH,
    LEADERS_PATH,
    HOLIDAYS_PATH,
    ROLES_PATH,
    USERS_PATH,
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &[LOGIN_PATH];

pub fn mount_app() {
    mount_to_body(app_root);
}

/// One storage-backed session shared by the auth state and the API client.
pub fn app_root() -> impl IntoView {
    let session = SessionStore::browser();
    provide_context(session.clone());
    provide_context(ApiClient::new().with_session(session));
    provide_meta_context();
    view! {
        <Title text="Time Report"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path=LOGIN_PATH view=LoginPage/>
                    <Route path="/" view=|| view! { <Redirect path=ACTIVITIES_PATH/> }/>
                    <Route path=DASHBOARD_PATH view=|| view! { <Protected path=DASHBOARD_PATH><DashboardPage/></Protected> }/>
                    <Route path=ACTIVITIES_PATH view=|| view! { <Protected path=ACTIVITIES_PATH><ActivitiesPage/></Protected> }/>
                    <Route path=PROJECTS_PATH view=|| view! { <Protected path=PROJECTS_PATH><ProjectsPage/></Protected> }/>
                    <Route path=PROJECTIONS_PATH view=|| view! { <Protected path=PROJECTIONS_PATH><ProjectionsPage/></Protected> }/>
                    <Route path=REPORTS_PATH view=|| view! { <Protected path=REPORTS_PATH><ReportsPage/></Protected> }/>
                    <Route path=CLIENTS_PATH view=|| view! { <Protected path=CLIENTS_PATH><ClientsPage/></Protected> }/>
                    <Route path=EMPLOYEES_PATH view=|| view! { <Protected path=EMPLOYEES_PATH><EmployeesPage/></Protected> }/>
                    <Route path=LEADERS_PATH view=|| view! { <Protected path=LEADERS_PATH><LeadersPage/></Protected> }/>
                    <Route path=HOLIDAYS_PATH view=|| view! { <Protected path=HOLIDAYS_PATH><HolidaysPage/></Protected> }/>
                    <Route path=ROLES_PATH view=|| view! { <Protected path=ROLES_PATH><RolesPage/></Protected> }/>
                    <Route path=USERS_PATH view=|| view! { <Protected path=USERS_PATH><UsersPage/></Protected> }/>
                    <Route path="/*any" view=|| view! { <Redirect path=ACTIVITIES_PATH/> }/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

/// Session guard, route permission check and the menu layout around a page.
#[component]
fn Protected(path: &'static str, children: ChildrenFn) -> impl IntoView {
    let children = store_value(children);
    view! {
        <RequireAuth>
            <RequireRoute path=path>
                <Layout>{children.with_value(|children| children())}</Layout>
            </RequireRoute>
        </RequireAuth>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::guard::ALWAYS_ALLOWED_PATHS, state::menu::build_menu};
    use std::collections::HashSet;

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = PROTECTED_ROUTE_PATHS
            .iter()
            .chain(PUBLIC_ROUTE_PATHS)
            .copied()
            .collect();
        assert_eq!(unique.len(), PROTECTED_ROUTE_PATHS.len() + PUBLIC_ROUTE_PATHS.len());
    }

    #[test]
    fn always_allowed_paths_are_routed() {
        for path in ALWAYS_ALLOWED_PATHS {
            assert!(PROTECTED_ROUTE_PATHS.contains(path), "{} has no route", path);
        }
    }

    #[test]
    fn leader_menu_entries_have_routes() {
        let roles = vec![crate::test_support::helpers::role(2, "Lider")];
        let menu = build_menu(&roles, &[]);
        assert_eq!(menu.len(), 4);
        for entry in menu {
            assert!(
                PROTECTED_ROUTE_PATHS.contains(&entry.path.as_str()),
                "menu entry without route: {}",
                entry.path
            );
        }
    }
}
