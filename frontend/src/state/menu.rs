use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::api::{Module, Role};

pub const ACTIVITIES_PATH: &str = "/menu/activities";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: i64,
    pub label: String,
    pub path: String,
    pub icon: String,
    pub display_order: i32,
}

impl From<&Module> for MenuEntry {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id,
            label: module.module_name.clone(),
            path: module.module_path.clone(),
            icon: module.icon.clone(),
            display_order: module.display_order,
        }
    }
}

/// Menu entries the front end knows about even when the backend did not send
/// the module: (id, label, path, icon, order). Ids are negative so they never
/// collide with backend ids.
const BUILTIN_ENTRIES: &[(i64, &str, &str, &str, i32)] = &[
    (-1, "Dashboard", "/menu/dashboard", "dashboard", 0),
    (-2, "Actividades", ACTIVITIES_PATH, "event_note", 1),
    (-3, "Proyectos", "/menu/projects", "work", 2),
    (-4, "Proyecciones", "/menu/projections", "query_stats", 3),
    (-5, "Reportes", "/menu/reports", "description", 4),
    (-6, "Clientes", "/menu/clients", "business", 5),
    (-7, "Colaboradores", "/menu/employees", "badge", 6),
    (-8, "Líderes", "/menu/leaders", "supervisor_account", 7),
    (-9, "Feriados", "/menu/holidays", "beach_access", 8),
    (-10, "Roles", "/menu/roles", "admin_panel_settings", 9),
    (-11, "Usuarios", "/menu/users", "group", 10),
];

/// Paths every holder of the role can reach, whatever the backend attached.
const ROLE_DEFAULT_PATHS: &[(&str, &[&str])] = &[
    ("Colaborador", &[ACTIVITIES_PATH]),
    (
        "Lider",
        &[
            ACTIVITIES_PATH,
            "/menu/projects",
            "/menu/projections",
            "/menu/reports",
        ],
    ),
];

fn builtin_entry(path: &str) -> Option<MenuEntry> {
    BUILTIN_ENTRIES
        .iter()
        .find(|(_, _, p, _, _)| *p == path)
        .map(|(id, label, path, icon, order)| MenuEntry {
            id: *id,
            label: (*label).to_string(),
            path: (*path).to_string(),
            icon: (*icon).to_string(),
            display_order: *order,
        })
}

fn is_admin_role(role: &Role) -> bool {
    role.role_name
        .trim()
        .eq_ignore_ascii_case(crate::state::session::ADMIN_ROLE)
}

fn default_paths_for(role: &Role) -> &'static [&'static str] {
    ROLE_DEFAULT_PATHS
        .iter()
        .find(|(name, _)| role.role_name.trim().eq_ignore_ascii_case(name))
        .map(|(_, paths)| *paths)
        .unwrap_or(&[])
}

fn sorted_unique(entries: Vec<MenuEntry>) -> Vec<MenuEntry> {
    let mut seen_ids = HashSet::new();
    let mut seen_paths = HashSet::new();
    let mut unique: Vec<MenuEntry> = entries
        .into_iter()
        .filter(|entry| seen_ids.insert(entry.id) && seen_paths.insert(entry.path.clone()))
        .collect();
    unique.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.label.cmp(&b.label))
    });
    unique
}

/// Builds the navigation menu for a set of roles.
///
/// Administrators see every top-level module. Everyone else sees the modules
/// attached to their roles plus each role's default paths; defaults are
/// resolved against `modules` first and fall back to the built-in entries.
pub fn build_menu(roles: &[Role], modules: &[Module]) -> Vec<MenuEntry> {
    if roles.iter().any(is_admin_role) {
        return sorted_unique(
            modules
                .iter()
                .filter(|module| !module.submodule)
                .map(MenuEntry::from)
                .collect(),
        );
    }

    let mut entries: Vec<MenuEntry> = roles
        .iter()
        .filter_map(|role| role.modules.as_ref())
        .flatten()
        .filter(|module| !module.submodule)
        .map(MenuEntry::from)
        .collect();

    for path in roles.iter().flat_map(default_paths_for) {
        let resolved = modules
            .iter()
            .find(|module| module.module_path == *path)
            .map(MenuEntry::from)
            .or_else(|| builtin_entry(path));
        entries.extend(resolved);
    }

    sorted_unique(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{module, role};

    fn all_modules() -> Vec<Module> {
        vec![
            module(1, "/menu/dashboard", 0),
            module(2, "/menu/activities", 1),
            module(3, "/menu/projects", 2),
            module(4, "/menu/clients", 5),
            Module {
                submodule: true,
                ..module(5, "/menu/projects/detail", 3)
            },
        ]
    }

    #[test]
    fn collaborator_only_gets_activities() {
        let menu = build_menu(&[role(3, "Colaborador")], &[]);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].path, ACTIVITIES_PATH);
    }

    #[test]
    fn collaborator_default_prefers_backend_module() {
        let menu = build_menu(&[role(3, "Colaborador")], &all_modules());
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].id, 2);
    }

    #[test]
    fn admin_sees_every_top_level_module_in_order() {
        let mut modules = all_modules();
        modules.reverse();
        let menu = build_menu(&[role(1, "Administrador")], &modules);
        let paths: Vec<&str> = menu.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/menu/dashboard", "/menu/activities", "/menu/projects", "/menu/clients"]
        );
    }

    #[test]
    fn role_modules_and_defaults_are_merged_without_duplicates() {
        let leader = Role {
            modules: Some(vec![module(4, "/menu/clients", 5), module(3, "/menu/projects", 2)]),
            ..role(2, "Lider")
        };
        let menu = build_menu(&[leader, role(3, "Colaborador")], &all_modules());
        let paths: Vec<&str> = menu.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/menu/activities",
                "/menu/projects",
                "/menu/projections",
                "/menu/reports",
                "/menu/clients"
            ]
        );
    }

    #[test]
    fn unknown_roles_get_an_empty_menu() {
        assert!(build_menu(&[role(9, "Invitado")], &all_modules()).is_empty());
    }
}
