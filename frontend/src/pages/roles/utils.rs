use crate::{
    api::{ApiError, Module, Role, RoleRequest},
    components::table::Column,
    pages::crud::or_dash,
    utils::validation::{check, first_error, Rule},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct RoleFormState {
    pub role_name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub module_ids: RwSignal<Vec<i64>>,
}

impl Default for RoleFormState {
    fn default() -> Self {
        Self {
            role_name: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            module_ids: create_rw_signal(Vec::new()),
        }
    }
}

impl RoleFormState {
    pub fn reset(&self) {
        self.role_name.set(String::new());
        self.description.set(String::new());
        self.module_ids.set(Vec::new());
    }

    pub fn load(&self, role: &Role) {
        self.role_name.set(role.role_name.clone());
        self.description.set(role.description.clone().unwrap_or_default());
        self.module_ids.set(
            role.modules
                .iter()
                .flatten()
                .map(|module| module.id)
                .collect(),
        );
    }

    pub fn validate(&self) -> Result<RoleRequest, ApiError> {
        let role_name = self.role_name.get_untracked();
        let description = self.description.get_untracked();
        first_error([
            check("Nombre", &role_name, &[Rule::Required, Rule::MaxLength(50)]),
            check("Descripción", &description, &[Rule::MaxLength(250)]),
        ])?;
        let module_ids = self.module_ids.get_untracked();
        if module_ids.is_empty() {
            return Err(ApiError::validation("Seleccione al menos un módulo."));
        }
        Ok(RoleRequest {
            role_name: role_name.trim().to_string(),
            description: Some(description.trim().to_string()).filter(|d| !d.is_empty()),
            module_ids,
        })
    }
}

/// Top-level modules in menu order, labelled by name.
pub fn module_options(modules: &[Module]) -> Vec<(i64, String)> {
    let mut modules: Vec<&Module> = modules.iter().collect();
    modules.sort_by_key(|module| module.display_order);
    modules
        .into_iter()
        .map(|module| (module.id, module.module_name.clone()))
        .collect()
}

pub fn module_names(role: &Role) -> String {
    role.modules
        .iter()
        .flatten()
        .map(|module| module.module_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn columns() -> Vec<Column<Role>> {
    vec![
        Column::new("Nombre", "roleName", |r: &Role| r.role_name.clone()),
        Column::new("Descripción", "description", |r: &Role| {
            or_dash(r.description.as_ref())
        }),
        Column::new("Módulos", "modules", |r: &Role| or_dash(Some(module_names(r)))),
    ]
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::module, ssr::with_runtime};

    #[test]
    fn modules_are_required() {
        with_runtime(|| {
            let form = RoleFormState::default();
            form.role_name.set("Auditor".into());
            assert_eq!(
                form.validate().unwrap_err().error,
                "Seleccione al menos un módulo."
            );
        });
    }

    #[test]
    fn load_collects_module_ids() {
        with_runtime(|| {
            let role = Role {
                id: 2,
                role_name: "Lider".into(),
                description: Some("Aprueba horas".into()),
                modules: Some(vec![module(1, "/menu/activities", 1), module(5, "/menu/projects", 2)]),
            };
            let form = RoleFormState::default();
            form.load(&role);
            let request = form.validate().unwrap();
            assert_eq!(request.module_ids, vec![1, 5]);
            assert_eq!(request.description.as_deref(), Some("Aprueba horas"));
        });
    }

    #[test]
    fn module_options_follow_display_order() {
        let modules = vec![module(4, "/menu/users", 3), module(1, "/menu/activities", 1)];
        let ids: Vec<i64> = module_options(&modules).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}
