#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{LoginData, Module, Role};
    use crate::state::auth::AuthState;
    use crate::state::menu::build_menu;
    use crate::state::session::SessionStore;
    use crate::utils::token;
    use leptos::*;
    use serde_json::{json, Value};

    /// A token that stays valid for the rest of the century.
    pub fn fresh_token() -> String {
        token::encode_for_test(&json!({ "sub": "7", "exp": 4_102_444_800i64 }))
    }

    pub fn expired_token() -> String {
        token::encode_for_test(&json!({ "sub": "7", "exp": 1_000i64 }))
    }

    pub fn module(id: i64, path: &str, order: i32) -> Module {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Module {
            id,
            module_name: name,
            module_path: path.to_string(),
            icon: String::new(),
            display_order: order,
            submodule: false,
        }
    }

    pub fn role(id: i64, name: &str) -> Role {
        Role {
            id,
            role_name: name.to_string(),
            description: None,
            modules: None,
        }
    }

    pub fn login_data(roles: &[&str], modules: Vec<Module>) -> LoginData {
        LoginData {
            token: fresh_token(),
            employee_id: 7,
            user_id: 3,
            roles: roles
                .iter()
                .enumerate()
                .map(|(i, name)| role(i as i64 + 1, name))
                .collect(),
            modules,
        }
    }

    pub fn login_envelope_json(code: i32) -> Value {
        json!({
            "code": code,
            "message": "OK",
            "data": {
                "token": fresh_token(),
                "employeeID": 7,
                "userID": 3,
                "roles": [{ "id": 2, "roleName": "Colaborador" }],
                "modules": [{
                    "id": 4,
                    "moduleName": "Actividades",
                    "modulePath": "/menu/activities",
                    "icon": "event_note",
                    "displayOrder": 1,
                    "submodule": false
                }]
            }
        })
    }

    pub fn employee_json(id: i64) -> Value {
        json!({
            "id": id,
            "person": {
                "id": 11,
                "firstName": "Ana",
                "lastName": "Torres",
                "identification": "0912345678",
                "email": "ana@empresa.com",
                "phone": null
            },
            "position": "Desarrolladora",
            "hireDate": "2023-02-01",
            "status": true
        })
    }

    pub fn session_with(roles: &[&str], modules: Vec<Module>) -> SessionStore {
        let session = SessionStore::in_memory();
        session
            .persist_login(&login_data(roles, modules), "ana@empresa.com")
            .unwrap();
        session
    }

    pub fn signed_in_state(roles: &[&str], modules: Vec<Module>) -> AuthState {
        let data = login_data(roles, modules);
        AuthState {
            is_authenticated: true,
            loading: false,
            full_name: Some("Ana Torres".into()),
            employee_id: Some(data.employee_id),
            menu: build_menu(&data.roles, &data.modules),
            is_admin: roles.iter().any(|r| r.eq_ignore_ascii_case("Administrador")),
            roles: data.roles,
        }
    }

    pub fn provide_auth(state: AuthState) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(state);
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
