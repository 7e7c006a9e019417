use crate::{
    api::{ApiError, Employee, Role, User, UserRequest},
    components::table::Column,
    pages::crud::or_dash,
    utils::validation::{check, first_error, Rule},
};
use leptos::*;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone, Copy)]
pub struct UserFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub employee_id: RwSignal<String>,
    pub role_ids: RwSignal<Vec<i64>>,
}

impl Default for UserFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            employee_id: create_rw_signal(String::new()),
            role_ids: create_rw_signal(Vec::new()),
        }
    }
}

impl UserFormState {
    pub fn reset(&self) {
        self.email.set(String::new());
        self.password.set(String::new());
        self.employee_id.set(String::new());
        self.role_ids.set(Vec::new());
    }

    pub fn load(&self, user: &User) {
        self.email.set(user.email.clone());
        self.password.set(String::new());
        self.employee_id
            .set(user.employee_id.map(|id| id.to_string()).unwrap_or_default());
        self.role_ids
            .set(user.roles.iter().map(|role| role.id).collect());
    }

    /// The password is mandatory on create; an empty one on edit keeps the
    /// current password.
    pub fn validate(&self, creating: bool) -> Result<UserRequest, ApiError> {
        let email = self.email.get_untracked();
        let password = self.password.get_untracked();
        let mut password_rules = vec![Rule::MinLength(MIN_PASSWORD_LENGTH)];
        if creating {
            password_rules.insert(0, Rule::Required);
        }
        first_error([
            check("Correo", &email, &[Rule::Required, Rule::Email]),
            check("Contraseña", &password, &password_rules),
        ])?;
        let role_ids = self.role_ids.get_untracked();
        if role_ids.is_empty() {
            return Err(ApiError::validation("Seleccione al menos un rol."));
        }
        Ok(UserRequest {
            email: email.trim().to_string(),
            password: Some(password).filter(|p| !p.trim().is_empty()),
            employee_id: self.employee_id.get_untracked().trim().parse().ok(),
            role_ids,
        })
    }
}

pub fn role_names(user: &User) -> String {
    user.roles
        .iter()
        .map(|role| role.role_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn employee_options(employees: &[Employee]) -> Vec<(String, String)> {
    employees
        .iter()
        .filter(|employee| employee.status)
        .map(|employee| (employee.id.to_string(), employee.person.full_name()))
        .collect()
}

pub fn role_options(roles: &[Role]) -> Vec<(i64, String)> {
    roles
        .iter()
        .map(|role| (role.id, role.role_name.clone()))
        .collect()
}

pub fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("Correo", "email", |u: &User| u.email.clone()),
        Column::new("Colaborador", "employee", |u: &User| {
            or_dash(u.employee_name.as_ref())
        }),
        Column::new("Roles", "roles", role_names),
    ]
}
