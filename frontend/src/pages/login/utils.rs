use crate::{
    api::{ApiError, LoginRequest},
    utils::validation::{check, first_error, Rule},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub remember: RwSignal<bool>,
}

impl LoginFormState {
    /// Prefills the email a previous login asked to remember.
    pub fn new(remembered_email: Option<String>) -> Self {
        let remember = remembered_email.is_some();
        Self {
            email: create_rw_signal(remembered_email.unwrap_or_default()),
            password: create_rw_signal(String::new()),
            remember: create_rw_signal(remember),
        }
    }

    pub fn to_request(&self) -> Result<LoginRequest, ApiError> {
        let email = self.email.get_untracked();
        let password = self.password.get_untracked();
        validate_credentials(&email, &password)?;
        Ok(LoginRequest {
            email: email.trim().to_string(),
            password,
        })
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    first_error([
        check("Correo", email, &[Rule::Required, Rule::Email]),
        check("Contraseña", password, &[Rule::Required]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_credentials_requires_both_fields() {
        assert_eq!(
            validate_credentials("", "x").unwrap_err().error,
            "Correo es obligatorio."
        );
        assert_eq!(
            validate_credentials("ana@empresa.com", "").unwrap_err().error,
            "Contraseña es obligatorio."
        );
        assert!(validate_credentials("ana@empresa.com", "secreto").is_ok());
    }

    #[test]
    fn validate_credentials_checks_email_shape() {
        let err = validate_credentials("ana", "secreto").unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn remembered_email_prefills_form() {
        with_runtime(|| {
            let form = LoginFormState::new(Some("ana@empresa.com".into()));
            assert!(form.remember.get());
            form.password.set("secreto".into());
            let request = form.to_request().unwrap();
            assert_eq!(request.email, "ana@empresa.com");
        });
    }

    #[test]
    fn request_trims_email() {
        with_runtime(|| {
            let form = LoginFormState::new(None);
            assert!(!form.remember.get());
            form.email.set("  ana@empresa.com ".into());
            form.password.set("secreto".into());
            assert_eq!(form.to_request().unwrap().email, "ana@empresa.com");
        });
    }
}
