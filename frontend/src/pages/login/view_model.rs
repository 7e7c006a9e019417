use super::utils::LoginFormState;
use crate::{
    api::{ApiError, LoginRequest},
    components::guard::FALLBACK_PATH,
    state::auth::{self, use_auth, use_session},
    utils::navigation,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let session = use_session();
    let (auth, _) = use_auth();
    let form = LoginFormState::new(session.remembered_email());
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    if auth.get_untracked().is_authenticated {
        navigation::redirect_to(FALLBACK_PATH);
    }

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    let email = form.email.get_untracked();
                    let remembered = if form.remember.get_untracked() {
                        session.remember_email(email.trim())
                    } else {
                        session.forget_email()
                    };
                    if let Err(err) = remembered {
                        log::warn!("could not update remembered email: {}", err);
                    }
                    form.password.set(String::new());
                    navigation::redirect_to(FALLBACK_PATH);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::SessionStore;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            provide_context(SessionStore::in_memory());
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.email.get().is_empty());
        });
    }

    #[test]
    fn submit_with_blank_fields_sets_validation_error() {
        with_runtime(|| {
            provide_context(SessionStore::in_memory());
            let vm = use_login_view_model();
            vm.submit();
            let err = vm.error.get().unwrap();
            assert_eq!(err.code, "VALIDATION_ERROR");
            assert!(vm.login_action.value().get().is_none());
        });
    }

    #[test]
    fn remembered_email_is_loaded() {
        with_runtime(|| {
            let session = SessionStore::in_memory();
            session.remember_email("ana@empresa.com").unwrap();
            provide_context(session);
            let vm = use_login_view_model();
            assert_eq!(vm.form.email.get(), "ana@empresa.com");
            assert!(vm.form.remember.get());
        });
    }
}
