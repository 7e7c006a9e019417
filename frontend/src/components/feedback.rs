use crate::{
    api::ApiError,
    components::{error::InlineErrorMessage, layout::SuccessMessage},
};
use leptos::*;

/// Success banner and error slot owned by a page; setting one clears the other.
#[derive(Clone, Copy)]
pub struct MessageState {
    pub success: RwSignal<Option<String>>,
    pub error: RwSignal<Option<ApiError>>,
}

impl Default for MessageState {
    fn default() -> Self {
        Self {
            success: create_rw_signal(None),
            error: create_rw_signal(None),
        }
    }
}

impl MessageState {
    pub fn set_success(&self, message: impl Into<String>) {
        self.error.set(None);
        self.success.set(Some(message.into()));
    }

    pub fn set_error(&self, error: ApiError) {
        self.success.set(None);
        self.error.set(Some(error));
    }

    pub fn clear(&self) {
        self.success.set(None);
        self.error.set(None);
    }

    /// Routes an action outcome to the matching slot.
    pub fn report<T>(&self, result: &Result<T, ApiError>, success: impl Into<String>) {
        match result {
            Ok(_) => self.set_success(success),
            Err(err) => self.set_error(err.clone()),
        }
    }
}

#[component]
pub fn FeedbackMessages(state: MessageState) -> impl IntoView {
    view! {
        {move || state.success.get().map(|message| view! { <SuccessMessage message=message /> })}
        <InlineErrorMessage error=state.error />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::{render_to_string, with_runtime};

    #[test]
    fn setting_one_slot_clears_the_other() {
        with_runtime(|| {
            let state = MessageState::default();
            state.set_error(ApiError::validation("Nombre es obligatorio."));
            state.set_success("Guardado");
            assert!(state.error.get().is_none());
            assert_eq!(state.success.get().as_deref(), Some("Guardado"));

            state.report::<()>(&Err(ApiError::from_status(500)), "ignored");
            assert!(state.success.get().is_none());
            assert!(state.error.get().is_some());

            state.clear();
            assert!(state.error.get().is_none());
        });
    }

    #[test]
    fn renders_success_message() {
        let html = render_to_string(|| {
            let state = MessageState::default();
            state.set_success("Registro guardado correctamente");
            view! { <FeedbackMessages state=state /> }
        });
        assert!(html.contains("Registro guardado correctamente"));
    }
}
