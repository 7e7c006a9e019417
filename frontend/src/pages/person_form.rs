//! Personal data block shared by the client, employee and leader forms.

use crate::{
    api::Person,
    components::forms::TextField,
    utils::validation::{check, Rule},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct PersonFormState {
    person_id: RwSignal<Option<i64>>,
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub identification: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
}

impl Default for PersonFormState {
    fn default() -> Self {
        Self {
            person_id: create_rw_signal(None),
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            identification: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
        }
    }
}

impl PersonFormState {
    pub fn reset(&self) {
        self.load(&Person::default());
    }

    pub fn load(&self, person: &Person) {
        self.person_id.set(person.id);
        self.first_name.set(person.first_name.clone());
        self.last_name.set(person.last_name.clone());
        self.identification.set(person.identification.clone());
        self.email.set(person.email.clone());
        self.phone.set(person.phone.clone().unwrap_or_default());
    }

    /// Field checks in display order, for use with `first_error`.
    pub fn checks(&self) -> Vec<Result<(), String>> {
        vec![
            check(
                "Nombres",
                &self.first_name.get_untracked(),
                &[Rule::Required, Rule::MaxLength(100)],
            ),
            check(
                "Apellidos",
                &self.last_name.get_untracked(),
                &[Rule::Required, Rule::MaxLength(100)],
            ),
            check(
                "Identificación",
                &self.identification.get_untracked(),
                &[Rule::Required, Rule::Digits, Rule::MinLength(10), Rule::MaxLength(13)],
            ),
            check(
                "Correo",
                &self.email.get_untracked(),
                &[Rule::Required, Rule::Email],
            ),
            check(
                "Teléfono",
                &self.phone.get_untracked(),
                &[Rule::Digits, Rule::MinLength(7), Rule::MaxLength(10)],
            ),
        ]
    }

    pub fn to_person(&self) -> Person {
        let phone = self.phone.get_untracked();
        Person {
            id: self.person_id.get_untracked(),
            first_name: self.first_name.get_untracked().trim().to_string(),
            last_name: self.last_name.get_untracked().trim().to_string(),
            identification: self.identification.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            phone: Some(phone.trim().to_string()).filter(|p| !p.is_empty()),
        }
    }
}

#[component]
pub fn PersonFields(form: PersonFormState) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
            <TextField label="Nombres" value=form.first_name required=true />
            <TextField label="Apellidos" value=form.last_name required=true />
            <TextField label="Identificación" value=form.identification required=true />
            <TextField label="Correo" value=form.email input_type="email" required=true />
            <TextField label="Teléfono" value=form.phone input_type="tel" />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use crate::utils::validation::first_error;

    fn filled() -> PersonFormState {
        let form = PersonFormState::default();
        form.first_name.set(" Ana ".into());
        form.last_name.set("Torres".into());
        form.identification.set("0912345678".into());
        form.email.set("ana@empresa.com".into());
        form
    }

    #[test]
    fn valid_person_trims_and_drops_blank_phone() {
        with_runtime(|| {
            let form = filled();
            assert!(first_error(form.checks()).is_ok());
            let person = form.to_person();
            assert_eq!(person.first_name, "Ana");
            assert!(person.phone.is_none());
            assert!(person.id.is_none());
        });
    }

    #[test]
    fn identification_must_be_numeric() {
        with_runtime(|| {
            let form = filled();
            form.identification.set("09-1234567".into());
            let err = first_error(form.checks()).unwrap_err();
            assert_eq!(err.error, "Identificación solo admite números.");
        });
    }

    #[test]
    fn load_keeps_person_id_for_updates() {
        with_runtime(|| {
            let form = PersonFormState::default();
            form.load(&Person {
                id: Some(11),
                first_name: "Luis".into(),
                last_name: "Mora".into(),
                identification: "0911111111".into(),
                email: "luis@empresa.com".into(),
                phone: Some("0991234567".into()),
            });
            assert_eq!(form.to_person().id, Some(11));
            form.reset();
            assert!(form.to_person().id.is_none());
            assert!(form.first_name.get().is_empty());
        });
    }
}
