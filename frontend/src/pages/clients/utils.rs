use crate::{
    api::{ApiError, Client, ClientRequest},
    components::table::Column,
    pages::person_form::PersonFormState,
    utils::validation::{check, first_error, Rule},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct ClientFormState {
    pub trade_name: RwSignal<String>,
    pub person: PersonFormState,
}

impl Default for ClientFormState {
    fn default() -> Self {
        Self {
            trade_name: create_rw_signal(String::new()),
            person: PersonFormState::default(),
        }
    }
}

impl ClientFormState {
    pub fn reset(&self) {
        self.trade_name.set(String::new());
        self.person.reset();
    }

    pub fn load(&self, client: &Client) {
        self.trade_name.set(client.trade_name.clone());
        self.person.load(&client.person);
    }

    pub fn validate(&self) -> Result<ClientRequest, ApiError> {
        let trade_name = self.trade_name.get_untracked();
        let mut checks = vec![check(
            "Nombre comercial",
            &trade_name,
            &[Rule::Required, Rule::MaxLength(150)],
        )];
        checks.extend(self.person.checks());
        first_error(checks)?;
        Ok(ClientRequest {
            trade_name: trade_name.trim().to_string(),
            person: self.person.to_person(),
        })
    }
}

pub fn columns() -> Vec<Column<Client>> {
    vec![
        Column::new("Nombre comercial", "tradeName", |c: &Client| c.trade_name.clone()),
        Column::new("Contacto", "contact", |c: &Client| c.person.full_name()),
        Column::new("Identificación", "identification", |c: &Client| {
            c.person.identification.clone()
        }),
        Column::new("Correo", "email", |c: &Client| c.person.email.clone()),
    ]
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Person;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn trade_name_is_checked_first() {
        with_runtime(|| {
            let form = ClientFormState::default();
            let err = form.validate().unwrap_err();
            assert_eq!(err.error, "Nombre comercial es obligatorio.");
        });
    }

    #[test]
    fn load_then_validate_round_trips_client() {
        with_runtime(|| {
            let client = Client {
                id: 3,
                trade_name: "Comercial Andina".into(),
                person: Person {
                    id: Some(20),
                    first_name: "Rosa".into(),
                    last_name: "Vera".into(),
                    identification: "1790012345001".into(),
                    email: "rosa@andina.ec".into(),
                    phone: None,
                },
                status: true,
            };
            let form = ClientFormState::default();
            form.load(&client);
            let request = form.validate().unwrap();
            assert_eq!(request.trade_name, "Comercial Andina");
            assert_eq!(request.person, client.person);
        });
    }
}
