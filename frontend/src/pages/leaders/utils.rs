use crate::{
    api::{ApiError, Leader, LeaderRequest},
    components::table::Column,
    pages::{crud::or_dash, person_form::PersonFormState},
    utils::validation::first_error,
};

/// Leaders carry nothing beyond their personal data.
#[derive(Clone, Copy, Default)]
pub struct LeaderFormState {
    pub person: PersonFormState,
}

impl LeaderFormState {
    pub fn reset(&self) {
        self.person.reset();
    }

    pub fn load(&self, leader: &Leader) {
        self.person.load(&leader.person);
    }

    pub fn validate(&self) -> Result<LeaderRequest, ApiError> {
        first_error(self.person.checks())?;
        Ok(LeaderRequest {
            person: self.person.to_person(),
        })
    }
}

pub fn columns() -> Vec<Column<Leader>> {
    vec![
        Column::new("Nombre", "name", |l: &Leader| l.person.full_name()),
        Column::new("Identificación", "identification", |l: &Leader| {
            l.person.identification.clone()
        }),
        Column::new("Correo", "email", |l: &Leader| l.person.email.clone()),
        Column::new("Teléfono", "phone", |l: &Leader| or_dash(l.person.phone.as_ref())),
    ]
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn blank_leader_fails_on_first_name() {
        with_runtime(|| {
            let err = LeaderFormState::default().validate().unwrap_err();
            assert_eq!(err.error, "Nombres es obligatorio.");
        });
    }
}
