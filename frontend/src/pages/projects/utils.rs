use crate::{
    api::{ApiError, Client, Leader, Project, ProjectRequest},
    components::{forms::SelectOptions, table::Column},
    pages::crud::or_dash,
    utils::{
        dates,
        validation::{check, first_error, Rule},
    },
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct ProjectFormState {
    pub name: RwSignal<String>,
    pub code: RwSignal<String>,
    pub client_id: RwSignal<String>,
    pub leader_id: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub budget: RwSignal<String>,
}

impl Default for ProjectFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            code: create_rw_signal(String::new()),
            client_id: create_rw_signal(String::new()),
            leader_id: create_rw_signal(String::new()),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            budget: create_rw_signal(String::new()),
        }
    }
}

fn optional_date(label: &str, value: &str) -> Result<Option<chrono::NaiveDate>, ApiError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    dates::parse_input_date(value)
        .map(Some)
        .ok_or_else(|| ApiError::validation(format!("{} no es válido.", label)))
}

impl ProjectFormState {
    pub fn reset(&self) {
        for field in [
            self.name,
            self.code,
            self.client_id,
            self.leader_id,
            self.start_date,
            self.end_date,
            self.budget,
        ] {
            field.set(String::new());
        }
    }

    pub fn load(&self, project: &Project) {
        self.name.set(project.name.clone());
        self.code.set(project.code.clone());
        self.client_id.set(project.client_id.to_string());
        self.leader_id
            .set(project.leader_id.map(|id| id.to_string()).unwrap_or_default());
        self.start_date.set(dates::input_date(project.start_date));
        self.end_date
            .set(project.end_date.map(dates::input_date).unwrap_or_default());
        self.budget
            .set(project.budget.map(|b| b.to_string()).unwrap_or_default());
    }

    pub fn validate(&self) -> Result<ProjectRequest, ApiError> {
        let name = self.name.get_untracked();
        let code = self.code.get_untracked();
        let client_id = self.client_id.get_untracked();
        let start_date = self.start_date.get_untracked();
        let end_date = self.end_date.get_untracked();
        let budget = self.budget.get_untracked();
        first_error([
            check("Nombre", &name, &[Rule::Required, Rule::MaxLength(150)]),
            check("Código", &code, &[Rule::Required, Rule::MaxLength(20)]),
            check("Cliente", &client_id, &[Rule::Required]),
            check("Fecha de inicio", &start_date, &[Rule::Required]),
            check("Presupuesto", &budget, &[Rule::GreaterThan(0.0)]),
        ])?;
        let start_date = optional_date("Fecha de inicio", &start_date)?
            .ok_or_else(|| ApiError::validation("Fecha de inicio es obligatorio."))?;
        let end_date = optional_date("Fecha de fin", &end_date)?;
        if end_date.is_some_and(|end| end < start_date) {
            return Err(ApiError::validation(
                "La fecha de fin no puede ser anterior a la fecha de inicio.",
            ));
        }
        let client_id = client_id
            .trim()
            .parse()
            .map_err(|_| ApiError::validation("Cliente no es válido."))?;
        Ok(ProjectRequest {
            name: name.trim().to_string(),
            code: code.trim().to_string(),
            client_id,
            leader_id: self.leader_id.get_untracked().trim().parse().ok(),
            start_date,
            end_date,
            budget: budget.trim().parse().ok(),
        })
    }
}

pub fn client_options(clients: &[Client]) -> SelectOptions {
    clients
        .iter()
        .filter(|client| client.status)
        .map(|client| (client.id.to_string(), client.trade_name.clone()))
        .collect()
}

pub fn leader_options(leaders: &[Leader]) -> SelectOptions {
    leaders
        .iter()
        .filter(|leader| leader.status)
        .map(|leader| (leader.id.to_string(), leader.person.full_name()))
        .collect()
}

pub fn columns() -> Vec<Column<Project>> {
    vec![
        Column::new("Código", "code", |p: &Project| p.code.clone()),
        Column::new("Nombre", "name", |p: &Project| p.name.clone()),
        Column::new("Cliente", "client", |p: &Project| or_dash(p.client_name.as_ref())),
        Column::new("Líder", "leader", |p: &Project| or_dash(p.leader_name.as_ref())),
        Column::new("Inicio", "startDate", |p: &Project| dates::display_date(p.start_date)),
        Column::new("Fin", "endDate", |p: &Project| {
            or_dash(p.end_date.map(dates::display_date))
        }),
    ]
}
