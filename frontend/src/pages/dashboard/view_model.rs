use super::utils::{self, MonthSummary};
use crate::{
    api::ApiError,
    pages::activities::repository,
    state::auth::{use_api_client, use_auth, use_session},
    utils::dates::MonthCursor,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub month: RwSignal<MonthCursor>,
    pub summary: Resource<(Option<i64>, MonthCursor), Result<MonthSummary, ApiError>>,
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let api = use_api_client();
    let (auth, _) = use_auth();
    let employee_id = auth
        .get_untracked()
        .employee_id
        .or_else(|| use_session().employee_id());
    let month = create_rw_signal(MonthCursor::current());

    let summary = create_local_resource(
        move || (employee_id, month.get()),
        move |(employee_id, month)| {
            let api = api.clone();
            async move {
                let employee_id = employee_id.ok_or_else(ApiError::unauthorized)?;
                let activities = repository::fetch_month(&api, employee_id, month).await?;
                let names = repository::fetch_project_names(&api)
                    .await
                    .unwrap_or_else(|err| {
                        log::warn!("projects unavailable for dashboard: {}", err);
                        Default::default()
                    });
                Ok(utils::summarize(&activities, &names))
            }
        },
    );

    DashboardViewModel { month, summary }
}
