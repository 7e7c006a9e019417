use super::{
    repository,
    utils::{self, ActivityFormState},
};
use crate::{
    api::{ActionResult, Activity, ActivityRequest, ApiError, CatalogItem},
    components::{confirm_dialog::ConfirmRequest, feedback::MessageState},
    pages::crud::{self, EditorState},
    state::auth::{use_api_client, use_auth, use_session},
    utils::dates::MonthCursor,
};
use chrono::NaiveDate;
use leptos::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthData {
    pub activities: Vec<Activity>,
    pub holidays: HashSet<NaiveDate>,
}

type SaveInput = (Option<i64>, ActivityRequest);

#[derive(Clone, Copy)]
pub struct ActivitiesViewModel {
    pub month: RwSignal<MonthCursor>,
    pub data: Resource<(Option<i64>, MonthCursor, u32), Result<MonthData, ApiError>>,
    pub project_names: Resource<(), HashMap<i64, String>>,
    pub activity_types: Resource<(), Vec<CatalogItem>>,
    pub form: ActivityFormState,
    pub editor: EditorState,
    pub confirm: RwSignal<Option<ConfirmRequest>>,
    pub messages: MessageState,
    pub save_action: Action<SaveInput, Result<ActionResult, ApiError>>,
    pending: StoredValue<Option<SaveInput>>,
    employee_id: StoredValue<Option<i64>>,
}

impl ActivitiesViewModel {
    pub fn month_data(&self) -> MonthData {
        self.data
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    }

    pub fn open_day(&self, date: NaiveDate) {
        self.form.reset_for(date);
        self.editor.open_create();
    }

    pub fn open_edit(&self, activity: &Activity) {
        self.form.load(activity);
        self.editor.open_edit(activity.id);
    }

    pub fn submit(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        let Some(employee_id) = self.employee_id.get_value() else {
            self.editor.error.set(Some(ApiError::unauthorized()));
            return;
        };
        let request = match self.form.validate(employee_id) {
            Ok(request) => request,
            Err(err) => {
                self.editor.error.set(Some(err));
                return;
            }
        };
        let id = self.editor.editing_id.get_untracked();
        let data = untrack(|| self.data.get())
            .and_then(Result::ok)
            .unwrap_or_default();
        let already = utils::hours_on(&data.activities, request.activity_date, id);
        let new_on_holiday = id.is_none() && data.holidays.contains(&request.activity_date);
        match utils::soft_block(
            request.activity_date,
            request.hours_quantity,
            already,
            new_on_holiday,
        ) {
            Some(confirm) => {
                self.pending.set_value(Some((id, request)));
                self.confirm.set(Some(confirm));
            }
            None => self.save_action.dispatch((id, request)),
        }
    }

    pub fn confirmed(&self) {
        if let Some(input) = self.pending.get_value() {
            self.pending.set_value(None);
            self.save_action.dispatch(input);
        }
    }

    pub fn export(&self) {
        let month = self.month.get_untracked();
        let data = untrack(|| self.data.get())
            .and_then(Result::ok)
            .unwrap_or_default();
        if data.activities.is_empty() {
            self.messages
                .set_error(ApiError::validation("No hay actividades para exportar."));
            return;
        }
        let names = untrack(|| self.project_names.get()).unwrap_or_default();
        crud::export_rows(
            self.messages,
            &format!("Actividades {}", month.label()),
            &utils::EXPORT_HEADERS,
            utils::export_rows(&data.activities, &names),
        );
    }
}

pub fn use_activities_view_model() -> ActivitiesViewModel {
    let api = use_api_client();
    let (auth, _) = use_auth();
    let employee_id = auth
        .get_untracked()
        .employee_id
        .or_else(|| use_session().employee_id());

    let month = create_rw_signal(MonthCursor::current());
    let reload = create_rw_signal(0u32);

    let data = {
        let api = api.clone();
        create_local_resource(
            move || (employee_id, month.get(), reload.get()),
            move |(employee_id, month, _)| {
                let api = api.clone();
                async move {
                    let employee_id = employee_id.ok_or_else(ApiError::unauthorized)?;
                    let activities = repository::fetch_month(&api, employee_id, month).await?;
                    let holidays = repository::fetch_holidays(&api, month)
                        .await
                        .unwrap_or_else(|err| {
                            log::warn!("holidays unavailable: {}", err);
                            HashSet::new()
                        });
                    Ok(MonthData {
                        activities,
                        holidays,
                    })
                }
            },
        )
    };

    let project_names = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    repository::fetch_project_names(&api)
                        .await
                        .unwrap_or_else(|err| {
                            log::warn!("projects unavailable: {}", err);
                            HashMap::new()
                        })
                }
            },
        )
    };

    let activity_types = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    repository::fetch_activity_types(&api)
                        .await
                        .unwrap_or_else(|err| {
                            log::warn!("activity types unavailable: {}", err);
                            Vec::new()
                        })
                }
            },
        )
    };

    let save_action = create_action(move |(id, request): &SaveInput| {
        let api = api.clone();
        let (id, request) = (*id, request.clone());
        async move { repository::save_activity(&api, id, &request).await }
    });

    let editor = EditorState::default();
    let messages = MessageState::default();
    create_effect(move |_| match save_action.value().get() {
        Some(Ok(result)) => {
            messages.set_success(
                result
                    .message
                    .unwrap_or_else(|| "Actividad guardada correctamente".to_string()),
            );
            editor.close();
            reload.update(|value| *value = value.wrapping_add(1));
        }
        Some(Err(err)) => editor.error.set(Some(err)),
        None => {}
    });

    ActivitiesViewModel {
        month,
        data,
        project_names,
        activity_types,
        form: ActivityFormState::default(),
        editor,
        confirm: create_rw_signal(None),
        messages,
        save_action,
        pending: store_value(None),
        employee_id: store_value(employee_id),
    }
}

/// Default date for the "new activity" button: today inside the current
/// month, otherwise the first day of the displayed month.
pub fn default_date(month: MonthCursor, today: NaiveDate) -> NaiveDate {
    if month.contains(today) {
        today
    } else {
        month.first_day()
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers, ssr::with_idle_resources};

    #[test]
    fn submit_without_employee_reports_unauthorized() {
        with_idle_resources(|| {
            provide_context(crate::state::session::SessionStore::in_memory());
            let vm = use_activities_view_model();
            vm.submit();
            assert_eq!(vm.editor.error.get().unwrap().code, "UNAUTHORIZED");
        });
    }

    #[test]
    fn invalid_form_stays_open_with_error() {
        with_idle_resources(|| {
            helpers::provide_auth(helpers::signed_in_state(&["Colaborador"], vec![]));
            let vm = use_activities_view_model();
            vm.open_day(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
            assert!(vm.editor.open.get());
            vm.submit();
            assert_eq!(vm.editor.error.get().unwrap().code, "VALIDATION_ERROR");
            assert!(vm.confirm.get().is_none());
        });
    }

    #[test]
    fn export_without_rows_reports_error() {
        with_idle_resources(|| {
            helpers::provide_auth(helpers::signed_in_state(&["Colaborador"], vec![]));
            let vm = use_activities_view_model();
            vm.export();
            assert!(vm.messages.error.get().is_some());
        });
    }
}
