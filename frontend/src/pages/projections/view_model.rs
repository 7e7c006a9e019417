use super::{repository, utils};
use crate::{
    api::{ActionResult, ApiError, CatalogItem, PeriodKind, Project, Projection, ProjectionRow},
    components::feedback::MessageState,
    state::auth::use_api_client,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct ProjectionsViewModel {
    pub projects: Resource<(), Vec<Project>>,
    pub resource_types: Resource<(), Vec<CatalogItem>>,
    pub project_id: RwSignal<Option<i64>>,
    pub period_kind: RwSignal<PeriodKind>,
    pub period_count: RwSignal<u32>,
    pub rows: RwSignal<Vec<ProjectionRow>>,
    pub messages: MessageState,
    pub load_action: Action<i64, Result<Option<Projection>, ApiError>>,
    pub save_action: Action<Projection, Result<ActionResult, ApiError>>,
}

impl ProjectionsViewModel {
    pub fn selected_project(&self) -> Option<Project> {
        let id = self.project_id.get()?;
        self.projects
            .with(|projects| {
                projects
                    .as_ref()
                    .and_then(|list| list.iter().find(|p| p.id == id).cloned())
            })
    }

    pub fn labels(&self) -> Vec<String> {
        let count = self.period_count.get();
        let kind = self.period_kind.get();
        match self.selected_project() {
            Some(project) => utils::period_labels(kind, project.start_date, count),
            None => (1..=count).map(|n| format!("Periodo {}", n)).collect(),
        }
    }

    pub fn select_project(&self, value: &str) {
        self.messages.clear();
        let id = value.trim().parse::<i64>().ok();
        self.project_id.set(id);
        self.reset_table();
        if let Some(id) = id {
            self.load_action.dispatch(id);
        }
    }

    fn reset_table(&self) {
        self.period_kind.set(PeriodKind::default());
        self.period_count.set(utils::DEFAULT_PERIOD_COUNT);
        self.rows.set(Vec::new());
    }

    /// Takes over a stored projection, or starts empty when there is none.
    pub fn apply_loaded(&self, projection: Option<Projection>) {
        let Some(projection) = projection else {
            self.reset_table();
            return;
        };
        let count = utils::clamp_period_count(projection.period_count);
        let mut rows = projection.resources;
        utils::resize_distribution(&mut rows, count);
        utils::recompute(&mut rows);
        self.period_kind.set(projection.period_kind);
        self.period_count.set(count);
        self.rows.set(rows);
    }

    pub fn set_period_kind(&self, kind: PeriodKind) {
        self.period_kind.set(kind);
    }

    pub fn set_period_count(&self, count: u32) {
        let count = utils::clamp_period_count(count);
        self.period_count.set(count);
        self.rows.update(|rows| {
            utils::resize_distribution(rows, count);
            utils::recompute(rows);
        });
    }

    pub fn add_resource(&self, resource_type_id: i64) {
        let Some(resource) = untrack(|| {
            self.resource_types.with(|types| {
                types
                    .as_ref()
                    .and_then(|list| list.iter().find(|t| t.id == resource_type_id).cloned())
            })
        }) else {
            return;
        };
        let count = self.period_count.get_untracked();
        self.rows.update(|rows| {
            rows.push(utils::new_row(&resource, count));
            utils::recompute(rows);
        });
    }

    pub fn remove_row(&self, index: usize) {
        self.rows.update(|rows| {
            if index < rows.len() {
                rows.remove(index);
                utils::recompute(rows);
            }
        });
    }

    fn edit_row(&self, index: usize, edit: impl FnOnce(&mut ProjectionRow)) {
        self.rows.update(|rows| {
            if let Some(row) = rows.get_mut(index) {
                edit(row);
                utils::recompute(rows);
            }
        });
    }

    pub fn set_hours(&self, index: usize, period: usize, value: &str) {
        let hours = utils::parse_amount(value);
        self.edit_row(index, |row| {
            if let Some(cell) = row.time_distribution.get_mut(period) {
                *cell = hours;
            }
        });
    }

    pub fn set_quantity(&self, index: usize, value: &str) {
        let quantity = utils::parse_amount(value);
        self.edit_row(index, |row| row.resource_quantity = quantity);
    }

    pub fn set_hourly_cost(&self, index: usize, value: &str) {
        let cost = utils::parse_amount(value);
        self.edit_row(index, |row| row.hourly_cost = cost);
    }

    pub fn to_projection(&self) -> Result<Projection, ApiError> {
        let project_id = self
            .project_id
            .get_untracked()
            .ok_or_else(|| ApiError::validation("Seleccione un proyecto."))?;
        let resources = self.rows.get_untracked();
        if resources.is_empty() {
            return Err(ApiError::validation("Agregue al menos un recurso."));
        }
        if resources.iter().any(|row| row.resource_quantity <= 0.0) {
            return Err(ApiError::validation(
                "La cantidad de cada recurso debe ser mayor que 0.",
            ));
        }
        Ok(Projection {
            project_id,
            period_kind: self.period_kind.get_untracked(),
            period_count: self.period_count.get_untracked(),
            resources,
        })
    }

    pub fn save(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        match self.to_projection() {
            Ok(projection) => self.save_action.dispatch(projection),
            Err(err) => self.messages.set_error(err),
        }
    }
}

pub fn use_projections_view_model() -> ProjectionsViewModel {
    let api = use_api_client();
    let projects = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    repository::fetch_projects(&api).await.unwrap_or_else(|err| {
                        log::warn!("projects unavailable: {}", err);
                        Vec::new()
                    })
                }
            },
        )
    };
    let resource_types = {
        let api = api.clone();
        create_local_resource(
            || (),
            move |_| {
                let api = api.clone();
                async move {
                    repository::fetch_resource_types(&api)
                        .await
                        .unwrap_or_else(|err| {
                            log::warn!("resource types unavailable: {}", err);
                            Vec::new()
                        })
                }
            },
        )
    };
    let load_action = {
        let api = api.clone();
        create_action(move |project_id: &i64| {
            let api = api.clone();
            let project_id = *project_id;
            async move { repository::fetch_projection(&api, project_id).await }
        })
    };
    let save_action = create_action(move |projection: &Projection| {
        let api = api.clone();
        let projection = projection.clone();
        async move { repository::save(&api, &projection).await }
    });

    let vm = ProjectionsViewModel {
        projects,
        resource_types,
        project_id: create_rw_signal(None),
        period_kind: create_rw_signal(PeriodKind::default()),
        period_count: create_rw_signal(utils::DEFAULT_PERIOD_COUNT),
        rows: create_rw_signal(Vec::new()),
        messages: MessageState::default(),
        load_action,
        save_action,
    };

    create_effect(move |_| match load_action.value().get() {
        Some(Ok(projection)) => vm.apply_loaded(projection),
        Some(Err(err)) => vm.messages.set_error(err),
        None => {}
    });
    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            vm.messages
                .report(&result, "Proyección guardada correctamente");
        }
    });
    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_idle_resources;

    fn row(cost: f64, hours: Vec<f64>) -> ProjectionRow {
        ProjectionRow {
            resource_type_id: 1,
            resource_name: "Desarrollador".into(),
            hourly_cost: cost,
            resource_quantity: 1.0,
            time_distribution: hours,
            total_time: 0.0,
            resource_cost: 0.0,
            participation_percentage: 0.0,
        }
    }

    #[test]
    fn loaded_projection_is_recomputed() {
        with_idle_resources(|| {
            let vm = use_projections_view_model();
            vm.apply_loaded(Some(Projection {
                project_id: 3,
                period_kind: PeriodKind::Weekly,
                period_count: 2,
                resources: vec![row(25.0, vec![4.0, 6.0])],
            }));
            assert_eq!(vm.period_kind.get_untracked(), PeriodKind::Weekly);
            let rows = vm.rows.get_untracked();
            assert_eq!(rows[0].total_time, 10.0);
            assert_eq!(rows[0].resource_cost, 250.0);
            assert_eq!(rows[0].participation_percentage, 100.0);
        });
    }

    #[test]
    fn editing_cells_updates_costs() {
        with_idle_resources(|| {
            let vm = use_projections_view_model();
            vm.rows.set(vec![row(10.0, vec![0.0, 0.0])]);
            vm.set_hours(0, 1, "12");
            vm.set_quantity(0, "2");
            let rows = vm.rows.get_untracked();
            assert_eq!(rows[0].total_time, 12.0);
            assert_eq!(rows[0].resource_cost, 240.0);
        });
    }

    #[test]
    fn changing_period_count_resizes_rows() {
        with_idle_resources(|| {
            let vm = use_projections_view_model();
            vm.rows.set(vec![row(10.0, vec![1.0, 2.0])]);
            vm.set_period_count(4);
            assert_eq!(vm.rows.get_untracked()[0].time_distribution.len(), 4);
        });
    }

    #[test]
    fn saving_requires_project_and_rows() {
        with_idle_resources(|| {
            let vm = use_projections_view_model();
            assert_eq!(vm.to_projection().unwrap_err().error, "Seleccione un proyecto.");
            vm.project_id.set(Some(3));
            assert_eq!(
                vm.to_projection().unwrap_err().error,
                "Agregue al menos un recurso."
            );
            vm.rows.set(vec![row(10.0, vec![1.0])]);
            vm.period_count.set(1);
            let projection = vm.to_projection().unwrap();
            assert_eq!(projection.project_id, 3);
            assert_eq!(projection.period_count, 1);
        });
    }

    #[test]
    fn labels_fall_back_without_project() {
        with_idle_resources(|| {
            let vm = use_projections_view_model();
            vm.period_count.set(2);
            assert_eq!(vm.labels(), vec!["Periodo 1", "Periodo 2"]);
        });
    }

    #[test]
    fn adding_unknown_resource_before_catalog_loads_is_ignored() {
        with_idle_resources(|| {
            let vm = use_projections_view_model();
            vm.add_resource(5);
            assert!(vm.rows.get_untracked().is_empty());
        });
    }
}
