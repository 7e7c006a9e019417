use crate::{
    api::{ApiError, PageQuery, PagedResponse},
    components::{empty_state::EmptyState, error::InlineErrorMessage, layout::LoadingSpinner},
    utils::search,
};
use leptos::*;
use std::{cmp::Ordering, future::Future};

pub const PAGE_SIZES: &[u32] = &[5, 10, 25, 50];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Paging, search and sort state shared by every list page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub search: String,
    pub sort: Option<(&'static str, SortDirection)>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            search: String::new(),
            sort: None,
        }
    }
}

impl TableQuery {
    pub fn to_page_query(&self) -> PageQuery {
        PageQuery {
            page_number: self.page_number.max(1),
            page_size: self.page_size.max(1),
            search: Some(self.search.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }

    /// A new search always starts from the first page.
    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.page_number = 1;
        }
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page_number = 1;
    }

    /// First click sorts ascending, a second click on the same column flips it.
    pub fn toggle_sort(&mut self, column: &'static str) {
        self.sort = match self.sort {
            Some((current, direction)) if current == column => Some((column, direction.toggled())),
            _ => Some((column, SortDirection::Asc)),
        };
    }

    pub fn total_pages(&self, total_items: i64) -> u32 {
        if total_items <= 0 {
            return 1;
        }
        let size = i64::from(self.page_size.max(1));
        ((total_items + size - 1) / size) as u32
    }

    pub fn go_to(&mut self, page: u32, total_items: i64) {
        self.page_number = page.clamp(1, self.total_pages(total_items));
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => search::normalize(a).cmp(&search::normalize(b)),
    }
}

/// Sorts in place by the text of one column; numeric columns compare as numbers.
pub fn sort_rows<T>(rows: &mut [T], direction: SortDirection, key: impl Fn(&T) -> String) {
    rows.sort_by(|a, b| {
        let ordering = compare_cells(&key(a), &key(b));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Ranks a loaded page against the search and applies the selected sort. The
/// backend already filtered the page, so no row is dropped here.
pub fn visible_rows<T: Clone>(
    items: &[T],
    query: &TableQuery,
    fields: impl Fn(&T) -> Vec<String>,
    column_value: impl Fn(&T, &str) -> String,
) -> Vec<T> {
    let mut rows = search::fuzzy_rank(items, &query.search, fields);
    if let Some((column, direction)) = query.sort {
        sort_rows(&mut rows, direction, |row| column_value(row, column));
    }
    rows
}

/// One table column: header text, sort key and how a row renders as text.
pub struct Column<T> {
    pub header: &'static str,
    pub key: &'static str,
    pub value: fn(&T) -> String,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> Column<T> {
    pub const fn new(header: &'static str, key: &'static str, value: fn(&T) -> String) -> Self {
        Self { header, key, value }
    }
}

pub fn column_cells<T>(columns: &[Column<T>], row: &T) -> Vec<String> {
    columns.iter().map(|column| (column.value)(row)).collect()
}

/// Rows as the table shows them, ready for CSV export.
pub fn column_rows<T>(columns: &[Column<T>], rows: &[T]) -> Vec<Vec<String>> {
    rows.iter().map(|row| column_cells(columns, row)).collect()
}

/// Ranks and sorts a loaded page using the column definitions.
pub fn apply_columns<T: Clone>(items: &[T], query: &TableQuery, columns: &[Column<T>]) -> Vec<T> {
    visible_rows(
        items,
        query,
        |row| column_cells(columns, row),
        |row, key| {
            columns
                .iter()
                .find(|column| column.key == key)
                .map(|column| (column.value)(row))
                .unwrap_or_default()
        },
    )
}

/// Pages a full list on the client, for endpoints that return everything.
pub fn page_locally<T>(items: Vec<T>, query: &PageQuery) -> PagedResponse<T> {
    let total_items = items.len() as i64;
    let page_size = query.page_size.max(1) as usize;
    let skip = (query.page_number.max(1) as usize)
        .saturating_sub(1)
        .saturating_mul(page_size);
    let items: Vec<T> = items.into_iter().skip(skip).take(page_size).collect();
    PagedResponse {
        items,
        total_items,
        page_number: query.page_number as i64,
        page_size: page_size as i64,
        total_pages: (total_items + page_size as i64 - 1) / page_size as i64,
    }
}

pub type PageResource<T> = Resource<(PageQuery, u32), Result<PagedResponse<T>, ApiError>>;

pub struct PagedList<T: 'static> {
    pub query: RwSignal<TableQuery>,
    pub reload: RwSignal<u32>,
    pub resource: PageResource<T>,
}

impl<T> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PagedList<T> {}

impl<T: Clone> PagedList<T> {
    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn page(&self) -> Option<Result<PagedResponse<T>, ApiError>> {
        self.resource.get()
    }

    pub fn items(&self) -> Vec<T> {
        self.page()
            .and_then(Result::ok)
            .map(|page| page.items)
            .unwrap_or_default()
    }

    pub fn total_items(&self) -> i64 {
        self.page()
            .and_then(Result::ok)
            .map(|page| page.total_items)
            .unwrap_or(0)
    }

    pub fn error(&self) -> Option<ApiError> {
        self.page().and_then(Result::err)
    }

    pub fn loading(&self) -> bool {
        self.resource.loading().get()
    }
}

/// Loads one page whenever the table query or the reload counter changes.
pub fn use_paged_list<T, F, Fut>(fetch: F) -> PagedList<T>
where
    T: Clone + 'static,
    F: Fn(PageQuery) -> Fut + 'static,
    Fut: Future<Output = Result<PagedResponse<T>, ApiError>> + 'static,
{
    let query = create_rw_signal(TableQuery::default());
    let reload = create_rw_signal(0u32);
    let resource = create_local_resource(
        move || (query.get().to_page_query(), reload.get()),
        move |(page_query, _)| {
            let fut = fetch(page_query);
            async move {
                let result = fut.await;
                if let Err(err) = &result {
                    log::warn!("list request failed: {}", err);
                }
                result
            }
        },
    );
    PagedList {
        query,
        reload,
        resource,
    }
}

#[component]
pub fn DataTable<T: Clone + 'static>(
    list: PagedList<T>,
    columns: Vec<Column<T>>,
    row_key: fn(&T) -> i64,
    #[prop(optional)] status: Option<fn(&T) -> bool>,
    #[prop(optional)] on_edit: Option<Callback<T>>,
    #[prop(optional)] on_toggle: Option<Callback<T>>,
) -> impl IntoView {
    let columns = store_value(columns);
    let query = list.query;
    let rows = move || columns.with_value(|cols| apply_columns(&list.items(), &query.get(), cols));
    let headers = move || {
        columns.with_value(|cols| {
            cols.iter()
                .map(|column| view! { <SortHeader label=column.header column=column.key query=query /> })
                .collect_view()
        })
    };

    view! {
        <div class="space-y-2">
            {move || list.error().map(|err| view! {
                <InlineErrorMessage error=Signal::derive(move || Some(err.clone())) />
            })}
            <Show when=move || list.loading()>
                <LoadingSpinner />
            </Show>
            <Show when=move || !rows().is_empty() fallback=|| view! { <EmptyState /> }>
                <div class="overflow-x-auto rounded-lg border border-border">
                    <table class="min-w-full divide-y divide-border">
                        <thead class="bg-surface-muted">
                            <tr>
                                {headers()}
                                {status.map(|_| view! {
                                    <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase">"Estado"</th>
                                })}
                                <th class="px-4 py-3"></th>
                            </tr>
                        </thead>
                        <tbody class="bg-surface-elevated divide-y divide-border">
                            <For
                                each=rows
                                key=move |row: &T| {
                                    let cells = columns.with_value(|cols| column_cells(cols, row)).join("|");
                                    (row_key(row), cells, status.map(|f| f(row)))
                                }
                                children=move |row: T| {
                                    let cells = columns.with_value(|cols| column_cells(cols, &row));
                                    let active = status.map(|f| f(&row));
                                    let edit_row = row.clone();
                                    let toggle_row = row;
                                    view! {
                                        <tr>
                                            {cells
                                                .into_iter()
                                                .map(|cell| view! { <td class="px-4 py-3 text-sm text-fg">{cell}</td> })
                                                .collect_view()}
                                            {active.map(|active| view! {
                                                <td class="px-4 py-3"><StatusBadge active=active /></td>
                                            })}
                                            <td class="px-4 py-3 text-right space-x-3 whitespace-nowrap">
                                                {on_edit.map(|cb| view! {
                                                    <button
                                                        type="button"
                                                        class="text-sm text-action-primary-bg hover:underline"
                                                        on:click=move |_| cb.call(edit_row.clone())
                                                    >
                                                        "Editar"
                                                    </button>
                                                })}
                                                {on_toggle.map(|cb| view! {
                                                    <button
                                                        type="button"
                                                        class="text-sm text-fg-muted hover:underline"
                                                        on:click=move |_| cb.call(toggle_row.clone())
                                                    >
                                                        {if active.unwrap_or(true) { "Desactivar" } else { "Activar" }}
                                                    </button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
            <Paginator query=query total_items=Signal::derive(move || list.total_items()) />
        </div>
    }
}

#[component]
pub fn TableToolbar(
    query: RwSignal<TableQuery>,
    #[prop(optional)] on_new: Option<Callback<()>>,
    #[prop(optional)] on_export: Option<Callback<()>>,
    #[prop(optional, into)] new_label: Option<String>,
) -> impl IntoView {
    let new_label = new_label.unwrap_or_else(|| "Nuevo".to_string());
    view! {
        <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-3 mb-4">
            <input
                type="search"
                class="w-full sm:w-72 rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                placeholder="Buscar..."
                prop:value=move || query.get().search
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    query.update(|q| q.set_search(value));
                }
            />
            <div class="flex gap-2">
                {on_export.map(|cb| view! {
                    <button
                        type="button"
                        class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                        on:click=move |_| cb.call(())
                    >
                        "Exportar"
                    </button>
                })}
                {on_new.map(|cb| view! {
                    <button
                        type="button"
                        class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text"
                        on:click=move |_| cb.call(())
                    >
                        {new_label.clone()}
                    </button>
                })}
            </div>
        </div>
    }
}

#[component]
pub fn SortHeader(
    #[prop(into)] label: String,
    column: &'static str,
    query: RwSignal<TableQuery>,
) -> impl IntoView {
    let arrow = move || match query.get().sort {
        Some((current, direction)) if current == column => direction.arrow(),
        _ => "",
    };
    view! {
        <th
            class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider cursor-pointer select-none"
            on:click=move |_| query.update(|q| q.toggle_sort(column))
        >
            {label}" "{arrow}
        </th>
    }
}

#[component]
pub fn Paginator(query: RwSignal<TableQuery>, #[prop(into)] total_items: Signal<i64>) -> impl IntoView {
    let pages = move || query.get().total_pages(total_items.get());
    let current = move || query.get().page_number;
    view! {
        <div class="flex items-center justify-between mt-4 text-sm text-fg-muted">
            <div class="flex items-center gap-2">
                <span>"Filas por página"</span>
                <select
                    class="rounded-md border border-form-control-border bg-form-control-bg px-2 py-1"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                            query.update(|q| q.set_page_size(size));
                        }
                    }
                >
                    {PAGE_SIZES
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option value=size selected=move || query.get().page_size == size>
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <span>{move || format!("{} registros", total_items.get())}</span>
            </div>
            <div class="flex items-center gap-2">
                <button
                    type="button"
                    class="px-3 py-1 rounded-md border border-border disabled:opacity-50"
                    disabled=move || current() <= 1
                    on:click=move |_| {
                        let total = total_items.get_untracked();
                        query.update(|q| q.go_to(q.page_number.saturating_sub(1), total));
                    }
                >
                    "Anterior"
                </button>
                <span>{move || format!("Página {} de {}", current(), pages())}</span>
                <button
                    type="button"
                    class="px-3 py-1 rounded-md border border-border disabled:opacity-50"
                    disabled=move || current() >= pages()
                    on:click=move |_| {
                        let total = total_items.get_untracked();
                        query.update(|q| q.go_to(q.page_number + 1, total));
                    }
                >
                    "Siguiente"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] active: MaybeSignal<bool>) -> impl IntoView {
    view! {
        <span class=move || {
            if active.get() {
                "inline-flex px-2.5 py-0.5 rounded-full text-xs font-medium bg-status-success-bg text-status-success-text"
            } else {
                "inline-flex px-2.5 py-0.5 rounded-full text-xs font-medium bg-surface-muted text-fg-muted"
            }
        }>
            {move || if active.get() { "Activo" } else { "Inactivo" }}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_resets_page_and_maps_to_query() {
        let mut query = TableQuery {
            page_number: 3,
            ..TableQuery::default()
        };
        query.set_search("  ana ".into());
        assert_eq!(query.page_number, 1);
        assert_eq!(query.to_page_query().search.as_deref(), Some("ana"));

        query.set_search("   ".into());
        assert!(query.to_page_query().search.is_none());
    }

    #[test]
    fn sort_toggles_on_same_column() {
        let mut query = TableQuery::default();
        query.toggle_sort("name");
        assert_eq!(query.sort, Some(("name", SortDirection::Asc)));
        query.toggle_sort("name");
        assert_eq!(query.sort, Some(("name", SortDirection::Desc)));
        query.toggle_sort("code");
        assert_eq!(query.sort, Some(("code", SortDirection::Asc)));
    }

    #[test]
    fn page_navigation_is_clamped() {
        let mut query = TableQuery::default();
        assert_eq!(query.total_pages(0), 1);
        assert_eq!(query.total_pages(21), 3);
        query.go_to(9, 21);
        assert_eq!(query.page_number, 3);
        query.go_to(0, 21);
        assert_eq!(query.page_number, 1);
    }

    #[test]
    fn numeric_columns_sort_numerically() {
        let mut rows = vec!["10", "9", "100"];
        sort_rows(&mut rows, SortDirection::Asc, |r| r.to_string());
        assert_eq!(rows, vec!["9", "10", "100"]);
        sort_rows(&mut rows, SortDirection::Desc, |r| r.to_string());
        assert_eq!(rows, vec!["100", "10", "9"]);
    }

    #[test]
    fn text_columns_ignore_accents_and_case() {
        let mut rows = vec!["Óscar", "andrea", "Beatriz"];
        sort_rows(&mut rows, SortDirection::Asc, |r| r.to_string());
        assert_eq!(rows, vec!["andrea", "Beatriz", "Óscar"]);
    }

    #[test]
    fn columns_drive_search_sort_and_export() {
        let columns = [
            Column::new("Nombre", "name", |row: &(String, i32)| row.0.clone()),
            Column::new("Horas", "hours", |row: &(String, i32)| row.1.to_string()),
        ];
        let items: Vec<(String, i32)> = [("Beta", 10), ("Alfa", 9), ("Gamma", 100)]
            .into_iter()
            .map(|(name, hours)| (name.to_string(), hours))
            .collect();
        let query = TableQuery {
            sort: Some(("hours", SortDirection::Desc)),
            ..TableQuery::default()
        };
        let rows = apply_columns(&items, &query, &columns);
        let names: Vec<&str> = rows.iter().map(|row| row.0.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Beta", "Alfa"]);
        assert_eq!(
            column_rows(&columns, &rows[..1]),
            vec![vec!["Gamma".to_string(), "100".to_string()]]
        );
    }

    #[test]
    fn page_locally_slices_requested_page() {
        let query = PageQuery {
            page_number: 2,
            page_size: 2,
            search: None,
        };
        let page = page_locally(vec![1, 2, 3, 4, 5], &query);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_locally_past_the_end_is_empty() {
        let query = PageQuery {
            page_number: u32::MAX,
            page_size: u32::MAX,
            search: None,
        };
        let page = page_locally(vec![1, 2, 3], &query);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 3);
    }

    #[test]
    fn visible_rows_keep_backend_matches_without_local_hit() {
        let items = vec![("Soporte", 2), ("Proyecto Alfa", 1)];
        let query = TableQuery {
            search: "alfa".into(),
            ..TableQuery::default()
        };
        let rows = visible_rows(
            &items,
            &query,
            |(name, _)| vec![name.to_string()],
            |(name, _), _| name.to_string(),
        );
        assert_eq!(rows, vec![("Proyecto Alfa", 1), ("Soporte", 2)]);
    }

    #[test]
    fn selected_sort_overrides_search_ranking() {
        let items = vec![("Proyecto Beta", 3), ("Proyecto Alfa", 1), ("Soporte", 2)];
        let query = TableQuery {
            search: "proy".into(),
            sort: Some(("name", SortDirection::Asc)),
            ..TableQuery::default()
        };
        let rows = visible_rows(
            &items,
            &query,
            |(name, _)| vec![name.to_string()],
            |(name, _), _| name.to_string(),
        );
        assert_eq!(
            rows,
            vec![("Proyecto Alfa", 1), ("Proyecto Beta", 3), ("Soporte", 2)]
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn paginator_shows_page_count() {
        let html = render_to_string(|| {
            let query = create_rw_signal(TableQuery {
                page_number: 2,
                ..TableQuery::default()
            });
            view! { <Paginator query=query total_items=Signal::derive(|| 35) /> }
        });
        assert!(html.contains("Página 2 de 4"));
        assert!(html.contains("35 registros"));
    }

    #[test]
    fn status_badge_labels() {
        let html = render_to_string(|| {
            view! {
                <div>
                    <StatusBadge active=true />
                    <StatusBadge active=false />
                </div>
            }
        });
        assert!(html.contains("Activo"));
        assert!(html.contains("Inactivo"));
    }

    #[test]
    fn toolbar_renders_optional_actions() {
        let html = render_to_string(|| {
            let query = create_rw_signal(TableQuery::default());
            view! {
                <TableToolbar
                    query=query
                    on_new=Callback::new(|_| {})
                    new_label="Nuevo cliente"
                />
            }
        });
        assert!(html.contains("Nuevo cliente"));
        assert!(!html.contains("Exportar"));
    }
}
