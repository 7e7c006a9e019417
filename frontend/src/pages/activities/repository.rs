use crate::{
    api::{Activity, ActivityRequest, ActionResult, ApiClient, ApiError, CatalogItem, PageQuery},
    utils::dates::MonthCursor,
};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

pub async fn fetch_month(
    api: &ApiClient,
    employee_id: i64,
    month: MonthCursor,
) -> Result<Vec<Activity>, ApiError> {
    api.get_activities_by_employee(employee_id, month.year, month.month)
        .await
}

pub async fn fetch_project_names(api: &ApiClient) -> Result<HashMap<i64, String>, ApiError> {
    let page = api.get_projects(&PageQuery::reference()).await?;
    Ok(page
        .items
        .into_iter()
        .map(|project| (project.id, project.name))
        .collect())
}

/// Active holiday dates falling in `month`.
pub async fn fetch_holidays(
    api: &ApiClient,
    month: MonthCursor,
) -> Result<HashSet<NaiveDate>, ApiError> {
    let page = api.get_holidays(&PageQuery::reference()).await?;
    Ok(page
        .items
        .into_iter()
        .filter(|holiday| holiday.status && month.contains(holiday.holiday_date))
        .map(|holiday| holiday.holiday_date)
        .collect())
}

pub async fn fetch_activity_types(api: &ApiClient) -> Result<Vec<CatalogItem>, ApiError> {
    api.get_activity_types().await
}

pub async fn save_activity(
    api: &ApiClient,
    id: Option<i64>,
    request: &ActivityRequest,
) -> Result<ActionResult, ApiError> {
    match id {
        Some(id) => api.update_activity(id, request).await,
        None => api.create_activity(request).await,
    }
}
