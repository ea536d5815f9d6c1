//! HTTP route handlers
//!
//! Each handler maps one route to a command and either renders a page or
//! redirects. Form field names match the markup produced by `views`.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use chrono::Local;
use log::info;
use serde::Deserialize;

use crate::commands::{
    add_item, create_category, delete_category_cascade, delete_item, list_categories, list_items,
};
use crate::error::AppError;
use crate::formatter::format_date;
use crate::views::{category_url, render_index, render_list};
use crate::AppState;

#[derive(Deserialize)]
pub struct NewCategoryForm {
    #[serde(rename = "newCategory", default)]
    new_category: String,
}

#[derive(Deserialize)]
pub struct NewItemForm {
    #[serde(rename = "newItem", default)]
    new_item: String,
    #[serde(rename = "listTitle")]
    list_title: Option<String>,
}

/// Delete forms post the record id in `itemCheckbox`
#[derive(Deserialize)]
pub struct CheckboxForm {
    #[serde(rename = "itemCheckbox")]
    item_checkbox: Option<String>,
}

/// GET /
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let categories = list_categories(&state).await?;
    let date = format_date(&Local::now());
    Ok(Html(render_index(&date, &categories)))
}

/// POST /
pub async fn create_category_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewCategoryForm>,
) -> Redirect {
    create_category(&state, &form.new_category).await;
    Redirect::to("/")
}

/// GET /categories/:category
pub async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Html<String>, AppError> {
    info!("Requested category: {}", category);
    let items = list_items(&state, &category).await?;
    Ok(Html(render_list(&category, &items)))
}

/// POST /categories/:category
pub async fn add_item_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Form(form): Form<NewItemForm>,
) -> Result<Html<String>, AppError> {
    let category_name = form
        .list_title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(category);

    info!("New item to add: {}", form.new_item);
    let items = add_item(&state, &form.new_item, &category_name).await?;
    Ok(Html(render_list(&category_name, &items)))
}

/// POST /delete
pub async fn delete_category_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CheckboxForm>,
) -> Result<Redirect, AppError> {
    if let Some(id) = parse_checkbox(form.item_checkbox)? {
        delete_category_cascade(&state, id).await?;
    }
    Ok(Redirect::to("/"))
}

/// POST /categories/:category/delete
pub async fn delete_item_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Form(form): Form<CheckboxForm>,
) -> Result<Redirect, AppError> {
    if let Some(id) = parse_checkbox(form.item_checkbox)? {
        delete_item(&state, id).await?;
    }
    Ok(Redirect::to(&category_url(&category)))
}

/// A missing checkbox value means there is nothing to do
fn parse_checkbox(value: Option<String>) -> Result<Option<u32>, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::MalformedPayload(format!("Invalid id {:?}", raw))),
    }
}
