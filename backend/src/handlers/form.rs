//! Form defaults handler

use axum::{extract::Query, Json};
use serde::Deserialize;
use shared::{FormMode, FormState};

#[derive(Deserialize)]
pub struct FormQuery {
    #[serde(default)]
    pub mode: FormMode,
}

/// Field values and options for the requested form mode
pub async fn get_form(Query(query): Query<FormQuery>) -> Json<FormState> {
    Json(FormState::for_mode(query.mode))
}
