//! API routes

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;

use crate::extractors::AppState;
use crate::handlers::{
    banks, categories, clients, documents, estimates, expenses, materials, payments, stages,
    subcategories, users,
};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_root))
        .nest("/users", users_router())
        .nest("/clients", clients_router())
        .nest("/stages", stages_router())
        .nest("/categories", categories_router())
        .nest("/subcategories", subcategories_router())
        .nest("/materials", materials_router())
        .nest("/estimates", estimates_router())
        .nest("/client-payments", payments_router())
        .nest("/client-expenses", expenses_router())
        .nest("/banks", banks_router())
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/", post(users::create_user))
        .route("/login", post(users::login))
}

fn clients_router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients))
        .route("/", post(clients::create_client))
        .route("/:id", get(clients::get_client))
        .route("/:id", patch(clients::update_client))
        .route("/:id/stage", patch(clients::advance_stage))
        .route("/:id/payment-report", get(documents::payment_report))
}

fn stages_router() -> Router<AppState> {
    Router::new().route("/", get(stages::list_stages))
}

fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list_categories))
        .route("/", post(categories::create_category))
        .route("/:id", patch(categories::update_category))
        .route("/:id/status", patch(categories::set_category_status))
}

fn subcategories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(subcategories::list_subcategories))
        .route("/", post(subcategories::create_subcategory))
        .route("/:id", patch(subcategories::update_subcategory))
        .route("/:id/status", patch(subcategories::set_subcategory_status))
}

fn materials_router() -> Router<AppState> {
    Router::new()
        .route("/", get(materials::list_materials))
        .route("/", post(materials::create_material))
        .route("/:id", patch(materials::update_material))
        .route("/:id/status", patch(materials::set_material_status))
}

fn estimates_router() -> Router<AppState> {
    Router::new()
        .route("/", get(estimates::list_estimates))
        .route("/", post(estimates::create_estimate))
        .route("/:id", get(estimates::get_estimate))
        .route("/:id/status", patch(estimates::set_estimate_status))
        .route("/:id/document", get(documents::estimate_document))
        .route("/:id/share-link", get(documents::estimate_share_link))
}

fn payments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(payments::list_payments))
        .route("/", post(payments::create_payment))
        .route("/:id/status", patch(payments::mark_payment_paid))
        .route("/:id/receipt", get(documents::payment_receipt))
}

fn expenses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(expenses::list_expenses))
        .route("/", post(expenses::create_expense))
        .route("/monthly", get(expenses::monthly_expenses))
}

fn banks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(banks::list_banks))
        .route("/", post(banks::create_bank))
        .route("/:id", patch(banks::update_bank))
}

async fn api_root() -> axum::Json<ApiRoot> {
    axum::Json(ApiRoot {
        instance_name: "Sitedesk".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoot {
    instance_name: String,
    version: String,
}
