use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    dashboard::{Dashboard, dashboard_view},
    html::{PAGE_CONTAINER_STYLE, base},
    transaction::TransactionState,
    user::UserID,
};

/// Display a summary of the authenticated user's transactions.
///
/// A store fault is shown in the page's error banner instead of failing the request.
pub async fn get_dashboard_page(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let mut dashboard = Dashboard::new();
    dashboard.start_loading();
    dashboard.finish_loading(state.service().list(user_id));

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE) {
            h1 class="text-2xl font-bold mb-6" { "Budget Tracker" }
            (dashboard_view(&dashboard))
        }
    };

    base("Dashboard", &content).into_response()
}
