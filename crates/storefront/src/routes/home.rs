//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::filters;
use crate::models::{Flash, take_flash};
use crate::services::{self, ProductView};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    /// Set when the catalog could not be loaded.
    pub load_error: Option<String>,
    pub flash: Option<Flash>,
    pub cart_count: u64,
}

/// Display the product catalog.
///
/// An unreachable order API still renders the page, with a notice in place
/// of the product grid.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let flash = take_flash(&session).await;
    let cart_count = super::cart_count(&session).await?;

    let (products, load_error) = match services::catalog(state.shop()).await {
        Ok(products) => (products, None),
        Err(e) => {
            warn!(error = %e, "Failed to load catalog");
            (Vec::new(), Some("Products could not be loaded. Please try again shortly.".to_string()))
        }
    };

    Ok(HomeTemplate {
        products,
        load_error,
        flash,
        cart_count,
    })
}
