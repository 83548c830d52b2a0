//! Public page content endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use portal_content::catalogue::{About, Hero, Partner, Program, Statistics};
use portal_content::{AnnouncementCard, EventCard, PhotoCard, SiteCatalogue};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// Everything the landing page renders, static sections included.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub hero: Hero,
    pub about: About,
    pub programs: Vec<Program>,
    pub events: Vec<EventCard>,
    pub announcements: Vec<AnnouncementCard>,
    pub photos: Vec<PhotoCard>,
    pub statistics: Statistics,
    pub partners: Vec<Partner>,
}

pub fn create_content_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/home", get(home))
        .route("/api/agenda", get(agenda))
        .route("/api/informasi", get(informasi))
        .route("/api/galeri", get(galeri))
        .route("/api/programs", get(programs))
        .route("/api/programs/:abbreviation", get(program))
}

#[utoipa::path(
    get,
    path = "/api/home",
    tag = "Content",
    responses(
        (status = 200, description = "Landing page content; failed feeds are empty", body = HomePage)
    )
)]
pub async fn home(State(state): State<Arc<GatewayState>>) -> Json<HomePage> {
    let feeds = state.feeds().home().await;
    let catalogue = SiteCatalogue::get();

    Json(HomePage {
        hero: catalogue.hero.clone(),
        about: catalogue.about.clone(),
        programs: catalogue.programs.clone(),
        events: feeds.events,
        announcements: feeds.announcements,
        photos: feeds.photos,
        statistics: catalogue.statistics.clone(),
        partners: catalogue.partners.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/api/agenda",
    tag = "Content",
    responses(
        (status = 200, description = "Upcoming active events", body = [EventCard])
    )
)]
pub async fn agenda(State(state): State<Arc<GatewayState>>) -> Json<Vec<EventCard>> {
    Json(state.feeds().events().await)
}

#[utoipa::path(
    get,
    path = "/api/informasi",
    tag = "Content",
    responses(
        (status = 200, description = "Latest active announcements", body = [AnnouncementCard])
    )
)]
pub async fn informasi(State(state): State<Arc<GatewayState>>) -> Json<Vec<AnnouncementCard>> {
    Json(state.feeds().announcements().await)
}

#[utoipa::path(
    get,
    path = "/api/galeri",
    tag = "Content",
    responses(
        (status = 200, description = "Photos from published galleries", body = [PhotoCard])
    )
)]
pub async fn galeri(State(state): State<Arc<GatewayState>>) -> Json<Vec<PhotoCard>> {
    Json(state.feeds().photos().await)
}

#[utoipa::path(
    get,
    path = "/api/programs",
    tag = "Content",
    responses(
        (status = 200, description = "Study programs", body = [Program])
    )
)]
pub async fn programs() -> Json<Vec<Program>> {
    Json(SiteCatalogue::get().programs.clone())
}

#[utoipa::path(
    get,
    path = "/api/programs/{abbreviation}",
    tag = "Content",
    params(("abbreviation" = String, Path, description = "Program abbreviation, e.g. PPLG")),
    responses(
        (status = 200, description = "Study program", body = Program),
        (status = 404, description = "Unknown program")
    )
)]
pub async fn program(Path(abbreviation): Path<String>) -> GatewayResult<Json<Program>> {
    SiteCatalogue::get()
        .program(&abbreviation)
        .cloned()
        .map(Json)
        .ok_or_else(|| GatewayError::NotFound(format!("program {abbreviation}")))
}
