use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{parse_id, ApiError, ApiResult},
    db::repositories::{CharacterRepository, PlanetRepository},
    serialize,
    state::AppState,
};
use starblog_types::{Character, Planet};

/// GET /planets - List all planets
pub async fn list_planets(State(state): State<AppState>) -> ApiResult<Json<Vec<Planet>>> {
    let planets = PlanetRepository::new(state.db.pool.clone()).list()?;
    Ok(Json(serialize::many(&planets)))
}

/// GET /planets/:id - Get a single planet
pub async fn get_planet(
    State(state): State<AppState>,
    Path(planet_id): Path<String>,
) -> ApiResult<Json<Planet>> {
    let planet_id = parse_id(&planet_id, "planet")?;

    let planet = PlanetRepository::new(state.db.pool.clone())
        .get_by_id(planet_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Planet {} not found", planet_id)))?;

    Ok(Json(Planet::from(&planet)))
}

/// GET /planets/:id/residents - Characters whose homeworld is this planet
pub async fn get_residents(
    State(state): State<AppState>,
    Path(planet_id): Path<String>,
) -> ApiResult<Json<Vec<Character>>> {
    let planet_id = parse_id(&planet_id, "planet")?;
    let pool = state.db.pool.clone();

    PlanetRepository::new(pool.clone())
        .get_by_id(planet_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Planet {} not found", planet_id)))?;

    let residents = CharacterRepository::new(pool).list_by_homeworld(planet_id)?;
    Ok(Json(serialize::many(&residents)))
}
