use anyhow::Result;
use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::error::write_error;
use crate::db::models::{NewPlanet, PlanetRecord};
use crate::db::DbPool;

pub struct PlanetRepository {
    pool: DbPool,
}

impl PlanetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list(&self) -> Result<Vec<PlanetRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM planets ORDER BY id",
            PlanetRecord::COLUMNS
        ))?;

        let planets = stmt
            .query_map([], PlanetRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(planets)
    }

    pub fn get_by_id(&self, planet_id: i64) -> Result<Option<PlanetRecord>> {
        let conn = self.pool.get()?;
        let planet = conn
            .query_row(
                &format!("SELECT {} FROM planets WHERE id = ?", PlanetRecord::COLUMNS),
                [planet_id],
                PlanetRecord::from_row,
            )
            .optional()?;
        Ok(planet)
    }

    pub fn create(&self, planet: &NewPlanet) -> Result<PlanetRecord> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO planets (name, climate, terrain, population, created_at) VALUES (?, ?, ?, ?, ?)",
            (
                &planet.name,
                &planet.climate,
                &planet.terrain,
                planet.population,
                created_at.to_rfc3339(),
            ),
        )
        .map_err(|e| write_error(e, "create planet"))?;

        Ok(PlanetRecord {
            id: conn.last_insert_rowid(),
            name: planet.name.clone(),
            climate: planet.climate.clone(),
            terrain: planet.terrain.clone(),
            population: planet.population,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DbError};

    fn setup_test_db() -> (Database, PlanetRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        db.seed_test_data().expect("Failed to seed test data");
        let repo = PlanetRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn test_seeded_planets() {
        let (_db, repo) = setup_test_db();
        let planets = repo.list().unwrap();
        assert_eq!(planets.len(), 4);

        let hoth = repo.get_by_id(3).unwrap().unwrap();
        assert_eq!(hoth.name, "Hoth");
        assert_eq!(hoth.population, None);
    }

    #[test]
    fn test_create_planet() {
        let (_db, repo) = setup_test_db();
        let dagobah = repo
            .create(&NewPlanet {
                name: "Dagobah".to_string(),
                climate: Some("murky".to_string()),
                terrain: Some("swamp, jungles".to_string()),
                population: None,
            })
            .unwrap();

        assert_eq!(repo.get_by_id(dagobah.id).unwrap(), Some(dagobah));
    }

    #[test]
    fn test_planet_names_are_unique() {
        let (_db, repo) = setup_test_db();
        let err = repo
            .create(&NewPlanet {
                name: "Tatooine".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.downcast_ref::<DbError>().is_some());
    }
}
