//! Building handling logic

use crate::db::Database;
use crate::error::{CoreError, Result};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A stored building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: i64,
    pub address: String,
    pub name: String,
}

/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBuilding {
    pub address: String,
    pub name: String,
}

const DUPLICATE_BUILDING: &str = "A building with that address and name already exists";

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound("Building", format!("Building {} was not found.", id))
}

/// Building handler for business logic
#[derive(Clone)]
pub struct BuildingHandler {
    db: Arc<Database>,
}

impl BuildingHandler {
    pub fn new(db: Arc<Database>) -> Self {
        BuildingHandler { db }
    }

    /// All buildings in id order
    pub async fn list(&self) -> Result<Vec<Building>> {
        self.db
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT id, address, name FROM buildings ORDER BY id")?;
                let buildings = stmt
                    .query_map([], |row| {
                        Ok(Building {
                            id: row.get(0)?,
                            address: row.get(1)?,
                            name: row.get(2)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(buildings)
            })
            .await
    }

    /// The building with `id`, as a single-element vector
    pub async fn get(&self, id: i64) -> Result<Vec<Building>> {
        let building = self
            .db
            .with_conn(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT id, address, name FROM buildings WHERE id = ?",
                        [id],
                        |row| {
                            Ok(Building {
                                id: row.get(0)?,
                                address: row.get(1)?,
                                name: row.get(2)?,
                            })
                        },
                    )
                    .optional()?)
            })
            .await?;

        tracing::debug!("Building lookup for id {}: found={}", id, building.is_some());
        building.map(|b| vec![b]).ok_or_else(|| not_found(id))
    }

    /// Insert a building and return its store-assigned id
    pub async fn create(&self, new: NewBuilding) -> Result<i64> {
        let id = self
            .db
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO buildings (address, name) VALUES (?, ?)",
                    params![new.address, new.name],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| e.into_conflict(DUPLICATE_BUILDING))?;

        tracing::info!("Created building {}", id);
        Ok(id)
    }

    /// Overwrite the address and name of building `id`
    pub async fn update(&self, id: i64, new: NewBuilding) -> Result<i64> {
        let changed = self
            .db
            .with_conn(move |conn| {
                Ok(conn.execute(
                    "UPDATE buildings SET address = ?, name = ? WHERE id = ?",
                    params![new.address, new.name, id],
                )?)
            })
            .await
            .map_err(|e| e.into_conflict(DUPLICATE_BUILDING))?;

        if changed == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Updated building {}", id);
        Ok(id)
    }

    /// Remove building `id`, returning a confirmation message
    pub async fn delete(&self, id: i64) -> Result<String> {
        let removed = self
            .db
            .with_conn(move |conn| Ok(conn.execute("DELETE FROM buildings WHERE id = ?", [id])?))
            .await?;

        if removed == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted building {}", id);
        Ok(format!("Building {} was deleted", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{
        seeded_db, FIRST_BUILDING_ADDRESS, FIRST_BUILDING_NAME, SEEDED_BUILDINGS,
    };

    fn new_building(address: &str, name: &str) -> NewBuilding {
        NewBuilding {
            address: address.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_starts_with_seeded_building() {
        let handler = BuildingHandler::new(seeded_db());
        let buildings = handler.list().await.unwrap();

        assert_eq!(buildings.len() as i64, SEEDED_BUILDINGS);
        assert_eq!(buildings[0].address, FIRST_BUILDING_ADDRESS);
        assert_eq!(buildings[0].name, FIRST_BUILDING_NAME);
    }

    #[tokio::test]
    async fn test_create_then_get_by_assigned_id() {
        let handler = BuildingHandler::new(seeded_db());
        let id = handler
            .create(new_building("123 fake stree", "Fake Building"))
            .await
            .unwrap();
        assert_eq!(id, SEEDED_BUILDINGS + 1);

        let found = handler.get(id).await.unwrap();
        assert_eq!(
            found,
            vec![Building {
                id,
                address: "123 fake stree".to_string(),
                name: "Fake Building".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let handler = BuildingHandler::new(seeded_db());
        let err = handler
            .create(new_building(FIRST_BUILDING_ADDRESS, FIRST_BUILDING_NAME))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let handler = BuildingHandler::new(seeded_db());
        let payload = new_building(FIRST_BUILDING_ADDRESS, "Modera Perrrrk");

        assert_eq!(handler.update(1, payload.clone()).await.unwrap(), 1);
        assert_eq!(handler.update(1, payload).await.unwrap(), 1);
        assert_eq!(handler.get(1).await.unwrap()[0].name, "Modera Perrrrk");
    }

    #[tokio::test]
    async fn test_update_into_existing_pair_is_conflict() {
        let handler = BuildingHandler::new(seeded_db());
        let err = handler
            .update(2, new_building(FIRST_BUILDING_ADDRESS, FIRST_BUILDING_NAME))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let handler = BuildingHandler::new(seeded_db());

        assert!(matches!(handler.get(600).await, Err(CoreError::NotFound("Building", _))));
        assert!(matches!(
            handler.update(600, new_building("a", "b")).await,
            Err(CoreError::NotFound("Building", _))
        ));
        assert!(matches!(handler.delete(600).await, Err(CoreError::NotFound("Building", _))));
    }

    #[tokio::test]
    async fn test_delete_then_absent() {
        let handler = BuildingHandler::new(seeded_db());

        let message = handler.delete(1).await.unwrap();
        assert_eq!(message, "Building 1 was deleted");
        assert!(matches!(handler.get(1).await, Err(CoreError::NotFound(..))));
        assert!(matches!(handler.delete(1).await, Err(CoreError::NotFound(..))));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let handler = BuildingHandler::new(seeded_db());
        handler.delete(SEEDED_BUILDINGS).await.unwrap();

        let id = handler.create(new_building("9 New St", "Newer")).await.unwrap();
        assert_eq!(id, SEEDED_BUILDINGS + 1);
    }
}
