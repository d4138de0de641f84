//! Camps and the pokemon living in them.

use pmdx_core::types::DbId;
use sqlx::FromRow;

use crate::decode::{Composite, JoinedRow};
use crate::models::named::NamedResource;

pub const RESOURCE: &str = "camp";

/// A row from the `camp` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camp {
    pub id: DbId,
    pub name: String,
    pub unlock_type: String,
    pub cost: i32,
    pub description: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CampRow {
    pub camp_id: DbId,
    pub camp_name: String,
    pub unlock_type: String,
    pub cost: i32,
    pub description: String,
    pub pokemon_id: Option<DbId>,
    pub pokemon_name: Option<String>,
}

impl JoinedRow for CampRow {
    type Parent = Camp;
    type Child = NamedResource;

    fn parent_key(&self) -> Option<DbId> {
        Some(self.camp_id)
    }

    fn split(self) -> (Camp, Option<NamedResource>) {
        let child = NamedResource::from_columns(self.pokemon_id, self.pokemon_name);
        let parent = Camp {
            id: self.camp_id,
            name: self.camp_name,
            unlock_type: self.unlock_type,
            cost: self.cost,
            description: self.description,
        };
        (parent, child)
    }

    fn into_child(self) -> Option<NamedResource> {
        NamedResource::from_columns(self.pokemon_id, self.pokemon_name)
    }
}

pub type CampDetail = Composite<Camp, NamedResource>;
