//! Dungeons and the pokemon encountered in them.

use pmdx_core::types::DbId;
use sqlx::FromRow;

use crate::decode::{Composite, JoinedRow};
use crate::models::named::NamedResource;

pub const RESOURCE: &str = "dungeon";

/// A row from the `dungeon` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    pub id: DbId,
    pub name: String,
    pub levels: i32,
    pub start_level: i32,
    pub team_size: i32,
    pub items_allowed: bool,
    pub pokemon_joining: bool,
    pub map_visible: bool,
}

/// A pokemon encountered in a dungeon, optionally as a super enemy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonEncounter {
    pub pokemon: NamedResource,
    pub is_super: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct DungeonRow {
    pub dungeon_id: DbId,
    pub dungeon_name: String,
    pub levels: i32,
    pub start_level: i32,
    pub team_size: i32,
    pub items_allowed: bool,
    pub pokemon_joining: bool,
    pub map_visible: bool,
    pub super_enemy: Option<bool>,
    pub pokemon_id: Option<DbId>,
    pub pokemon_name: Option<String>,
}

impl JoinedRow for DungeonRow {
    type Parent = Dungeon;
    type Child = DungeonEncounter;

    fn parent_key(&self) -> Option<DbId> {
        Some(self.dungeon_id)
    }

    fn split(self) -> (Dungeon, Option<DungeonEncounter>) {
        let parent = Dungeon {
            id: self.dungeon_id,
            name: self.dungeon_name.clone(),
            levels: self.levels,
            start_level: self.start_level,
            team_size: self.team_size,
            items_allowed: self.items_allowed,
            pokemon_joining: self.pokemon_joining,
            map_visible: self.map_visible,
        };
        (parent, self.into_child())
    }

    fn into_child(self) -> Option<DungeonEncounter> {
        Some(DungeonEncounter {
            pokemon: NamedResource::from_columns(self.pokemon_id, self.pokemon_name)?,
            is_super: self.super_enemy.unwrap_or_default(),
        })
    }
}

pub type DungeonDetail = Composite<Dungeon, DungeonEncounter>;
