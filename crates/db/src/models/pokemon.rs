//! Pokemon and everything a detail view joins onto them.
//!
//! The detail is assembled from four independent queries (see
//! [`PokemonRepo::find`](crate::repositories::PokemonRepo::find)): the
//! pokemon with its camp and dungeon encounters, which goes through the
//! row decoder, plus three plain child lists.

use pmdx_core::types::DbId;
use sqlx::FromRow;

use crate::decode::JoinedRow;
use crate::models::named::NamedResource;

pub const RESOURCE: &str = "pokemon";

/// A row from the `pokemon` table with its camp resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: DbId,
    pub name: String,
    pub classification: String,
    pub evolution_stage: i32,
    pub evolve_condition: String,
    pub evolve_level: Option<i32>,
    pub evolve_crystals: Option<i32>,
    pub camp: NamedResource,
}

/// A dungeon the pokemon appears in, optionally as a super enemy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonEncounter {
    pub dungeon: NamedResource,
    pub is_super: bool,
}

/// A move the pokemon can learn and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedMove {
    pub attack_move: NamedResource,
    pub method: String,
    pub cost: Option<i32>,
    pub level: Option<i32>,
}

/// Everything served by `GET /v1/pokemon/{idOrName}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonDetail {
    pub pokemon: Pokemon,
    pub abilities: Vec<NamedResource>,
    pub dungeons: Vec<PokemonEncounter>,
    pub moves: Vec<LearnedMove>,
    pub types: Vec<NamedResource>,
}

/// A pokemon joined with its camp and one dungeon encounter.
#[derive(Debug, Clone, FromRow)]
pub struct PokemonRow {
    pub dex_number: DbId,
    pub pokemon_name: String,
    pub evolution_stage: i32,
    pub evolve_condition: String,
    pub evolve_level: Option<i32>,
    pub evolve_crystals: Option<i32>,
    pub classification: String,
    pub camp_id: DbId,
    pub camp_name: String,
    pub dungeon_id: Option<DbId>,
    pub dungeon_name: Option<String>,
    pub super_enemy: Option<bool>,
}

impl JoinedRow for PokemonRow {
    type Parent = Pokemon;
    type Child = PokemonEncounter;

    fn parent_key(&self) -> Option<DbId> {
        Some(self.dex_number)
    }

    fn split(self) -> (Pokemon, Option<PokemonEncounter>) {
        let parent = Pokemon {
            id: self.dex_number,
            name: self.pokemon_name.clone(),
            classification: self.classification.clone(),
            evolution_stage: self.evolution_stage,
            evolve_condition: self.evolve_condition.clone(),
            evolve_level: self.evolve_level,
            evolve_crystals: self.evolve_crystals,
            camp: NamedResource::new(self.camp_id, self.camp_name.clone()),
        };
        (parent, self.into_child())
    }

    fn into_child(self) -> Option<PokemonEncounter> {
        Some(PokemonEncounter {
            dungeon: NamedResource::from_columns(self.dungeon_id, self.dungeon_name)?,
            is_super: self.super_enemy.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LearnedMoveRow {
    pub move_id: DbId,
    pub move_name: String,
    pub learn_type: String,
    pub cost: Option<i32>,
    pub level: Option<i32>,
}

impl From<LearnedMoveRow> for LearnedMove {
    fn from(row: LearnedMoveRow) -> Self {
        Self {
            attack_move: NamedResource::new(row.move_id, row.move_name),
            method: row.learn_type,
            cost: row.cost,
            level: row.level,
        }
    }
}
