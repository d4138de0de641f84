//! Abilities and the pokemon that have them.

use pmdx_core::types::DbId;
use sqlx::FromRow;

use crate::decode::{Composite, JoinedRow};
use crate::models::named::NamedResource;

/// Resource type used in not-found errors.
pub const RESOURCE: &str = "ability";

/// A row from the `ability` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub id: DbId,
    pub name: String,
    pub description: String,
}

/// An ability joined with one pokemon that has it.
#[derive(Debug, Clone, FromRow)]
pub struct AbilityRow {
    pub ability_id: DbId,
    pub ability_name: String,
    pub description: String,
    pub pokemon_id: Option<DbId>,
    pub pokemon_name: Option<String>,
}

impl JoinedRow for AbilityRow {
    type Parent = Ability;
    type Child = NamedResource;

    fn parent_key(&self) -> Option<DbId> {
        Some(self.ability_id)
    }

    fn split(self) -> (Ability, Option<NamedResource>) {
        let child = NamedResource::from_columns(self.pokemon_id, self.pokemon_name);
        let parent = Ability {
            id: self.ability_id,
            name: self.ability_name,
            description: self.description,
        };
        (parent, child)
    }

    fn into_child(self) -> Option<NamedResource> {
        NamedResource::from_columns(self.pokemon_id, self.pokemon_name)
    }
}

/// An ability with every pokemon that has it, ordered by dex number.
pub type AbilityDetail = Composite<Ability, NamedResource>;
