//! Pokemon types and their interactions when attacking other types.

use pmdx_core::types::DbId;
use sqlx::FromRow;

use crate::decode::{Composite, JoinedRow};
use crate::models::named::NamedResource;

pub const RESOURCE: &str = "type";

/// A row from the `pokemon_type` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonType {
    pub id: DbId,
    pub name: String,
}

/// Effectiveness of the parent type attacking `defender`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInteraction {
    pub defender: NamedResource,
    pub interaction: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct TypeRow {
    pub type_id: DbId,
    pub type_name: String,
    pub interaction: Option<String>,
    pub defender_id: Option<DbId>,
    pub defender_name: Option<String>,
}

impl JoinedRow for TypeRow {
    type Parent = PokemonType;
    type Child = TypeInteraction;

    fn parent_key(&self) -> Option<DbId> {
        Some(self.type_id)
    }

    fn split(self) -> (PokemonType, Option<TypeInteraction>) {
        let parent = PokemonType {
            id: self.type_id,
            name: self.type_name.clone(),
        };
        (parent, self.into_child())
    }

    fn into_child(self) -> Option<TypeInteraction> {
        Some(TypeInteraction {
            defender: NamedResource::from_columns(self.defender_id, self.defender_name)?,
            interaction: self.interaction.unwrap_or_default(),
        })
    }
}

pub type TypeDetail = Composite<PokemonType, TypeInteraction>;
