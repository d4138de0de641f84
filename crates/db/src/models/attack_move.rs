//! Moves (table `attack_move`), their type and the pokemon learning them.

use pmdx_core::types::DbId;
use sqlx::FromRow;

use crate::decode::{Composite, JoinedRow};
use crate::models::named::NamedResource;

pub const RESOURCE: &str = "move";

/// A row from the `attack_move` table with its type resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackMove {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub range: String,
    pub target: String,
    pub initial_pp: i32,
    /// Null for status moves.
    pub initial_power: Option<i32>,
    /// Null for moves that never miss.
    pub accuracy: Option<i32>,
    pub description: String,
    pub move_type: NamedResource,
}

/// How one pokemon learns a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLearner {
    pub pokemon: NamedResource,
    pub method: String,
    pub cost: Option<i32>,
    pub level: Option<i32>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MoveRow {
    pub move_id: DbId,
    pub move_name: String,
    pub category: String,
    pub range: String,
    pub target: String,
    pub initial_pp: i32,
    pub initial_power: Option<i32>,
    pub accuracy: Option<i32>,
    pub description: String,
    pub type_id: DbId,
    pub type_name: String,
    pub learn_type: Option<String>,
    pub cost: Option<i32>,
    pub level: Option<i32>,
    pub pokemon_id: Option<DbId>,
    pub pokemon_name: Option<String>,
}

impl JoinedRow for MoveRow {
    type Parent = AttackMove;
    type Child = MoveLearner;

    fn parent_key(&self) -> Option<DbId> {
        Some(self.move_id)
    }

    fn split(self) -> (AttackMove, Option<MoveLearner>) {
        let parent = AttackMove {
            id: self.move_id,
            name: self.move_name.clone(),
            category: self.category.clone(),
            range: self.range.clone(),
            target: self.target.clone(),
            initial_pp: self.initial_pp,
            initial_power: self.initial_power,
            accuracy: self.accuracy,
            description: self.description.clone(),
            move_type: NamedResource::new(self.type_id, self.type_name.clone()),
        };
        (parent, self.into_child())
    }

    fn into_child(self) -> Option<MoveLearner> {
        Some(MoveLearner {
            pokemon: NamedResource::from_columns(self.pokemon_id, self.pokemon_name)?,
            method: self.learn_type.unwrap_or_default(),
            cost: self.cost,
            level: self.level,
        })
    }
}

pub type MoveDetail = Composite<AttackMove, MoveLearner>;
