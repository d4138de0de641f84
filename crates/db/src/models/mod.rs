//! Row structs and entities, one module per resource table.
//!
//! Detail queries return flat joined rows (`*Row`), which implement
//! [`JoinedRow`](crate::decode::JoinedRow) so the decoder can split them
//! into the parent entity and its related entities.

pub mod ability;
pub mod attack_move;
pub mod camp;
pub mod dungeon;
pub mod named;
pub mod pokemon;
pub mod pokemon_type;
