//! Row decoding for one-to-many LEFT JOIN result sets.
//!
//! Detail queries select the parent's columns followed by one related
//! entity's columns, e.g.
//!
//! ```text
//! ability_id | ability_name | description | pokemon_id | pokemon_name
//! -----------+--------------+-------------+------------+-------------
//!          1 | Overgrow     | ...         |          1 | Bulbasaur
//!          1 | Overgrow     | ...         |          2 | Ivysaur
//! ```
//!
//! The parent is read from the first row only. Because of the outer join,
//! only the first row can carry an all-null child group (the parent has
//! no children at all); every later row contributes exactly one child and
//! its parent columns are ignored.

use pmdx_core::error::CoreError;
use pmdx_core::search::SearchKey;
use pmdx_core::types::DbId;

/// A flat result row made of a parent column group and a child column group.
pub trait JoinedRow {
    type Parent;
    type Child;

    /// Primary key of the parent column group.
    fn parent_key(&self) -> Option<DbId>;

    /// Split into the parent and, when its key is not null, the child.
    fn split(self) -> (Self::Parent, Option<Self::Child>);

    /// Build only the child, ignoring the parent columns.
    fn into_child(self) -> Option<Self::Child>;
}

/// One parent entity with its related entities, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite<P, C> {
    pub parent: P,
    pub children: Vec<C>,
}

/// Decode a joined result set into a [`Composite`].
///
/// Returns [`CoreError::NotFound`] carrying `resource` and `key` when the
/// base query matched nothing: no rows at all, or a first row whose parent
/// key is null or zero.
pub fn decode_composite<R, I>(
    rows: I,
    resource: &'static str,
    key: &SearchKey,
) -> Result<Composite<R::Parent, R::Child>, CoreError>
where
    R: JoinedRow,
    I: IntoIterator<Item = R>,
{
    let not_found = || CoreError::NotFound {
        resource,
        key: key.clone(),
    };

    let mut rows = rows.into_iter();
    let first = rows.next().ok_or_else(not_found)?;
    if !matches!(first.parent_key(), Some(id) if id != 0) {
        return Err(not_found());
    }

    let (parent, first_child) = first.split();
    let mut children: Vec<R::Child> = first_child.into_iter().collect();
    children.extend(rows.filter_map(R::into_child));

    Ok(Composite { parent, children })
}
