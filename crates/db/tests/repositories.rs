//! Database-backed repository tests.
//!
//! Needs `DATABASE_URL` pointing at a PostgreSQL server; `#[sqlx::test]`
//! creates a throwaway database per test and applies the migrations.

use assert_matches::assert_matches;
use pmdx_core::error::CoreError;
use pmdx_core::listing::{ListParams, Pagination, SortOrder};
use pmdx_core::search::SearchKey;
use pmdx_db::models::named::NamedResource;
use pmdx_db::repositories::{
    AbilityRepo, CampRepo, DungeonRepo, MoveRepo, PokemonRepo, TypeRepo,
};
use pmdx_db::DbError;
use sqlx::PgPool;

fn names(items: &[NamedResource]) -> Vec<&str> {
    items.iter().map(|r| r.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// List queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations", fixtures("greek_abilities"))]
async fn list_sorted_by_name_descending(pool: PgPool) {
    let params = ListParams {
        sort: Some(SortOrder::NameDesc),
        pagination: Pagination::new(1, 2),
    };
    let page = AbilityRepo::list(&pool, &params).await.unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(names(&page.items), vec!["Gamma", "Epsilon"]);
}

#[sqlx::test(migrations = "../../migrations", fixtures("greek_abilities"))]
async fn list_defaults_to_id_order(pool: PgPool) {
    let page = AbilityRepo::list(&pool, &ListParams::default()).await.unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(
        names(&page.items),
        vec!["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]
    );
}

#[sqlx::test(migrations = "../../migrations", fixtures("greek_abilities"))]
async fn page_past_the_end_is_empty_but_counts(pool: PgPool) {
    let params = ListParams {
        sort: None,
        pagination: Pagination::new(9, 2),
    };
    let page = AbilityRepo::list(&pool, &params).await.unwrap();

    assert_eq!(page.total, 5);
    assert!(page.items.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_table_counts_zero(pool: PgPool) {
    let page = TypeRepo::list(&pool, &ListParams::default()).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn every_resource_lists(pool: PgPool) {
    let params = ListParams::default();
    assert_eq!(CampRepo::list(&pool, &params).await.unwrap().total, 3);
    assert_eq!(DungeonRepo::list(&pool, &params).await.unwrap().total, 3);
    assert_eq!(MoveRepo::list(&pool, &params).await.unwrap().total, 7);
    assert_eq!(PokemonRepo::list(&pool, &params).await.unwrap().total, 5);
    assert_eq!(TypeRepo::list(&pool, &params).await.unwrap().total, 6);
}

// ---------------------------------------------------------------------------
// Detail lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn ability_by_id_has_pokemon(pool: PgPool) {
    let detail = AbilityRepo::find(&pool, &SearchKey::Id(1)).await.unwrap();
    assert_eq!(detail.parent.name, "Overgrow");
    assert_eq!(detail.children, vec![NamedResource::new(1, "Bulbasaur")]);
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn ability_without_pokemon_has_empty_list(pool: PgPool) {
    let detail = AbilityRepo::find(&pool, &SearchKey::parse("run away"))
        .await
        .unwrap();
    assert_eq!(detail.parent.id, 5);
    assert!(detail.children.is_empty());
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn camp_lists_residents_in_dex_order(pool: PgPool) {
    let detail = CampRepo::find(&pool, &SearchKey::Id(2)).await.unwrap();
    assert_eq!(detail.parent.cost, 500);
    assert_eq!(
        names(&detail.children),
        vec!["Pikachu", "Mr. Mime"]
    );
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn dungeon_encounters_keep_super_flag(pool: PgPool) {
    let detail = DungeonRepo::find(&pool, &SearchKey::parse("TINY woods"))
        .await
        .unwrap();
    let flags: Vec<(i32, bool)> = detail
        .children
        .iter()
        .map(|e| (e.pokemon.id, e.is_super))
        .collect();
    assert_eq!(flags, vec![(1, false), (4, false), (7, true), (25, true)]);
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn move_has_type_and_learners(pool: PgPool) {
    let detail = MoveRepo::find(&pool, &SearchKey::Id(10)).await.unwrap();
    assert_eq!(detail.parent.name, "Quick Attack");
    assert_eq!(detail.parent.move_type, NamedResource::new(1, "Normal"));
    assert_eq!(detail.children.len(), 2);
    assert_eq!(detail.children[0].method, "TM");
    assert_eq!(detail.children[0].cost, Some(300));
    assert_eq!(detail.children[1].level, Some(5));
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn status_move_has_null_power(pool: PgPool) {
    let detail = MoveRepo::find(&pool, &SearchKey::parse("growl")).await.unwrap();
    assert_eq!(detail.parent.initial_power, None);
    assert_eq!(detail.parent.accuracy, None);
    assert!(detail.children.is_empty());
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn type_interactions(pool: PgPool) {
    let detail = TypeRepo::find(&pool, &SearchKey::parse("fire")).await.unwrap();
    let interactions: Vec<(&str, &str)> = detail
        .children
        .iter()
        .map(|i| (i.defender.name.as_str(), i.interaction.as_str()))
        .collect();
    assert_eq!(
        interactions,
        vec![("Water", "Not very effective"), ("Grass", "Super effective")]
    );
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn pokemon_detail_combines_four_queries(pool: PgPool) {
    let detail = PokemonRepo::find(&pool, &SearchKey::Id(25)).await.unwrap();

    assert_eq!(detail.pokemon.name, "Pikachu");
    assert_eq!(detail.pokemon.camp, NamedResource::new(2, "Energetic Forest"));
    assert_eq!(detail.pokemon.evolve_level, None);
    assert_eq!(detail.abilities, vec![NamedResource::new(4, "Static")]);
    assert_eq!(detail.types, vec![NamedResource::new(5, "Electric")]);
    assert_eq!(detail.dungeons.len(), 2);
    assert_eq!(detail.dungeons[0].dungeon.name, "Tiny Woods");
    assert!(detail.dungeons[0].is_super);
    let moves: Vec<&str> = detail
        .moves
        .iter()
        .map(|m| m.attack_move.name.as_str())
        .collect();
    assert_eq!(moves, vec!["Thunder Shock", "Quick Attack"]);
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn pokemon_by_normalized_name(pool: PgPool) {
    let detail = PokemonRepo::find(&pool, &SearchKey::parse("mR. mIME"))
        .await
        .unwrap();
    assert_eq!(detail.pokemon.id, 122);
    assert!(detail.dungeons.is_empty());
    assert!(detail.abilities.is_empty());
    assert!(detail.moves.is_empty());
    assert_eq!(detail.types, vec![NamedResource::new(6, "Psychic")]);
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn unknown_pokemon_is_not_found(pool: PgPool) {
    let err = PokemonRepo::find(&pool, &SearchKey::Id(9999)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { resource: "pokemon", key: SearchKey::Id(9999) })
    );
}

#[sqlx::test(migrations = "../../migrations", fixtures("dex"))]
async fn unknown_names_are_not_found_for_every_resource(pool: PgPool) {
    let key = SearchKey::parse("missingno");
    assert!(AbilityRepo::find(&pool, &key).await.unwrap_err().is_not_found());
    assert!(CampRepo::find(&pool, &key).await.unwrap_err().is_not_found());
    assert!(DungeonRepo::find(&pool, &key).await.unwrap_err().is_not_found());
    assert!(MoveRepo::find(&pool, &key).await.unwrap_err().is_not_found());
    assert!(TypeRepo::find(&pool, &key).await.unwrap_err().is_not_found());
}
