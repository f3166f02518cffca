//! Built-in scenes and arcs.
//!
//! Each arc module contributes its scenes and an [`ArcContent`] with pools
//! for acts 1-3. The Dripping Goblet hub is shared by several pools and is
//! the fallback for unknown scene ids.

mod hub;
mod internship;
mod mimic;
mod taxman;
mod treasure;
mod vengeance;

use std::collections::BTreeMap;

use cm_mechanics::ArcId;

use crate::catalog::{ArcContent, Catalog, HUB_SCENE_ID, PoolEntry};

fn arc(
    title: &str,
    blurb: &str,
    weight: u32,
    finale: &str,
    acts: [Vec<PoolEntry>; 3],
) -> ArcContent {
    let pools: BTreeMap<u8, Vec<PoolEntry>> = (1u8..).zip(acts).collect();
    ArcContent {
        title: title.to_string(),
        blurb: blurb.to_string(),
        weight,
        finale: finale.to_string(),
        pools,
    }
}

/// Assemble the built-in catalog.
pub fn builtin() -> Catalog {
    let mut catalog = Catalog::new(HUB_SCENE_ID);
    let parts = [
        (ArcId::Taxman, taxman::content(), taxman::scenes()),
        (ArcId::Internship, internship::content(), internship::scenes()),
        (ArcId::Mimic, mimic::content(), mimic::scenes()),
        (ArcId::Treasure, treasure::content(), treasure::scenes()),
        (ArcId::Vengeance, vengeance::content(), vengeance::scenes()),
    ];
    for (id, content, scenes) in parts {
        catalog.insert_arc(id, content);
        for scene in scenes {
            catalog.insert_scene(scene);
        }
    }
    catalog.insert_scene(hub::dripping_goblet());
    catalog
}
