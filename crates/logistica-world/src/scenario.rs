//! Reference scenario: the Norwegian main-line rail network.

use crate::error::WorldError;
use crate::field::EdgeDirection;
use crate::world::World;
use logistica_core::{Coordinate, EntityId};
use std::collections::BTreeMap;

const CITIES: &[(&str, i32, i32)] = &[
    ("Oslo", 500, 800),
    ("Drammen", 480, 780),
    ("Hønefoss", 485, 750),
    ("Lillehammer", 510, 650),
    ("Dombås", 490, 500),
    ("Trondheim", 500, 300),
    ("Bodø", 600, 100),
    ("Narvik", 750, 50),
    ("Swedish Border", 800, 55),
    ("Bergen", 200, 700),
    ("Kristiansand", 400, 950),
    ("Stavanger", 250, 900),
    ("Myrdal", 300, 680),
    ("Flåm", 310, 670),
];

type Line = (&'static str, &'static str, &'static [(i32, i32)]);

const RAIL_LINES: &[Line] = &[
    // Dovrebanen
    ("Oslo", "Lillehammer", &[(505, 725), (510, 680)]),
    ("Lillehammer", "Dombås", &[(500, 575)]),
    ("Dombås", "Trondheim", &[(495, 400)]),
    // Nordlandsbanen
    ("Trondheim", "Bodø", &[(550, 200)]),
    // Ofotbanen
    ("Narvik", "Swedish Border", &[]),
    // Bergensbanen
    ("Oslo", "Hønefoss", &[(490, 765)]),
    ("Hønefoss", "Myrdal", &[(400, 710), (350, 690)]),
    ("Myrdal", "Bergen", &[(250, 690)]),
    // Flåmsbana
    ("Myrdal", "Flåm", &[]),
    // Sørlandsbanen
    ("Oslo", "Drammen", &[]),
    ("Drammen", "Kristiansand", &[(450, 850), (420, 900)]),
    ("Kristiansand", "Stavanger", &[(350, 960), (300, 940)]),
];

/// Handles to the planned network.
#[derive(Debug, Clone, Default)]
pub struct NorwayNetwork {
    pub cities: BTreeMap<&'static str, EntityId>,
    /// Rail edges in planning order.
    pub rail_tracks: Vec<EntityId>,
}

impl NorwayNetwork {
    pub fn city(&self, name: &str) -> Option<EntityId> {
        self.cities.get(name).copied()
    }
}

/// Plan every city and two-way rail line of the network. All entities
/// start in the Planned stage.
pub fn norway_rail_network(world: &mut World) -> Result<NorwayNetwork, WorldError> {
    let mut network = NorwayNetwork::default();
    for &(name, x, y) in CITIES {
        let city = world.plan_city(Coordinate::new(x, y), name);
        network.cities.insert(name, city);
    }

    for &(from, to, waypoints) in RAIL_LINES {
        let (Some(a), Some(b)) = (network.city(from), network.city(to)) else {
            continue;
        };
        let waypoints: Vec<Coordinate> = waypoints
            .iter()
            .map(|&(x, y)| Coordinate::new(x, y))
            .collect();
        let track = world.plan_rail_track(a, b, EdgeDirection::Both, &waypoints)?;
        network.rail_tracks.push(track);
    }
    Ok(network)
}
