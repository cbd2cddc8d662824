//! Settlements: naming, amulet palette, world effects, and placement
//!
//! Placement shuffles the candidate cells and accepts greedily under a
//! minimum Manhattan spacing against everything already placed. Each accepted
//! settlement after the first is immediately routed to the existing road
//! network. Amulet colors rotate through a fixed five-color palette in
//! placement order; the finite world-effect pool is handed out 1:1 after a
//! double shuffle.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::errors::GenError;
use crate::roads;
use crate::topology::TilePoint;
use crate::world::WorldGrid;

/// The five amulet affinities, in palette order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AmuletColor {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl AmuletColor {
    pub const ALL: [AmuletColor; 5] = [
        AmuletColor::White,
        AmuletColor::Blue,
        AmuletColor::Black,
        AmuletColor::Red,
        AmuletColor::Green,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AmuletColor::White => "White",
            AmuletColor::Blue => "Blue",
            AmuletColor::Black => "Black",
            AmuletColor::Red => "Red",
            AmuletColor::Green => "Green",
        }
    }

    /// Display title of the amulet itself.
    pub fn title(self) -> &'static str {
        match self {
            AmuletColor::White => "Amulet of Order",
            AmuletColor::Blue => "Amulet of Knowledge",
            AmuletColor::Black => "Amulet of Power",
            AmuletColor::Red => "Amulet of Passion",
            AmuletColor::Green => "Amulet of Life",
        }
    }
}

/// Amulet color for a settlement by placement index: the palette cycles, so
/// any N settlements split the five colors as evenly as possible.
pub fn amulet_for_index(index: usize) -> AmuletColor {
    AmuletColor::ALL[index % AmuletColor::ALL.len()]
}

/// A unique map-wide effect a settlement can hold. The pool is finite and
/// drawn without replacement.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WorldEffect {
    pub name: &'static str,
    pub cost: u32,
    pub description: &'static str,
}

pub const WORLD_EFFECTS: [WorldEffect; 12] = [
    WorldEffect {
        name: "Sword of Resistance",
        cost: 400,
        description: "Grants magical resistance against enemy attacks",
    },
    WorldEffect {
        name: "Quickening",
        cost: 300,
        description: "Increases movement speed and reaction time",
    },
    WorldEffect {
        name: "Leap of Fate",
        cost: 300,
        description: "Allows teleportation to distant locations",
    },
    WorldEffect {
        name: "Ring of the Guardian",
        cost: 500,
        description: "Provides powerful protective barriers",
    },
    WorldEffect {
        name: "Haggler's Coin",
        cost: 250,
        description: "Reduces costs of all purchases",
    },
    WorldEffect {
        name: "Tome of Enlightenment",
        cost: 300,
        description: "Enhances learning and spell effectiveness",
    },
    WorldEffect {
        name: "Sleight of Hand",
        cost: 300,
        description: "Improves dexterity and stealth abilities",
    },
    WorldEffect {
        name: "Staff of Thunder",
        cost: 100,
        description: "Channels elemental lightning magic",
    },
    WorldEffect {
        name: "Conjurer's Will",
        cost: 300,
        description: "Strengthens magical focus and willpower",
    },
    WorldEffect {
        name: "Dwarven Pick",
        cost: 125,
        description: "Enhances mining and resource gathering",
    },
    WorldEffect {
        name: "Amulet of Swampwalk",
        cost: 125,
        description: "Allows safe passage through marshlands",
    },
    WorldEffect {
        name: "Fruit of Sustenance",
        cost: 50,
        description: "Provides eternal nourishment and vitality",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SettlementTier {
    Capital,
    Village,
}

/// A placed city or town. Immutable after placement, except for the
/// late-bound world-effect assignment pass.
#[derive(Clone, Debug, Serialize)]
pub struct Settlement {
    pub name: String,
    pub tier: SettlementTier,
    pub x: i32,
    pub y: i32,
    pub amulet: AmuletColor,
    pub effect: Option<&'static WorldEffect>,
}

const NAME_PREFIXES: [&str; 9] = [
    "Sharmal", "Ardestan", "Azar", "Bakur", "Freyalise", "Jalira", "Kurkesh", "Talrand", "Yisan",
];

const NAME_POSTFIXES: [&str; 28] = [
    "Bastion", "Citadel", "Crag", "Crypt", "Den", "Fane", "Fortress", "Glade", "Grove", "Hallow",
    "Haven", "Hold", "Keep", "March", "Mere", "Oasis", "Pillar", "Refuge", "Sanctum", "Shrine",
    "Spire", "Steading", "Temple", "Thorne", "Tower", "Vance", "Ward", "Wold",
];

/// Generate a settlement name as "prefix's postfix", skipping the possessive
/// marker when the prefix already ends in an s.
pub fn settlement_name(rng: &mut ChaCha8Rng) -> String {
    let prefix = pick(rng, &NAME_PREFIXES);
    let postfix = pick(rng, &NAME_POSTFIXES);
    if prefix.ends_with('s') {
        format!("{} {}", prefix, postfix)
    } else {
        format!("{}'s {}", prefix, postfix)
    }
}

fn pick<'a>(rng: &mut ChaCha8Rng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Outcome of a placement run. A shortfall is reported, never fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    pub requested: usize,
    pub placed: usize,
}

impl PlacementReport {
    pub fn shortfall(&self) -> usize {
        self.requested - self.placed
    }
}

/// Place up to `count` settlements on the grid and connect each one (after
/// the first) to the road network.
///
/// Candidates are tried in shuffled order; one is accepted only if its
/// Manhattan distance to every already-placed settlement strictly exceeds
/// `min_spacing`. Road connection failure is fatal: a settlement the network
/// cannot reach invalidates the whole map.
pub fn place_settlements(
    grid: &mut WorldGrid,
    candidates: &[TilePoint],
    count: usize,
    min_spacing: i32,
    rng: &mut ChaCha8Rng,
) -> Result<PlacementReport, GenError> {
    let mut order: Vec<TilePoint> = candidates.to_vec();
    order.shuffle(rng);

    let mut placed: Vec<TilePoint> = Vec::new();
    for loc in order {
        if placed.len() >= count {
            break;
        }
        if placed.iter().any(|prior| loc.manhattan(*prior) <= min_spacing) {
            continue;
        }

        let settlement = Settlement {
            name: settlement_name(rng),
            tier: SettlementTier::Capital,
            x: loc.x,
            y: loc.y,
            amulet: amulet_for_index(placed.len()),
            effect: None,
        };
        grid.place_settlement(loc, settlement);
        placed.push(loc);

        if placed.len() > 1 {
            let path = roads::connect_settlement(grid, loc)?;
            roads::carve_road(grid, &path)?;
        }
    }

    assign_world_effects(grid, &placed, rng);

    Ok(PlacementReport {
        requested: count,
        placed: placed.len(),
    })
}

/// Shuffle both the settlement list and the effect pool, then hand effects
/// out 1:1. Settlements beyond the pool size get none.
fn assign_world_effects(grid: &mut WorldGrid, placed: &[TilePoint], rng: &mut ChaCha8Rng) {
    let mut shuffled: Vec<TilePoint> = placed.to_vec();
    shuffled.shuffle(rng);

    let mut effects: Vec<&'static WorldEffect> = WORLD_EFFECTS.iter().collect();
    effects.shuffle(rng);

    for (loc, effect) in shuffled.iter().zip(effects) {
        if let Some(settlement) = grid.settlement_mut(*loc) {
            settlement.effect = Some(effect);
        }
    }
}
