//! Candidate targets grouped by BFS distance.

use std::collections::BTreeMap;

use game_core::{Faction, Target};

use crate::providers::ai::context::{AiContext, occupants};

/// Targets within a maximum range, bucketed by BFS distance from the caster.
///
/// Each bucket lists living non-neutral occupants first (players before
/// monsters on the same tile), then free empty tiles (unknown terrain included), in row-major tile
/// order. The caster itself sits in bucket 0.
#[derive(Clone, Debug, Default)]
pub struct TargetCatalog<'a> {
    buckets: BTreeMap<u32, Vec<Target<'a>>>,
}

impl<'a> TargetCatalog<'a> {
    /// Collects every target reachable within `max_range` steps.
    pub fn build(ctx: &AiContext<'a>, max_range: u32) -> Self {
        let mut buckets: BTreeMap<u32, Vec<Target<'a>>> = BTreeMap::new();
        let mut empties: BTreeMap<u32, Vec<Target<'a>>> = BTreeMap::new();

        for (position, entry) in ctx.field.reachable() {
            if entry.distance > max_range {
                break;
            }
            let Some(tile) = entry.tile else {
                // Unknown terrain is walkable and empty.
                if position != ctx.position {
                    empties
                        .entry(entry.distance)
                        .or_default()
                        .push(Target::Empty(position));
                }
                continue;
            };

            let live: Vec<Target<'a>> = occupants(tile)
                .filter(|target| {
                    target
                        .actor()
                        .is_some_and(|a| a.is_alive() && a.faction != Faction::Neutral)
                })
                .collect();
            if !live.is_empty() {
                buckets.entry(entry.distance).or_default().extend(live);
            }

            if position != ctx.position && tile.is_free() && !tile.is_occupied() {
                empties
                    .entry(entry.distance)
                    .or_default()
                    .push(Target::Empty(position));
            }
        }

        for (distance, tiles) in empties {
            buckets.entry(distance).or_default().extend(tiles);
        }

        Self { buckets }
    }

    /// Buckets in ascending distance.
    pub fn buckets(&self) -> impl Iterator<Item = (u32, &[Target<'a>])> {
        self.buckets.iter().map(|(d, t)| (*d, t.as_slice()))
    }

    /// Buckets with distance at most `range`.
    pub fn within(&self, range: u32) -> impl Iterator<Item = (u32, &[Target<'a>])> {
        self.buckets
            .range(..=range)
            .map(|(d, t)| (*d, t.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
