//! Dump a monster's distance and visibility field
//!
//! Renders the BFS distance map the AI would compute this tick and lists
//! every occupant it can reach, with distance and line of sight.

use anyhow::Result;
use clap::Parser;
use console::style;
use game_core::ActorId;
use runtime::{DistanceField, locate};

/// Dump the field around one monster
#[derive(Parser)]
pub struct Field {
    /// Recorded tick snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: std::path::PathBuf,

    /// Monster to center the field on
    #[arg(short, long, value_name = "ID")]
    monster: String,
}

impl Field {
    pub fn execute(self) -> Result<()> {
        let snapshot = game_content::SnapshotLoader::load(&self.snapshot)?;
        let id = ActorId::new(self.monster);
        let (map, origin, monster) = locate(&snapshot, &id)?;

        let field = DistanceField::compute(map, origin);

        println!(
            "{} {} ({}) at {} on level {}",
            style("Monster:").bold().cyan(),
            monster.actor.name,
            id,
            origin,
            map.level
        );
        println!(
            "{} {} reachable, {} rays traced",
            style("Field:").bold().cyan(),
            field.len(),
            field.rays_traced()
        );
        println!();
        print!("{}", field.render_ascii());
        println!();
        println!(
            "{}",
            style("@ origin  # blocked  ? unreachable  ~ hidden  0-9 distance mod 10").dim()
        );
        println!();

        println!("{}", style("Occupants:").bold().yellow());
        for (position, entry) in field.reachable() {
            let Some(tile) = entry.tile else {
                continue;
            };
            let names = tile
                .players
                .iter()
                .chain(tile.monsters.iter().map(|m| &m.actor))
                .filter(|actor| actor.id != id);

            for actor in names {
                println!(
                    "  {:<12} {:<8} {:<10} distance={:<3} sight={}",
                    actor.id.as_str(),
                    position.to_string(),
                    actor.faction.to_string(),
                    entry.distance,
                    if entry.line_of_sight {
                        style("yes").green()
                    } else {
                        style("no").red()
                    }
                );
            }
        }

        Ok(())
    }
}
