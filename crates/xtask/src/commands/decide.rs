//! Run the decision engine over a recorded snapshot
//!
//! Feeds the same snapshot through the dispatcher for one or more ticks and
//! prints the commands each tick produced. Memory carries over between
//! ticks, so committed move goals and state transitions are visible.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::{CommandBatch, GameSnapshot};
use runtime::{ChannelSink, Dispatcher};

use super::inputs::Inputs;

/// Decide ticks over a snapshot file
#[derive(Parser)]
pub struct Decide {
    #[command(flatten)]
    inputs: Inputs,

    /// Number of consecutive ticks to decide
    #[arg(short, long, default_value_t = 1)]
    ticks: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per monster with its command and state
    Summary,
    /// Command batches as JSON
    Json,
}

impl Decide {
    pub async fn execute(self) -> Result<()> {
        let engine = self.inputs.engine()?;
        let behaviors = self.inputs.behaviors()?;
        let mut snapshot = self.inputs.snapshot()?;

        tracing::info!(
            "Deciding {} ticks for {} monsters (seed={}, parallel={})",
            self.ticks,
            snapshot.monsters().count(),
            engine.seed,
            engine.parallel
        );

        let mut dispatcher = Dispatcher::new(engine, behaviors);
        let (sink, mut batches) = ChannelSink::new(self.ticks.max(1) as usize);
        let first = snapshot.tick;

        for offset in 0..u64::from(self.ticks) {
            snapshot.tick = first + offset;
            dispatcher.run_tick(&snapshot, &sink).await?;
            let batch = batches
                .recv()
                .await
                .context("Command channel closed before the batch arrived")?;

            match self.format {
                OutputFormat::Summary => print_summary(&dispatcher, &snapshot, &batch),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&batch)?),
            }
        }

        Ok(())
    }
}

fn print_summary(dispatcher: &Dispatcher, snapshot: &GameSnapshot, batch: &CommandBatch) {
    println!(
        "{} {}",
        style("Tick:").bold().cyan(),
        style(batch.tick).bold()
    );

    for level in snapshot.level_order() {
        let Ok(map) = snapshot.level(level) else {
            continue;
        };
        println!("  {}", style(format!("Level {}", level)).bold().yellow());

        let mut monsters: Vec<_> = map.monsters().collect();
        monsters.sort_by(|a, b| a.1.id().cmp(b.1.id()));

        for (position, monster) in monsters {
            let state = dispatcher
                .memory()
                .get(monster.id())
                .map(|slot| slot.current.state.to_string())
                .unwrap_or_default();
            let command = batch
                .get(monster.id())
                .map_or_else(|| style("-".to_owned()).dim(), |c| style(c.to_string()).green());

            println!(
                "    {:<12} {:<8} {:<10} {}",
                monster.id().as_str(),
                position.to_string(),
                style(state).magenta(),
                command
            );
        }
    }
    println!();
}
