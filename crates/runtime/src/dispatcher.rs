//! Per-tick orchestration of every controlled monster.
//!
//! The [`Dispatcher`] owns the engine configuration, the behaviour registry
//! and the memory of every monster. For each tick it:
//!
//! 1. Drops memory of monsters that left the snapshot
//! 2. Walks the levels from highest to lowest
//! 3. Hands each monster its memory slot and decides it, on scoped worker
//!    threads when `parallel` is set
//! 4. Commits the new memory and gathers the commands into one batch
//!
//! The snapshot is shared read-only by all workers. Each memory slot is
//! moved out of the store for the duration of the level, so no two
//! decisions ever touch the same slot.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::thread;

use game_core::{
    ActorId, CommandBatch, EngineConfig, GameSnapshot, LevelMap, Monster, Position, Tick,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::{CommandSink, Result, RuntimeError};
use crate::memory::{MemorySlot, MemoryStore};
use crate::providers::ai::{BehaviorRegistry, Decision, MonsterAi};
use crate::utils::{compute_seed, hash_id};

/// One monster handed to a worker.
struct Job<'s> {
    id: ActorId,
    position: Position,
    monster: &'s Monster,
    slot: MemorySlot,
}

/// Tick dispatcher owning all bot memory.
#[derive(Debug)]
pub struct Dispatcher {
    engine: EngineConfig,
    behaviors: BehaviorRegistry,
    memory: MemoryStore,
}

impl Dispatcher {
    pub fn new(engine: EngineConfig, behaviors: BehaviorRegistry) -> Self {
        Self {
            engine,
            behaviors,
            memory: MemoryStore::new(),
        }
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn behaviors(&self) -> &BehaviorRegistry {
        &self.behaviors
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Decides every monster in `snapshot`.
    ///
    /// # Returns
    ///
    /// At most one command per monster, keyed by monster id.
    pub fn handle_tick(&mut self, snapshot: &GameSnapshot) -> Result<CommandBatch> {
        let present: HashSet<&ActorId> = snapshot.monsters().map(Monster::id).collect();
        let pruned = self.memory.retain(|id| present.contains(id));
        if pruned > 0 {
            tracing::debug!("Pruned memory of {} departed monsters", pruned);
        }

        let mut batch = CommandBatch::new(snapshot.tick);
        let mut decided = 0usize;

        for level in snapshot.level_order() {
            let map = snapshot.level(level)?;
            map.validate()?;

            let jobs: Vec<Job<'_>> = map
                .monsters()
                .map(|(position, monster)| Job {
                    id: monster.id().clone(),
                    position,
                    monster,
                    slot: self.memory.take(monster.id()),
                })
                .collect();

            let decisions = match self.decide_level(snapshot.tick, map, &jobs) {
                Ok(decisions) => decisions,
                Err(err) => {
                    for job in jobs {
                        self.memory.insert(job.id, job.slot);
                    }
                    return Err(err);
                }
            };

            decided += jobs.len();
            for (mut job, decision) in jobs.into_iter().zip(decisions) {
                job.slot.commit(decision.memory);
                if let Some(command) = decision.command {
                    batch.insert(job.id.clone(), command);
                }
                self.memory.insert(job.id, job.slot);
            }
        }

        tracing::info!(
            "Tick {}: {} commands for {} monsters on {} levels",
            snapshot.tick,
            batch.len(),
            decided,
            snapshot.levels.len()
        );

        Ok(batch)
    }

    /// Decides the tick and hands the batch to `sink`.
    ///
    /// Returns the number of commands sent.
    pub async fn run_tick(
        &mut self,
        snapshot: &GameSnapshot,
        sink: &dyn CommandSink,
    ) -> Result<usize> {
        let batch = self.handle_tick(snapshot)?;
        let sent = batch.len();
        sink.send(batch).await?;
        Ok(sent)
    }

    /// Decides one monster without touching the stored memory.
    pub fn preview(&self, snapshot: &GameSnapshot, id: &ActorId) -> Result<Decision> {
        let (map, position, monster) = locate(snapshot, id)?;
        let slot = self.memory.get(id).cloned().unwrap_or_default();
        let job = Job {
            id: id.clone(),
            position,
            monster,
            slot,
        };
        Ok(self.decide_one(snapshot.tick, map, &job))
    }

    fn decide_level(&self, tick: Tick, map: &LevelMap, jobs: &[Job<'_>]) -> Result<Vec<Decision>> {
        if !self.engine.parallel || jobs.len() < 2 {
            return Ok(jobs.iter().map(|job| self.decide_one(tick, map, job)).collect());
        }

        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let per_worker = jobs.len().div_ceil(workers);

        thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .chunks(per_worker)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|job| self.decide_one(tick, map, job))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut decisions = Vec::with_capacity(jobs.len());
            for handle in handles {
                let part = handle
                    .join()
                    .map_err(|_| RuntimeError::WorkerPanicked { level: map.level })?;
                decisions.extend(part);
            }
            Ok(decisions)
        })
    }

    fn decide_one(&self, tick: Tick, map: &LevelMap, job: &Job<'_>) -> Decision {
        let seed = compute_seed(self.engine.seed, tick, hash_id(&job.id), map.level);
        let mut rng = StdRng::seed_from_u64(seed);

        MonsterAi::new(&self.engine, &self.behaviors).decide(
            map,
            job.position,
            job.monster,
            &job.slot,
            &mut rng,
        )
    }
}

/// Finds the level, tile and record of monster `id`.
pub fn locate<'s>(
    snapshot: &'s GameSnapshot,
    id: &ActorId,
) -> Result<(&'s LevelMap, Position, &'s Monster)> {
    snapshot
        .levels
        .iter()
        .find_map(|map| {
            map.monsters()
                .find(|(_, monster)| monster.id() == id)
                .map(|(position, monster)| (map, position, monster))
        })
        .ok_or_else(|| RuntimeError::UnknownMonster(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Actor, Attributes, CommandKind, Faction, Tile, TileFlags};

    fn goblin(id: &str) -> Monster {
        Monster {
            actor: Actor {
                id: ActorId::new(id),
                name: id.to_owned(),
                faction: Faction::Monster,
                attributes: Attributes::resources(10.0, 0.0, 0.0),
                max_attributes: Attributes::resources(10.0, 0.0, 0.0),
                ..Actor::default()
            },
            algorithm: "none".into(),
            ..Monster::default()
        }
    }

    fn snapshot(tick: u64) -> GameSnapshot {
        let mut level = LevelMap::open(1, 4, 4);
        level.insert(Tile::new(Position::new(1, 1), TileFlags::FREE).with_monster(goblin("a")));
        let mut stunned = goblin("b");
        stunned.algorithm = "default".into();
        stunned.actor.stun.is_stunned = true;
        level.insert(Tile::new(Position::new(2, 2), TileFlags::FREE).with_monster(stunned));
        GameSnapshot::new(Tick(tick)).with_level(level)
    }

    #[test]
    fn memory_follows_the_snapshot() {
        let mut dispatcher = Dispatcher::new(EngineConfig::default(), BehaviorRegistry::default());

        let batch = dispatcher.handle_tick(&snapshot(1)).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(matches!(
            batch.get(&ActorId::new("b")).map(|c| &c.kind),
            Some(CommandKind::Yell(_))
        ));
        assert_eq!(dispatcher.memory().len(), 2);

        dispatcher
            .handle_tick(&GameSnapshot::new(Tick(2)).with_level(LevelMap::open(1, 2, 2)))
            .unwrap();
        assert!(dispatcher.memory().is_empty());
    }

    #[test]
    fn invalid_levels_are_rejected() {
        let mut dispatcher = Dispatcher::new(EngineConfig::default(), BehaviorRegistry::default());
        let broken = GameSnapshot::new(Tick(1)).with_level(LevelMap::new(0, 0, 5));

        let err = dispatcher.handle_tick(&broken).unwrap_err();
        assert!(matches!(err, RuntimeError::Snapshot(_)));
    }

    #[test]
    fn locate_reports_unknown_monsters() {
        let snap = snapshot(1);
        let (map, position, _) = locate(&snap, &ActorId::new("a")).unwrap();
        assert_eq!((map.level, position), (1, Position::new(1, 1)));

        let err = locate(&snap, &ActorId::new("zz")).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownMonster(_)));
    }
}
