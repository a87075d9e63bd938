//! Next queue - fixed-capacity lookahead of tiles waiting to enter the board
//!
//! The queue lives in the pool like any other entity. Each queued seed is a
//! dependent of the queue, so seeds settle before the queue updates and a
//! released seed drops out of the queue's dependents on its own.

use std::collections::VecDeque;

use log::trace;

use crate::entity::{Body, EntityId};
use crate::error::{CoreError, Result};
use crate::rng::SimpleRng;
use crate::tile::{TileSeed, TileSpec};
use crate::types::TileKind;
use crate::world::World;

/// Random tile generation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRules {
    pub block_colors: u8,
    /// Percent chance of a special tile
    pub special_freq: u8,
    /// Percent chance that a normal tile rolls extra toughness
    pub tough_freq: u8,
    pub toughness_max: u8,
}

impl SeedRules {
    /// Draw one tile descriptor
    ///
    /// Draw order is kind, color, then (normal tiles only) the toughness roll
    /// and the toughness value, so a seed fixes the whole sequence.
    pub fn roll(&self, rng: &mut SimpleRng) -> TileSpec {
        let kind = if rng.chance(self.special_freq) {
            TileKind::Special
        } else {
            TileKind::Normal
        };
        let color = rng.next_range(u32::from(self.block_colors.max(1))) as u8;
        let toughness = if kind == TileKind::Normal && rng.chance(self.tough_freq) {
            rng.next_range(u32::from(self.toughness_max.max(1))) as u8 + 1
        } else {
            1
        };

        match kind {
            TileKind::Normal => TileSpec::normal(color).with_toughness(toughness),
            TileKind::Special => TileSpec::special(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextQueue {
    queue: VecDeque<EntityId>,
    capacity: usize,
    rules: SeedRules,
}

impl NextQueue {
    pub fn new(capacity: usize, rules: SeedRules) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            rules,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rules(&self) -> SeedRules {
        self.rules
    }

    /// Seed ids, head first
    pub fn queued(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.queue.iter().copied()
    }

    /// Top the queue up to capacity with freshly rolled seeds
    ///
    /// Returns how many seeds were added.
    pub fn refill(world: &mut World, queue_id: EntityId) -> Result<usize> {
        let (missing, rules, capacity) = {
            let queue = world.pool.next_queue(queue_id)?;
            (
                queue.capacity.saturating_sub(queue.len()),
                queue.rules,
                queue.capacity,
            )
        };

        for _ in 0..missing {
            let spec = rules.roll(&mut world.rng);
            let rank = world.pool.next_queue(queue_id)?.len();
            let seed_id = world.spawn(Body::Seed(TileSeed::new(spec, rank, capacity)));
            world.pool.depend(queue_id, seed_id)?;
            world.pool.next_queue_mut(queue_id)?.queue.push_back(seed_id);
        }

        Self::rerank(world, queue_id)?;
        if missing > 0 {
            trace!("next queue {} refilled with {} seeds", queue_id, missing);
        }
        Ok(missing)
    }

    /// Dequeue the head seed and hand back its descriptor
    ///
    /// The seed is retired (it leaves the pool on the next tick) and the
    /// remaining seeds move up one rank.
    pub fn pop(world: &mut World, queue_id: EntityId) -> Result<TileSpec> {
        let seed_id = world
            .pool
            .next_queue_mut(queue_id)?
            .queue
            .pop_front()
            .ok_or(CoreError::QueueExhausted)?;

        let seed = world.pool.seed_mut(seed_id)?;
        seed.retire();
        let spec = seed.spec();

        Self::rerank(world, queue_id)?;
        Ok(spec)
    }

    fn rerank(world: &mut World, queue_id: EntityId) -> Result<()> {
        let queue = world.pool.next_queue(queue_id)?;
        let capacity = queue.capacity;
        let ids: Vec<EntityId> = queue.queued().collect();
        for (rank, id) in ids.into_iter().enumerate() {
            world.pool.seed_mut(id)?.rerank(rank, capacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::PresentationTable;
    use crate::settings::Settings;
    use crate::types::EntityKind;

    fn rules() -> SeedRules {
        SeedRules {
            block_colors: 4,
            special_freq: 0,
            tough_freq: 0,
            toughness_max: 3,
        }
    }

    fn world_with_queue(capacity: usize, rules: SeedRules) -> (World, EntityId) {
        let mut world = World::new(Settings::default(), PresentationTable::headless());
        let id = world.spawn(Body::NextQueue(NextQueue::new(capacity, rules)));
        (world, id)
    }

    #[test]
    fn test_roll_respects_color_count() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..500 {
            let spec = rules().roll(&mut rng);
            assert_eq!(spec.kind, TileKind::Normal);
            assert!(spec.color < 4);
            assert_eq!(spec.toughness, 1);
        }
    }

    #[test]
    fn test_roll_all_special() {
        let mut rng = SimpleRng::new(5);
        let rules = SeedRules {
            special_freq: 100,
            tough_freq: 100,
            ..rules()
        };
        for _ in 0..100 {
            let spec = rules.roll(&mut rng);
            assert_eq!(spec.kind, TileKind::Special);
            assert_eq!(spec.toughness, 1);
        }
    }

    #[test]
    fn test_roll_toughness_range() {
        let mut rng = SimpleRng::new(11);
        let rules = SeedRules {
            tough_freq: 100,
            ..rules()
        };
        let mut seen = [false; 4];
        for _ in 0..500 {
            let spec = rules.roll(&mut rng);
            assert!((1..=3).contains(&spec.toughness));
            seen[spec.toughness as usize] = true;
        }
        assert!(seen[1] && seen[2] && seen[3]);
    }

    #[test]
    fn test_refill_to_capacity() {
        let (mut world, id) = world_with_queue(5, rules());
        assert_eq!(NextQueue::refill(&mut world, id).unwrap(), 5);
        assert_eq!(world.pool.next_queue(id).unwrap().len(), 5);
        assert_eq!(world.pool.count_of_kind(EntityKind::Seed), 5);
        assert_eq!(world.pool.dependents(id).len(), 5);

        // Already full
        assert_eq!(NextQueue::refill(&mut world, id).unwrap(), 0);
    }

    #[test]
    fn test_ranks_follow_queue_order() {
        let (mut world, id) = world_with_queue(4, rules());
        NextQueue::refill(&mut world, id).unwrap();

        let ids: Vec<EntityId> = world.pool.next_queue(id).unwrap().queued().collect();
        for (expected, seed_id) in ids.iter().enumerate() {
            let seed = world.pool.seed(*seed_id).unwrap();
            assert_eq!(seed.rank(), expected);
            assert_eq!(seed.total(), 4);
        }
    }

    #[test]
    fn test_pop_returns_head_and_reranks() {
        let (mut world, id) = world_with_queue(3, rules());
        NextQueue::refill(&mut world, id).unwrap();
        let ids: Vec<EntityId> = world.pool.next_queue(id).unwrap().queued().collect();
        let head_spec = world.pool.seed(ids[0]).unwrap().spec();

        let popped = NextQueue::pop(&mut world, id).unwrap();
        assert_eq!(popped, head_spec);
        assert!(!world.pool.seed(ids[0]).unwrap().is_alive());
        assert_eq!(world.pool.seed(ids[1]).unwrap().rank(), 0);
        assert_eq!(world.pool.seed(ids[2]).unwrap().rank(), 1);

        // The consumed seed leaves the pool on the next tick.
        world.pool.tick().unwrap();
        assert!(!world.pool.contains(ids[0]));
        assert_eq!(world.pool.dependents(id), &ids[1..]);
    }

    #[test]
    fn test_pop_empty_queue() {
        let (mut world, id) = world_with_queue(3, rules());
        assert_eq!(
            NextQueue::pop(&mut world, id),
            Err(CoreError::QueueExhausted)
        );
    }

    #[test]
    fn test_release_retires_queued_seeds() {
        let (mut world, id) = world_with_queue(3, rules());
        NextQueue::refill(&mut world, id).unwrap();
        world.pool.release(id);

        assert_eq!(world.pool.count_of_kind(EntityKind::Seed), 3);
        world.pool.tick().unwrap();
        assert_eq!(world.pool.count_of_kind(EntityKind::Seed), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let (mut a, qa) = world_with_queue(8, rules());
        let (mut b, qb) = world_with_queue(8, rules());
        NextQueue::refill(&mut a, qa).unwrap();
        NextQueue::refill(&mut b, qb).unwrap();
        for _ in 0..8 {
            assert_eq!(
                NextQueue::pop(&mut a, qa).unwrap(),
                NextQueue::pop(&mut b, qb).unwrap()
            );
        }
    }
}
