//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a battle (accuracy, dodge, crit, status rolls,
//! loot shuffles, species picks) is drawn through [`RngOracle`] with a seed
//! derived from the session seed, the session nonce, the acting side, and a
//! [`RollKind`] context. A seeded session therefore replays identically, and
//! tests can script exact draws with [`SequenceRng`].
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed, they must
//! produce the same value.

use core::sync::atomic::{AtomicUsize, Ordering};

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Draw a uniform percent in `[0, 100)`.
    fn roll_percent(&self, seed: u64) -> u32 {
        self.next_u32(seed) % 100
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Pick an index in `[0, len)`. Returns 0 for empty collections.
    fn pick(&self, seed: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Stateless PCG-XSH-RR: one LCG step from the supplied seed followed by
/// the xorshift/rotate output permutation.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Replays a fixed list of raw draws in order, ignoring seeds.
///
/// Used to pin down exact roll outcomes. The list wraps around when
/// exhausted; an empty list always yields 0.
#[derive(Debug, Default)]
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl RngOracle for SequenceRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()]
    }
}

/// Identifies which random decision a draw belongs to.
///
/// The discriminant is mixed into the seed, so independent decisions within
/// one nonce never share a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollKind {
    /// Freeze thaw or paralysis skip.
    StatusGate = 1,
    Accuracy = 2,
    Dodge = 3,
    Critical = 4,
    /// Secondary status infliction on a damaging move.
    Infliction = 5,
    EnemyMove = 6,
    MoveShuffle = 7,
    LootShuffle = 8,
    LootExtra = 9,
    ItemPick = 10,
    Species = 11,
}

/// Compute deterministic seed from session components.
///
/// * `game_seed` - Base seed fixed when the session is created
/// * `nonce` - Session step counter (advances on every random transition)
/// * `actor_id` - Side making the draw
/// * `context` - Distinguishes multiple draws within one step
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Bundles an oracle with the seed components of one session step.
///
/// Draw helpers take a [`RollKind`] plus an index for repeated draws of the
/// same kind (shuffles).
#[derive(Clone, Copy)]
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    actor: u32,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64, actor: u32) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
            actor,
        }
    }

    fn seed(&self, kind: RollKind, index: u32) -> u64 {
        let context = ((kind as u32) << 16) | (index & 0xffff);
        compute_seed(self.game_seed, self.nonce, self.actor, context)
    }

    /// Uniform percent in `[0, 100)`.
    pub fn percent(&self, kind: RollKind) -> u32 {
        self.rng.roll_percent(self.seed(kind, 0))
    }

    /// Uniform index in `[0, len)`.
    pub fn pick(&self, kind: RollKind, index: u32, len: usize) -> usize {
        self.rng.pick(self.seed(kind, index), len)
    }

    /// Uniform value in `[min, max]`.
    pub fn range(&self, kind: RollKind, min: u32, max: u32) -> u32 {
        self.rng.range(self.seed(kind, 0), min, max)
    }

    /// Fisher-Yates shuffle driven by `kind` draws.
    pub fn shuffle<T>(&self, kind: RollKind, items: &mut [T]) {
        let len = items.len();
        if len < 2 {
            return;
        }
        for i in (1..len).rev() {
            let j = self.pick(kind, i as u32, i + 1);
            items.swap(i, j);
        }
    }
}
