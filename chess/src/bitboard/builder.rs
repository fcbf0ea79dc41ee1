//! Builds the magic-indexed sliding attack tables
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! For every square and sliding family, the builder computes the blocker mask, enumerates every
//! subset of it, ray casts the attacks for each subset and then searches for a multiplier that
//! maps every subset to its own slot (or to a slot holding an identical attack set) in a table of
//! `2^k` entries, where `k` is the size of the mask.
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `AttackTables`
///
/// ```rust
/// use chess::Square;
/// use chess::bitboard::{AttackTableBuilder, Bitboard};
///
/// let tables = AttackTableBuilder::new().seed(7).build();
/// assert_eq!(tables.rook_attacks(Square::A1, Bitboard::new()).len(), 14);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttackTableBuilder {
    seed: u64,
    max_attempts: u32,
}

impl AttackTableBuilder {
    /// Seed used for the magic search unless another is given
    pub const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;
    /// Number of candidate multipliers tried per square before giving up
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 100_000_000;

    /// Creates a new `AttackTableBuilder` with the default seed
    pub fn new() -> Self {
        AttackTableBuilder {
            seed: Self::DEFAULT_SEED,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the seed of the pseudo-random generator used to search for magic multipliers
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Sets the number of candidate multipliers tried per square
    pub fn max_attempts(&mut self, attempts: u32) -> &mut Self {
        self.max_attempts = attempts;
        self
    }

    /// Builds the tables for both sliding families
    ///
    /// # Panics
    /// Panics if no magic multiplier is found for some square within the attempt limit. With the
    /// default limit this does not happen for any seed in practice.
    pub fn build(&self) -> AttackTables {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let rook = self.build_slider(&mut rng, Slider::Rook);
        let bishop = self.build_slider(&mut rng, Slider::Bishop);

        info!("built attack tables with seed {:#x}: {} rook entries, {} bishop entries",
              self.seed, rook.attacks.len(), bishop.attacks.len());

        AttackTables::from_tables(rook, bishop)
    }

    fn build_slider(&self, rng: &mut StdRng, slider: Slider) -> SliderTable {
        let mut entries = Vec::with_capacity(Square::COUNT);
        let mut attacks = Vec::new();
        let mut total_attempts = 0u64;

        for sq in Square::all() {
            let mask = blocker_mask(sq, slider);
            let occupancies = subsets(mask);
            let targets: Vec<_> = occupancies.iter()
                .map(|&occ| ray_cast(sq, occ, slider))
                .collect();
            let bits = mask.len() as u32;

            let found = find_magic(rng, mask, &occupancies, &targets, self.max_attempts);
            let (magic, attempts, table) = match found {
                Some(found) => found,
                None => panic!("no {} magic for {} after {} attempts",
                               slider, sq, self.max_attempts),
            };
            trace!("{} magic for {}: {:#018x} ({} bits, {} attempts)",
                   slider, sq, magic, bits, attempts);
            total_attempts += u64::from(attempts);

            entries.push(MagicEntry { mask, magic, shift: 64 - bits, offset: attacks.len() });
            attacks.extend(table);
        }

        debug!("{} magics found after {} attempts, {} table entries",
               slider, total_attempts, attacks.len());

        SliderTable { entries, attacks }
    }
}

impl Default for AttackTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the squares whose occupancy can block a `slider` on `sq`
///
/// The far edge square of each ray is left out, since nothing lies beyond it to be blocked, and
/// `sq` itself is never included.
///
/// ```rust
/// use chess::Square;
/// use chess::bitboard::{blocker_mask, Slider};
///
/// assert_eq!(blocker_mask(Square::A1, Slider::Rook).len(), 12);
/// assert_eq!(blocker_mask(Square::E4, Slider::Bishop).len(), 9);
/// ```
pub fn blocker_mask(sq: Square, slider: Slider) -> Bitboard {
    let origin = Bitboard::from(sq);
    let mut mask = Bitboard::new();

    match slider {
        Slider::Rook => {
            for &(x, y) in slider.directions() {
                let edge = if y > 0 {
                    Bitboard::RANK_8
                } else if y < 0 {
                    Bitboard::RANK_1
                } else if x > 0 {
                    Bitboard::FILE_H
                } else {
                    Bitboard::FILE_A
                };
                mask |= ray(origin, x, y, Bitboard::new()) & !edge;
            }
        }
        Slider::Bishop => {
            for &(x, y) in slider.directions() {
                mask |= ray(origin, x, y, Bitboard::new());
            }
            mask &= !Bitboard::EDGES;
        }
    }

    mask & !origin
}

/// Returns every subset of `mask`, starting with the empty set
///
/// # Panics
/// Panics if the enumeration doesn't produce exactly `2^k` subsets for a mask of `k` squares.
pub fn subsets(mask: Bitboard) -> Vec<Bitboard> {
    let mut subsets = Vec::with_capacity(1 << mask.len());
    let mut subset = 0u64;

    loop {
        subsets.push(Bitboard(subset));
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            break;
        }
    }

    assert_eq!(subsets.len(), 1 << mask.len(), "incomplete subset enumeration of {:#x}", mask);

    subsets
}

/// Computes the squares attacked by a `slider` on `sq` by stepping along each ray until it leaves
/// the board or reaches a square in `occ`. The blocking square is included.
pub fn ray_cast(sq: Square, occ: Bitboard, slider: Slider) -> Bitboard {
    let origin = Bitboard::from(sq);

    slider.directions().iter()
        .fold(Bitboard::new(), |attacks, &(x, y)| attacks | ray(origin, x, y, occ))
}

fn ray(origin: Bitboard, x: i8, y: i8, occ: Bitboard) -> Bitboard {
    let mut ray = Bitboard::new();
    let mut current = origin.shift_xy(x, y);

    while !current.is_empty() {
        ray |= current;
        if current.intersects(occ) {
            break;
        }
        current = current.shift_xy(x, y);
    }

    ray
}

/// Searches for a multiplier that sends each of `occupancies` to a slot holding the matching
/// entry of `targets`. Returns the multiplier, the number of candidates tried and the filled table.
fn find_magic(
    rng: &mut StdRng,
    mask: Bitboard,
    occupancies: &[Bitboard],
    targets: &[Bitboard],
    max_attempts: u32,
) -> Option<(u64, u32, Vec<Bitboard>)> {
    let bits = mask.len() as u32;
    let shift = 64 - bits;
    let mut table = vec![Bitboard::new(); 1 << bits];
    // slot `i` holds a value from the current candidate only if `epoch[i] == attempt`
    let mut epoch = vec![0u32; 1 << bits];

    for attempt in 1..=max_attempts {
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.0.wrapping_mul(magic) & 0xff00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        let mut collision = false;
        for (occ, &target) in occupancies.iter().zip(targets) {
            let i = (occ.0.wrapping_mul(magic) >> shift) as usize;
            if epoch[i] != attempt {
                epoch[i] = attempt;
                table[i] = target;
            } else if table[i] != target {
                collision = true;
                break;
            }
        }

        if !collision {
            for (slot, &e) in table.iter_mut().zip(&epoch) {
                if e != attempt {
                    *slot = Bitboard::new();
                }
            }
            return Some((magic, attempt, table));
        }
    }

    None
}
