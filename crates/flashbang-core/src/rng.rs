// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG for shuffling words,
/// sampling distractors, and flipping question directions.
///
/// Seeding it explicitly makes every session reproducible.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random number in range [0, max). `max` must be non-zero.
    ///
    /// Draws that fall into the incomplete last bucket of the `u32` range are
    /// rejected, so every value is equally likely.
    pub fn generate(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        // 2^32 mod max.
        let rem = (u32::MAX % max + 1) % max;
        let limit = u32::MAX - rem;
        loop {
            let v = self.next_u32();
            if v <= limit {
                return v % max;
            }
        }
    }

    /// A fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }
}

/// Fisher-Yates shuffle: every permutation is equally likely.
pub fn shuffle_in_place<T>(v: &mut [T], rng: &mut TinyRng) {
    for i in (1..v.len()).rev() {
        let j = rng.generate((i + 1) as u32) as usize;
        v.swap(i, j);
    }
}
