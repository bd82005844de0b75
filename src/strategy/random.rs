//! Random walker: moves the last unit of its roster to a random free
//! neighbouring cell.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::Strategy;
use crate::board::{Action, Board, Owner};
use crate::movegen::{legal_actions_for, random_action};

pub struct RandomWalker {
    owner: Owner,
    rng: SmallRng,
}

impl RandomWalker {
    /// Creates a walker for `owner`. A seed of 0 draws from entropy.
    pub fn new(owner: Owner, seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        RandomWalker { owner, rng }
    }
}

impl Strategy for RandomWalker {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, board: &Board) -> Action {
        let Some(chosen) = board.unit_ids(self.owner).last() else {
            return Action::pass(self.owner);
        };

        let options = legal_actions_for(chosen, board);
        if !options.is_empty() {
            return options[self.rng.gen_range(0..options.len())];
        }

        // The last unit is boxed in; let any unit move instead.
        random_action(self.owner, board, &mut self.rng).unwrap_or(Action::pass(self.owner))
    }
}
