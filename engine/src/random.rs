use rand::{rngs::ThreadRng, seq::SliceRandom, thread_rng, Rng};

use crate::card::Card;

pub trait Shuffler {
    fn shuffle(&mut self, cards: &mut [Card]);
}

pub trait Randomizer {
    fn index_below(&mut self, bound: usize) -> usize;
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [Card]),
{
    fn shuffle(&mut self, cards: &mut [Card]) {
        self(cards)
    }
}

impl<F> Randomizer for F
where
    F: FnMut(usize) -> usize,
{
    fn index_below(&mut self, bound: usize) -> usize {
        self(bound)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoShuffle;

impl Shuffler for NoShuffle {
    fn shuffle(&mut self, _cards: &mut [Card]) {}
}

#[derive(Clone, Debug)]
pub struct RngShuffler<R>(R);

impl<R: Rng> RngShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl Default for RngShuffler<ThreadRng> {
    fn default() -> Self {
        Self(thread_rng())
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.0);
    }
}

#[derive(Clone, Debug)]
pub struct RngRandomizer<R>(R);

impl<R: Rng> RngRandomizer<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl Default for RngRandomizer<ThreadRng> {
    fn default() -> Self {
        Self(thread_rng())
    }
}

impl<R: Rng> Randomizer for RngRandomizer<R> {
    fn index_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }
}
