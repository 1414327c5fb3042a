use crate::card::{Card, CardColor};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) hand: Vec<Card>,
    pub(crate) uno_called: bool,
}

impl Player {
    pub fn new(name: String, cards: Vec<Card>) -> Self {
        Self {
            name,
            hand: cards,
            uno_called: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn has_called_uno(&self) -> bool {
        self.uno_called
    }

    pub(crate) fn holds_color(&self, color: CardColor) -> bool {
        self.hand.iter().any(|card| card.color() == Some(color))
    }

    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn remove_card(&mut self, index: usize) -> Card {
        self.uno_called = false;
        self.hand.remove(index)
    }

    pub(crate) fn uno(&mut self) {
        self.uno_called = true;
    }

    pub(crate) fn forget_uno(&mut self) {
        self.uno_called = false;
    }

    pub(crate) fn points_in_hand(&self) -> u32 {
        self.hand.iter().map(Card::points).sum()
    }
}
