use strum::IntoEnumIterator;
use tracing::trace;

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::*,
    error::{Result, UnoError},
    random::Shuffler,
    snapshot::CardSnapshot,
};

/// An ordered pile of cards. The front of the pile is its top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK);

        // Number Cards
        for color in CardColor::iter() {
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Number(*number)));
            }
        }

        // Action Cards
        for color in CardColor::iter() {
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Skip));
            }

            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::Reverse));
            }

            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredCard::DrawTwo));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::Wild);
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::WildDrawFour);
        }

        Self(cards)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        if let Some(card) = cards.iter().find(|card| {
            matches!(card, Card::Colored(_, ColoredCard::Number(number)) if *number > MAX_CARD_NUMBER)
        }) {
            return Err(UnoError::InvalidDeckContents(format!(
                "{card} is not a valid numbered card"
            )));
        }

        Ok(Self(cards))
    }

    pub fn from_snapshot(cards: &[CardSnapshot]) -> Result<Self> {
        let cards = cards
            .iter()
            .map(Card::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::from_cards(cards)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<CardSnapshot> = serde_json::from_str(json)
            .map_err(|err| UnoError::InvalidDeckContents(err.to_string()))?;
        Self::from_snapshot(&cards)
    }

    pub fn to_snapshot(&self) -> Vec<CardSnapshot> {
        self.0.iter().map(CardSnapshot::from).collect()
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.0.first()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn deal(&mut self) -> Option<Card> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }

    /// Removes the top `count` cards, or nothing if there are fewer left.
    pub fn deal_many(&mut self, count: usize) -> Option<Vec<Card>> {
        if count > self.0.len() {
            return None;
        }
        Some(self.0.drain(0..count).collect())
    }

    pub fn shuffled(&self, shuffler: &mut dyn Shuffler) -> Self {
        let mut cards = self.0.clone();
        shuffler.shuffle(&mut cards);
        trace!(cards = cards.len(), "shuffled deck");
        Self(cards)
    }

    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&Card) -> bool,
    {
        Self(self.0.iter().filter(|card| predicate(*card)).copied().collect())
    }

    pub(crate) fn push_top(&mut self, card: Card) {
        self.0.insert(0, card);
    }

    /// Takes every card except the top one, leaving only the top behind.
    pub(crate) fn take_below_top(&mut self) -> Deck {
        if self.0.len() <= 1 {
            return Deck::empty();
        }
        Deck(self.0.split_off(1))
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
