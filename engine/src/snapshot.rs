//! Plain-data mementos of cards, rounds and games.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::MAX_CARD_NUMBER,
    error::{Result, UnoError},
    round::Direction,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    Numbered,
    Skip,
    Reverse,
    Draw,
    Wild,
    WildDrawFour,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CardColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u8>,
}

impl From<&Card> for CardSnapshot {
    fn from(card: &Card) -> Self {
        let (kind, number) = match card {
            Card::Colored(_, ColoredCard::Number(number)) => (CardKind::Numbered, Some(*number)),
            Card::Colored(_, ColoredCard::Skip) => (CardKind::Skip, None),
            Card::Colored(_, ColoredCard::Reverse) => (CardKind::Reverse, None),
            Card::Colored(_, ColoredCard::DrawTwo) => (CardKind::Draw, None),
            Card::Wild => (CardKind::Wild, None),
            Card::WildDrawFour => (CardKind::WildDrawFour, None),
        };

        CardSnapshot {
            kind,
            color: card.color(),
            number,
        }
    }
}

impl TryFrom<&CardSnapshot> for Card {
    type Error = UnoError;

    fn try_from(snapshot: &CardSnapshot) -> Result<Self> {
        let card = match (snapshot.kind, snapshot.color, snapshot.number) {
            (CardKind::Numbered, Some(color), Some(number)) if number <= MAX_CARD_NUMBER => {
                Card::numbered(color, number)
            }
            (CardKind::Skip, Some(color), None) => Card::skip(color),
            (CardKind::Reverse, Some(color), None) => Card::reverse(color),
            (CardKind::Draw, Some(color), None) => Card::draw_two(color),
            (CardKind::Wild, None, None) => Card::Wild,
            (CardKind::WildDrawFour, None, None) => Card::WildDrawFour,
            _ => {
                return Err(UnoError::InvalidDeckContents(format!(
                    "malformed {:?} card (color: {:?}, number: {:?})",
                    snapshot.kind, snapshot.color, snapshot.number
                )))
            }
        };

        Ok(card)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub players: Vec<String>,
    pub hands: Vec<Vec<CardSnapshot>>,
    pub draw_pile: Vec<CardSnapshot>,
    pub discard_pile: Vec<CardSnapshot>,
    pub current_color: CardColor,
    pub current_direction: Direction,
    pub dealer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_in_turn: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uno_called_by: Vec<usize>,
}

impl RoundSnapshot {
    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<String>,
    pub scores: Vec<u32>,
    pub target_score: u32,
    pub cards_per_player: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round: Option<RoundSnapshot>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| UnoError::InvalidSnapshot(err.to_string()))
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|err| UnoError::InvalidSnapshot(err.to_string()))
}
