use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::{ACTION_CARD_POINTS, WILD_CARD_POINTS};

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardColor {
    Blue,
    Green,
    Red,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild,
    WildDrawFour,
}

impl Card {
    pub fn numbered(color: CardColor, number: u8) -> Self {
        Card::Colored(color, ColoredCard::Number(number))
    }

    pub fn skip(color: CardColor) -> Self {
        Card::Colored(color, ColoredCard::Skip)
    }

    pub fn reverse(color: CardColor) -> Self {
        Card::Colored(color, ColoredCard::Reverse)
    }

    pub fn draw_two(color: CardColor) -> Self {
        Card::Colored(color, ColoredCard::DrawTwo)
    }

    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    pub fn is_draw_card(&self) -> bool {
        matches!(
            self,
            Card::Colored(_, ColoredCard::DrawTwo) | Card::WildDrawFour
        )
    }

    /// Points this card is worth when left in a losing hand.
    pub fn points(&self) -> u32 {
        match self {
            Card::Colored(_, ColoredCard::Number(number)) => u32::from(*number),
            Card::Colored(_, ColoredCard::Skip | ColoredCard::Reverse | ColoredCard::DrawTwo) => {
                ACTION_CARD_POINTS
            }
            Card::Wild | Card::WildDrawFour => WILD_CARD_POINTS,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => {
                write!(f, "{} {}", color, {
                    match card {
                        ColoredCard::Number(number) => number.to_string(),
                        ColoredCard::Skip => "Skip".to_string(),
                        ColoredCard::Reverse => "Reverse".to_string(),
                        ColoredCard::DrawTwo => "Draw Two".to_string(),
                    }
                })
            }
            Card::Wild => write!(f, "Wild"),
            Card::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}
