use serde::{Deserialize, Serialize};

use crate::card::{Card, CardColor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Continuing,
    Ended { winner: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TurnAction {
    #[serde(rename_all = "camelCase")]
    Play {
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_color: Option<CardColor>,
    },
    Draw,
    SayUno {
        player: usize,
    },
    CatchUnoFailure {
        accuser: usize,
        accused: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnActionResult {
    Played { card: Card, outcome: RoundOutcome },
    Drew { card: Card },
    UnoSaid,
    Accused { success: bool },
}
