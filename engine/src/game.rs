use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::card::{Card, CardColor};
use crate::constants::{
    DEFAULT_CARDS_PER_PLAYER, DEFAULT_TARGET_SCORE, MIN_PLAYERS, TOTAL_CARDS_IN_DECK,
};
use crate::error::{Result, UnoError};
use crate::random::{Randomizer, Shuffler};
use crate::round::Round;
use crate::snapshot::GameSnapshot;
use crate::turn::{RoundOutcome, TurnAction, TurnActionResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub players: Vec<String>,
    pub target_score: u32,
    pub cards_per_player: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            target_score: DEFAULT_TARGET_SCORE,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
        }
    }
}

pub struct Game<S, R> {
    players: Vec<String>,
    scores: Vec<u32>,
    target_score: u32,
    cards_per_player: usize,
    current_round: Option<Round>,
    shuffler: S,
    randomizer: R,
}

impl<S, R> fmt::Debug for Game<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.players)
            .field("scores", &self.scores)
            .field("target_score", &self.target_score)
            .field("cards_per_player", &self.cards_per_player)
            .field("current_round", &self.current_round)
            .finish_non_exhaustive()
    }
}

impl<S, R> Game<S, R>
where
    S: Shuffler,
    R: Randomizer,
{
    pub fn new(config: GameConfig, mut shuffler: S, mut randomizer: R) -> Result<Self> {
        if config.players.len() < MIN_PLAYERS {
            return Err(UnoError::InvalidGameConfig(format!(
                "a game needs at least {MIN_PLAYERS} players, got {}",
                config.players.len()
            )));
        }
        if config.target_score == 0 {
            return Err(UnoError::InvalidGameConfig(
                "the target score must be positive".to_string(),
            ));
        }
        if let Some(reason) = deal_size_problem(config.players.len(), config.cards_per_player) {
            return Err(UnoError::InvalidGameConfig(reason));
        }

        let dealer = randomizer.index_below(config.players.len());
        let round = Round::new(
            config.players.clone(),
            dealer,
            &mut shuffler,
            config.cards_per_player,
        )?;

        info!(
            players = config.players.len(),
            target_score = config.target_score,
            "game created"
        );

        Ok(Game {
            scores: vec![0; config.players.len()],
            players: config.players,
            target_score: config.target_score,
            cards_per_player: config.cards_per_player,
            current_round: Some(round),
            shuffler,
            randomizer,
        })
    }

    /// An ended round in the snapshot is scored straight away.
    pub fn from_snapshot(snapshot: GameSnapshot, shuffler: S, randomizer: R) -> Result<Self> {
        if snapshot.players.len() < MIN_PLAYERS {
            return Err(UnoError::InvalidSnapshot(format!(
                "a game needs at least {MIN_PLAYERS} players, got {}",
                snapshot.players.len()
            )));
        }
        if snapshot.target_score == 0 {
            return Err(UnoError::InvalidSnapshot(
                "the target score must be positive".to_string(),
            ));
        }
        if let Some(reason) = deal_size_problem(snapshot.players.len(), snapshot.cards_per_player) {
            return Err(UnoError::InvalidSnapshot(reason));
        }
        if snapshot.scores.len() != snapshot.players.len() {
            return Err(UnoError::InvalidSnapshot(format!(
                "{} scores for {} players",
                snapshot.scores.len(),
                snapshot.players.len()
            )));
        }

        let winners = snapshot
            .scores
            .iter()
            .filter(|score| **score >= snapshot.target_score)
            .count();
        if winners > 1 {
            return Err(UnoError::InvalidSnapshot(
                "more than one player has reached the target score".to_string(),
            ));
        }

        let current_round = match (winners, snapshot.current_round) {
            (0, Some(round)) => {
                if round.players != snapshot.players {
                    return Err(UnoError::InvalidSnapshot(
                        "the round is played by different players than the game".to_string(),
                    ));
                }
                Some(Round::from_snapshot(round)?)
            }
            (0, None) => {
                return Err(UnoError::InvalidSnapshot(
                    "an unfinished game must have a current round".to_string(),
                ))
            }
            (_, Some(_)) => {
                return Err(UnoError::InvalidSnapshot(
                    "a finished game cannot have a current round".to_string(),
                ))
            }
            (_, None) => None,
        };

        let mut game = Game {
            players: snapshot.players,
            scores: snapshot.scores,
            target_score: snapshot.target_score,
            cards_per_player: snapshot.cards_per_player,
            current_round: None,
            shuffler,
            randomizer,
        };

        if let Some(round) = current_round {
            match round.winner() {
                Some(winner) if round.has_ended() => game.finish_round(round, winner)?,
                _ => game.current_round = Some(round),
            }
        }

        Ok(game)
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            scores: self.scores.clone(),
            target_score: self.target_score,
            cards_per_player: self.cards_per_player,
            current_round: self.current_round.as_ref().map(Round::to_snapshot),
        }
    }

    pub fn player(&self, index: usize) -> Result<&str> {
        self.players
            .get(index)
            .map(String::as_str)
            .ok_or(UnoError::InvalidPlayerIndex(index))
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn score(&self, index: usize) -> Result<u32> {
        self.scores
            .get(index)
            .copied()
            .ok_or(UnoError::InvalidPlayerIndex(index))
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn cards_per_player(&self) -> usize {
        self.cards_per_player
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    pub fn winner(&self) -> Option<usize> {
        self.scores
            .iter()
            .position(|score| *score >= self.target_score)
    }

    pub fn is_over(&self) -> bool {
        self.current_round.is_none()
    }

    pub fn play(&mut self, index: usize, next_color: Option<CardColor>) -> Result<RoundOutcome> {
        let mut round = self.active_round()?.clone();
        let outcome = round.play(index, next_color, &mut self.shuffler)?;

        match outcome {
            RoundOutcome::Continuing => self.current_round = Some(round),
            RoundOutcome::Ended { winner } => self.finish_round(round, winner)?,
        }

        Ok(outcome)
    }

    pub fn draw(&mut self) -> Result<Card> {
        let round = self
            .current_round
            .as_mut()
            .ok_or(UnoError::MatchEnded)?;
        round.draw(&mut self.shuffler)
    }

    pub fn say_uno(&mut self, player: usize) -> Result<()> {
        let round = self
            .current_round
            .as_mut()
            .ok_or(UnoError::MatchEnded)?;
        round.say_uno(player)
    }

    pub fn catch_uno_failure(&mut self, accuser: usize, accused: usize) -> Result<bool> {
        let round = self
            .current_round
            .as_mut()
            .ok_or(UnoError::MatchEnded)?;
        round.catch_uno_failure(accuser, accused, &mut self.shuffler)
    }

    pub fn play_turn(&mut self, action: TurnAction) -> Result<TurnActionResult> {
        debug!(?action, "turn action received");

        let result = match action {
            TurnAction::Play { index, next_color } => {
                let round = self.active_round()?;
                let card = round
                    .player_in_turn()
                    .and_then(|player| round.hand(player).ok())
                    .and_then(|hand| hand.get(index))
                    .copied()
                    .ok_or(UnoError::IllegalMove)?;
                let outcome = self.play(index, next_color)?;
                TurnActionResult::Played { card, outcome }
            }
            TurnAction::Draw => TurnActionResult::Drew { card: self.draw()? },
            TurnAction::SayUno { player } => {
                self.say_uno(player)?;
                TurnActionResult::UnoSaid
            }
            TurnAction::CatchUnoFailure { accuser, accused } => TurnActionResult::Accused {
                success: self.catch_uno_failure(accuser, accused)?,
            },
        };

        Ok(result)
    }

    fn active_round(&self) -> Result<&Round> {
        self.current_round.as_ref().ok_or(UnoError::MatchEnded)
    }

    fn finish_round(&mut self, round: Round, winner: usize) -> Result<()> {
        let points = round.score().unwrap_or(0);
        let total = self.scores[winner].saturating_add(points);

        if total >= self.target_score {
            self.scores[winner] = total;
            self.current_round = None;
            info!(winner, score = total, "game won");
            return Ok(());
        }

        let dealer = self.randomizer.index_below(self.players.len());
        let next_round = Round::new(
            self.players.clone(),
            dealer,
            &mut self.shuffler,
            self.cards_per_player,
        )?;

        self.scores[winner] = total;
        self.current_round = Some(next_round);
        info!(winner, points, score = total, dealer, "round finished, next round dealt");

        Ok(())
    }
}

/// Hands plus a starting card must fit in one deck.
fn deal_size_problem(players: usize, cards_per_player: usize) -> Option<String> {
    if cards_per_player == 0 {
        return Some("every player must be dealt at least one card".to_string());
    }
    let needed = players.saturating_mul(cards_per_player).saturating_add(1);
    if needed > TOTAL_CARDS_IN_DECK {
        return Some(format!(
            "{players} hands of {cards_per_player} cards do not fit in a {TOTAL_CARDS_IN_DECK} card deck"
        ));
    }
    None
}
