use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::card::{Card, CardColor, ColoredCard};
use crate::constants::*;
use crate::deck::Deck;
use crate::error::{Result, UnoError};
use crate::player::Player;
use crate::random::Shuffler;
use crate::snapshot::{CardSnapshot, RoundSnapshot};
use crate::turn::RoundOutcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    players: Vec<Player>,
    dealer: usize,
    draw_pile: Deck,
    discard_pile: Deck,
    current_color: CardColor,
    current_direction: Direction,
    player_in_turn: Option<usize>,
}

impl Round {
    pub fn new(
        player_names: Vec<String>,
        dealer: usize,
        shuffler: &mut dyn Shuffler,
        cards_per_player: usize,
    ) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_names.len()) {
            return Err(UnoError::InvalidPlayerCount(player_names.len()));
        }
        if dealer >= player_names.len() {
            return Err(UnoError::InvalidPlayerIndex(dealer));
        }
        if cards_per_player == 0 {
            return Err(UnoError::InvalidGameConfig(
                "every player must be dealt at least one card".to_string(),
            ));
        }

        let mut draw_pile = Deck::standard().shuffled(shuffler);

        let mut players = Vec::with_capacity(player_names.len());
        for name in player_names {
            let cards = draw_pile
                .deal_many(cards_per_player)
                .ok_or(UnoError::DeckExhausted)?;
            players.push(Player::new(name, cards));
        }

        let mut discard_pile = Deck::empty();
        let (starter, current_color) = loop {
            let card = draw_pile.deal().ok_or(UnoError::DeckExhausted)?;
            match card.color() {
                Some(color) => break (card, color),
                None => {
                    trace!(%card, "wild card revealed as starter, reshuffling");
                    discard_pile.push_top(card);
                    draw_pile = draw_pile.shuffled(shuffler);
                }
            }
        };
        discard_pile.push_top(starter);

        let mut round = Round {
            players,
            dealer,
            draw_pile,
            discard_pile,
            current_color,
            current_direction: Direction::Clockwise,
            player_in_turn: Some(dealer),
        };

        // The starter acts as if the dealer had just played it.
        round.apply_turn_effect(&starter, dealer, shuffler)?;

        info!(
            players = round.players.len(),
            dealer,
            %starter,
            player_in_turn = ?round.player_in_turn,
            "round created"
        );

        Ok(round)
    }

    pub fn player(&self, index: usize) -> Result<&str> {
        self.players
            .get(index)
            .map(Player::name)
            .ok_or(UnoError::InvalidPlayerIndex(index))
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(Player::name)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn hand(&self, player: usize) -> Result<&[Card]> {
        self.players
            .get(player)
            .map(Player::hand)
            .ok_or(UnoError::InvalidPlayerIndex(player))
    }

    pub fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &Deck {
        &self.discard_pile
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.top()
    }

    pub fn current_color(&self) -> CardColor {
        self.current_color
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn player_in_turn(&self) -> Option<usize> {
        self.player_in_turn
    }

    pub fn has_called_uno(&self, player: usize) -> Result<bool> {
        self.players
            .get(player)
            .map(Player::has_called_uno)
            .ok_or(UnoError::InvalidPlayerIndex(player))
    }

    pub fn has_ended(&self) -> bool {
        self.player_in_turn.is_none()
    }

    pub fn winner(&self) -> Option<usize> {
        self.players
            .iter()
            .position(|player| player.cards_count() == 0)
    }

    pub fn score(&self) -> Option<u32> {
        if !self.has_ended() {
            return None;
        }

        Some(self.players.iter().map(Player::points_in_hand).sum())
    }

    pub fn can_play(&self, index: usize) -> bool {
        let Some(player) = self.player_in_turn else {
            return false;
        };
        let player = &self.players[player];
        let Some(card) = player.hand.get(index) else {
            return false;
        };
        let Some(top) = self.discard_pile.top() else {
            return false;
        };

        match card {
            Card::WildDrawFour => !player.holds_color(self.current_color),
            Card::Wild => true,
            Card::Colored(color, _) if *color == self.current_color => true,
            Card::Colored(_, ColoredCard::Number(number)) => {
                matches!(top, Card::Colored(_, ColoredCard::Number(top_number)) if top_number == number)
            }
            Card::Colored(_, kind) => {
                matches!(top, Card::Colored(_, top_kind) if top_kind == kind)
            }
        }
    }

    pub fn can_play_any(&self) -> bool {
        self.player_in_turn
            .map(|player| (0..self.players[player].cards_count()).any(|index| self.can_play(index)))
            .unwrap_or(false)
    }

    pub fn play(
        &mut self,
        index: usize,
        next_color: Option<CardColor>,
        shuffler: &mut dyn Shuffler,
    ) -> Result<RoundOutcome> {
        let player = self.player_in_turn.ok_or(UnoError::RoundEnded)?;
        let card = *self.players[player]
            .hand
            .get(index)
            .ok_or(UnoError::IllegalMove)?;

        let color = match (card.color(), next_color) {
            (Some(color), None) | (None, Some(color)) => color,
            _ => return Err(UnoError::IllegalColorChoice),
        };

        if !self.can_play(index) {
            return Err(UnoError::IllegalMove);
        }

        let mut next = self.clone();
        next.players[player].remove_card(index);
        next.discard_pile.push_top(card);
        next.current_color = color;

        debug!(player, %card, %color, "card played");

        if next.players[player].cards_count() == 0 {
            next.player_in_turn = None;
            *self = next;
            info!(winner = player, score = ?self.score(), "round ended");
            return Ok(RoundOutcome::Ended { winner: player });
        }

        next.apply_turn_effect(&card, player, shuffler)?;
        *self = next;

        Ok(RoundOutcome::Continuing)
    }

    pub fn draw(&mut self, shuffler: &mut dyn Shuffler) -> Result<Card> {
        let player = self.player_in_turn.ok_or(UnoError::RoundEnded)?;

        let mut next = self.clone();
        next.players.iter_mut().for_each(Player::forget_uno);

        let card = next.deal_card(shuffler)?;
        next.players[player].add_card(card);

        let drawn_index = next.players[player].cards_count() - 1;
        let playable = next.can_play(drawn_index);
        if !playable {
            next.player_in_turn = Some(next.seat_after(player, 1));
        }

        debug!(player, %card, playable, "card drawn");
        *self = next;

        Ok(card)
    }

    pub fn say_uno(&mut self, player: usize) -> Result<()> {
        if self.has_ended() {
            return Err(UnoError::RoundEnded);
        }

        self.players
            .get_mut(player)
            .ok_or(UnoError::InvalidPlayerIndex(player))?
            .uno();

        debug!(player, "uno called");
        Ok(())
    }

    pub fn catch_uno_failure(
        &mut self,
        accuser: usize,
        accused: usize,
        shuffler: &mut dyn Shuffler,
    ) -> Result<bool> {
        if accuser >= self.players.len() {
            return Err(UnoError::InvalidPlayerIndex(accuser));
        }
        if accused >= self.players.len() {
            return Err(UnoError::InvalidPlayerIndex(accused));
        }

        if !self.accusation_holds(accused) {
            debug!(accuser, accused, "uno accusation rejected");
            return Ok(false);
        }

        let mut next = self.clone();
        next.deal_cards_to(accused, MISSED_UNO_PENALTY, shuffler)?;
        *self = next;

        info!(accuser, accused, "uno accusation succeeded");
        Ok(true)
    }

    pub fn to_snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            players: self.players.iter().map(|player| player.name.clone()).collect(),
            hands: self
                .players
                .iter()
                .map(|player| player.hand.iter().map(CardSnapshot::from).collect())
                .collect(),
            draw_pile: self.draw_pile.to_snapshot(),
            discard_pile: self.discard_pile.to_snapshot(),
            current_color: self.current_color,
            current_direction: self.current_direction,
            dealer: self.dealer,
            player_in_turn: self.player_in_turn,
            uno_called_by: self
                .players
                .iter()
                .enumerate()
                .filter(|(_, player)| player.uno_called)
                .map(|(index, _)| index)
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: RoundSnapshot) -> Result<Self> {
        let player_count = snapshot.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(invalid(format!(
                "a round needs between {MIN_PLAYERS} and {MAX_PLAYERS} players, got {player_count}"
            )));
        }
        if snapshot.hands.len() != player_count {
            return Err(invalid(format!(
                "{} hands for {player_count} players",
                snapshot.hands.len()
            )));
        }

        let empty_hands = snapshot.hands.iter().filter(|hand| hand.is_empty()).count();
        if empty_hands > 1 {
            return Err(invalid("more than one player has an empty hand"));
        }
        let ended = empty_hands == 1;

        let hands = snapshot
            .hands
            .iter()
            .map(|hand| Deck::from_snapshot(hand).map(|deck| deck.0))
            .collect::<Result<Vec<_>>>()
            .map_err(snapshot_error)?;
        let draw_pile = Deck::from_snapshot(&snapshot.draw_pile).map_err(snapshot_error)?;
        let discard_pile = Deck::from_snapshot(&snapshot.discard_pile).map_err(snapshot_error)?;

        let Some(top) = discard_pile.top() else {
            return Err(invalid("the discard pile is empty"));
        };
        if let Some(color) = top.color() {
            if color != snapshot.current_color {
                return Err(invalid(format!(
                    "current color {} does not match the top card {top}",
                    snapshot.current_color
                )));
            }
        }

        if snapshot.dealer >= player_count {
            return Err(invalid(format!("dealer {} is out of range", snapshot.dealer)));
        }
        match snapshot.player_in_turn {
            Some(player) if player >= player_count => {
                return Err(invalid(format!("player in turn {player} is out of range")));
            }
            None if !ended => {
                return Err(invalid("player in turn is missing from a running round"));
            }
            _ => {}
        }
        if let Some(player) = snapshot
            .uno_called_by
            .iter()
            .find(|player| **player >= player_count)
        {
            return Err(invalid(format!("uno caller {player} is out of range")));
        }

        let players = snapshot
            .players
            .into_iter()
            .zip(hands)
            .enumerate()
            .map(|(index, (name, hand))| Player {
                name,
                hand,
                uno_called: snapshot.uno_called_by.contains(&index),
            })
            .collect();

        Ok(Round {
            players,
            dealer: snapshot.dealer,
            draw_pile,
            discard_pile,
            current_color: snapshot.current_color,
            current_direction: snapshot.current_direction,
            player_in_turn: if ended { None } else { snapshot.player_in_turn },
        })
    }

    fn accusation_holds(&self, accused: usize) -> bool {
        let Some(in_turn) = self.player_in_turn else {
            return false;
        };
        let suspect = &self.players[accused];

        // Only the seat right after the accused may have taken over since
        // the accused played down to one card.
        !suspect.has_called_uno()
            && suspect.cards_count() == 1
            && in_turn != accused
            && in_turn == self.seat_after(accused, 1)
            && !self.discard_pile.top().is_some_and(Card::is_draw_card)
    }

    fn apply_turn_effect(
        &mut self,
        card: &Card,
        actor: usize,
        shuffler: &mut dyn Shuffler,
    ) -> Result<()> {
        let next = match card {
            Card::Colored(_, ColoredCard::Number(_)) | Card::Wild => self.seat_after(actor, 1),
            Card::Colored(_, ColoredCard::Skip) => self.seat_after(actor, 2),
            Card::Colored(_, ColoredCard::Reverse) => {
                if self.players.len() == 2 {
                    self.seat_after(actor, 2)
                } else {
                    self.current_direction = self.current_direction.reversed();
                    self.seat_after(actor, 1)
                }
            }
            Card::Colored(_, ColoredCard::DrawTwo) => {
                self.deal_cards_to(self.seat_after(actor, 1), DRAW_TWO_PENALTY, shuffler)?;
                self.seat_after(actor, 2)
            }
            Card::WildDrawFour => {
                self.deal_cards_to(self.seat_after(actor, 1), WILD_DRAW_FOUR_PENALTY, shuffler)?;
                self.seat_after(actor, 2)
            }
        };

        self.player_in_turn = Some(next);
        Ok(())
    }

    /// The seat `steps` places away from `from` in the current direction.
    fn seat_after(&self, from: usize, steps: usize) -> usize {
        let count = self.players.len();
        let steps = steps % count;
        match self.current_direction {
            Direction::Clockwise => (from + steps) % count,
            Direction::Counterclockwise => (from + count - steps) % count,
        }
    }

    fn deal_cards_to(
        &mut self,
        player: usize,
        count: usize,
        shuffler: &mut dyn Shuffler,
    ) -> Result<()> {
        for _ in 0..count {
            let card = self.deal_card(shuffler)?;
            self.players[player].add_card(card);
        }
        trace!(player, count, "cards dealt");
        Ok(())
    }

    /// Deals from the draw pile, turning the discard pile (minus its top
    /// card) into a fresh draw pile when it runs dry.
    fn deal_card(&mut self, shuffler: &mut dyn Shuffler) -> Result<Card> {
        if let Some(card) = self.draw_pile.deal() {
            return Ok(card);
        }

        let refill = self.discard_pile.take_below_top();
        debug!(cards = refill.size(), "refilling draw pile from discard pile");
        self.draw_pile = refill.shuffled(shuffler);
        self.draw_pile.deal().ok_or(UnoError::DeckExhausted)
    }
}

fn invalid(reason: impl Into<String>) -> UnoError {
    UnoError::InvalidSnapshot(reason.into())
}

fn snapshot_error(error: UnoError) -> UnoError {
    match error {
        UnoError::InvalidDeckContents(reason) => UnoError::InvalidSnapshot(reason),
        other => other,
    }
}
