use rand::{rngs::StdRng, Rng};
use strum::IntoEnumIterator;
use tracing::{debug, info};
use uno_engine::{
    card::{Card, CardColor},
    error::UnoError,
    game::Game,
    random::{Randomizer, Shuffler},
    round::Direction,
    turn::{TurnAction, TurnActionResult},
};

/// Plays every seat at the table with the same simple strategy.
pub struct Bot {
    rng: StdRng,
    forget_uno: f64,
}

impl Bot {
    pub fn new(rng: StdRng, forget_uno: f64) -> Self {
        Self { rng, forget_uno }
    }

    /// Takes one turn for whoever is in turn: accuse the previous seat if it
    /// sits on an undeclared last card, then play the first legal card or
    /// draw.
    pub fn take_turn<S, R>(&mut self, game: &mut Game<S, R>) -> Result<(), UnoError>
    where
        S: Shuffler,
        R: Randomizer,
    {
        let round = game.current_round().ok_or(UnoError::MatchEnded)?;
        let player = round.player_in_turn().ok_or(UnoError::RoundEnded)?;

        let count = round.player_count();
        let previous = match round.current_direction() {
            Direction::Clockwise => (player + count - 1) % count,
            Direction::Counterclockwise => (player + 1) % count,
        };
        if round.hand(previous)?.len() == 1 && !round.has_called_uno(previous)? {
            let result = game.play_turn(TurnAction::CatchUnoFailure {
                accuser: player,
                accused: previous,
            })?;
            if let TurnActionResult::Accused { success } = result {
                info!(accuser = player, accused = previous, success, "uno accusation");
            }
        }

        let round = game.current_round().ok_or(UnoError::MatchEnded)?;
        let hand = round.hand(player)?;
        let action = match (0..hand.len()).find(|index| round.can_play(*index)) {
            Some(index) => TurnAction::Play {
                index,
                next_color: hand[index].is_wild().then(|| favourite_color(hand)),
            },
            None => TurnAction::Draw,
        };
        let down_to_one = matches!(action, TurnAction::Play { .. }) && hand.len() == 2;

        let result = game.play_turn(action)?;
        match result {
            TurnActionResult::Played { card, outcome } => {
                info!(player, %card, ?outcome, "card played")
            }
            TurnActionResult::Drew { card } => debug!(player, %card, "card drawn"),
            other => debug!(player, ?other, "unexpected turn result"),
        }

        if down_to_one {
            if self.rng.gen_bool(self.forget_uno) {
                debug!(player, "forgot to call uno");
            } else {
                game.play_turn(TurnAction::SayUno { player })?;
                info!(player, "uno!");
            }
        }

        Ok(())
    }
}

/// The color held most often, so a wild keeps the rest of the hand playable.
fn favourite_color(hand: &[Card]) -> CardColor {
    CardColor::iter()
        .max_by_key(|color| hand.iter().filter(|card| card.color() == Some(*color)).count())
        .unwrap_or(CardColor::Red)
}
