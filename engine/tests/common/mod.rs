#![allow(dead_code)]

use uno_engine::{
    card::{Card, CardColor},
    game::Game,
    random::NoShuffle,
    round::{Direction, Round},
    snapshot::{CardSnapshot, GameSnapshot, RoundSnapshot},
};

pub type TestGame = Game<NoShuffle, fn(usize) -> usize>;

pub fn first_seat(_bound: usize) -> usize {
    0
}

pub fn create_player_names(count: usize) -> Vec<String> {
    let mut player_names = Vec::new();
    for i in 0..count {
        player_names.push(format!("Player {}", i + 1));
    }
    player_names
}

pub fn snapshot_cards(cards: &[Card]) -> Vec<CardSnapshot> {
    cards.iter().map(CardSnapshot::from).collect()
}

/// Yellow cards that never match the red setups used across the tests.
pub fn filler_cards() -> Vec<Card> {
    (0..20)
        .map(|i| Card::numbered(CardColor::Yellow, (i % 5) as u8))
        .collect()
}

/// Builds hand-crafted round states through the snapshot loader.
#[derive(Clone, Debug)]
pub struct RoundSetup {
    hands: Vec<Vec<Card>>,
    discard_pile: Vec<Card>,
    draw_pile: Vec<Card>,
    current_color: CardColor,
    current_direction: Direction,
    dealer: usize,
    player_in_turn: Option<usize>,
    uno_called_by: Vec<usize>,
}

impl RoundSetup {
    pub fn new(hands: Vec<Vec<Card>>) -> Self {
        Self {
            hands,
            discard_pile: vec![Card::numbered(CardColor::Red, 5)],
            draw_pile: filler_cards(),
            current_color: CardColor::Red,
            current_direction: Direction::Clockwise,
            dealer: 0,
            player_in_turn: Some(0),
            uno_called_by: Vec::new(),
        }
    }

    pub fn top(mut self, card: Card) -> Self {
        self.discard_pile = vec![card];
        if let Some(color) = card.color() {
            self.current_color = color;
        }
        self
    }

    pub fn discard_pile(mut self, cards: Vec<Card>) -> Self {
        self.discard_pile = cards;
        self
    }

    pub fn draw_pile(mut self, cards: Vec<Card>) -> Self {
        self.draw_pile = cards;
        self
    }

    pub fn color(mut self, color: CardColor) -> Self {
        self.current_color = color;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.current_direction = direction;
        self
    }

    pub fn in_turn(mut self, player: usize) -> Self {
        self.player_in_turn = Some(player);
        self
    }

    pub fn uno_called_by(mut self, players: Vec<usize>) -> Self {
        self.uno_called_by = players;
        self
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            players: create_player_names(self.hands.len()),
            hands: self.hands.iter().map(|hand| snapshot_cards(hand)).collect(),
            draw_pile: snapshot_cards(&self.draw_pile),
            discard_pile: snapshot_cards(&self.discard_pile),
            current_color: self.current_color,
            current_direction: self.current_direction,
            dealer: self.dealer,
            player_in_turn: self.player_in_turn,
            uno_called_by: self.uno_called_by.clone(),
        }
    }

    pub fn round(&self) -> Round {
        Round::from_snapshot(self.snapshot()).unwrap()
    }

    pub fn game_snapshot(&self, scores: Vec<u32>, target_score: u32) -> GameSnapshot {
        GameSnapshot {
            players: create_player_names(self.hands.len()),
            scores,
            target_score,
            cards_per_player: 7,
            current_round: Some(self.snapshot()),
        }
    }

    pub fn game(&self, target_score: u32) -> TestGame {
        let scores = vec![0; self.hands.len()];
        Game::from_snapshot(
            self.game_snapshot(scores, target_score),
            NoShuffle,
            first_seat as fn(usize) -> usize,
        )
        .unwrap()
    }
}

/// Asserts the structural invariants every reachable round must keep.
pub fn assert_round_invariants(round: &Round) {
    let empty_hands = (0..round.player_count())
        .filter(|player| round.hand(*player).unwrap().is_empty())
        .count();
    assert!(empty_hands <= 1, "{empty_hands} empty hands");
    assert_eq!(round.has_ended(), empty_hands == 1);
    assert!(!round.discard_pile().is_empty());

    let top = round.top_card().unwrap();
    if let Some(color) = top.color() {
        assert_eq!(color, round.current_color());
    }
}
