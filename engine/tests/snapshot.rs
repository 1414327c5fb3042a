mod common;

use common::{create_player_names, snapshot_cards, RoundSetup};
use serde_json::{json, Value};
use uno_engine::{
    card::{Card, CardColor},
    error::UnoError,
    random::NoShuffle,
    round::{Direction, Round},
    snapshot::{CardKind, CardSnapshot, RoundSnapshot},
};

fn two_player_setup() -> RoundSetup {
    RoundSetup::new(vec![
        vec![Card::numbered(CardColor::Blue, 2), Card::Wild],
        vec![Card::numbered(CardColor::Blue, 3)],
    ])
}

fn assert_invalid(snapshot: RoundSnapshot) {
    let result = Round::from_snapshot(snapshot);
    assert!(
        matches!(result, Err(UnoError::InvalidSnapshot(_))),
        "expected an invalid snapshot, got {result:?}"
    );
}

#[test]
fn fresh_round_survives_a_round_trip() {
    let round = Round::new(create_player_names(4), 2, &mut NoShuffle, 7).unwrap();

    let restored = Round::from_snapshot(round.to_snapshot()).unwrap();

    assert_eq!(restored, round);
    assert_eq!(restored.to_snapshot(), round.to_snapshot());
}

#[test]
fn round_trip_through_json_keeps_uno_calls() {
    let mut round = Round::new(create_player_names(3), 0, &mut NoShuffle, 7).unwrap();
    round.say_uno(2).unwrap();

    let json = round.to_snapshot().to_json().unwrap();
    let restored = Round::from_snapshot(RoundSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored, round);
    assert!(restored.has_called_uno(2).unwrap());
    assert!(!restored.has_called_uno(0).unwrap());
}

#[test]
fn round_snapshot_uses_camel_case_keys() {
    let snapshot = RoundSetup::new(vec![
        vec![Card::Wild],
        vec![Card::skip(CardColor::Green)],
    ])
    .draw_pile(vec![Card::numbered(CardColor::Yellow, 0)])
    .direction(Direction::Counterclockwise)
    .snapshot();

    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(
        value,
        json!({
            "players": ["Player 1", "Player 2"],
            "hands": [
                [{ "type": "WILD" }],
                [{ "type": "SKIP", "color": "GREEN" }],
            ],
            "drawPile": [{ "type": "NUMBERED", "color": "YELLOW", "number": 0 }],
            "discardPile": [{ "type": "NUMBERED", "color": "RED", "number": 5 }],
            "currentColor": "RED",
            "currentDirection": "counterclockwise",
            "dealer": 0,
            "playerInTurn": 0,
        })
    );
}

#[test]
fn ended_round_omits_player_in_turn() {
    let mut round = RoundSetup::new(vec![
        vec![Card::numbered(CardColor::Red, 2)],
        vec![Card::numbered(CardColor::Blue, 3)],
    ])
    .round();
    round.play(0, None, &mut NoShuffle).unwrap();

    let value: Value = serde_json::to_value(round.to_snapshot()).unwrap();

    assert!(value.get("playerInTurn").is_none());
    assert_eq!(value["hands"][0], json!([]));
    assert_eq!(value["discardPile"][0], json!({ "type": "NUMBERED", "color": "RED", "number": 2 }));
}

#[test]
fn ended_snapshot_loads_as_ended() {
    let snapshot = RoundSetup::new(vec![vec![], vec![Card::WildDrawFour]])
        .in_turn(1)
        .snapshot();

    let round = Round::from_snapshot(snapshot).unwrap();

    assert!(round.has_ended());
    assert_eq!(round.player_in_turn(), None);
    assert_eq!(round.winner(), Some(0));
    assert_eq!(round.score(), Some(50));
}

#[test]
fn ended_snapshot_may_leave_out_player_in_turn() {
    let mut snapshot = RoundSetup::new(vec![vec![Card::Wild], vec![]]).snapshot();
    snapshot.player_in_turn = None;

    let round = Round::from_snapshot(snapshot).unwrap();

    assert_eq!(round.winner(), Some(1));
}

#[test]
fn wild_top_card_accepts_any_current_color() {
    let round = two_player_setup()
        .top(Card::WildDrawFour)
        .color(CardColor::Yellow)
        .round();

    assert_eq!(round.current_color(), CardColor::Yellow);
    assert_eq!(round.top_card(), Some(&Card::WildDrawFour));
}

#[test]
fn reject_too_few_players() {
    assert_invalid(RoundSetup::new(vec![vec![Card::Wild]]).snapshot());
}

#[test]
fn reject_too_many_players() {
    assert_invalid(RoundSetup::new(vec![vec![Card::Wild]; 11]).snapshot());
}

#[test]
fn reject_hands_not_matching_players() {
    let mut snapshot = two_player_setup().snapshot();
    snapshot.hands.pop();
    assert_invalid(snapshot);
}

#[test]
fn reject_more_than_one_empty_hand() {
    assert_invalid(RoundSetup::new(vec![vec![], vec![], vec![Card::Wild]]).snapshot());
}

#[test]
fn reject_empty_discard_pile() {
    assert_invalid(two_player_setup().discard_pile(Vec::new()).snapshot());
}

#[test]
fn reject_color_not_matching_top_card() {
    assert_invalid(two_player_setup().color(CardColor::Green).snapshot());
}

#[test]
fn reject_dealer_out_of_range() {
    let mut snapshot = two_player_setup().snapshot();
    snapshot.dealer = 2;
    assert_invalid(snapshot);
}

#[test]
fn reject_player_in_turn_out_of_range() {
    assert_invalid(two_player_setup().in_turn(5).snapshot());
}

#[test]
fn reject_running_round_without_player_in_turn() {
    let mut snapshot = two_player_setup().snapshot();
    snapshot.player_in_turn = None;
    assert_invalid(snapshot);
}

#[test]
fn reject_uno_caller_out_of_range() {
    assert_invalid(two_player_setup().uno_called_by(vec![0, 2]).snapshot());
}

#[test]
fn reject_malformed_cards() {
    let mut snapshot = two_player_setup().snapshot();
    snapshot.hands[1].push(CardSnapshot {
        kind: CardKind::Numbered,
        color: Some(CardColor::Red),
        number: Some(10),
    });
    assert_invalid(snapshot);

    let mut snapshot = two_player_setup().snapshot();
    snapshot.draw_pile = vec![CardSnapshot {
        kind: CardKind::Reverse,
        color: None,
        number: None,
    }];
    assert_invalid(snapshot);
}

#[test]
fn reject_unknown_json_values() {
    let mut value = serde_json::to_value(two_player_setup().snapshot()).unwrap();
    value["currentColor"] = json!("PURPLE");

    let error = RoundSnapshot::from_json(&value.to_string()).unwrap_err();

    assert!(matches!(error, UnoError::InvalidSnapshot(_)));
}

#[test]
fn snapshot_hands_mirror_round_hands() {
    let round = two_player_setup().round();
    let snapshot = round.to_snapshot();

    for player in 0..round.player_count() {
        assert_eq!(snapshot.hands[player], snapshot_cards(round.hand(player).unwrap()));
    }
    assert_eq!(snapshot.discard_pile, snapshot_cards(round.discard_pile().cards()));
}
