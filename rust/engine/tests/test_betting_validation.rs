use holdem_engine::betting::{BettingRound, RoundStatus, Street};
use holdem_engine::errors::{ActionViolation, GameError};
use holdem_engine::player::{Player, PlayerAction as A, PlayerStatus};
use holdem_engine::pot::PotManager;
use holdem_engine::rules::{validate_action, BetContext, ValidatedAction};

fn ctx(stack: u32, stake: u32, current_bet: u32) -> BetContext {
    BetContext {
        seat: 0,
        stack,
        stake,
        current_bet,
        min_raise: 20,
        big_blind: 20,
        can_raise: true,
    }
}

fn seated(stacks: &[u32]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let mut p = Player::new(format!("p{i}"), s);
            p.begin_hand();
            p
        })
        .collect()
}

#[test]
fn facing_a_bet_player_may_call_but_not_check() {
    let c = ctx(100, 0, 20);
    assert_eq!(validate_action(&c, A::Call).unwrap(), ValidatedAction::Call(20));
    assert_eq!(
        validate_action(&c, A::Check).unwrap_err(),
        GameError::IllegalAction {
            seat: 0,
            reason: ActionViolation::CheckFacingBet { to_call: 20 }
        }
    );
}

#[test]
fn short_stack_call_becomes_all_in() {
    assert_eq!(
        validate_action(&ctx(15, 0, 20), A::Call).unwrap(),
        ValidatedAction::AllIn(15)
    );
}

#[test]
fn bet_below_big_blind_is_rejected() {
    assert!(matches!(
        validate_action(&ctx(100, 0, 0), A::Bet(10)),
        Err(GameError::IllegalAction {
            reason: ActionViolation::BetBelowMinimum {
                amount: 10,
                minimum: 20
            },
            ..
        })
    ));
    assert!(validate_action(&ctx(100, 0, 0), A::Bet(0)).is_err());
}

#[test]
fn bet_into_a_wager_and_raise_without_one_are_rejected() {
    assert!(matches!(
        validate_action(&ctx(100, 0, 20), A::Bet(40)),
        Err(GameError::IllegalAction {
            reason: ActionViolation::BetIntoWager { current_bet: 20 },
            ..
        })
    ));
    assert!(matches!(
        validate_action(&ctx(100, 0, 0), A::Raise(40)),
        Err(GameError::IllegalAction {
            reason: ActionViolation::RaiseWithoutWager,
            ..
        })
    ));
}

#[test]
fn raise_must_reach_the_minimum_unless_all_in() {
    assert!(matches!(
        validate_action(&ctx(100, 0, 20), A::Raise(30)),
        Err(GameError::IllegalAction {
            reason: ActionViolation::RaiseBelowMinimum { to: 30, minimum: 40 },
            ..
        })
    ));
    assert_eq!(
        validate_action(&ctx(100, 0, 20), A::Raise(40)).unwrap(),
        ValidatedAction::Raise(40)
    );
    // whole stack is always allowed
    assert_eq!(
        validate_action(&ctx(30, 0, 20), A::Raise(30)).unwrap(),
        ValidatedAction::AllIn(30)
    );
}

#[test]
fn wagers_beyond_the_stack_are_insufficient_chips() {
    assert_eq!(
        validate_action(&ctx(50, 0, 0), A::Bet(60)).unwrap_err(),
        GameError::InsufficientChips {
            seat: 0,
            needed: 60,
            available: 50
        }
    );
    assert!(matches!(
        validate_action(&ctx(50, 10, 20), A::Raise(100)),
        Err(GameError::InsufficientChips { needed: 90, .. })
    ));
}

fn open_round(players: &[Player], street: Street, first: usize) -> BettingRound {
    BettingRound::new(street, players, first, 0, 20)
}

#[test]
fn full_all_in_raise_reopens_but_short_one_does_not() {
    // seat 1 raises all-in by less than a full raise
    let mut players = seated(&[500, 70, 500]);
    let mut pot = PotManager::new(3);
    let mut round = open_round(&players, Street::Flop, 0);

    round.apply(0, A::Bet(50), &mut players, &mut pot).unwrap();
    round.apply(1, A::AllIn, &mut players, &mut pot).unwrap();
    assert_eq!(round.current_bet(), 70);
    assert_eq!(round.min_raise(), 50);
    // seat 2 has not acted yet and may raise
    let legal = round.legal_actions(2, &players[2]);
    assert!(legal.raise.is_some());
    round.apply(2, A::Call, &mut players, &mut pot).unwrap();
    // seat 0 already acted; the short raise only lets it call or fold
    let legal = round.legal_actions(0, &players[0]);
    assert!(legal.raise.is_none());
    assert_eq!(legal.call, Some(20));
    assert!(matches!(
        round.apply(0, A::Raise(200), &mut players, &mut pot),
        Err(GameError::IllegalAction {
            reason: ActionViolation::RaiseNotReopened,
            ..
        })
    ));
    let (_, status) = round.apply(0, A::Call, &mut players, &mut pot).unwrap();
    assert_eq!(status, RoundStatus::StreetComplete);
    assert_eq!(pot.total(), 210);
}

#[test]
fn full_raise_lets_earlier_players_raise_again() {
    let mut players = seated(&[500, 500, 500]);
    let mut pot = PotManager::new(3);
    let mut round = open_round(&players, Street::Turn, 0);
    round.apply(0, A::Bet(20), &mut players, &mut pot).unwrap();
    round.apply(1, A::Raise(60), &mut players, &mut pot).unwrap();
    assert_eq!(round.to_act(), &[2, 0]);
    round.apply(2, A::Call, &mut players, &mut pot).unwrap();
    assert!(round.legal_actions(0, &players[0]).raise.is_some());
    assert_eq!(
        round.legal_actions(0, &players[0]).raise,
        Some((100, 500))
    );
}

#[test]
fn folded_and_all_in_players_cannot_act() {
    let mut players = seated(&[500, 30, 500]);
    let mut pot = PotManager::new(3);
    let mut round = open_round(&players, Street::River, 0);
    round.apply(0, A::Bet(40), &mut players, &mut pot).unwrap();
    round.apply(1, A::AllIn, &mut players, &mut pot).unwrap();
    assert_eq!(
        round
            .apply(1, A::Call, &mut players, &mut pot)
            .unwrap_err(),
        GameError::IllegalAction {
            seat: 1,
            reason: ActionViolation::NotActive(PlayerStatus::AllIn)
        }
    );
    round.apply(2, A::Fold, &mut players, &mut pot).unwrap();
    assert!(matches!(
        round.apply(2, A::Check, &mut players, &mut pot),
        Err(GameError::IllegalAction {
            reason: ActionViolation::NotActive(PlayerStatus::Folded),
            ..
        })
    ));
}
