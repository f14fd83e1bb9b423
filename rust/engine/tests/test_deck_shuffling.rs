use std::collections::HashSet;

use holdem_engine::cards::{full_deck, Card};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn every_shuffle_deals_the_52_canonical_cards_once() {
    let canonical: HashSet<Card> = full_deck().into_iter().collect();
    for seed in 0..20u64 {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let mut seen = HashSet::new();
        for i in 0..52 {
            let c = deck.draw().expect("should have 52 cards");
            assert!(seen.insert(c), "card {} duplicated at position {}", c, i);
        }
        assert_eq!(seen, canonical);
        assert!(deck.draw().is_err(), "after 52 cards, deck should be empty");
    }
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert_eq!(d1.draw_n(10).unwrap(), d2.draw_n(10).unwrap());
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    d1.shuffle();
    d2.shuffle();
    assert_ne!(d1.draw_n(52).unwrap(), d2.draw_n(52).unwrap());
}

#[test]
fn shuffle_resets_the_draw_pointer() {
    let mut deck = Deck::new_with_seed(5);
    deck.shuffle();
    deck.draw_n(30).unwrap();
    deck.shuffle();
    assert_eq!(deck.remaining(), 52);
}

#[test]
fn overdraw_fails_without_taking_cards() {
    let mut deck = Deck::new_with_seed(9);
    deck.shuffle();
    deck.draw_n(50).unwrap();
    let err = deck.draw_n(3).unwrap_err();
    assert_eq!(
        err,
        GameError::EmptyDeck {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(deck.remaining(), 2);
}

#[test]
fn burn_consumes_one_card() {
    let mut deck = Deck::new_with_seed(77);
    deck.shuffle();
    deck.burn().unwrap();
    assert_eq!(deck.remaining(), 51);
}

#[test]
fn first_card_is_spread_across_the_deck() {
    // a uniform shuffle puts many different cards on top
    let tops: HashSet<Card> = (0..400u64)
        .map(|seed| {
            let mut d = Deck::new_with_seed(seed);
            d.shuffle();
            d.draw().unwrap()
        })
        .collect();
    assert!(tops.len() > 45, "only {} distinct top cards", tops.len());
}

#[test]
fn reset_restores_an_ordered_full_deck() {
    let mut deck = Deck::new_with_seed(8);
    deck.shuffle();
    deck.draw_n(30).unwrap();
    deck.reset();
    assert_eq!(deck.remaining(), 52);
    assert_eq!(deck.draw_n(52).unwrap(), full_deck());
}
