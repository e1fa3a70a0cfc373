//! Integration test driving the cart through seeded random edit sequences.
//!
//! After every step the cart's subtotal must equal an independent recomputation
//! from a shadow model, no line may have a zero quantity, and the grand total
//! must equal `round(subtotal + tax)`.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use testresult::TestResult;
use uuid::Uuid;

use tally::{
    cart::Cart,
    items::MenuItem,
    money::{Rate, round_money},
    totals::PricingPolicy,
};

fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Classic Milk Tea", "Milk Tea", Decimal::new(525, 2))
            .with_key(Uuid::now_v7()),
        MenuItem::new("Taro Milk Tea", "Milk Tea", Decimal::new(575, 2)).with_key(Uuid::now_v7()),
        MenuItem::new("Mango Green Tea", "Fruit Tea", Decimal::new(550, 2))
            .with_key(Uuid::now_v7()),
        MenuItem::new("Brown Sugar Latte", "Latte", Decimal::new(649, 2)).with_key(Uuid::now_v7()),
        MenuItem::new("Lychee Slush", "Slush", Decimal::new(599, 2)),
    ]
}

fn recompute(cart: &Cart) -> Decimal {
    cart.lines()
        .iter()
        .map(|line| line.item().unit_price() * Decimal::from(line.quantity()))
        .sum()
}

fn run_sequence(seed: u64, policy: PricingPolicy) -> TestResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let menu = menu();
    let mut cart = Cart::with_policy(policy);

    for _ in 0..200 {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let pick = rng.gen_range(0..menu.len());
                let item = menu.get(pick).ok_or("menu index out of range")?.clone();

                cart.add(item);
            }
            2 if !cart.is_empty() => {
                let index = rng.gen_range(0..cart.len());
                let quantity = rng.gen_range(-2..6_i64);

                cart.set_quantity(index, quantity)?;
            }
            3 if !cart.is_empty() => {
                let index = rng.gen_range(0..cart.len());

                cart.remove(index)?;
            }
            _ => {}
        }

        assert_eq!(cart.subtotal(), recompute(&cart), "seed {seed}");
        assert!(
            cart.lines().iter().all(|line| line.quantity() >= 1),
            "seed {seed}: zero-quantity line survived"
        );

        let totals = cart.totals();

        assert_eq!(totals.total, round_money(totals.subtotal + totals.tax), "seed {seed}");
    }

    Ok(())
}

#[test]
fn random_sequences_keep_subtotal_consistent() -> TestResult {
    for seed in 0..32 {
        run_sequence(seed, PricingPolicy::default())?;
    }

    Ok(())
}

#[test]
fn random_sequences_with_tip_keep_totals_consistent() -> TestResult {
    let policy = PricingPolicy::new(Rate::from_percent(9)?, Rate::from_percent(15)?);

    for seed in 100..116 {
        run_sequence(seed, policy)?;
    }

    Ok(())
}

#[test]
fn two_jasmine_one_taro_at_eight_percent() -> TestResult {
    let jasmine = MenuItem::new("Jasmine Green Tea", "Fruit Tea", Decimal::new(550, 2))
        .with_key(Uuid::now_v7());
    let taro = MenuItem::new("Taro Milk Tea", "Milk Tea", Decimal::new(600, 2))
        .with_key(Uuid::now_v7());

    let mut cart = Cart::with_policy(PricingPolicy::new(Rate::from_percent(8)?, Rate::ZERO));

    cart.add(jasmine.clone());
    cart.add(taro);
    cart.add(jasmine);

    let totals = cart.totals();

    assert_eq!(cart.len(), 2);
    assert_eq!(totals.subtotal, Decimal::new(1_700, 2));
    assert_eq!(totals.tax, Decimal::new(136, 2));
    assert_eq!(totals.total, Decimal::new(1_836, 2));

    Ok(())
}
