//! Greedy change-making against the cash inventory.

use crate::Amount;
use crate::inventory::Inventory;
use crate::model::Coin;

/// Pick coins summing to `amount`, largest denomination first.
///
/// Returns `None` when the greedy walk gets stuck with a positive remainder,
/// even if another combination of the stocked coins would have worked.
/// Picks are counted against a working copy of the stock, so a denomination
/// is never chosen more times than `cash` holds. `cash` itself is not touched.
pub fn make_change(amount: Amount, cash: &Inventory<Coin>) -> Option<Vec<Coin>> {
    let mut available = Coin::ALL.map(|coin| cash.quantity(coin));
    let mut remaining = amount;
    let mut change = Vec::new();

    while !remaining.is_zero() {
        let (idx, coin) = Coin::ALL
            .iter()
            .enumerate()
            .find(|(idx, coin)| coin.denomination() <= remaining && available[*idx] > 0)?;

        available[idx] -= 1;
        remaining = remaining.checked_sub(coin.denomination())?;
        change.push(*coin);
    }

    Some(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash(quarters: u32, dimes: u32, nickles: u32, pennies: u32) -> Inventory<Coin> {
        let mut inventory = Inventory::new();
        inventory.put(Coin::Quarter, quarters);
        inventory.put(Coin::Dime, dimes);
        inventory.put(Coin::Nickle, nickles);
        inventory.put(Coin::Penny, pennies);
        inventory
    }

    #[test]
    fn zero_needs_no_coins() {
        assert_eq!(make_change(Amount::ZERO, &cash(0, 0, 0, 0)), Some(vec![]));
    }

    #[test]
    fn single_coin_for_each_denomination() {
        let stock = cash(5, 5, 5, 5);
        for coin in Coin::ALL {
            assert_eq!(make_change(coin.denomination(), &stock), Some(vec![coin]));
        }
    }

    #[test]
    fn emits_largest_first() {
        assert_eq!(
            make_change(Amount::new(41), &cash(5, 5, 5, 5)),
            Some(vec![Coin::Quarter, Coin::Dime, Coin::Nickle, Coin::Penny])
        );
    }

    #[test]
    fn skips_denominations_out_of_stock() {
        assert_eq!(
            make_change(Amount::new(25), &cash(0, 5, 5, 0)),
            Some(vec![Coin::Dime, Coin::Dime, Coin::Nickle])
        );
    }

    #[test]
    fn fails_when_small_coins_missing() {
        assert_eq!(make_change(Amount::new(5), &cash(5, 5, 0, 0)), None);
    }

    #[test]
    fn greedy_misses_satisfiable_amount() {
        // three dimes would do, but the quarter is taken first
        assert_eq!(make_change(Amount::new(30), &cash(1, 3, 0, 0)), None);
    }

    #[test]
    fn never_picks_more_than_stocked() {
        assert_eq!(
            make_change(Amount::new(20), &cash(0, 1, 0, 10)),
            Some(
                std::iter::once(Coin::Dime)
                    .chain(std::iter::repeat_n(Coin::Penny, 10))
                    .collect()
            )
        );
        assert_eq!(make_change(Amount::new(3), &cash(0, 0, 0, 2)), None);
    }

    #[test]
    fn does_not_mutate_inventory() {
        let stock = cash(1, 1, 1, 1);
        let before = stock.clone();
        make_change(Amount::new(41), &stock);
        assert_eq!(stock, before);
    }
}
