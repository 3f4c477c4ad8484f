//! Vending machine transaction engine.
//!
//! The machine tracks one pending purchase at a time: the selected item and
//! the balance inserted so far. Collecting hands out the item plus change
//! computed from the coins in the cash inventory; refunding returns the
//! balance instead. Also supports an async stream of commands.

use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::inventory::Inventory;
use crate::model::{Bucket, Coin, Command, Item};

mod change;
pub use change::make_change;

mod state;
pub use state::TransactionState;

mod error;
pub use error::{ChangeContext, MachineError};

/// Units of every coin and every item loaded by [`VendingMachine::new`].
pub const INITIAL_STOCK: u32 = 5;

/// Result of a successfully applied [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Price of the newly selected item.
    Price(Amount),
    /// Balance after the coin was deposited.
    Inserted(Amount),
    /// Item and change handed to the customer.
    Vended(Bucket<Item, Vec<Coin>>),
    Refunded(Vec<Coin>),
    Reset,
    Stats(Stats),
}

/// Snapshot of sales and stock levels, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_sales: Amount,
    pub coins: Vec<(Coin, u32)>,
    pub items: Vec<(Item, u32)>,
}

/// A single vending machine.
///
/// Owns its cash and item inventories exclusively. Coins are deposited into
/// the cash inventory as soon as they are inserted, not held in escrow.
pub struct VendingMachine {
    cash: Inventory<Coin>,
    items: Inventory<Item>,
    state: TransactionState,
}

/// Public API
impl VendingMachine {
    pub fn new() -> Self {
        Self::with_initial_stock(INITIAL_STOCK)
    }

    /// Machine with `quantity` units of every coin and every item.
    pub fn with_initial_stock(quantity: u32) -> Self {
        let mut cash = Inventory::new();
        for coin in Coin::ALL {
            cash.put(coin, quantity);
        }
        let mut items = Inventory::new();
        for item in Item::ALL {
            items.put(item, quantity);
        }
        Self::from_inventories(cash, items)
    }

    /// Machine using the given inventories as they are.
    pub fn from_inventories(cash: Inventory<Coin>, items: Inventory<Item>) -> Self {
        Self {
            cash,
            items,
            state: TransactionState::default(),
        }
    }

    /// Run the machine with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a failed command leaves the machine usable, keep going
            let _ = self.apply(command);
        }
    }

    /// Apply a single command on top of the current machine state
    pub fn apply(&mut self, command: Command) -> Result<Outcome, MachineError> {
        let result = match &command {
            Command::Select { item } => match item {
                Some(item) => self.select_item_and_get_price(*item).map(Outcome::Price),
                None => Err(MachineError::InvalidArgument),
            },
            Command::Insert { coin } => {
                self.insert_coin(*coin);
                Ok(Outcome::Inserted(self.state.current_balance))
            }
            Command::Collect => self.collect_item_and_change().map(Outcome::Vended),
            Command::Refund => self.refund().map(Outcome::Refunded),
            Command::Reset => {
                self.reset();
                Ok(Outcome::Reset)
            }
            Command::Stats => {
                self.print_stats();
                Ok(Outcome::Stats(self.stats()))
            }
        };
        self.log_result(&command, &result);
        result
    }

    /// Select `item` and return its price.
    ///
    /// The balance is left alone, so re-selecting mid-transaction keeps what
    /// was already inserted.
    pub fn select_item_and_get_price(&mut self, item: Item) -> Result<Amount, MachineError> {
        if !self.items.has_item(item) {
            return Err(MachineError::SoldOut);
        }
        self.state.current_item = Some(item);
        Ok(item.price())
    }

    pub fn insert_coin(&mut self, coin: Coin) {
        self.state.current_balance += coin.denomination();
        self.cash.add(coin);
    }

    /// Hand out the selected item and its change:
    /// - Ensure the balance covers the price
    /// - Ensure change can be made from the current cash stock
    /// - Deduct the item, record the sale, deduct the change coins
    /// - Close the transaction
    ///
    /// Nothing is mutated when any check fails.
    pub fn collect_item_and_change(&mut self) -> Result<Bucket<Item, Vec<Coin>>, MachineError> {
        let item = self.state.current_item.ok_or(MachineError::NoItemSelected)?;
        let price = item.price();

        if !self.state.is_payable() {
            return Err(MachineError::NotFullPaid {
                remaining: price.checked_sub(self.state.current_balance).unwrap_or_default(),
            });
        }
        let change_amount = self.state.current_balance.checked_sub(price).unwrap_or_default();

        let change = make_change(change_amount, &self.cash)
            .ok_or(MachineError::NotSufficientChange(ChangeContext::Collect))?;

        self.items.deduct(item)?;
        self.state.total_sales += price;
        self.dispense(&change)?;
        self.state.conclude();

        Ok(Bucket::new(item, change))
    }

    /// Return the whole balance as coins and close the transaction.
    pub fn refund(&mut self) -> Result<Vec<Coin>, MachineError> {
        if self.state.is_idle() {
            return Ok(Vec::new());
        }

        let refund = make_change(self.state.current_balance, &self.cash)
            .ok_or(MachineError::NotSufficientChange(ChangeContext::Refund))?;

        self.dispense(&refund)?;
        self.state.conclude();

        Ok(refund)
    }

    /// Empty both inventories and zero sales and the current transaction.
    pub fn reset(&mut self) {
        self.cash.clear();
        self.items.clear();
        self.state = TransactionState::default();
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_sales: self.state.total_sales,
            coins: Coin::ALL
                .iter()
                .map(|coin| (*coin, self.cash.quantity(*coin)))
                .collect(),
            items: Item::ALL
                .iter()
                .map(|item| (*item, self.items.quantity(*item)))
                .collect(),
        }
    }

    /// Log sales and inventory levels.
    pub fn print_stats(&self) {
        let stats = self.stats();
        info!(
            total_sales = %stats.total_sales,
            items = ?stats.items,
            cash = ?stats.coins,
            "machine stats"
        );
    }

    pub fn cash_inventory(&self) -> &Inventory<Coin> {
        &self.cash
    }

    pub fn item_inventory(&self) -> &Inventory<Item> {
        &self.items
    }

    pub fn total_sales(&self) -> Amount {
        self.state.total_sales
    }

    pub fn current_item(&self) -> Option<Item> {
        self.state.current_item
    }

    pub fn current_balance(&self) -> Amount {
        self.state.current_balance
    }

    /// Setters below write the transaction state directly. They skip the
    /// inventories: setting a balance deposits no coins.
    pub fn set_total_sales(&mut self, total_sales: Amount) {
        self.state.total_sales = total_sales;
    }

    pub fn set_current_item(&mut self, item: Option<Item>) {
        self.state.current_item = item;
    }

    pub fn set_current_balance(&mut self, balance: Amount) {
        self.state.current_balance = balance;
    }
}

/// Private API
impl VendingMachine {
    /// Remove dispensed coins from the cash inventory.
    fn dispense(&mut self, coins: &[Coin]) -> Result<(), MachineError> {
        for coin in coins {
            self.cash.deduct(*coin)?;
        }
        Ok(())
    }

    /// Small helper to log `apply` results
    fn log_result<T>(&self, command: &Command, result: &Result<T, MachineError>) {
        let name = command.name();
        let (item, coin) = match command {
            Command::Select { item } => (*item, None),
            Command::Insert { coin } => (None, Some(*coin)),
            _ => (None, None),
        };
        match result {
            Ok(_) => {
                info!(
                    command = name,
                    item = ?item,
                    coin = ?coin,
                    balance = %self.state.current_balance,
                    "{name} applied"
                );
            }
            Err(e) => {
                info!(
                    command = name,
                    item = ?item,
                    coin = ?coin,
                    balance = %self.state.current_balance,
                    reason = %e,
                    "{name} skipped"
                );
            }
        }
    }
}

impl Default for VendingMachine {
    fn default() -> Self {
        Self::new()
    }
}
