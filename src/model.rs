//! Core domain types for the vending machine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;

/// Coins accepted and dispensed by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coin {
    Quarter,
    Dime,
    Nickle,
    Penny,
}

impl Coin {
    /// Every coin, largest denomination first. Change-making walks this order.
    pub const ALL: [Coin; 4] = [Coin::Quarter, Coin::Dime, Coin::Nickle, Coin::Penny];

    pub const fn name(self) -> &'static str {
        match self {
            Coin::Quarter => "Quarter",
            Coin::Dime => "Dime",
            Coin::Nickle => "Nickle",
            Coin::Penny => "Penny",
        }
    }

    pub const fn denomination(self) -> Amount {
        match self {
            Coin::Quarter => Amount::new(25),
            Coin::Dime => Amount::new(10),
            Coin::Nickle => Amount::new(5),
            Coin::Penny => Amount::new(1),
        }
    }
}

/// Products sold by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Item {
    Coke,
    Pepsi,
    Soda,
}

impl Item {
    pub const ALL: [Item; 3] = [Item::Coke, Item::Pepsi, Item::Soda];

    pub const fn name(self) -> &'static str {
        match self {
            Item::Coke => "Coke",
            Item::Pepsi => "Pepsi",
            Item::Soda => "Soda",
        }
    }

    pub const fn price(self) -> Amount {
        match self {
            Item::Coke => Amount::new(25),
            Item::Pepsi => Amount::new(35),
            Item::Soda => Amount::new(45),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to resolve a catalog name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCatalogError {
    #[error("unknown coin '{0}'")]
    UnknownCoin(String),
    #[error("unknown item '{0}'")]
    UnknownItem(String),
}

impl FromStr for Coin {
    type Err = ParseCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarter" => Ok(Coin::Quarter),
            "dime" => Ok(Coin::Dime),
            "nickle" | "nickel" => Ok(Coin::Nickle),
            "penny" => Ok(Coin::Penny),
            _ => Err(ParseCatalogError::UnknownCoin(s.to_string())),
        }
    }
}

impl FromStr for Item {
    type Err = ParseCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coke" => Ok(Item::Coke),
            "pepsi" => Ok(Item::Pepsi),
            "soda" => Ok(Item::Soda),
            _ => Err(ParseCatalogError::UnknownItem(s.to_string())),
        }
    }
}

/// Immutable pair returned by a successful collection: the item and its change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<A, B> {
    first: A,
    second: B,
}

impl<A, B> Bucket<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

/// An input to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose an item. `None` models a missing selection and is rejected.
    Select { item: Option<Item> },
    /// Deposit one coin towards the current balance.
    Insert { coin: Coin },
    /// Take the selected item and any change owed.
    Collect,
    /// Return the current balance as coins.
    Refund,
    /// Empty both inventories and zero all counters.
    Reset,
    /// Report sales and inventory levels.
    Stats,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select { .. } => "select",
            Command::Insert { .. } => "insert",
            Command::Collect => "collect",
            Command::Refund => "refund",
            Command::Reset => "reset",
            Command::Stats => "stats",
        }
    }
}
