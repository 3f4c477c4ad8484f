//! Error types for vending operations.

use std::fmt;

use thiserror::Error;

use crate::Amount;
use crate::inventory::InventoryError;

/// Which operation was trying to make change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeContext {
    Collect,
    Refund,
}

impl fmt::Display for ChangeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeContext::Collect => f.write_str("Not Sufficient change in Inventory"),
            ChangeContext::Refund => {
                f.write_str("Not Sufficient change in Inventory, Please buy another product")
            }
        }
    }
}

/// Error returned by [`VendingMachine`](super::VendingMachine) operations.
///
/// Every variant leaves the transaction state as it was before the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Please provide a valid Item to buy")]
    InvalidArgument,

    #[error("Sold Out, Please buy another item")]
    SoldOut,

    #[error("Price not full paid, remaining : {remaining}")]
    NotFullPaid { remaining: Amount },

    #[error("{0}")]
    NotSufficientChange(ChangeContext),

    #[error("No item selected")]
    NoItemSelected,

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}
