use crate::Amount;
use crate::model::Item;

/// Per-transaction state plus the running sales counter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionState {
    pub current_item: Option<Item>,
    pub current_balance: Amount,
    pub total_sales: Amount,
}

impl TransactionState {
    pub fn is_idle(&self) -> bool {
        self.current_item.is_none() && self.current_balance.is_zero()
    }

    /// Balance covers the selected item's price.
    pub fn is_payable(&self) -> bool {
        self.current_item
            .is_some_and(|item| self.current_balance >= item.price())
    }

    /// Close the current transaction, keeping `total_sales`.
    pub fn conclude(&mut self) {
        self.current_item = None;
        self.current_balance = Amount::ZERO;
    }
}
