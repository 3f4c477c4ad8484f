pub mod amount;
pub mod csv;
pub mod inventory;
pub mod machine;
pub mod model;

pub use amount::Amount;
pub use inventory::{Inventory, InventoryError};
pub use machine::{MachineError, Outcome, Stats, VendingMachine};
pub use model::{Bucket, Coin, Command, Item};
