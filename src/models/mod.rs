mod category;
mod transaction;

pub use category::{categories_for, find_category};
pub use transaction::{
    parse_recurring, recurring_as_str, PaymentMethod, Transaction, TransactionType,
};
