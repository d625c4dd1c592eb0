use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    /// Accepts the stored English labels and the Portuguese ones used by
    /// older snapshots.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "gasto" => Some(Self::Expense),
            "income" | "receita" => Some(Self::Income),
            _ => None,
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Expense, Self::Income]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Gasto",
            Self::Income => "Receita",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Credit,
    Pix,
    Cash,
    Debit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Crédito",
            Self::Pix => "PIX",
            Self::Cash => "Dinheiro",
            Self::Debit => "Débito",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "crédito" | "credito" | "credit" => Some(Self::Credit),
            "pix" => Some(Self::Pix),
            "dinheiro" | "cash" => Some(Self::Cash),
            "débito" | "debito" | "debit" => Some(Self::Debit),
            _ => None,
        }
    }

    pub fn all() -> &'static [PaymentMethod] {
        &[Self::Credit, Self::Pix, Self::Cash, Self::Debit]
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage label for the recurring flag.
pub fn recurring_as_str(recurring: bool) -> &'static str {
    if recurring {
        "Yes"
    } else {
        "No"
    }
}

pub fn parse_recurring(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "sim" | "y" | "true" => Some(true),
        "no" | "não" | "nao" | "n" | "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub kind: TransactionType,
    /// Expense only.
    pub payment_method: Option<PaymentMethod>,
    /// Expense only.
    pub recurring: Option<bool>,
}

impl Transaction {
    pub fn expense(
        date: NaiveDate,
        amount: Decimal,
        category: String,
        description: String,
        payment_method: PaymentMethod,
        recurring: bool,
    ) -> Self {
        Self {
            id: None,
            date,
            amount,
            category,
            description,
            kind: TransactionType::Expense,
            payment_method: Some(payment_method),
            recurring: Some(recurring),
        }
    }

    pub fn income(date: NaiveDate, amount: Decimal, category: String, description: String) -> Self {
        Self {
            id: None,
            date,
            amount,
            category,
            description,
            kind: TransactionType::Income,
            payment_method: None,
            recurring: None,
        }
    }
}
