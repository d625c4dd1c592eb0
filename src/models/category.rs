use super::TransactionType;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Alimentação",
    "Compras",
    "Estética",
    "Farmácia/Saúde",
    "Future Me",
    "Investimento",
    "Lazer",
    "Outros",
    "Transporte",
];

pub const INCOME_CATEGORIES: &[&str] = &["Salário", "Comissão", "Outros"];

/// Categories offered by the entry surfaces for a transaction type.
/// The store itself accepts any string.
pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Expense => EXPENSE_CATEGORIES,
        TransactionType::Income => INCOME_CATEGORIES,
    }
}

/// Find a known category by name (case-insensitive), returning its canonical spelling.
pub fn find_category(kind: TransactionType, name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    categories_for(kind)
        .iter()
        .find(|c| c.to_lowercase() == lower)
        .copied()
}
