use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::input::{parse_amount, parse_date};
use crate::models::{categories_for, PaymentMethod, Transaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Kind,
    Date,
    Amount,
    Category,
    Description,
    Payment,
    Recurring,
    Save,
}

impl FormField {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Kind => "Tipo",
            Self::Date => "Data",
            Self::Amount => "Valor (R$)",
            Self::Category => "Categoria",
            Self::Description => "Descrição",
            Self::Payment => "Forma de Pagamento",
            Self::Recurring => "Recorrente?",
            Self::Save => "[ Salvar ]",
        }
    }

    /// Free-text fields are edited through a buffer; the rest are cycled.
    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Date | Self::Amount | Self::Description)
    }
}

const EXPENSE_FIELDS: &[FormField] = &[
    FormField::Kind,
    FormField::Date,
    FormField::Amount,
    FormField::Category,
    FormField::Description,
    FormField::Payment,
    FormField::Recurring,
    FormField::Save,
];

const INCOME_FIELDS: &[FormField] = &[
    FormField::Kind,
    FormField::Date,
    FormField::Amount,
    FormField::Category,
    FormField::Description,
    FormField::Save,
];

/// State of the Add Transaction form.
#[derive(Debug, Clone)]
pub(crate) struct EntryForm {
    pub(crate) kind: TransactionType,
    pub(crate) date: NaiveDate,
    pub(crate) amount: Option<Decimal>,
    pub(crate) category_index: usize,
    pub(crate) description: String,
    pub(crate) payment_index: usize,
    pub(crate) recurring: bool,
    pub(crate) field_index: usize,
}

impl EntryForm {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            kind: TransactionType::Expense,
            date: today,
            amount: None,
            category_index: 0,
            description: String::new(),
            payment_index: 0,
            recurring: false,
            field_index: 0,
        }
    }

    pub(crate) fn fields(&self) -> &'static [FormField] {
        match self.kind {
            TransactionType::Expense => EXPENSE_FIELDS,
            TransactionType::Income => INCOME_FIELDS,
        }
    }

    pub(crate) fn field(&self) -> FormField {
        let fields = self.fields();
        fields[self.field_index.min(fields.len() - 1)]
    }

    pub(crate) fn next_field(&mut self) {
        if self.field_index + 1 < self.fields().len() {
            self.field_index += 1;
        }
    }

    pub(crate) fn prev_field(&mut self) {
        self.field_index = self.field_index.saturating_sub(1);
    }

    pub(crate) fn category(&self) -> &'static str {
        let cats = categories_for(self.kind);
        cats[self.category_index % cats.len()]
    }

    pub(crate) fn payment(&self) -> PaymentMethod {
        let all = PaymentMethod::all();
        all[self.payment_index % all.len()]
    }

    /// Steps a choice field forwards or backwards. No-op on text fields.
    pub(crate) fn cycle(&mut self, delta: i32) {
        match self.field() {
            FormField::Kind => {
                let kinds = TransactionType::all();
                let current = kinds.iter().position(|k| *k == self.kind).unwrap_or(0);
                self.kind = kinds[step(current, delta, kinds.len())];
                self.category_index = 0;
            }
            FormField::Category => {
                self.category_index =
                    step(self.category_index, delta, categories_for(self.kind).len());
            }
            FormField::Payment => {
                self.payment_index = step(self.payment_index, delta, PaymentMethod::all().len());
            }
            FormField::Recurring => self.recurring = !self.recurring,
            _ => {}
        }
    }

    /// Current text of a free-text field, as shown for editing.
    pub(crate) fn text_of(&self, field: FormField) -> String {
        match field {
            FormField::Date => self.date.format("%d.%m.%Y").to_string(),
            FormField::Amount => self.amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
            FormField::Description => self.description.clone(),
            _ => String::new(),
        }
    }

    /// Applies an edit buffer to a free-text field, validating dates and amounts.
    pub(crate) fn set_text(&mut self, field: FormField, value: &str) -> Result<()> {
        match field {
            FormField::Date => self.date = parse_date(value)?,
            FormField::Amount => self.amount = Some(parse_amount(value)?),
            FormField::Description => self.description = value.trim().to_string(),
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn to_transaction(&self) -> Result<Transaction> {
        let amount = self
            .amount
            .ok_or_else(|| anyhow::anyhow!("Enter an amount before saving"))?;
        Ok(match self.kind {
            TransactionType::Expense => Transaction::expense(
                self.date,
                amount,
                self.category().to_string(),
                self.description.clone(),
                self.payment(),
                self.recurring,
            ),
            TransactionType::Income => Transaction::income(
                self.date,
                amount,
                self.category().to_string(),
                self.description.clone(),
            ),
        })
    }

    /// Clears the per-entry values after a save; type, date and choices stay.
    pub(crate) fn reset_after_save(&mut self) {
        self.amount = None;
        self.description.clear();
        self.field_index = 0;
    }
}

fn step(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (index as i64 + delta as i64).rem_euclid(len) as usize
}
