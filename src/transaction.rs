//! Transaction variants and their ledger line-item templates.
//!
//! Each variant is built once from a CSV row, validated during construction,
//! and immutable afterwards. Invalid transactions keep their failure set (and
//! whatever attributes were extracted before the failure) but never carry
//! line items.

use crate::amount::Amount;
use crate::row::{FieldError, Failures, Row, RowReader};
use chrono::{Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Width of the account-path column in rendered entries.
const ACCOUNT_WIDTH: usize = 40;

/// Construction switches shared by both variants. Both default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowOptions {
    /// Accept rows dated after today.
    pub allow_future: bool,

    /// For purchases: accept an empty purchasee list.
    /// For payments: accept an empty payer or payee.
    pub allow_empty: bool,
}

/// Fixed expense classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Rent,
    Utilities,
    Food,
    Home,
}

impl Category {
    /// Maps a single-letter spreadsheet code to a category.
    pub fn from_code(code: &str) -> Result<Self, FieldError> {
        match code {
            "R" => Ok(Category::Rent),
            "U" => Ok(Category::Utilities),
            "F" => Ok(Category::Food),
            "H" => Ok(Category::Home),
            other => Err(FieldError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Food => "Food",
            Category::Home => "Home",
        };
        write!(f, "{}", name)
    }
}

/// One posting within a ledger entry.
///
/// The amount side is text, not a number: purchasee shares are rendered as a
/// literal `($<amount> / <count>)` fraction for the downstream ledger tool
/// to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Account path, e.g. `Expenses:Food`.
    pub account: String,

    /// Signed currency text, e.g. `$-30.00`.
    pub amount: String,
}

impl LineItem {
    fn new(account: String, amount: String) -> Self {
        LineItem { account, amount }
    }
}

/// A shared expense paid by one party on behalf of several.
#[derive(Debug)]
pub struct Purchase {
    pub date: Option<NaiveDate>,
    pub purchaser: Option<String>,
    pub purchasees: Option<Vec<String>>,
    pub category: Option<Category>,
    pub amount: Option<Amount>,
    pub memo: Option<String>,

    /// Field failures recorded during extraction.
    pub failures: Failures,

    /// Whether the row survived extraction and the validity gate.
    pub valid: bool,

    /// Postings, empty unless `valid`.
    pub lineitems: Vec<LineItem>,
}

impl Purchase {
    /// Builds a purchase from a purchases-sheet row.
    ///
    /// Line items on validity: the expense account for the full amount, the
    /// purchaser's liability for the negated amount, and one virtual asset
    /// posting per purchasee carrying an equal-split fraction.
    pub fn from_row(row: &Row, options: RowOptions) -> Self {
        let mut reader = RowReader::new(row);
        let date = reader.field("date", "Date", parse_date);
        let purchaser = reader.text("purchaser", "Paid By");
        let purchasees = reader.field("purchasees", "Purchased For", |s| Ok(split_people(s)));
        let category = reader.field("category", "Category", Category::from_code);
        let amount = reader.field("amount", "Amount", parse_amount);
        let memo = reader.text("memo", "Description");
        let failures = reader.into_failures();

        let mut valid = false;
        let mut lineitems = Vec::new();

        if failures.is_empty() {
            if let (Some(date), Some(purchaser), Some(purchasees), Some(category), Some(amount)) =
                (&date, &purchaser, &purchasees, &category, &amount)
            {
                let parties_ok = options.allow_empty || !purchasees.is_empty();
                let date_ok = options.allow_future || *date <= today();

                if parties_ok && date_ok {
                    valid = true;
                    lineitems.push(LineItem::new(
                        format!("Expenses:{}", category),
                        format!("${}", amount),
                    ));
                    lineitems.push(LineItem::new(
                        format!("Liabilities:People:{}", purchaser),
                        format!("$-{}", amount),
                    ));
                    lineitems.extend(purchasees.iter().map(|purchasee| {
                        LineItem::new(
                            format!("(Assets:People:{})", purchasee),
                            format!("(${} / {})", amount, purchasees.len()),
                        )
                    }));
                }
            }
        }

        Purchase {
            date,
            purchaser,
            purchasees,
            category,
            amount,
            memo,
            failures,
            valid,
            lineitems,
        }
    }
}

/// A direct reimbursement from one party to another.
#[derive(Debug)]
pub struct Payment {
    pub date: Option<NaiveDate>,
    pub payer: Option<String>,
    pub payee: Option<String>,
    pub amount: Option<Amount>,
    pub memo: Option<String>,

    /// Field failures recorded during extraction.
    pub failures: Failures,

    /// Whether the row survived extraction and the validity gate.
    pub valid: bool,

    /// Postings, empty unless `valid`.
    pub lineitems: Vec<LineItem>,
}

impl Payment {
    /// Builds a payment from a payments-sheet row.
    ///
    /// The memo is sourced from the `To` column, mirroring the payee: the
    /// payments sheet has no description column, so the payee's name doubles
    /// as the entry description.
    pub fn from_row(row: &Row, options: RowOptions) -> Self {
        let mut reader = RowReader::new(row);
        let date = reader.field("date", "Date", parse_date);
        let payer = reader.text("payer", "From");
        let payee = reader.text("payee", "To");
        let amount = reader.field("amount", "Amount", parse_amount);
        let memo = reader.text("memo", "To");
        let failures = reader.into_failures();

        let mut valid = false;
        let mut lineitems = Vec::new();

        if failures.is_empty() {
            if let (Some(date), Some(payer), Some(payee), Some(amount)) =
                (&date, &payer, &payee, &amount)
            {
                let parties_ok = options.allow_empty || (!payer.is_empty() && !payee.is_empty());
                let date_ok = options.allow_future || *date <= today();

                if parties_ok && date_ok {
                    valid = true;
                    lineitems.push(LineItem::new(
                        format!("Liabilities:People:{}", payee),
                        format!("${}", amount),
                    ));
                    lineitems.push(LineItem::new(
                        format!("Income:People:{}", payer),
                        format!("${}", -*amount),
                    ));
                }
            }
        }

        Payment {
            date,
            payer,
            payee,
            amount,
            memo,
            failures,
            valid,
            lineitems,
        }
    }
}

/// A row translated into one of the two record kinds.
#[derive(Debug)]
pub enum Transaction {
    Purchase(Purchase),
    Payment(Payment),
}

impl Transaction {
    /// Returns `true` if the row survived extraction and validation.
    pub fn is_valid(&self) -> bool {
        match self {
            Transaction::Purchase(p) => p.valid,
            Transaction::Payment(p) => p.valid,
        }
    }

    /// Entry date, if extraction got that far.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Transaction::Purchase(p) => p.date,
            Transaction::Payment(p) => p.date,
        }
    }

    /// Entry description, if extraction got that far.
    pub fn memo(&self) -> Option<&str> {
        match self {
            Transaction::Purchase(p) => p.memo.as_deref(),
            Transaction::Payment(p) => p.memo.as_deref(),
        }
    }

    /// Postings, empty unless valid.
    pub fn lineitems(&self) -> &[LineItem] {
        match self {
            Transaction::Purchase(p) => &p.lineitems,
            Transaction::Payment(p) => &p.lineitems,
        }
    }

    /// Field failures recorded during extraction.
    pub fn failures(&self) -> &Failures {
        match self {
            Transaction::Purchase(p) => &p.failures,
            Transaction::Payment(p) => &p.failures,
        }
    }

    /// Renders the transaction as a ledger entry.
    ///
    /// The date and memo line is followed by one indented posting per line
    /// item, with the account path left-justified in a fixed 40-column field
    /// and the amount text appended directly. Returns `None` for invalid
    /// transactions. No balance-sum check is performed; the templates are
    /// balanced by construction.
    pub fn ledger(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        let date = self.date()?;
        let memo = self.memo()?;

        let mut entry = format!("{} {}", date.format("%Y-%m-%d"), memo);
        for item in self.lineitems() {
            entry.push('\n');
            entry.push_str(&format!(
                "    {:<width$}{}",
                item.account,
                item.amount,
                width = ACCOUNT_WIDTH
            ));
        }
        Some(entry)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(FieldError::from)
}

fn parse_amount(s: &str) -> Result<Amount, FieldError> {
    Amount::from_str(s).map_err(FieldError::from)
}

/// Splits a `Purchased For` cell into names. An empty cell yields an empty
/// list so the validity gate can reject it.
fn split_people(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(String::from).collect()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase_row() -> Row {
        Row::from([
            ("Date", "2024-01-15"),
            ("Paid By", "Alice"),
            ("Purchased For", "Bob,Carol"),
            ("Category", "F"),
            ("Amount", "$30.00"),
            ("Description", "Groceries"),
        ])
    }

    fn payment_row() -> Row {
        Row::from([
            ("Date", "2024-01-15"),
            ("From", "Dave"),
            ("To", "Erin"),
            ("Amount", "$50"),
        ])
    }

    #[test]
    fn test_valid_purchase_line_items() {
        let purchase = Purchase::from_row(&purchase_row(), RowOptions::default());

        assert!(purchase.valid);
        assert_eq!(
            purchase.lineitems,
            vec![
                LineItem {
                    account: "Expenses:Food".to_string(),
                    amount: "$30.00".to_string(),
                },
                LineItem {
                    account: "Liabilities:People:Alice".to_string(),
                    amount: "$-30.00".to_string(),
                },
                LineItem {
                    account: "(Assets:People:Bob)".to_string(),
                    amount: "($30.00 / 2)".to_string(),
                },
                LineItem {
                    account: "(Assets:People:Carol)".to_string(),
                    amount: "($30.00 / 2)".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_purchase_unknown_category_is_invalid() {
        let row = Row::from([
            ("Date", "2024-01-15"),
            ("Paid By", "Alice"),
            ("Purchased For", "Bob,Carol"),
            ("Category", "X"),
            ("Amount", "$30.00"),
            ("Description", "Groceries"),
        ]);

        let purchase = Purchase::from_row(&row, RowOptions::default());
        assert!(!purchase.valid);
        assert!(purchase.lineitems.is_empty());
        assert!(purchase.failures.contains("category"));
    }

    #[test]
    fn test_purchase_bad_date_is_invalid() {
        let row = Row::from([
            ("Date", "01/15/2024"),
            ("Paid By", "Alice"),
            ("Purchased For", "Bob"),
            ("Category", "F"),
            ("Amount", "$30.00"),
            ("Description", "Groceries"),
        ]);

        let purchase = Purchase::from_row(&row, RowOptions::default());
        assert!(!purchase.valid);
        assert!(purchase.lineitems.is_empty());
        assert!(purchase.failures.contains("date"));
    }

    #[test]
    fn test_purchase_bad_amount_is_invalid() {
        let row = Row::from([
            ("Date", "2024-01-15"),
            ("Paid By", "Alice"),
            ("Purchased For", "Bob"),
            ("Category", "F"),
            ("Amount", "thirty"),
            ("Description", "Groceries"),
        ]);

        let purchase = Purchase::from_row(&row, RowOptions::default());
        assert!(!purchase.valid);
        assert!(purchase.failures.contains("amount"));
    }

    #[test]
    fn test_purchase_future_date_is_invalid() {
        let row = Row::from([
            ("Date", "9999-12-31"),
            ("Paid By", "Alice"),
            ("Purchased For", "Bob"),
            ("Category", "F"),
            ("Amount", "$30.00"),
            ("Description", "Groceries"),
        ]);

        let purchase = Purchase::from_row(&row, RowOptions::default());
        assert!(!purchase.valid);
        // Gate failure, not a field failure.
        assert!(purchase.failures.is_empty());

        let allowed = Purchase::from_row(
            &row,
            RowOptions {
                allow_future: true,
                ..RowOptions::default()
            },
        );
        assert!(allowed.valid);
    }

    #[test]
    fn test_purchase_empty_purchasees_is_invalid() {
        let row = Row::from([
            ("Date", "2024-01-15"),
            ("Paid By", "Alice"),
            ("Purchased For", ""),
            ("Category", "F"),
            ("Amount", "$30.00"),
            ("Description", "Groceries"),
        ]);

        let purchase = Purchase::from_row(&row, RowOptions::default());
        assert!(!purchase.valid);

        let allowed = Purchase::from_row(
            &row,
            RowOptions {
                allow_empty: true,
                ..RowOptions::default()
            },
        );
        assert!(allowed.valid);
        // Only the expense and liability postings, no purchasee shares.
        assert_eq!(allowed.lineitems.len(), 2);
    }

    #[test]
    fn test_purchase_missing_column_is_invalid() {
        let row = Row::from([("Date", "2024-01-15")]);

        let purchase = Purchase::from_row(&row, RowOptions::default());
        assert!(!purchase.valid);
        assert!(purchase.failures.contains("purchaser"));
    }

    #[test]
    fn test_valid_payment_line_items() {
        let payment = Payment::from_row(&payment_row(), RowOptions::default());

        assert!(payment.valid);
        assert_eq!(
            payment.lineitems,
            vec![
                LineItem {
                    account: "Liabilities:People:Erin".to_string(),
                    amount: "$50".to_string(),
                },
                LineItem {
                    account: "Income:People:Dave".to_string(),
                    amount: "$-50".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_payment_memo_mirrors_payee() {
        let payment = Payment::from_row(&payment_row(), RowOptions::default());
        assert_eq!(payment.memo.as_deref(), Some("Erin"));
        assert_eq!(payment.memo, payment.payee);
    }

    #[test]
    fn test_payment_empty_party_is_invalid() {
        let row = Row::from([
            ("Date", "2024-01-15"),
            ("From", ""),
            ("To", "Erin"),
            ("Amount", "$50"),
        ]);

        let payment = Payment::from_row(&row, RowOptions::default());
        assert!(!payment.valid);
        assert!(payment.lineitems.is_empty());

        let allowed = Payment::from_row(
            &row,
            RowOptions {
                allow_empty: true,
                ..RowOptions::default()
            },
        );
        assert!(allowed.valid);
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(Category::from_code("R").unwrap(), Category::Rent);
        assert_eq!(Category::from_code("U").unwrap(), Category::Utilities);
        assert_eq!(Category::from_code("F").unwrap(), Category::Food);
        assert_eq!(Category::from_code("H").unwrap(), Category::Home);
        assert!(Category::from_code("X").is_err());
        assert!(Category::from_code("").is_err());
    }

    #[test]
    fn test_ledger_rendering() {
        let tx = Transaction::Purchase(Purchase::from_row(&purchase_row(), RowOptions::default()));
        let entry = tx.ledger().unwrap();

        let expected = "\
2024-01-15 Groceries
    Expenses:Food                           $30.00
    Liabilities:People:Alice                $-30.00
    (Assets:People:Bob)                     ($30.00 / 2)
    (Assets:People:Carol)                   ($30.00 / 2)";
        assert_eq!(entry, expected);
    }

    #[test]
    fn test_ledger_rendering_is_idempotent() {
        let tx = Transaction::Payment(Payment::from_row(&payment_row(), RowOptions::default()));
        assert_eq!(tx.ledger(), tx.ledger());
    }

    #[test]
    fn test_ledger_rendering_invalid_is_none() {
        let tx = Transaction::Payment(Payment::from_row(&Row::default(), RowOptions::default()));
        assert!(tx.ledger().is_none());
    }
}
