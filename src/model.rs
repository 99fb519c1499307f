use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One validated invoice record, as handed over by the REST layer.
/// Field names follow the wire shape (`invoiceNumber`, `dueDate`, ...);
/// all monetary fields are minor units (cents).
///
/// The engine performs no cross-field validation: callers are responsible
/// for `amount = quantity × rate` and `total = subtotal + tax`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_name: String,
    pub client_email: String,
    /// Newline-delimited; rendered line by line, never reflowed.
    pub client_address: String,
    /// Rendered in sequence order.
    pub items: Vec<LineItem>,
    pub subtotal: i64,
    #[serde(default)]
    pub tax: Option<i64>,
    pub total: i64,
    #[serde(default)]
    pub notes: Option<String>,
    /// Lowercase ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    pub user_info: UserInfo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    /// Minor units per unit of quantity.
    pub rate: i64,
    /// Minor units.
    pub amount: i64,
}

/// Issuer identity shown in the banner.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    pub email: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// Format a minor-unit amount: `format_currency(205, "usd")` → `"$2.05"`.
/// Exactly two decimals, no thousands separators.
pub fn format_currency(minor: i64, currency: &str) -> String {
    let symbol = match currency {
        "eur" => "€",
        "gbp" => "£",
        _ => "$",
    };
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{symbol}{}.{:02}", abs / 100, abs % 100)
}

/// Display form for calendar dates, e.g. "Aug 1, 2026".
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
