//! # Invoice View
//!
//! Pure math backing the printable invoice. The presentation layer renders
//! this; nothing here is persisted.
//!
//! Shelf prices are tax-inclusive, so the invoice derives a net/tax
//! breakdown from the grand total for display:
//! `net = total / 1.14`, `tax = total - net` at the default 14% rate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::money::{Money, TaxRate};
use crate::types::Sale;

/// One printed invoice row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Everything the invoice template needs, computed from a recorded sale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub sale_id: String,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub lines: Vec<InvoiceLine>,
    pub total: Money,
    /// Grand total with tax backed out (display only).
    pub net: Money,
    /// The tax share of the grand total (display only).
    pub tax: Money,
    pub tax_rate: TaxRate,
}

impl InvoiceView {
    /// Builds the invoice view for a completed sale at the given inclusive
    /// tax rate.
    pub fn from_sale(sale: &Sale, tax_rate: TaxRate) -> Self {
        let total = sale.total_price();
        let breakdown = total.inclusive_tax_breakdown(tax_rate);

        InvoiceView {
            sale_id: sale.id.clone(),
            date: sale.date,
            customer_name: sale.customer_name.clone(),
            lines: sale
                .items
                .iter()
                .map(|item| InvoiceLine {
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: item.price(),
                    line_total: item.total(),
                })
                .collect(),
            total,
            net: breakdown.net,
            tax: breakdown.tax,
            tax_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItem;
    use crate::INCLUSIVE_TAX_RATE_BPS;

    fn sample_sale() -> Sale {
        Sale {
            id: "s1".to_string(),
            date: Utc::now(),
            total_price_cents: 2000,
            customer_name: "cash customer".to_string(),
            items: vec![SaleItem {
                id: "i1".to_string(),
                sale_id: "s1".to_string(),
                product_id: "p1".to_string(),
                product_name: "Milk".to_string(),
                quantity: 2,
                price_cents: 1000,
                total_cents: 2000,
            }],
        }
    }

    #[test]
    fn invoice_breakdown_at_default_rate() {
        let view = InvoiceView::from_sale(
            &sample_sale(),
            TaxRate::from_bps(INCLUSIVE_TAX_RATE_BPS),
        );
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.total.cents(), 2000);
        assert_eq!(view.net.cents(), 1754);
        assert_eq!(view.tax.cents(), 246);
        assert_eq!(view.lines[0].line_total.cents(), 2000);
    }
}
