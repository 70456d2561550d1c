//! Report and export tests
//!
//! Covers the report page assembly, its ranges and the three CSV layouts.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::{
    export_csv, stock_list_columns, stock_report_columns, transaction_export_columns, ColumnSpec,
    Product, ProductRef, ReportRange, StockReport, Transaction, TransactionType,
    TransactionWithProduct,
};
use uuid::Uuid;

fn product(name: &str, sku: &str, current_stock: i32, minimum_stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sku: sku.to_string(),
        description: None,
        current_stock,
        minimum_stock,
        category_id: None,
        image_url: None,
        category: None,
    }
}

fn entry(
    transaction_type: TransactionType,
    quantity: i32,
    created_at: DateTime<Utc>,
) -> TransactionWithProduct {
    TransactionWithProduct {
        transaction: Transaction {
            id: Uuid::new_v4(),
            transaction_type,
            product_id: Uuid::new_v4(),
            quantity,
            unit_price: None,
            notes: None,
            created_at,
            created_by: None,
        },
        product: ProductRef {
            name: "Bolt".to_string(),
            sku: "B-1".to_string(),
        },
    }
}

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_range_starts() {
        assert_eq!(ReportRange::Last7Days.start(as_of()), as_of() - Duration::days(7));
        assert_eq!(ReportRange::Last30Days.start(as_of()), as_of() - Duration::days(30));
        assert_eq!(
            ReportRange::ThisMonth.start(as_of()),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_range_export_file_names() {
        assert_eq!(ReportRange::Last7Days.export_file_name(), "stock_report_7days.csv");
        assert_eq!(ReportRange::default().export_file_name(), "stock_report_30days.csv");
        assert_eq!(ReportRange::ThisMonth.export_file_name(), "stock_report_month.csv");
    }

    #[test]
    fn test_report_assembly() {
        let products = vec![
            product("Washer", "W-1", 80, 10),
            product("Bolt", "B-1", 2, 5),
            product("Nut", "N-1", 10, 10),
        ];
        let transactions = vec![
            entry(TransactionType::Purchase, 40, as_of() - Duration::days(9)),
            entry(TransactionType::Sale, 3, as_of() - Duration::days(2)),
            entry(TransactionType::TransferIn, 5, as_of() - Duration::days(2)),
            entry(TransactionType::Damage, 1, as_of() - Duration::days(1)),
        ];

        let report = StockReport::build(ReportRange::Last7Days, products, transactions, as_of());

        let names: Vec<_> = report.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bolt", "Nut", "Washer"]);

        let low: Vec<_> = report.low_stock_items.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(low, vec!["B-1", "N-1"]);

        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.daily_movements.len(), 2);
        assert_eq!(report.daily_movements[0].date, "Mar 18");
        assert_eq!(report.daily_movements[0].sales, 3);
        assert_eq!(report.daily_movements[0].purchases, 0);
        assert_eq!(report.daily_movements[1].damages, 1);
    }

    #[test]
    fn test_transfer_only_day_appears_with_zeros() {
        let transactions = vec![entry(TransactionType::TransferOut, 4, as_of())];
        let report = StockReport::build(ReportRange::Last7Days, vec![], transactions, as_of());

        assert_eq!(report.daily_movements.len(), 1);
        let day = &report.daily_movements[0];
        assert_eq!((day.sales, day.purchases, day.damages), (0, 0, 0));
    }

    #[test]
    fn test_stock_report_csv() {
        let products = vec![product("Bolt", "B-1", 2, 5), product("Nut", "N-1", 10, 3)];
        let csv = export_csv(&products, &stock_report_columns());
        assert_eq!(
            csv,
            "Name,SKU,Current Stock,Minimum Stock\nBolt,B-1,2,5\nNut,N-1,10,3"
        );
    }

    #[test]
    fn test_stock_list_csv_defaults() {
        let mut nut = product("Nut", "N-1", 10, 3);
        nut.description = Some("Hex nut".to_string());
        let products = vec![product("Bolt", "B-1", 5, 5), nut];

        let csv = export_csv(&products, &stock_list_columns());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Name,SKU,Description,Current Stock,Minimum Stock,Status"
        );
        assert_eq!(lines[1], "Bolt,B-1,N/A,5,5,Low Stock");
        assert_eq!(lines[2], "Nut,N-1,Hex nut,10,3,In Stock");
    }

    #[test]
    fn test_transaction_export_csv() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 5).unwrap();
        let rows = vec![entry(TransactionType::TransferIn, 6, at)];
        let csv = export_csv(&rows, &transaction_export_columns());
        assert_eq!(
            csv,
            "Date,Type,Product,SKU,Quantity\n2024-03-07 15:30:05,transfer_in,Bolt,B-1,6"
        );
    }

    #[test]
    fn test_export_of_no_rows_is_header_only() {
        let csv = export_csv::<Product>(&[], &stock_report_columns());
        assert_eq!(csv, "Name,SKU,Current Stock,Minimum Stock");
    }

    #[test]
    fn test_values_are_not_quoted() {
        let products = vec![product("Bolt, zinc", "B-1", 1, 0)];
        let csv = export_csv(&products, &stock_report_columns());
        assert!(csv.ends_with("Bolt, zinc,B-1,1,0"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec<(String, i32)>> {
        vec![
            ColumnSpec::new("Label", |r: &(String, i32)| r.0.clone()),
            ColumnSpec::new("Value", |r: &(String, i32)| r.1.to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// One header line plus one line per row, each with every column
        #[test]
        fn prop_export_shape(rows in prop::collection::vec(("[a-z]{1,8}", any::<i32>()), 0..20)) {
            let csv = export_csv(&rows, &columns());
            let lines: Vec<_> = csv.split('\n').collect();

            prop_assert_eq!(lines.len(), rows.len() + 1);
            prop_assert_eq!(lines[0], "Label,Value");
            for (line, row) in lines[1..].iter().zip(&rows) {
                prop_assert_eq!(line.to_string(), format!("{},{}", row.0, row.1));
            }
        }

        /// Report transactions never start before the range
        #[test]
        fn prop_report_respects_range(offsets in prop::collection::vec(0i64..(45 * 24), 0..30)) {
            let mut transactions: Vec<_> = offsets
                .iter()
                .map(|h| entry(TransactionType::Sale, 1, as_of() - Duration::hours(*h)))
                .collect();
            transactions.sort_by_key(|t| t.transaction.created_at);

            for range in [ReportRange::Last7Days, ReportRange::Last30Days, ReportRange::ThisMonth] {
                let report = StockReport::build(range, vec![], transactions.clone(), as_of());
                let start = range.start(as_of());
                prop_assert!(report.transactions.iter().all(|t| t.transaction.created_at >= start));
                prop_assert_eq!(report.total_transactions, report.transactions.len());
                let sales: i64 = report.daily_movements.iter().map(|d| d.sales).sum();
                prop_assert_eq!(sales, report.total_transactions as i64);
            }
        }
    }
}
