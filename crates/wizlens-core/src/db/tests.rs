//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ymd, SnapshotBuilder, TRANSACTION_ENTITY, TRANSFER_ENTITY};

    // =========================================================================
    // Opening
    // =========================================================================

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Database::open(&dir.path().join("absent.sqlite")).err().unwrap();
        assert!(matches!(err, Error::Snapshot(_)));
    }

    #[test]
    fn test_open_rejects_foreign_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.sqlite");
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")
            .unwrap();

        let err = Database::open(&path).err().unwrap();
        assert!(
            err.to_string().contains("ZSYNCOBJECT"),
            "error should name the missing table: {}",
            err
        );
    }

    #[test]
    fn test_connections_are_read_only() {
        let snapshot = SnapshotBuilder::new().build();
        let db = snapshot.open();
        let conn = db.conn().unwrap();

        let result = conn.execute("INSERT INTO ZSYNCOBJECT (Z_ENT) VALUES (10)", []);
        assert!(result.is_err(), "snapshot must not be writable");
    }

    #[test]
    fn test_debug_shows_path() {
        let snapshot = SnapshotBuilder::new().build();
        let db = snapshot.open();

        let rendered = format!("{:?}", db);
        assert!(rendered.starts_with("Database"));
        assert!(rendered.contains(db.path()));

        let missing: Result<Database> = Database::open(&snapshot.dir().join("absent.sqlite"));
        assert!(matches!(missing.unwrap_err(), Error::Snapshot(_)));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = SnapshotBuilder::new().build();
        let db = snapshot.open();

        assert!(db.list_accounts().unwrap().is_empty());
        assert!(db.list_transactions(None, 50).unwrap().is_empty());
        assert!(db.list_categories().unwrap().is_empty());
        assert!(db.cash_flow(FlowDirection::Income, 0).unwrap().is_empty());
        assert!(db.cash_flow(FlowDirection::Spending, 6).unwrap().is_empty());
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    #[test]
    fn test_balance_is_opening_plus_linked_sum() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 250.0, "USD");
        builder.transaction(account, 1000.0, ymd(2024, 1, 1), "Salary");
        builder.transaction(account, -75.5, ymd(2024, 1, 3), "Groceries");
        builder.transaction(account, -24.5, ymd(2024, 1, 4), "Fuel");
        let snapshot = builder.build();
        let db = snapshot.open();

        let balance = db.get_account_balance(account).unwrap();
        assert_eq!(balance.balance, 1150.0, "stored ZBALLANCE must be ignored");
        assert_eq!(balance.name, "Checking");
        assert_eq!(balance.currency, "USD");
        assert_eq!(balance.account_type, "checking");
    }

    #[test]
    fn test_double_linked_transaction_counted_once() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Wallet", 100.0, "EUR");
        builder.transaction_row(
            TRANSFER_ENTITY,
            Some(account),
            Some(account),
            Some(-40.0),
            Some(ymd(2024, 2, 1)),
            Some("Self transfer"),
        );
        let snapshot = builder.build();
        let db = snapshot.open();

        assert_eq!(db.get_account_balance(account).unwrap().balance, 60.0);
    }

    #[test]
    fn test_transfer_counts_for_both_links() {
        let builder = SnapshotBuilder::new();
        let checking = builder.account("Checking", 500.0, "USD");
        let savings = builder.account("Savings", 0.0, "USD");
        builder.transfer(checking, savings, -200.0, ymd(2024, 3, 1));
        let snapshot = builder.build();
        let db = snapshot.open();

        assert_eq!(db.get_account_balance(checking).unwrap().balance, 300.0);
        assert_eq!(db.get_account_balance(savings).unwrap().balance, -200.0);
    }

    #[test]
    fn test_list_accounts_filters_and_sorts() {
        let builder = SnapshotBuilder::new();
        builder.account("Zeta Card", 0.0, "USD");
        builder.account_with(16, Some("Alpha Brokerage"), None, "USD", "investment");
        builder.account_with(12, None, Some(10.0), "USD", "cash");
        builder.account_with(14, Some("Not An Account"), Some(5.0), "USD", "checking");
        let snapshot = builder.build();
        let db = snapshot.open();

        let accounts = db.list_accounts().unwrap();
        let names: Vec<&str> = accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Brokerage", "Zeta Card"]);
        assert_eq!(accounts[0].balance, 0.0, "missing opening balance counts as 0");
    }

    #[test]
    fn test_unnamed_account_balance_still_resolves() {
        let builder = SnapshotBuilder::new();
        let id = builder.account_with(12, None, Some(10.0), "", "cash");
        let snapshot = builder.build();
        let db = snapshot.open();

        let account = db.get_account_balance(id).unwrap();
        assert_eq!(account.name, "");
        assert_eq!(account.balance, 10.0);
    }

    #[test]
    fn test_account_type_stored_as_integer() {
        let builder = SnapshotBuilder::new();
        let id = builder.account("Checking", 0.0, "USD");
        builder.execute(&format!(
            "UPDATE ZSYNCOBJECT SET ZTYPE = 3 WHERE Z_PK = {}",
            id
        ));
        let snapshot = builder.build();
        let db = snapshot.open();

        assert_eq!(db.get_account_balance(id).unwrap().account_type, "3");
    }

    #[test]
    fn test_account_not_found() {
        let builder = SnapshotBuilder::new();
        let category = builder.category("Food");
        let snapshot = builder.build();
        let db = snapshot.open();

        let err = db.get_account_balance(999).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // A record that exists but is not an account
        let err = db.get_account_balance(category).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    #[test]
    fn test_transactions_newest_first_with_limit() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        builder.transaction(account, -1.0, ymd(2024, 1, 1), "first");
        builder.transaction(account, -2.0, ymd(2024, 1, 3), "third");
        builder.transaction(account, -3.0, ymd(2024, 1, 2), "second");
        let snapshot = builder.build();
        let db = snapshot.open();

        let all = db.list_transactions(None, 50).unwrap();
        let order: Vec<&str> = all.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["third", "second", "first"]);
        assert_eq!(all[0].amount, -2.0);
        assert_eq!(all[0].account_id, Some(account));
        assert_eq!(all[0].date, Some(ymd(2024, 1, 3)));

        let limited = db.list_transactions(None, 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1].description, "second");
    }

    #[test]
    fn test_transactions_account_filter_matches_either_link() {
        let builder = SnapshotBuilder::new();
        let checking = builder.account("Checking", 0.0, "USD");
        let savings = builder.account("Savings", 0.0, "USD");
        builder.transaction(checking, -10.0, ymd(2024, 1, 1), "coffee");
        builder.transaction(savings, 5.0, ymd(2024, 1, 2), "interest");
        builder.transfer(checking, savings, -100.0, ymd(2024, 1, 3));
        let snapshot = builder.build();
        let db = snapshot.open();

        let savings_txs = db.list_transactions(Some(savings), 50).unwrap();
        let descriptions: Vec<&str> = savings_txs
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Transfer", "interest"]);

        assert_eq!(db.list_transactions(Some(checking), 50).unwrap().len(), 2);
        assert_eq!(db.list_transactions(Some(-1), 50).unwrap().len(), 3);
    }

    #[test]
    fn test_transactions_skip_missing_amount_and_other_entities() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        builder.transaction_row(
            TRANSACTION_ENTITY,
            None,
            Some(account),
            None,
            Some(ymd(2024, 1, 1)),
            Some("pending"),
        );
        builder.transaction_row(
            50,
            None,
            Some(account),
            Some(-9.0),
            Some(ymd(2024, 1, 1)),
            Some("budget row"),
        );
        builder.transaction_row(47, None, Some(account), Some(-3.0), None, None);
        let snapshot = builder.build();
        let db = snapshot.open();

        let txs = db.list_transactions(None, 50).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].date, None);
        assert_eq!(txs[0].description, "");
        assert_eq!(db.get_account_balance(account).unwrap().balance, -3.0);
    }

    // =========================================================================
    // Categories
    // =========================================================================

    #[test]
    fn test_categories_named_and_sorted() {
        let builder = SnapshotBuilder::new();
        builder.category("Transport");
        builder.category("Food");
        builder.execute("INSERT INTO ZSYNCOBJECT (Z_ENT, ZNAME2) VALUES (19, NULL)");
        builder.execute("INSERT INTO ZSYNCOBJECT (Z_ENT, ZNAME2) VALUES (37, 'Not a category')");
        let snapshot = builder.build();
        let db = snapshot.open();

        let categories = db.list_categories().unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport"]);
    }

    // =========================================================================
    // Cash flow
    // =========================================================================

    #[test]
    fn test_cash_flow_partitions_by_sign() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        let food = builder.category("Food");
        builder.categorized(account, food, -42.5, ymd(2024, 4, 9));
        builder.transaction(account, 1500.0, ymd(2024, 4, 1), "Salary");
        builder.transaction(account, 0.0, ymd(2024, 4, 2), "Zero");
        let snapshot = builder.build();
        let db = snapshot.open();

        let spending = db.cash_flow(FlowDirection::Spending, 0).unwrap();
        assert_eq!(spending.len(), 1);
        assert_eq!(spending[0].amount, 42.5, "spending is reported as magnitude");
        assert_eq!(spending[0].category_id, food);
        assert_eq!(spending[0].category_name, "Food");
        assert_eq!(spending[0].month, "2024-04");
        assert_eq!(spending[0].year, "2024");

        let income = db.cash_flow(FlowDirection::Income, 0).unwrap();
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].category_id, 0);
        assert_eq!(income[0].category_name, UNCATEGORIZED);
    }

    #[test]
    fn test_cash_flow_category_resolution() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        let food = builder.category("Food");
        let household = builder.category("Household");

        let split = builder.transaction(account, -60.0, ymd(2024, 5, 1), "Market");
        builder.assign(split, food);
        builder.assign(split, household);

        // Assignment pointing at a record that is not a category
        let odd = builder.transaction(account, -5.0, ymd(2024, 5, 2), "Odd");
        builder.assign(odd, account);

        let snapshot = builder.build();
        let db = snapshot.open();

        let spending = db.cash_flow(FlowDirection::Spending, 0).unwrap();
        assert_eq!(spending.len(), 3, "one entry per category assignment");

        let mut names: Vec<&str> = spending
            .iter()
            .map(|e| e.category_name.as_str())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Food", "Household", UNCATEGORIZED]);
    }

    #[test]
    fn test_integer_typed_description_and_category_name() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        let category = builder.category("Placeholder");
        let tx = builder.categorized(account, category, -15.0, ymd(2024, 5, 1));
        builder.execute(&format!(
            "UPDATE ZSYNCOBJECT SET ZNAME2 = 2024 WHERE Z_PK = {};
             UPDATE ZSYNCOBJECT SET ZDESC2 = 42 WHERE Z_PK = {};",
            category, tx
        ));
        let snapshot = builder.build();
        let db = snapshot.open();

        let transactions = db.list_transactions(None, 10).unwrap();
        assert_eq!(transactions[0].description, "42");

        let spending = db.cash_flow(FlowDirection::Spending, 0).unwrap();
        assert_eq!(spending[0].category_name, "2024");
    }

    #[test]
    fn test_cash_flow_newest_first_and_skips_undated() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        builder.transaction(account, -1.0, ymd(2023, 1, 1), "old");
        builder.transaction(account, -2.0, ymd(2024, 1, 1), "new");
        builder.transaction_row(
            TRANSACTION_ENTITY,
            None,
            Some(account),
            Some(-3.0),
            None,
            Some("undated"),
        );
        let snapshot = builder.build();
        let db = snapshot.open();

        let spending = db.cash_flow(FlowDirection::Spending, 0).unwrap();
        let amounts: Vec<f64> = spending.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 1.0]);
    }

    #[test]
    fn test_window_anchored_on_latest_transaction() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        // Latest transaction overall is income, and it anchors the window
        builder.transaction(account, 900.0, ymd(2024, 3, 31), "Salary");
        builder.transaction(account, -10.0, ymd(2024, 3, 2), "29 days back");
        builder.transaction(account, -20.0, ymd(2024, 2, 25), "35 days back");
        builder.transaction(account, -30.0, ymd(2024, 1, 31), "60 days back");
        builder.transaction(account, -40.0, ymd(2024, 1, 30), "61 days back");
        let snapshot = builder.build();
        let db = snapshot.open();

        let one_month = db.cash_flow(FlowDirection::Spending, 1).unwrap();
        let amounts: Vec<f64> = one_month.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![10.0]);

        let two_months = db.cash_flow(FlowDirection::Spending, 2).unwrap();
        let amounts: Vec<f64> = two_months.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![10.0, 20.0, 30.0]);

        let everything = db.cash_flow(FlowDirection::Spending, 0).unwrap();
        assert_eq!(everything.len(), 4);
    }

    #[test]
    fn test_ledger_trait_dispatch() {
        let builder = SnapshotBuilder::new();
        let account = builder.account("Checking", 0.0, "USD");
        builder.transaction(account, 10.0, ymd(2024, 1, 1), "in");
        builder.transaction(account, -4.0, ymd(2024, 1, 2), "out");
        let snapshot = builder.build();
        let db = snapshot.open();

        let ledger: &dyn Ledger = &db;
        assert_eq!(ledger.income_data(0).unwrap().len(), 1);
        assert_eq!(ledger.spending_data(0).unwrap()[0].amount, 4.0);
        assert_eq!(ledger.list_accounts().unwrap()[0].balance, 6.0);
    }
}
