use chrono::{TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

use engine::{
    Engine, EngineError, LedgerStore, LedgerType, Money, NewPurchaseCmd, NewVendorTransactionCmd,
    Purchase, VendorTransaction,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn day(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn ledger_merges_and_balances_records() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Main",
            "rice 25kg",
            Money::new(10000),
            day(2024, 1, 2),
        ))
        .await
        .unwrap();
    engine
        .add_payment(NewVendorTransactionCmd::new(
            "v1",
            "Main",
            Money::new(4000),
            day(2024, 1, 3),
        ))
        .await
        .unwrap();

    let result = engine.vendor_ledger("v1", "Main").await.unwrap();

    assert_eq!(result.balance, Money::new(6000));
    assert_eq!(result.ledger.len(), 2);
    assert_eq!(result.ledger[0].ledger_type, LedgerType::Payment);
    assert_eq!(result.ledger[0].value, Money::new(4000));
    assert_eq!(result.ledger[1].ledger_type, LedgerType::Purchase);
    assert_eq!(result.ledger[1].value, Money::new(10000));
}

#[tokio::test]
async fn adjustment_roundtrip_keeps_sign_convention() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_adjustment(
            NewVendorTransactionCmd::new("v1", "Main", Money::new(2000), day(2024, 1, 1))
                .comment("overcharged last week"),
        )
        .await
        .unwrap();

    let result = engine.vendor_ledger("v1", "Main").await.unwrap();

    // Written as a negated magnitude, read back as an Adjustment that
    // increases the balance.
    assert_eq!(result.balance, Money::new(2000));
    assert_eq!(result.ledger.len(), 1);
    assert_eq!(result.ledger[0].ledger_type, LedgerType::Adjustment);
    assert_eq!(result.ledger[0].value, Money::new(2000));
}

#[tokio::test]
async fn ledger_is_scoped_to_vendor_and_branch() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Main",
            "rice",
            Money::new(1000),
            day(2024, 1, 1),
        ))
        .await
        .unwrap();
    engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Depot",
            "rice",
            Money::new(2000),
            day(2024, 1, 1),
        ))
        .await
        .unwrap();
    engine
        .add_purchase(NewPurchaseCmd::new(
            "v2",
            "Main",
            "oil",
            Money::new(4000),
            day(2024, 1, 1),
        ))
        .await
        .unwrap();
    engine
        .add_payment(NewVendorTransactionCmd::new(
            "v2",
            "Main",
            Money::new(500),
            day(2024, 1, 2),
        ))
        .await
        .unwrap();

    let main_v1 = engine.vendor_ledger("v1", "Main").await.unwrap();
    assert_eq!(main_v1.balance, Money::new(1000));
    assert_eq!(main_v1.ledger.len(), 1);

    let depot_v1 = engine.vendor_ledger("v1", "Depot").await.unwrap();
    assert_eq!(depot_v1.balance, Money::new(2000));

    let main_v2 = engine.vendor_ledger("v2", "Main").await.unwrap();
    assert_eq!(main_v2.balance, Money::new(3500));
    assert_eq!(main_v2.ledger.len(), 2);
}

#[tokio::test]
async fn empty_pair_yields_zero_balance() {
    let (engine, _db) = engine_with_db().await;

    let result = engine.vendor_ledger("nobody", "Nowhere").await.unwrap();
    assert_eq!(result.balance, Money::ZERO);
    assert!(result.ledger.is_empty());
}

#[tokio::test]
async fn corrupt_rows_degrade_instead_of_failing() {
    let (engine, db) = engine_with_db().await;

    engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Main",
            "rice",
            Money::new(5000),
            day(2024, 1, 2),
        ))
        .await
        .unwrap();

    // Seed a row the way a buggy writer could have left it: non-numeric
    // price, unparsable timestamp.
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO purchases (id, vendor_id, branch_name, item_name, price, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
        vec![
            "corrupt".into(),
            "v1".into(),
            "Main".into(),
            "mystery".into(),
            "abc".into(),
            "not-a-date".into(),
        ],
    ))
    .await
    .unwrap();

    let result = engine.vendor_ledger("v1", "Main").await.unwrap();

    assert_eq!(result.balance, Money::new(5000));
    assert_eq!(result.ledger.len(), 2);

    let corrupt = result
        .ledger
        .last()
        .expect("corrupt row sorts as oldest");
    assert_eq!(corrupt.value, Money::ZERO);
    assert_eq!(corrupt.date, chrono::DateTime::UNIX_EPOCH);
    assert_eq!(corrupt.ledger_type, LedgerType::Purchase);
}

#[tokio::test]
async fn deletes_remove_records_from_the_ledger() {
    let (engine, _db) = engine_with_db().await;

    let purchase_id = engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Main",
            "rice",
            Money::new(1000),
            day(2024, 1, 1),
        ))
        .await
        .unwrap();
    let payment_id = engine
        .add_payment(NewVendorTransactionCmd::new(
            "v1",
            "Main",
            Money::new(400),
            day(2024, 1, 2),
        ))
        .await
        .unwrap();

    engine.delete_purchase(&purchase_id).await.unwrap();
    engine.delete_vendor_transaction(&payment_id).await.unwrap();

    let result = engine.vendor_ledger("v1", "Main").await.unwrap();
    assert_eq!(result.balance, Money::ZERO);
    assert!(result.ledger.is_empty());

    assert_eq!(
        engine.delete_purchase(&purchase_id).await,
        Err(EngineError::KeyNotFound("purchase not exists".to_string()))
    );
}

#[tokio::test]
async fn writes_validate_their_input() {
    let (engine, _db) = engine_with_db().await;

    let no_item = engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Main",
            "   ",
            Money::new(1000),
            day(2024, 1, 1),
        ))
        .await;
    assert_eq!(
        no_item,
        Err(EngineError::InvalidRecord(
            "item_name must not be empty".to_string()
        ))
    );

    let free_goods = engine
        .add_purchase(NewPurchaseCmd::new(
            "v1",
            "Main",
            "rice",
            Money::ZERO,
            day(2024, 1, 1),
        ))
        .await;
    assert_eq!(
        free_goods,
        Err(EngineError::InvalidAmount("price must be > 0".to_string()))
    );

    let negative_payment = engine
        .add_payment(NewVendorTransactionCmd::new(
            "v1",
            "Main",
            Money::new(-100),
            day(2024, 1, 1),
        ))
        .await;
    assert_eq!(
        negative_payment,
        Err(EngineError::InvalidAmount("amount must be > 0".to_string()))
    );
}

struct FakeStore {
    purchases: Vec<Purchase>,
    transactions: Vec<VendorTransaction>,
    fail_transactions: bool,
}

impl LedgerStore for FakeStore {
    async fn purchases_for(&self, _vendor_id: &str, _branch_name: &str) -> engine::ResultEngine<Vec<Purchase>> {
        Ok(self.purchases.clone())
    }

    async fn vendor_transactions_for(
        &self,
        _vendor_id: &str,
        _branch_name: &str,
    ) -> engine::ResultEngine<Vec<VendorTransaction>> {
        if self.fail_transactions {
            return Err(EngineError::Database(DbErr::Custom(
                "connection reset".to_string(),
            )));
        }
        Ok(self.transactions.clone())
    }
}

#[tokio::test]
async fn any_failed_fetch_fails_the_whole_query() {
    let store = FakeStore {
        purchases: vec![Purchase {
            id: "p1".to_string(),
            vendor_id: "v1".to_string(),
            branch_name: "Main".to_string(),
            item_name: "rice".to_string(),
            price: Money::new(1000),
            photo_url: None,
            note: None,
            created_at: "2024-01-01".to_string(),
        }],
        transactions: vec![],
        fail_transactions: true,
    };

    let result = engine::vendor_ledger(&store, "v1", "Main").await;
    assert!(matches!(result, Err(EngineError::Database(_))));
}

#[tokio::test]
async fn ledger_store_is_substitutable() {
    let store = FakeStore {
        purchases: vec![Purchase {
            id: "p1".to_string(),
            vendor_id: "v1".to_string(),
            branch_name: "Main".to_string(),
            item_name: "rice".to_string(),
            price: Money::new(1000),
            photo_url: None,
            note: None,
            created_at: "2024-01-01".to_string(),
        }],
        transactions: vec![VendorTransaction {
            id: "t1".to_string(),
            vendor_id: "v1".to_string(),
            branch_name: "Main".to_string(),
            amount: Money::new(250),
            comment: None,
            created_at: "2024-01-02".to_string(),
        }],
        fail_transactions: false,
    };

    let result = engine::vendor_ledger(&store, "v1", "Main").await.unwrap();
    assert_eq!(result.balance, Money::new(750));
    assert_eq!(result.ledger.len(), 2);
}
