use std::{error::Error, time::Duration};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{
    Engine, LedgerSource, LedgerType, Money, NewPurchaseCmd, NewVendorTransactionCmd, VendorLedger,
};
use migration::MigratorTrait;
use sea_orm::Database;

/// Upper bound on one ledger query; the two store reads run concurrently
/// behind it.
const LEDGER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "khata_admin")]
#[command(about = "Admin utilities for Khata (record entries, inspect vendor ledgers)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./khata.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the merged ledger for one (vendor, branch) pair.
    Ledger(LedgerArgs),
    Purchase(Purchase),
    Payment(Payment),
    Adjustment(Adjustment),
    Transaction(Transaction),
}

#[derive(Args, Debug)]
struct LedgerArgs {
    #[arg(long)]
    vendor: String,
    #[arg(long)]
    branch: String,
    /// Emit the ledger as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct Purchase {
    #[command(subcommand)]
    command: PurchaseCommand,
}

#[derive(Subcommand, Debug)]
enum PurchaseCommand {
    Add(PurchaseAddArgs),
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct PurchaseAddArgs {
    #[arg(long)]
    vendor: String,
    #[arg(long)]
    branch: String,
    #[arg(long)]
    item: String,
    #[arg(long)]
    price: Money,
    #[arg(long)]
    photo_url: Option<String>,
    #[arg(long)]
    note: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD; defaults to now.
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct Payment {
    #[command(subcommand)]
    command: PaymentCommand,
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    Add(VendorTransactionAddArgs),
}

#[derive(Args, Debug)]
struct Adjustment {
    #[command(subcommand)]
    command: AdjustmentCommand,
}

#[derive(Subcommand, Debug)]
enum AdjustmentCommand {
    Add(VendorTransactionAddArgs),
}

#[derive(Args, Debug)]
struct VendorTransactionAddArgs {
    #[arg(long)]
    vendor: String,
    #[arg(long)]
    branch: String,
    /// Positive magnitude; adjustments are stored negated by the engine.
    #[arg(long)]
    amount: Money,
    #[arg(long)]
    comment: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD; defaults to now.
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct Transaction {
    #[command(subcommand)]
    command: TransactionCommand,
}

#[derive(Subcommand, Debug)]
enum TransactionCommand {
    /// Delete a payment or adjustment by id.
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct DeleteArgs {
    #[arg(long)]
    id: String,
}

fn parse_occurred_at(raw: Option<&str>) -> Result<DateTime<Utc>, Box<dyn Error + Send + Sync>> {
    let Some(raw) = raw else {
        return Ok(Utc::now());
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(midnight) = parsed.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(format!("invalid date: {raw} (expected RFC 3339 or YYYY-MM-DD)").into())
}

fn print_ledger(result: &VendorLedger) {
    println!("balance: {}", result.balance);
    for line in &result.ledger {
        let sign = match line.ledger_type {
            LedgerType::Purchase => '+',
            LedgerType::Payment | LedgerType::Adjustment => '-',
        };
        let label = match &line.source {
            LedgerSource::Purchase(purchase) => purchase.item_name.as_str(),
            LedgerSource::Transaction(tx) => tx.comment.as_deref().unwrap_or(""),
        };
        println!(
            "{}  {:<10}  {sign}{:>12}  {label}",
            line.date.format("%Y-%m-%d %H:%M"),
            line.ledger_type.as_str(),
            line.value.to_string(),
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "khata_admin=info,engine=info".to_string()),
        )
        .init();

    let db = Database::connect(&cli.database_url).await?;
    migration::Migrator::up(&db, None).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Ledger(args) => {
            let result = tokio::time::timeout(
                LEDGER_TIMEOUT,
                engine.vendor_ledger(&args.vendor, &args.branch),
            )
            .await??;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_ledger(&result);
            }
        }
        Command::Purchase(purchase) => match purchase.command {
            PurchaseCommand::Add(args) => {
                let occurred_at = parse_occurred_at(args.date.as_deref())?;
                let mut cmd = NewPurchaseCmd::new(
                    args.vendor,
                    args.branch,
                    args.item,
                    args.price,
                    occurred_at,
                );
                if let Some(url) = args.photo_url {
                    cmd = cmd.photo_url(url);
                }
                if let Some(note) = args.note {
                    cmd = cmd.note(note);
                }
                let id = engine.add_purchase(cmd).await?;
                tracing::info!("recorded purchase {id}");
            }
            PurchaseCommand::Delete(args) => {
                engine.delete_purchase(&args.id).await?;
                tracing::info!("deleted purchase {}", args.id);
            }
        },
        Command::Payment(payment) => match payment.command {
            PaymentCommand::Add(args) => {
                let occurred_at = parse_occurred_at(args.date.as_deref())?;
                let mut cmd = NewVendorTransactionCmd::new(
                    args.vendor,
                    args.branch,
                    args.amount,
                    occurred_at,
                );
                if let Some(comment) = args.comment {
                    cmd = cmd.comment(comment);
                }
                let id = engine.add_payment(cmd).await?;
                tracing::info!("recorded payment {id}");
            }
        },
        Command::Adjustment(adjustment) => match adjustment.command {
            AdjustmentCommand::Add(args) => {
                let occurred_at = parse_occurred_at(args.date.as_deref())?;
                let mut cmd = NewVendorTransactionCmd::new(
                    args.vendor,
                    args.branch,
                    args.amount,
                    occurred_at,
                );
                if let Some(comment) = args.comment {
                    cmd = cmd.comment(comment);
                }
                let id = engine.add_adjustment(cmd).await?;
                tracing::info!("recorded adjustment {id}");
            }
        },
        Command::Transaction(transaction) => match transaction.command {
            TransactionCommand::Delete(args) => {
                engine.delete_vendor_transaction(&args.id).await?;
                tracing::info!("deleted vendor transaction {}", args.id);
            }
        },
    }

    Ok(())
}
