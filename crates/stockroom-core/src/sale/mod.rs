//! Sales ledger and dashboard statistics.

pub mod model;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use tracing::info;

use crate::error::{StockError, StockResult};
use crate::product::model::Product;
use crate::store::InventoryStore;
use model::{DailyAmount, NewSale, PopulatedSale, Sale, SalesStats, TodaySales};

/// Days covered by the dashboard revenue chart.
const CHART_DAYS: i64 = 7;

/// Record a sale for `owner`, pricing each line from the catalog and
/// deducting the sold quantities from stock.
pub async fn record_sale(
    store: &dyn InventoryStore,
    owner: &str,
    request: &NewSale,
) -> StockResult<Sale> {
    if request.items.is_empty() {
        return Err(StockError::validation("a sale needs at least one item"));
    }
    if let Some(line) = request.items.iter().find(|line| line.quantity == 0) {
        return Err(StockError::validation(format!(
            "quantity for product {} must be positive",
            line.product
        )));
    }

    let sale = store.commit_sale(owner, request).await?;
    info!(sale_id = %sale.id, owner = %owner, total = sale.total_amount, "Sale recorded");
    Ok(sale)
}

/// Attach the current catalog entry to every line of `sales`.
async fn populate(
    store: &dyn InventoryStore,
    owner: &str,
    sales: Vec<Sale>,
) -> StockResult<Vec<PopulatedSale>> {
    let catalog: HashMap<String, Product> = store
        .list_products(owner)
        .await?
        .into_iter()
        .map(|product| (product.id.clone(), product))
        .collect();
    Ok(sales.into_iter().map(|sale| sale.populate(&catalog)).collect())
}

/// All of `owner`'s sales, newest first, with product details.
pub async fn list_sales(store: &dyn InventoryStore, owner: &str) -> StockResult<Vec<PopulatedSale>> {
    let sales = store.list_sales(owner).await?;
    populate(store, owner, sales).await
}

/// Revenue aggregates relative to `now` (UTC calendar).
pub async fn sales_stats(
    store: &dyn InventoryStore,
    owner: &str,
    now: DateTime<Utc>,
) -> StockResult<SalesStats> {
    let sales = store.list_sales(owner).await?;
    Ok(compute_stats(&sales, now))
}

/// Sales recorded on the UTC calendar day of `now`.
pub async fn today_sales(
    store: &dyn InventoryStore,
    owner: &str,
    now: DateTime<Utc>,
) -> StockResult<TodaySales> {
    let today = now.date_naive();
    let sales: Vec<Sale> = store
        .list_sales(owner)
        .await?
        .into_iter()
        .filter(|s| s.date.date_naive() == today)
        .collect();
    let total = sales.iter().map(|s| s.total_amount).sum();
    let sales = populate(store, owner, sales).await?;
    Ok(TodaySales { sales, total })
}

/// Number of distinct customer phone numbers across `owner`'s sales.
pub async fn unique_customers(store: &dyn InventoryStore, owner: &str) -> StockResult<usize> {
    let sales = store.list_sales(owner).await?;
    let phones: HashSet<&str> = sales
        .iter()
        .map(|s| s.customer_phone.as_str())
        .filter(|p| !p.is_empty())
        .collect();
    Ok(phones.len())
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::default()).and_utc()
}

fn compute_stats(sales: &[Sale], now: DateTime<Utc>) -> SalesStats {
    let today = now.date_naive();
    let sum_where = |pred: &dyn Fn(NaiveDate) -> bool| -> f64 {
        sales
            .iter()
            .filter(|s| pred(s.date.date_naive()))
            .map(|s| s.total_amount)
            .sum()
    };

    let sales_data = (0..CHART_DAYS)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            DailyAmount {
                date: day_start(day),
                amount: sum_where(&|d| d == day),
            }
        })
        .collect();

    SalesStats {
        daily: sum_where(&|d| d == today),
        monthly: sum_where(&|d| d.year() == today.year() && d.month() == today.month()),
        yearly: sum_where(&|d| d.year() == today.year()),
        total_sales: sales.iter().map(|s| s.total_amount).sum(),
        sales_data,
    }
}
