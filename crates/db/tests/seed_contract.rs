use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;

type SeedContractTestResult<T = ()> = Result<T, String>;

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
    ($left:expr, $right:expr, $($arg:tt)*) => {
        if $left != $right {
            return Err(format!($($arg)*));
        }
    };
}

const CANONICAL_SCENARIOS: &[&str] =
    &["steady", "reorder_edge", "out_of_stock", "expired", "long_dated", "inactive"];

const KNOWN_STATUSES: &[&str] = &[
    "available",
    "low_stock",
    "expiring_soon",
    "insufficient_stock",
    "out_of_stock",
    "expired",
    "inactive",
];

const BLOCKING_STATUSES: &[&str] =
    &["inactive", "expired", "out_of_stock", "insufficient_stock"];

#[derive(Debug, Deserialize)]
struct SeedItemContract {
    product_id: String,
    scenario: String,
    quantity_on_hand: u32,
    min_stock: u32,
    max_stock: u32,
    expiry_date: Option<String>,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct CheckMatrixRow {
    product_id: String,
    requested_quantity: u32,
    evaluation_date: String,
    expected_status: String,
    expected_available: bool,
}

#[derive(Debug, Deserialize)]
struct SeedContract {
    dataset_version: String,
    seed_dataset: String,
    items: Vec<SeedItemContract>,
    check_matrix: Vec<CheckMatrixRow>,
}

fn load_contract() -> SeedContractTestResult<SeedContract> {
    serde_json::from_str(include_str!("../../../config/fixtures/stock_seed_contract.json"))
        .map_err(|_| "seed contract JSON must parse".to_string())
}

#[test]
fn seed_contract_matches_stock_seed_sql_fixture() -> SeedContractTestResult {
    let fixture_sql = include_str!("../../../config/fixtures/stock_seed_data.sql");
    let contract = load_contract()?;
    let mut product_ids_seen = HashSet::new();
    let mut scenarios_seen = HashSet::new();

    require_eq!(contract.dataset_version, "stock-seeds-v1");
    require_eq!(contract.seed_dataset, "deterministic_stock_check_scenarios");
    require_eq!(contract.items.len(), 6);

    require!(
        fixture_sql.contains("ON CONFLICT(product_id) DO UPDATE"),
        "seed SQL fixture should upsert so reloads stay idempotent"
    );

    for item in &contract.items {
        require!(
            product_ids_seen.insert(item.product_id.clone()),
            "duplicate product id: {}",
            item.product_id
        );
        require!(
            scenarios_seen.insert(item.scenario.clone()),
            "duplicate scenario: {}",
            item.scenario
        );
        require!(!item.product_id.is_empty());
        require!(!item.scenario.is_empty());
        require!(
            item.max_stock >= item.min_stock,
            "max_stock should not undercut min_stock for {}",
            item.product_id
        );

        require!(
            fixture_sql.contains(&format!("'{}'", item.product_id)),
            "seed SQL fixture should include product id {}",
            item.product_id
        );
        if let Some(expiry_date) = &item.expiry_date {
            require!(
                fixture_sql.contains(&format!("'{}'", expiry_date)),
                "seed SQL fixture should include expiry date {} for {}",
                expiry_date,
                item.product_id
            );
        }
    }

    for expected_scenario in CANONICAL_SCENARIOS {
        require!(
            scenarios_seen.contains(*expected_scenario),
            "missing canonical scenario: {expected_scenario}"
        );
    }
    Ok(())
}

#[test]
fn seed_scenarios_are_internally_consistent() -> SeedContractTestResult {
    let contract = load_contract()?;

    for item in &contract.items {
        match item.scenario.as_str() {
            "steady" => {
                require!(
                    item.quantity_on_hand >= item.min_stock,
                    "steady item {} should sit at or above its minimum",
                    item.product_id
                );
                require!(item.expiry_date.is_none());
                require!(item.is_active);
            }
            "reorder_edge" => {
                require!(
                    item.quantity_on_hand > 0 && item.quantity_on_hand < item.min_stock,
                    "reorder-edge item {} should hold stock below its minimum",
                    item.product_id
                );
                require!(item.is_active);
            }
            "out_of_stock" => {
                require_eq!(item.quantity_on_hand, 0);
                require!(item.is_active);
            }
            "expired" | "long_dated" => {
                require!(
                    item.expiry_date.is_some(),
                    "{} item {} should carry an expiry date",
                    item.scenario,
                    item.product_id
                );
                require!(item.is_active);
            }
            "inactive" => {
                require!(!item.is_active);
            }
            other => {
                return Err(format!("unknown scenario: {other}"));
            }
        }
    }

    let expired = contract
        .items
        .iter()
        .find(|item| item.scenario == "expired")
        .ok_or_else(|| "missing canonical expired item".to_string())?;
    let long_dated = contract
        .items
        .iter()
        .find(|item| item.scenario == "long_dated")
        .ok_or_else(|| "missing canonical long-dated item".to_string())?;
    let expired_date = parse_contract_date(expired.expiry_date.as_deref())?;
    let long_dated_date = parse_contract_date(long_dated.expiry_date.as_deref())?;
    require!(
        expired_date < long_dated_date,
        "the expired seed must predate the long-dated one"
    );
    Ok(())
}

#[test]
fn check_matrix_is_consistent_with_seed_items() -> SeedContractTestResult {
    let contract = load_contract()?;
    let seeded_ids: HashSet<&str> =
        contract.items.iter().map(|item| item.product_id.as_str()).collect();
    let mut rows_seen: HashSet<(String, u32, String)> = HashSet::new();
    let mut statuses_seen: HashSet<&str> = HashSet::new();
    let mut available_count = 0usize;
    let mut blocked_count = 0usize;

    require!(!contract.check_matrix.is_empty());

    for row in &contract.check_matrix {
        require!(
            rows_seen.insert((
                row.product_id.clone(),
                row.requested_quantity,
                row.evaluation_date.clone()
            )),
            "duplicate check-matrix row for {} at quantity {} on {}",
            row.product_id,
            row.requested_quantity,
            row.evaluation_date
        );
        require!(
            seeded_ids.contains(row.product_id.as_str()),
            "check matrix references unseeded product {}",
            row.product_id
        );
        require!(
            row.evaluation_date.parse::<NaiveDate>().is_ok(),
            "evaluation date {} should be a calendar date",
            row.evaluation_date
        );
        require!(
            KNOWN_STATUSES.contains(&row.expected_status.as_str()),
            "unknown expected status {} for {}",
            row.expected_status,
            row.product_id
        );

        let blocking = BLOCKING_STATUSES.contains(&row.expected_status.as_str());
        require_eq!(
            row.expected_available,
            !blocking,
            "availability must align with status severity for {}: status={} available={}",
            row.product_id,
            row.expected_status,
            row.expected_available
        );
        if row.expected_available {
            available_count += 1;
        } else {
            blocked_count += 1;
        }
        statuses_seen.insert(row.expected_status.as_str());
    }

    require!(
        available_count >= 1,
        "check matrix should include at least one available outcome"
    );
    require!(
        blocked_count >= 1,
        "check matrix should include at least one blocked outcome"
    );
    for status in KNOWN_STATUSES {
        require!(statuses_seen.contains(status), "check matrix never exercises status {status}");
    }
    Ok(())
}

fn parse_contract_date(value: Option<&str>) -> SeedContractTestResult<NaiveDate> {
    let raw = value.ok_or_else(|| "expected an expiry date".to_string())?;
    raw.parse::<NaiveDate>().map_err(|_| format!("invalid contract date: {raw}"))
}
