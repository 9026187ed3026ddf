//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::domain::entities::{Address, Donation, Fundraiser, FundraiserId, Visibility};

/// Deterministic address built from a single repeated byte
pub fn test_address(n: u8) -> Address {
    Address::parse(&format!("0x{}", format!("{:02x}", n).repeat(20))).unwrap()
}

/// Create a public fundraiser owned by `test_address(owner)`
pub fn test_fundraiser(id: &str, owner: u8, amount_raised: u128) -> Fundraiser {
    Fundraiser {
        id: FundraiserId::parse(id).unwrap(),
        name: format!("Fundraiser {}", id),
        description: "Test fundraiser".to_string(),
        goal: amount_raised * 2,
        amount_raised,
        owner: test_address(owner),
        visibility: Visibility::Public,
        category: Some("relief".to_string()),
        people_affected: Some(100),
    }
}

/// Create a donation from `test_address(donor)`
pub fn test_donation(tx_hash: &str, donor: u8, fundraiser_id: &str, amount: u128) -> Donation {
    Donation {
        tx_hash: tx_hash.to_string(),
        donor: test_address(donor),
        fundraiser_id: FundraiserId::parse(fundraiser_id).unwrap(),
        amount,
        block_number: 1,
    }
}

/// Build an expense report with the full header.
///
/// Each row is `(relief_work, admin_expenses, fundraising, salaries)`.
pub fn expense_csv(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut csv = String::from("name,total_received,relief_work,admin_expenses,fundraising,salaries\n");
    for (i, (relief, admin, fundraising, salaries)) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "row{},0,{},{},{},{}\n",
            i, relief, admin, fundraising, salaries
        ));
    }
    csv
}
