use chrono::NaiveDate;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    std::env::var("CAMPAIGN_CONFIG_FIXTURES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

pub fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {:?}: {}", path, e))
}

/// A date after every campaign in the fixtures.
pub fn after_fixtures() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// A date before every campaign in the fixtures.
pub fn before_fixtures() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}
