// src/config/consts.rs

// Net config
pub const STATUS_URL: &str = "https://egov.uscis.gov/casestatus/mycasestatus.do";
pub const REFERER: &str = "https://egov.uscis.gov/casestatus/landing.do";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.14; rv:67.0) Gecko/20100101 Firefox/67.0";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Receipt numbers
pub const RECEIPT_PREFIX: &str = "YSC1990";

// Poll defaults
pub const DEFAULT_START_RANGE: u32 = 190_000;
pub const DEFAULT_NUM_ELTS: u32 = 1000;
pub const DEFAULT_WAIT_SECS: f64 = 0.1; // be polite

// Snapshots
pub const SNAPSHOT_HEADER: &str = "# AppReceiptNum, CaseStatus";
pub const SNAPSHOT_SEP: char = ',';
pub const SNAPSHOT_FILE_PATTERN: &str = "%Y-%b-%d-%H-%M-%S.csv";
pub const STATS_DATE_PATTERN: &str = "%Y-%b-%d";
pub const DEFAULT_OUT_DIR: &str = ".";

/// Receipt number for a numeric case id, e.g. `YSC1990190000`.
pub fn receipt_number(id: u32) -> String {
    format!("{RECEIPT_PREFIX}{id}")
}
