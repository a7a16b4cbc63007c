pub const PAYLOAD_PREFIX: &str = "DumbData-";

/// Column width of `data`, matching `VARCHAR(255)` in the table DDL.
pub const DATA_MAX_LEN: usize = 255;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Row {
    pub id: i64,
    pub data: String,
}

/// Payload written for the row at `index` within the current burst.
#[must_use]
pub fn payload_for(index: u32) -> String {
    format!("{PAYLOAD_PREFIX}{index}")
}
