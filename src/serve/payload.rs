// src/serve/payload.rs
use serde::Serialize;

use super::bigquery::UnemploymentRow;

/// One month of figures for the requested county, in warehouse row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodDetail {
    pub month_abbrev: String,
    pub month: i64,
    pub date: String,
    pub year: i64,
    pub civ_labor_force: i64,
    pub employed: i64,
    pub unemployed: i64,
    pub unemployed_rate: f64,
}

/// Response body for the county lookup. The identity fields are omitted
/// entirely when the query matches nothing, leaving `{"data": []}`.
#[derive(Debug, Default, Serialize)]
pub struct CountyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub data: Vec<PeriodDetail>,
}

/// Fold warehouse rows into the response shape. Every row overwrites the
/// top-level identity fields, so after the loop they reflect the last row in
/// iteration order.
pub fn build_payload(rows: Vec<UnemploymentRow>) -> CountyPayload {
    let mut payload = CountyPayload::default();
    for row in rows {
        payload.area = Some(row.area);
        payload.county = Some(row.county);
        payload.state = Some(row.state);
        payload.data.push(PeriodDetail {
            month_abbrev: row.month_name,
            month: row.month,
            date: row.date,
            year: row.year,
            civ_labor_force: row.civ_labor_force,
            employed: row.employed,
            unemployed: row.unemployed,
            unemployed_rate: row.unemployed_rate,
        });
    }
    payload
}
