// src/serve/bigquery.rs
use anyhow::{Context, Result};
use google_cloud_bigquery::client::{Client, ClientConfig};
use google_cloud_bigquery::http::job::query::QueryRequest;
use google_cloud_bigquery::http::types::{QueryParameter, QueryParameterType, QueryParameterValue};
use google_cloud_bigquery::query::row::Row;
use once_cell::sync::Lazy;
use std::env;
use tokio::sync::OnceCell;
use tracing::info;

/// `dataset.table` holding the normalized unemployment rows, the same shape
/// the Normalizer writes.
static TABLE: Lazy<String> = Lazy::new(|| {
    let dataset = env::var("BLS_BQ_DATASET").unwrap_or_else(|_| "bls".to_string());
    let table = env::var("BLS_BQ_TABLE").unwrap_or_else(|_| "unemployment".to_string());
    format!("{}.{}", dataset, table)
});

/// The client authenticates once and is reused for the process lifetime.
static WAREHOUSE: OnceCell<Warehouse> = OnceCell::const_new();

/// One warehouse row, fields in SELECT order.
#[derive(Debug, Clone)]
pub struct UnemploymentRow {
    pub area: String,
    pub county: String,
    pub state: String,
    pub month_name: String,
    pub month: i64,
    pub year: i64,
    pub date: String,
    pub civ_labor_force: i64,
    pub employed: i64,
    pub unemployed: i64,
    pub unemployed_rate: f64,
}

struct Warehouse {
    client: Client,
    project_id: String,
}

impl Warehouse {
    async fn connect() -> Result<Self> {
        let (config, project_opt) = ClientConfig::new_with_auth()
            .await
            .context("authenticating BigQuery client")?;
        let project_id = env::var("GOOGLE_CLOUD_PROJECT")
            .ok()
            .or(project_opt)
            .ok_or_else(|| {
                anyhow::anyhow!("no project id from credentials; set GOOGLE_CLOUD_PROJECT")
            })?;
        let client = Client::new(config).await?;
        info!(project = %project_id, table = %TABLE.as_str(), "BigQuery client ready");
        Ok(Self { client, project_id })
    }

    async fn county_rows(&self, county: &str, state: &str) -> Result<Vec<UnemploymentRow>> {
        let query = format!(
            "SELECT area, county, state, month_name, month, year, CAST(date AS STRING), \
             civ_labor_force, employed, unemployed, unemployed_rate \
             FROM `{}` WHERE county = @county AND state = @state",
            TABLE.as_str()
        );
        let request = QueryRequest {
            query,
            use_legacy_sql: false,
            parameter_mode: Some("NAMED".to_string()),
            query_parameters: vec![
                string_param("county", county),
                string_param("state", state),
            ],
            ..Default::default()
        };

        let mut rows = self
            .client
            .query::<Row>(&self.project_id, request)
            .await
            .context("running county lookup query")?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(UnemploymentRow {
                area: row.column::<String>(0)?,
                county: row.column::<String>(1)?,
                state: row.column::<String>(2)?,
                month_name: row.column::<String>(3)?,
                month: row.column::<i64>(4)?,
                year: row.column::<i64>(5)?,
                date: row.column::<String>(6)?,
                civ_labor_force: row.column::<i64>(7)?,
                employed: row.column::<i64>(8)?,
                unemployed: row.column::<i64>(9)?,
                unemployed_rate: row.column::<f64>(10)?,
            });
        }
        Ok(out)
    }
}

fn string_param(name: &str, value: &str) -> QueryParameter {
    QueryParameter {
        name: Some(name.to_string()),
        parameter_type: QueryParameterType {
            parameter_type: "STRING".to_string(),
            ..Default::default()
        },
        parameter_value: QueryParameterValue {
            value: Some(value.to_string()),
            ..Default::default()
        },
    }
}

/// All periods on record for `(county, state)`, equality match, no limit and
/// no explicit ordering. User input only ever travels as a named query
/// parameter, never spliced into the SQL text.
pub async fn county_rows(county: &str, state: &str) -> Result<Vec<UnemploymentRow>> {
    let warehouse = WAREHOUSE.get_or_try_init(Warehouse::connect).await?;
    warehouse.county_rows(county, state).await
}
