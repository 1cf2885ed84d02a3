// src/normalize/mod.rs
pub mod area;
pub mod period;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

/// Filename the LAUS program publishes the 14-month county table under.
pub const DEFAULT_INPUT_FILE: &str = "laucntycur14.txt";

/// Name of the normalized CSV, written next to the input file.
pub const OUTPUT_FILE_NAME: &str = "bls_monthly_unemployment_by_county.csv";

/// County-level records are the only lines we keep; everything else in the
/// file is page headers, state summaries, or footnotes.
const COUNTY_RECORD_PREFIX: &str = "CN";

const FIELD_COUNT: usize = 9;

pub const OUTPUT_HEADERS: [&str; 14] = [
    "laus_area_code",
    "fips_state",
    "fips_county",
    "area",
    "county",
    "state",
    "month_name",
    "month",
    "year",
    "date",
    "civ_labor_force",
    "employed",
    "unemployed",
    "unemployed_rate",
];

/// One normalized CSV row. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub laus_area_code: String,
    pub fips_state: String,
    pub fips_county: String,
    pub area: String,
    pub county: String,
    pub state: String,
    pub month_name: String,
    pub month: u32,
    pub year: i32,
    pub date: NaiveDate,
    pub civ_labor_force: i64,
    pub employed: i64,
    pub unemployed: i64,
    pub unemployed_rate: f64,
}

/// A malformed county record is fatal for the whole run. Each variant names
/// the raw text that failed so the input can be inspected by hand.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("expected 9 pipe-delimited fields, found {found}: {line:?}")]
    FieldCount { found: usize, line: String },
    #[error("unparsable area name: {raw:?}")]
    UnparsableAreaName { raw: String },
    #[error("unparsable period: {raw:?}")]
    UnparsablePeriod { raw: String },
    #[error("invalid count field: {raw:?}")]
    InvalidCount { raw: String },
    #[error("invalid rate field: {raw:?}")]
    InvalidRate { raw: String },
}

/// Parse one raw line. Returns `Ok(None)` for lines that are not
/// county-level records.
pub fn parse_line(line: &str) -> Result<Option<NormalizedRecord>, NormalizeError> {
    let line = line.trim();
    if !line.starts_with(COUNTY_RECORD_PREFIX) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() != FIELD_COUNT {
        return Err(NormalizeError::FieldCount {
            found: fields.len(),
            line: line.to_string(),
        });
    }

    let area = fields[3].trim();
    let (county, state) = area::split_area(area)?;
    let period = period::parse_period(fields[4])?;

    Ok(Some(NormalizedRecord {
        laus_area_code: fields[0].trim().to_string(),
        fips_state: fields[1].trim().to_string(),
        fips_county: fields[2].trim().to_string(),
        area: area.to_string(),
        county,
        state,
        month_name: period.month_name,
        month: period.month,
        year: period.year,
        date: period.date,
        civ_labor_force: parse_count(fields[5])?,
        employed: parse_count(fields[6])?,
        unemployed: parse_count(fields[7])?,
        unemployed_rate: parse_rate(fields[8])?,
    }))
}

/// LAUS counts are comma-grouped ("1,234"); strip the grouping first.
pub fn parse_count(raw: &str) -> Result<i64, NormalizeError> {
    let cleaned = raw.trim().replace(',', "");
    cleaned.parse().map_err(|_| NormalizeError::InvalidCount {
        raw: raw.trim().to_string(),
    })
}

pub fn parse_rate(raw: &str) -> Result<f64, NormalizeError> {
    raw.trim().parse().map_err(|_| NormalizeError::InvalidRate {
        raw: raw.trim().to_string(),
    })
}

/// Normalize the raw LAUS file at `input` into a CSV named
/// [`OUTPUT_FILE_NAME`], written next to the input file (absolute path) or
/// into the current working directory (relative path). The header row is
/// always present, even when no county records match. Returns the output
/// path.
pub fn normalize_file(input: impl AsRef<Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let output_dir: PathBuf = if input.is_absolute() {
        input.parent().unwrap_or_else(|| Path::new("/")).to_path_buf()
    } else {
        env::current_dir().context("resolving working directory")?
    };
    let output = output_dir.join(OUTPUT_FILE_NAME);

    info!("converting {} -> {}", input.display(), output.display());

    let reader = BufReader::new(
        File::open(input).with_context(|| format!("opening {}", input.display()))?,
    );
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(OUTPUT_HEADERS)?;

    let mut rows = 0usize;
    for line in reader.lines() {
        let line = line.with_context(|| format!("reading {}", input.display()))?;
        if let Some(record) = parse_line(&line)? {
            writer.serialize(&record)?;
            rows += 1;
        }
    }
    writer.flush()?;

    info!(rows, "normalized {}", input.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE_LINE: &str = "CN0100100000000 |01 |001 |Autauga County, AL \
         |   Jun-25  |     27,014 |     26,207 |       807 |   3.0";

    #[test]
    fn parses_a_county_record_line() -> Result<()> {
        let record = parse_line(SAMPLE_LINE)?.expect("county line should produce a record");
        assert_eq!(record.laus_area_code, "CN0100100000000");
        assert_eq!(record.fips_state, "01");
        assert_eq!(record.fips_county, "001");
        assert_eq!(record.area, "Autauga County, AL");
        assert_eq!(record.county, "Autauga County");
        assert_eq!(record.state, "AL");
        assert_eq!(record.month_name, "Jun");
        assert_eq!(record.month, 6);
        assert_eq!(record.year, 2025);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(record.civ_labor_force, 27_014);
        assert_eq!(record.employed, 26_207);
        assert_eq!(record.unemployed, 807);
        assert_eq!(record.unemployed_rate, 3.0);
        Ok(())
    }

    #[test]
    fn skips_non_county_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("  Area Code | StateFIPS | ...").unwrap(), None);
        assert_eq!(parse_line("ST01000000000 |01 | ...").unwrap(), None);
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let err = parse_line("CN0100100000000 |01 |001").unwrap_err();
        assert!(matches!(err, NormalizeError::FieldCount { found: 3, .. }));
    }

    #[test]
    fn counts_drop_comma_grouping() {
        assert_eq!(parse_count("1,234").unwrap(), 1_234);
        assert_eq!(parse_count("  4,115,406 ").unwrap(), 4_115_406);
        assert_eq!(parse_count("807").unwrap(), 807);
        assert!(parse_count("-").is_err());
    }

    #[test]
    fn rates_parse_as_floats() {
        assert_eq!(parse_rate(" 5.6 ").unwrap(), 5.6);
        assert!(parse_rate("n.a.").is_err());
    }

    #[test]
    fn normalize_file_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join(DEFAULT_INPUT_FILE);
        let contents = format!(
            "  Area Code | StateFIPS | CountyFIPS | Area Title | Period\n\
             \n\
             {}\n\
             CN1100100000000 |11 |001 |District of Columbia \
             |   Jun-25(p)|     380,012 |     360,123 |    19,889 |   5.2\n",
            SAMPLE_LINE
        );
        fs::write(&input, contents)?;

        let output = normalize_file(&input)?;
        assert_eq!(output, dir.path().join(OUTPUT_FILE_NAME));

        let written = fs::read_to_string(&output)?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], OUTPUT_HEADERS.join(","));
        assert_eq!(
            lines[1],
            "CN0100100000000,01,001,\"Autauga County, AL\",Autauga County,AL,\
             Jun,6,2025,2025-06-01,27014,26207,807,3.0"
        );
        assert_eq!(
            lines[2],
            "CN1100100000000,11,001,District of Columbia,District of Columbia,DC,\
             Jun,6,2025,2025-06-01,380012,360123,19889,5.2"
        );
        Ok(())
    }

    #[test]
    fn header_is_written_even_without_county_records() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("empty.txt");
        fs::write(&input, "  Area Code | StateFIPS\n\n")?;

        let output = normalize_file(&input)?;
        let written = fs::read_to_string(&output)?;
        assert_eq!(written.trim_end(), OUTPUT_HEADERS.join(","));
        Ok(())
    }
}
