//! Serialize filtered records back to the delimited source shape.
//!
//! Column order is fixed and matches the source format, so an exported
//! file decodes back into the same records. Text fields are quoted on the
//! way out; the decoder trims those quotes again on the way in.

use std::path::Path;

use crate::error::ExportResult;
use crate::models::Record;

/// Fixed export column order, identical to the source format.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "year",
    "Region_Type",
    "Region",
    "SOC_Code",
    "OCC_TITLE",
    "SOC_Major_Group_Name",
    "TOT_EMP",
    "A_MEAN",
    "GDP",
    "complexity_score",
];

/// Serialize records to comma-delimited text: one header line plus one
/// line per record.
pub fn export_csv(records: &[Record]) -> ExportResult<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(&mut buf);

        writer.write_record(EXPORT_COLUMNS)?;

        for record in records {
            writer.write_record([
                record.year.to_string(),
                record.region_type.as_label().to_string(),
                record.region.clone(),
                record.code.clone(),
                record.title.clone(),
                record.group_name.clone(),
                record.employment.to_string(),
                record.mean_wage.to_string(),
                record.gdp.to_string(),
                record.complexity_score.to_string(),
            ])?;
        }

        writer.flush()?;
    }

    Ok(String::from_utf8(buf)?)
}

/// Serialize records and write them to a file.
pub fn export_to_file<P: AsRef<Path>>(records: &[Record], path: P) -> ExportResult<()> {
    let csv = export_csv(records)?;
    std::fs::write(path.as_ref(), csv)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder;
    use crate::models::RegionType;

    fn record(code: &str, title: &str, employment: f64) -> Record {
        Record {
            year: 2024,
            region_type: RegionType::National,
            region: "United States".to_string(),
            code: code.to_string(),
            title: title.to_string(),
            group_name: "Management".to_string(),
            employment,
            mean_wage: 122_090.0,
            gdp: 1_131_774_300_000.0,
            complexity_score: 0.78,
        }
    }

    #[test]
    fn test_two_records_make_three_lines() {
        let records = vec![
            record("11-0000", "Management Occupations", 9_270_000.0),
            record("13-0000", "Business and Financial Operations Occupations", 8_120_000.0),
        ];

        let csv = export_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("SOC_Code"));
    }

    #[test]
    fn test_text_fields_quoted_numbers_bare() {
        let csv = export_csv(&[record("11-0000", "Management Occupations", 9_270_000.0)]).unwrap();
        let data_line = csv.lines().nth(1).unwrap();

        assert!(data_line.contains("\"Management Occupations\""));
        assert!(data_line.contains("\"11-0000\""));
        assert!(data_line.contains(",9270000,"));
        assert!(data_line.starts_with("2024,"));
    }

    #[test]
    fn test_fixed_column_order() {
        let csv = export_csv(&[record("11-0000", "Management Occupations", 9_270_000.0)]).unwrap();
        let header: Vec<String> = csv
            .lines()
            .next()
            .unwrap()
            .split(',')
            .map(|field| field.trim_matches('"').to_string())
            .collect();

        assert_eq!(header, EXPORT_COLUMNS);
    }

    #[test]
    fn test_export_roundtrips_through_decoder() {
        let records = vec![
            record("11-0000", "Management Occupations", 9_270_000.0),
            record("15-0000", "Computer and Mathematical Occupations", 5_160_000.0),
        ];

        let csv = export_csv(&records).unwrap();
        let decoded = decoder::decode(&csv);
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");

        export_to_file(&[record("11-0000", "Management Occupations", 1.0)], &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }
}
