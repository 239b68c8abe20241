//! Embedded fallback dataset.
//!
//! A 10-row national sample for 2024, decoded through the regular
//! decoder, used whenever the external dataset cannot be fetched. The
//! page stays functional offline with this data.

use once_cell::sync::Lazy;

use crate::decoder;
use crate::models::{Dataset, Record};

/// Data source label reported for the embedded sample.
pub const FALLBACK_DATA_SOURCE: &str = "BLS OES Data + O*NET Complexity Scores (embedded sample)";

const FALLBACK_CSV: &str = "\
year,Region_Type,Region,SOC_Code,OCC_TITLE,SOC_Major_Group_Name,TOT_EMP,A_MEAN,GDP,complexity_score
2024,National,United States,11-0000,Management Occupations,Management,9270000,122090,1131774300000,0.78
2024,National,United States,29-0000,Healthcare Practitioners and Technical Occupations,Healthcare Practitioners,9050000,91100,824455000000,0.74
2024,National,United States,25-0000,Educational Instruction and Library Occupations,Education Training and Library,8610000,63240,544496400000,0.66
2024,National,United States,41-0000,Sales and Related Occupations,Sales and Related,8340000,48550,404907000000,0.41
2024,National,United States,13-0000,Business and Financial Operations Occupations,Business and Financial Operations,8120000,86080,698969600000,0.69
2024,National,United States,43-0000,Office and Administrative Support Occupations,Office and Administrative Support,7980000,45550,363489000000,0.44
2024,National,United States,53-0000,Transportation and Material Moving Occupations,Transportation and Material Moving,7430000,43160,320678800000,0.35
2024,National,United States,35-0000,Food Preparation and Serving Related Occupations,Food Preparation and Serving,6990000,34160,238778400000,0.28
2024,National,United States,15-0000,Computer and Mathematical Occupations,Computer and Mathematical,5160000,104420,538807200000,0.83
2024,National,United States,31-0000,Healthcare Support Occupations,Healthcare Support,4570000,36780,168084600000,0.38
";

static FALLBACK_RECORDS: Lazy<Vec<Record>> = Lazy::new(|| decoder::decode(FALLBACK_CSV));

/// The embedded sample records.
pub fn fallback_records() -> &'static [Record] {
    &FALLBACK_RECORDS
}

/// A fresh dataset built from the embedded sample.
pub fn fallback_dataset() -> Dataset {
    Dataset::new(FALLBACK_RECORDS.clone(), FALLBACK_DATA_SOURCE)
}
