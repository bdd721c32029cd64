//! Directory package of every dataset rendering

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::Result;
use crate::dataset::output::Dataset;
use crate::export::csv::{grievance_csv, wards_csv};
use crate::export::grievance::grievance_stats;
use crate::export::{districts_json, grievance_json, ledger_json, schemes_json, to_pretty_json};

pub const DATASETS_DIR: &str = "datasets";

/// Write the dataset package under `root`
///
/// Layout:
/// - `datasets/budget_schemes.json`
/// - `datasets/wards_{year}.json`, `datasets/districts_{year}.json`, `datasets/wards_{year}.csv`
/// - `datasets/audit_ledger.json`
/// - `datasets/grievance_stats.json`, `datasets/grievance_stats.csv` (ledger year)
/// - `README.md`
///
/// Returns the written paths in write order.
pub fn write_package(root: &Path, dataset: &Dataset) -> Result<Vec<PathBuf>> {
    let data_dir = root.join(DATASETS_DIR);
    fs::create_dir_all(&data_dir)?;

    let mut written = Vec::new();
    let mut write = |path: PathBuf, content: String| -> Result<()> {
        fs::write(&path, content)?;
        debug!(path = %path.display(), "Wrote file");
        written.push(path);
        Ok(())
    };

    write(data_dir.join("budget_schemes.json"), schemes_json(&dataset.schemes)?)?;

    for year in &dataset.years {
        let label = year.year.label();
        let wards: Vec<_> = year.wards().collect();
        write(data_dir.join(format!("wards_{}.json", label)), to_pretty_json(&wards)?)?;
        write(
            data_dir.join(format!("districts_{}.json", label)),
            districts_json(&year.districts)?,
        )?;
        write(data_dir.join(format!("wards_{}.csv", label)), wards_csv(wards))?;
    }

    write(data_dir.join("audit_ledger.json"), ledger_json(&dataset.ledger)?)?;

    let grievances = grievance_stats(dataset.ledger_wards());
    write(data_dir.join("grievance_stats.json"), grievance_json(&grievances)?)?;
    write(data_dir.join("grievance_stats.csv"), grievance_csv(&grievances))?;

    write(root.join("README.md"), readme(dataset))?;

    info!(files = written.len(), root = %root.display(), "Wrote dataset package");
    Ok(written)
}

fn readme(dataset: &Dataset) -> String {
    let years: Vec<&str> = dataset.years.iter().map(|y| y.year.label()).collect();
    format!(
        "# GovTrace Synthetic Dataset Package

Generated with seed {seed} for fiscal years {years}.

## Contents

- `datasets/budget_schemes.json`: state budget figures per scheme (lakhs)
- `datasets/wards_YYYY-YY.json` / `.csv`: synthetic ward records per fiscal year
- `datasets/districts_YYYY-YY.json`: district totals with their wards
- `datasets/audit_ledger.json`: hash-linked audit ledger over {ledger_year} wards, in timestamp order
- `datasets/grievance_stats.json` / `.csv`: ward grievance statistics for {ledger_year}

## Method

Ward populations are the district mean (population / ward count) jittered by +/-20%.
Each ward receives the district share (year total / district count) in proportion to its population.
Utilization factors range over 55-95%.
Governance score = 40% utilization + 30% SLA + 30% complaint resolution.
Risk level: green at 80 and above, yellow at 60 and above, red below 60.

## Ledger

Entries are listed by timestamp. The hash chain links entries by their `sequence`
number: sort by `sequence` before checking that each `previousHash` equals the
prior `currentHash`. Hash values are synthetic random hex, not content digests.
",
        seed = dataset.seed,
        years = years.join(", "),
        ledger_year = dataset.ledger_year,
    )
}
