//! Bundled sample of installation rows.
//!
//! A small, realistic subset of the public AI supercomputer dataset (Epoch AI,
//! "Trends in AI Supercomputers"). The application passes it to the loader
//! as the fallback when the configured source cannot be read; nothing else
//! reaches for it implicitly.

use crate::domain::{RawField, RawRow};

/// Columns in `RawField::ALL` order:
/// name, status, H100e, power MW, country, owner, first operational date,
/// chip, sector, hardware cost.
const SAMPLE: [[&str; 10]; 20] = [
    ["xAI Colossus Memphis Phase 2", "Existing", "200000", "150", "United States of America", "xAI", "2024-03-30", "NVIDIA H100 SXM5 80GB", "Private", ""],
    ["Abu Dhabi UAE/USA 5GW Campus Phase 2", "Planned", "20262759", "5000", "United Arab Emirates", "G42", "", "", "Public/Private", ""],
    ["Meta $200B Campus Rumor", "Planned", "20262759", "5000", "United States of America", "Meta AI", "", "", "Private", "200000000000"],
    ["xAI Colossus 2 Memphis", "Planned", "2221223", "2202", "United States of America", "xAI", "", "NVIDIA GB200 NVL2", "Private", ""],
    ["OpenAI/Microsoft Mt Pleasant, Wisconsin Phase 2", "Planned", "1768570", "1500", "United States of America", "OpenAI,Microsoft", "", "NVIDIA GB200 NVL2", "Private", ""],
    ["HUMAIN Saudi Arabia Phase 2", "Planned", "1520970", "500", "Saudi Arabia", "Humain", "", "", "Public/Private", ""],
    ["Fluidstack France Gigawatt Campus", "Planned", "1263265", "1000", "France", "Fluidstack", "", "NVIDIA GB200 NVL2", "Public/Private", ""],
    ["Reliance Industries Supercomputer", "Planned", "1136938", "1000", "India", "Reliance Industries", "", "NVIDIA GB200 NVL2", "Private", ""],
    ["OpenAI Stargate Abilene Oracle OCI Supercluster Phase 2", "Planned", "1010615", "800", "United States of America", "Oracle", "", "NVIDIA GB300", "Private", ""],
    ["OpenAI/Microsoft Atlanta", "Planned", "682163", "700", "United States of America", "OpenAI,Microsoft", "", "NVIDIA B200", "Private", ""],
    ["Google TPU v4 Pods", "Existing", "150000", "50", "United States of America", "Google", "2023-06-01", "Google TPU v4", "Private", ""],
    ["Microsoft Azure AI Infrastructure", "Existing", "180000", "75", "United States of America", "Microsoft", "2023-11-01", "NVIDIA H100 SXM5 80GB", "Private", ""],
    ["Meta AI Research Supercomputer", "Existing", "120000", "60", "United States of America", "Meta AI", "2024-01-15", "NVIDIA H100 SXM5 80GB", "Private", ""],
    ["Amazon AWS Trainium Clusters", "Existing", "95000", "40", "United States of America", "Amazon", "2023-09-01", "AWS Trainium", "Private", ""],
    ["Baidu AI Cloud Kunlun", "Existing", "85000", "35", "China", "Baidu", "2023-08-01", "Baidu Kunlun 2", "Private", ""],
    ["SenseTime SenseCore", "Existing", "70000", "30", "China", "SenseTime", "2023-05-01", "NVIDIA A100", "Private", ""],
    ["RIKEN Fugaku AI Extension", "Existing", "45000", "20", "Japan", "RIKEN", "2023-04-01", "Fujitsu A64FX", "Public", ""],
    ["Applied Digital Ellendale Possible Phase 3", "Planned 2027", "454775", "400", "United States of America", "Applied Digital", "", "NVIDIA GB200 NVL2", "Private", ""],
    ["Nebius New Jersey", "Planned 2026", "378979", "300", "United States of America", "Nebius AI", "", "NVIDIA GB200 NVL2", "Private", ""],
    ["South Korea Planned 3GW Cluster", "Planned 2028", "5103588", "3000", "Korea (Republic of)", "Samsung", "", "", "Private", ""],
];

/// The bundled rows, as raw (string-valued) rows. Empty cells stay absent.
pub fn bundled_rows() -> Vec<RawRow> {
    SAMPLE
        .iter()
        .map(|values| {
            RawRow::from_fields(
                RawField::ALL
                    .iter()
                    .zip(values.iter())
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(field, value)| (field.header(), *value)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::domain::Status;

    #[test]
    fn every_bundled_row_survives_normalization() {
        let rows = bundled_rows();
        assert_eq!(rows.len(), 20);
        let dataset = Dataset::from_rows(&rows);
        assert_eq!(dataset.len(), 20);
        assert_eq!(dataset.rows_dropped(), 0);
    }

    #[test]
    fn bundled_rows_cover_both_statuses_and_status_years() {
        let dataset = Dataset::from_rows(&bundled_rows());
        let existing = dataset.iter().filter(|i| i.status == Status::Existing).count();
        let planned = dataset.iter().filter(|i| i.status == Status::Planned).count();
        assert_eq!(existing, 8);
        assert_eq!(planned, 12);

        let korea = dataset
            .iter()
            .find(|i| i.owner == "Samsung")
            .expect("Samsung row present");
        assert_eq!(korea.operational_year, Some(2028));
    }
}
