use chrono::NaiveDateTime;

const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Builds the CSV name for one run. `run_at` distinguishes repeated runs
/// over the same parameters.
pub fn unique_filename(
    instrument: &str,
    data_type: &str,
    start_date: &str,
    end_date: &str,
    run_at: NaiveDateTime,
) -> String {
    format!(
        "DERIBIT_{}_{}_from_{}_to_{}_at_{}.csv",
        instrument,
        data_type,
        start_date,
        end_date,
        run_at.format(RUN_TIMESTAMP_FORMAT)
    )
}
