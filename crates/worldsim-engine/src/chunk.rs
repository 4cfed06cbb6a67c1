//! Chunk boundary calculation (spec §4.5 step 2), grounded verbatim on the
//! original `_calculate_chunks`.

/// Divides `[start_day, end_day]` into closed intervals each spanning at
/// most `chunk_size_days`. The caller guarantees `start_day < end_day` and
/// `chunk_size_days > 0`; the final chunk may be shorter than the rest.
pub fn calculate_chunks(start_day: i64, end_day: i64, chunk_size_days: i64) -> Vec<(i64, i64)> {
    let mut chunks = Vec::new();
    let mut current = start_day;

    while current <= end_day {
        let chunk_end = (current + chunk_size_days).min(end_day);
        chunks.push((current, chunk_end));
        current = chunk_end + 1;
    }

    chunks
}
