/// Turn compact timestamp notation into a spoken phrase.
///
/// `"05:30"` becomes `"5 minutes, 30 seconds"` and `"1:02:03"` becomes
/// `"1 hours, 2 minutes, 3 seconds"`. Anything that is not two or three
/// colon-separated unsigned integers is returned unchanged.
pub fn normalize_duration(raw: &str) -> String {
    let fields: Option<Vec<u64>> = raw.split(':').map(|f| f.parse().ok()).collect();

    match fields.as_deref() {
        Some([minutes, seconds]) => format!("{} minutes, {} seconds", minutes, seconds),
        Some([hours, minutes, seconds]) => format!(
            "{} hours, {} minutes, {} seconds",
            hours, minutes, seconds
        ),
        _ => raw.to_string(),
    }
}
