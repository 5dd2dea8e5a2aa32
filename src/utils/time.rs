use chrono::Local;

/// Local wall-clock time in ISO-8601 with microseconds, e.g. `2024-05-01T10:00:00.123456`.
pub fn observation_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

pub fn log_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string()
}
