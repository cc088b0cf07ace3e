/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 本地时区当日零点的 UTC 时间戳（毫秒）
///
/// 营业日边界，统计接口用它作为 `created_at >=` 的下界。
pub fn today_start_millis() -> i64 {
    let now = chrono::Local::now();
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_local());
    midnight
        .and_local_timezone(chrono::Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(now_millis)
}
