pub fn format_money(value: f64) -> String {
    format!("${:.4}", value)
}

pub fn format_requests(value: f64) -> String {
    format!("{}", value.round() as i64)
}

pub fn format_models(models: &[String]) -> String {
    const SHOWN: usize = 3;
    if models.is_empty() {
        return "—".to_string();
    }
    if models.len() <= SHOWN {
        return models.join(", ");
    }
    format!("{} + {} more", models[..SHOWN].join(", "), models.len() - SHOWN)
}
