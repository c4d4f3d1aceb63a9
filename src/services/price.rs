/// Renders a price with precision that depends on its magnitude.
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        "0.00".to_string()
    } else if price < 1e-6 {
        format!("{:.2e}", price)
    } else if price < 0.01 {
        format!("{:.6}", price)
    } else if price < 1.0 {
        format!("{:.4}", price)
    } else if price < 100.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.0}", price)
    }
}
