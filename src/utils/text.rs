/// Turns a camelCase stat key into a display label:
/// `"shieldCapacity"` becomes `"Shield Capacity"`.
pub fn pretty_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if let Some(p) = prev {
            if p.is_ascii_lowercase() && c.is_ascii_uppercase() {
                label.push(' ');
            }
        }
        if prev.is_none() {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
        prev = Some(c);
    }

    label
}

/// Class token for a tier label: `"Tier 2 Rare"` becomes `"module-tier-2-rare"`.
pub fn tier_class(tier: &str) -> String {
    let slug = tier
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("module-{}", slug)
}
