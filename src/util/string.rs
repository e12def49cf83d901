pub fn maybe_pluralize((singular, plural): (&str, &str), qty: usize) -> String {
    (if qty == 1 { singular } else { plural }).to_string()
}

pub fn maybe_pluralize_count(count: usize, (singular, plural): (&str, &str)) -> String {
    format!("{} {}", count, maybe_pluralize((singular, plural), count))
}
