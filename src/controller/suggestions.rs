//! Example queries offered on the empty page

const TEMPLATES: [&str; 3] = [
    "Where can I eat ramen near {place}?",
    "Find coffee shops near {place}",
    "Best pizza places near {place}",
];

/// Example queries, qualified with the location label when one is known
pub fn example_queries(label: Option<&str>) -> Vec<String> {
    let place = label
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("me");

    TEMPLATES
        .iter()
        .map(|t| t.replace("{place}", place))
        .collect()
}
