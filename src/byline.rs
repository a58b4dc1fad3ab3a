//! Byline with descriptive statistics of sample datasets
//!
//! The byline is rendered on demand from an explicit [`AnalyticsProfile`]; nothing is
//! computed at load time.

use crate::stats::{mean, sample_std};
use crate::utils::{format_float, format_str_list};

/// Facts and sample datasets shown in the byline
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsProfile {
    /// Whether international clients are served
    pub has_international_clients: bool,
    /// Years the business has operated
    pub years_in_operation: u32,
    /// Skills on offer
    pub skills_offered: Vec<String>,
    /// Client satisfaction survey scores
    pub client_satisfaction_scores: Vec<f64>,
    /// Whether new clients are accepted
    pub accepting_new_clients: bool,
    /// Years of personal experience
    pub years_of_experience: u32,
    /// Sales strengths
    pub sales_expertise: Vec<String>,
    /// Daily low temperatures (°F) for a sample week
    pub daily_temps: Vec<i64>,
}

impl Default for AnalyticsProfile {
    fn default() -> Self {
        Self {
            has_international_clients: true,
            years_in_operation: 10,
            skills_offered: to_strings(&[
                "Data Analysis",
                "Machine Learning",
                "Business Intelligence",
            ]),
            client_satisfaction_scores: vec![4.8, 4.6, 4.9, 5.0, 4.7],
            accepting_new_clients: true,
            years_of_experience: 4,
            sales_expertise: to_strings(&[
                "Confidence",
                "Customer Service",
                "Negotiating",
                "Problem-Solving",
            ]),
            daily_temps: vec![68, 58, 54, 60, 68, 67, 52],
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn float_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format_float(*v)).collect();
    format!("[{}]", items.join(", "))
}

fn int_list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn fixed2(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn extreme(values: &[f64], pick: fn(f64, f64) -> f64) -> String {
    values
        .iter()
        .copied()
        .reduce(pick)
        .map_or_else(|| "n/a".to_string(), format_float)
}

/// Render the byline block for `profile`
pub fn render_byline(profile: &AnalyticsProfile) -> String {
    let scores = &profile.client_satisfaction_scores;
    let temps: Vec<f64> = profile.daily_temps.iter().map(|t| *t as f64).collect();
    let rule = "-".repeat(57);

    let min_temp = profile
        .daily_temps
        .iter()
        .min()
        .map_or_else(|| "n/a".to_string(), i64::to_string);
    let max_temp = profile
        .daily_temps
        .iter()
        .max()
        .map_or_else(|| "n/a".to_string(), i64::to_string);

    let lines = [
        String::new(),
        rule.clone(),
        "Huntsman Analytics: Delivering Professional Insights".to_string(),
        rule,
        format!(
            "Has International Clients:  {}",
            py_bool(profile.has_international_clients)
        ),
        format!("Years in Operation:         {}", profile.years_in_operation),
        format!(
            "Skills Offered:             {}",
            format_str_list(&profile.skills_offered)
        ),
        format!("Client Satisfaction Scores: {}", float_list(scores)),
        format!("Minimum Satisfaction Score: {}", extreme(scores, f64::min)),
        format!("Maximum Satisfaction Score: {}", extreme(scores, f64::max)),
        format!("Mean Satisfaction Score:    {}", fixed2(mean(scores))),
        format!("Standard Deviation:         {}", fixed2(sample_std(scores))),
        format!(
            "Accepting New Clients:      {}",
            py_bool(profile.accepting_new_clients)
        ),
        format!("Years of Experience:        {}", profile.years_of_experience),
        format!(
            "Sales Expertise:            {}",
            format_str_list(&profile.sales_expertise)
        ),
        format!(
            "Daily Temp Lows in Boston:  {}",
            int_list(&profile.daily_temps)
        ),
        format!("Minimum Temp Low:           {min_temp}"),
        format!("Maximum Temp Low:           {max_temp}"),
        format!("Mean Temp Low:              {}", fixed2(mean(&temps))),
        format!("Standard Deviation:         {}", fixed2(sample_std(&temps))),
        String::new(),
    ];

    lines.join("\n")
}

/// Byline for the default profile
pub fn get_byline() -> String {
    render_byline(&AnalyticsProfile::default())
}
