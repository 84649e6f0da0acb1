//! crates/zoo_records_core/src/report.rs
//!
//! Renders the human-readable report artifact for one submission. Pure and
//! deterministic given identical inputs: the generation timestamp is passed
//! in rather than read from the clock, so re-rendering for tests or for the
//! update path is reproducible byte for byte.

use chrono::{DateTime, Utc};

use crate::domain::ObservationRecord;

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Renders the full report text. Writing the result to an existing report
/// file fully replaces the prior content; nothing is appended.
pub fn render_report(
    data: &ObservationRecord,
    keeper_name: &str,
    date: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str("ZOO ANIMAL MONITORING REPORT\n");
    out.push_str("============================\n\n");
    out.push_str(&format!("Date: {date}\n"));
    out.push_str(&format!("Zoo Keeper: {keeper_name}\n"));
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("OBSERVATION DETAILS\n");
    out.push_str("-------------------\n");
    out.push_str(&format!(
        "Animal Observed on Time: {}\n",
        yes_no(data.animal_observed_on_time)
    ));
    out.push_str(&format!(
        "Clean Drinking Water Provided: {}\n",
        yes_no(data.clean_drinking_water_provided)
    ));
    out.push_str(&format!(
        "Enclosure Cleaned Properly: {}\n",
        yes_no(data.enclosure_cleaned_properly)
    ));
    out.push_str(&format!(
        "Normal Behaviour Status: {}\n",
        yes_no(data.normal_behaviour_status)
    ));
    if let Some(details) = non_empty(&data.normal_behaviour_details) {
        out.push_str(&format!("Behaviour Details: {details}\n"));
    }
    out.push_str(&format!(
        "Feed and Supplements Available: {}\n",
        yes_no(data.feed_and_supplements_available)
    ));
    out.push_str(&format!(
        "Feed Given as Prescribed: {}\n",
        yes_no(data.feed_given_as_prescribed)
    ));
    if let Some(requirements) = non_empty(&data.other_animal_requirements) {
        out.push_str(&format!("Other Requirements: {requirements}\n"));
    }
    out.push('\n');

    out.push_str("MONITORING SUMMARIES\n");
    out.push_str("--------------------\n");
    out.push_str(&format!(
        "Daily Animal Health Monitoring:\n{}\n\n",
        data.daily_animal_health_monitoring
    ));
    out.push_str(&format!(
        "Carnivorous Animal Feeding Chart:\n{}\n\n",
        data.carnivorous_animal_feeding_chart
    ));
    out.push_str(&format!(
        "Medicine Stock Register:\n{}\n\n",
        data.medicine_stock_register
    ));
    out.push_str(&format!(
        "Daily Wildlife Monitoring:\n{}\n\n",
        data.daily_wildlife_monitoring
    ));

    out.push_str("AUTHORIZATION\n");
    out.push_str("-------------\n");
    out.push_str(&format!(
        "In-charge Signature: {}\n\n",
        data.incharge_signature
    ));

    out.push_str("---\n");
    out.push_str("This report was generated automatically by the Zoo Management System.");

    out
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
