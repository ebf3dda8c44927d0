//! Prompt builders.
//!
//! The remote service returns whatever JSON shape the prompt asks for, so each
//! prompt spells out the exact object expected back.

use chrono::NaiveDate;

use crate::region::{Region, RegionCatalog};

/// System instruction sent with every request. Embeds the current date so the
/// service anchors its web search on "now".
pub fn system_instruction(today: NaiveDate) -> String {
    format!(
        "You are a beverage industry market analyst supporting a sales team. \
         Today is {}. Use web search to ground every statement in current news. \
         Respond ONLY with a single valid JSON object. No markdown, no commentary.",
        today.format("%A, %d %B %Y")
    )
}

/// Prompt for the global market briefing.
pub fn briefing_prompt(catalog: &RegionCatalog) -> String {
    let names: Vec<&str> = catalog.iter().map(|r| r.name).collect();
    format!(
        "Write a 2-3 sentence briefing on current beverage market conditions across {}. \
         Mention the most important price, launch or regulatory movement. \
         Return exactly this JSON shape: {{\"summary\": \"<2-3 sentences>\"}}",
        names.join(", ")
    )
}

/// Prompt for one region's trend, sentiment, market size and growth.
pub fn region_prompt(region: &Region) -> String {
    format!(
        "Assess the beverage market in {name} right now: the dominant trend, overall sentiment, \
         market size and year-over-year growth. Quote market size in {currency}. \
         Return exactly this JSON shape: \
         {{\"remark\": \"<one or two sentences on the key trend>\", \
         \"sentiment\": \"positive|neutral|negative\", \
         \"market_size\": \"<e.g. {currency} 120B>\", \
         \"growth\": \"<e.g. +3.2% YoY>\"}}",
        name = region.name,
        currency = region.currency,
    )
}
