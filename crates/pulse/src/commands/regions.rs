//! List configured regions.

use anyhow::Result;
use colored::Colorize;
use pulse_core::RegionCatalog;

use crate::config::Config;

pub fn execute(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    println!("{}", render(&catalog));
    Ok(())
}

/// Catalog listing in visit order.
pub fn render(catalog: &RegionCatalog) -> String {
    let mut lines = vec![format!("{}", "Regions (visit order):".cyan().bold())];
    for (i, region) in catalog.iter().enumerate() {
        lines.push(format!(
            "  {}. {:<10} {:<16} {}",
            i + 1,
            region.code,
            region.name,
            region.currency
        ));
    }
    lines.join("\n")
}
