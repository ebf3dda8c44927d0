//! Region catalog.
//!
//! Regions are always visited in catalog order. A configured subset keeps that
//! order regardless of how the codes were listed.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::UnitId;

/// A sales region tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Stable code, also the unit id.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Currency market figures are reported in.
    pub currency: &'static str,
}

impl Region {
    pub fn unit_id(&self) -> UnitId {
        UnitId::region(self.code)
    }
}

/// Default regions, in visit order.
pub const DEFAULT_REGIONS: [Region; 6] = [
    Region { code: "usa", name: "United States", currency: "USD" },
    Region { code: "germany", name: "Germany", currency: "EUR" },
    Region { code: "france", name: "France", currency: "EUR" },
    Region { code: "spain", name: "Spain", currency: "EUR" },
    Region { code: "italy", name: "Italy", currency: "EUR" },
    Region { code: "austria", name: "Austria", currency: "EUR" },
];

/// Ordered set of regions an orchestrator refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.to_vec(),
        }
    }
}

impl RegionCatalog {
    /// Build a catalog from explicit regions, preserving the given order.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        if regions.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(Self { regions })
    }

    /// Restrict the default catalog to the given codes.
    ///
    /// Codes are matched case-insensitively; duplicates are ignored and the
    /// result keeps default catalog order.
    pub fn only<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let wanted: Vec<String> = codes
            .iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .collect();

        if let Some(unknown) = wanted
            .iter()
            .find(|c| !DEFAULT_REGIONS.iter().any(|r| r.code == c.as_str()))
        {
            return Err(Error::UnknownRegion(unknown.clone()));
        }

        let regions = DEFAULT_REGIONS
            .iter()
            .filter(|r| wanted.iter().any(|c| c == r.code))
            .copied()
            .collect();
        Self::new(regions)
    }

    /// Look up a region by code, matched the same way as `only()`.
    pub fn get(&self, code: &str) -> Option<&Region> {
        let code = code.trim().to_lowercase();
        self.regions.iter().find(|r| r.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.regions.iter().map(|r| r.code).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Every unit this catalog implies: the briefing followed by each region.
    pub fn units(&self) -> Vec<UnitId> {
        std::iter::once(UnitId::Briefing)
            .chain(self.regions.iter().map(Region::unit_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = RegionCatalog::default();
        assert_eq!(
            catalog.codes(),
            vec!["usa", "germany", "france", "spain", "italy", "austria"]
        );
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get("spain").map(|r| r.currency), Some("EUR"));
        assert_eq!(catalog.get("usa").map(|r| r.currency), Some("USD"));
        assert!(catalog.get("mars").is_none());
    }

    #[test]
    fn test_get_matches_like_only() {
        let catalog = RegionCatalog::only(&["Germany"]).unwrap();
        assert_eq!(catalog.get("Germany").map(|r| r.code), Some("germany"));
        assert_eq!(catalog.get(" GERMANY ").map(|r| r.code), Some("germany"));
        assert!(catalog.get("spain").is_none());
    }

    #[test]
    fn test_only_keeps_catalog_order() {
        let catalog = RegionCatalog::only(&["Italy", "usa", "italy"]).unwrap();
        assert_eq!(catalog.codes(), vec!["usa", "italy"]);
    }

    #[test]
    fn test_only_rejects_unknown() {
        let err = RegionCatalog::only(&["usa", "atlantis"]).unwrap_err();
        assert!(matches!(err, Error::UnknownRegion(code) if code == "atlantis"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(RegionCatalog::new(vec![]), Err(Error::EmptyCatalog)));
        let empty: [&str; 0] = [];
        assert!(matches!(RegionCatalog::only(&empty), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_units_start_with_briefing() {
        let catalog = RegionCatalog::only(&["france", "germany"]).unwrap();
        assert_eq!(
            catalog.units(),
            vec![
                UnitId::Briefing,
                UnitId::region("germany"),
                UnitId::region("france")
            ]
        );
    }
}
