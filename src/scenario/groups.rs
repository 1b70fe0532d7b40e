//! Tracked source assets and their display groups

use serde::Serialize;

/// Thematic group of source assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AssetGroup {
    TraditionalFinance,
    PreciousMetals,
    RealAssets,
    CryptoCollectibles,
}

impl AssetGroup {
    /// All groups in display order
    pub const ALL: [AssetGroup; 4] = [
        AssetGroup::TraditionalFinance,
        AssetGroup::PreciousMetals,
        AssetGroup::RealAssets,
        AssetGroup::CryptoCollectibles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AssetGroup::TraditionalFinance => "Traditional Finance",
            AssetGroup::PreciousMetals => "Precious Metals",
            AssetGroup::RealAssets => "Real Assets",
            AssetGroup::CryptoCollectibles => "Crypto & Collectibles",
        }
    }

    /// Asset names in this group, as they appear in scenario documents
    pub fn assets(&self) -> &'static [&'static str] {
        match self {
            AssetGroup::TraditionalFinance => &["Stocks", "Bonds"],
            AssetGroup::PreciousMetals => &["Gold", "Silver"],
            AssetGroup::RealAssets => &["Real Estate"],
            AssetGroup::CryptoCollectibles => &["Crypto (ex-BTC)", "Fine Art"],
        }
    }

    /// Every tracked asset in display order
    pub fn tracked_assets() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().flat_map(|g| g.assets().iter().copied())
    }

    /// Group containing `asset`
    pub fn of(asset: &str) -> Option<AssetGroup> {
        Self::ALL.into_iter().find(|g| g.assets().contains(&asset))
    }
}
