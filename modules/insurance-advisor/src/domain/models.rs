use assets_sdk::Asset;

/// The parts of an asset the advisor reasons about.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvisedAsset {
    pub make: String,
    pub model: String,
    pub category: Option<String>,
    pub value: f64,
}

impl From<Asset> for AdvisedAsset {
    fn from(a: Asset) -> Self {
        Self {
            make: a.make,
            model: a.model,
            category: a.category,
            value: a.value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    /// Catalog to advise on; the household's stored assets when absent.
    pub assets: Option<Vec<AdvisedAsset>>,
    /// Language code; the caller's saved preference when absent.
    pub language: Option<String>,
}

/// Item count and total value of the catalog under discussion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogTotals {
    pub count: usize,
    pub total_value: f64,
}

impl CatalogTotals {
    /// Non-finite or negative values count as zero.
    #[must_use]
    pub fn of(assets: &[AdvisedAsset]) -> Self {
        Self {
            count: assets.len(),
            total_value: assets
                .iter()
                .map(|a| if a.value.is_finite() { a.value.max(0.0) } else { 0.0 })
                .sum(),
        }
    }
}
