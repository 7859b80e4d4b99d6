//! Keyword-matched English answers used when no chat model is available.

use super::currency::format_currency;
use super::models::CatalogTotals;

/// Topics in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Coverage,
    Premium,
    Deductible,
    Claim,
    Recommend,
}

impl Topic {
    const PRIORITY: [Self; 5] = [
        Self::Coverage,
        Self::Premium,
        Self::Deductible,
        Self::Claim,
        Self::Recommend,
    ];

    fn keyword(self) -> &'static str {
        match self {
            Self::Coverage => "coverage",
            Self::Premium => "premium",
            Self::Deductible => "deductible",
            Self::Claim => "claim",
            Self::Recommend => "recommend",
        }
    }

    /// First topic whose keyword occurs in the lower-cased message.
    #[must_use]
    pub fn detect(message: &str) -> Option<Self> {
        let message = message.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|topic| message.contains(topic.keyword()))
    }
}

fn items(count: usize) -> String {
    if count == 1 {
        "1 item".to_owned()
    } else {
        format!("{count} items")
    }
}

#[must_use]
pub fn canned_response(message: &str, totals: CatalogTotals) -> String {
    let items = items(totals.count);
    let total = format_currency(totals.total_value);

    match Topic::detect(message) {
        Some(Topic::Coverage) => format!(
            "With {items} worth {total} in your catalog, make sure your homeowners or renters \
             policy covers the full replacement cost of your belongings. Standard policies often \
             cap coverage for jewelry, electronics and collectibles, so review those sub-limits \
             and consider scheduling high-value items individually."
        ),
        Some(Topic::Premium) => format!(
            "Premiums depend on the amount of coverage, your deductible, where you live and your \
             claims history. For {items} valued at {total}, you can often lower the premium by \
             raising your deductible, bundling home and auto policies, or installing alarms and \
             smoke detectors."
        ),
        Some(Topic::Deductible) => format!(
            "A deductible is the amount you pay yourself before insurance covers a claim. A higher \
             deductible lowers your premium but costs more when something goes wrong. With a \
             catalog worth {total}, pick a deductible you could comfortably pay from savings; \
             $500 to $2,500 is typical."
        ),
        Some(Topic::Claim) => format!(
            "To file a claim, document the damage or loss with photos right away, then contact \
             your insurer with the make, model, serial number, purchase date and value of each \
             affected item. Keeping receipts and pictures for your {items} in this catalog makes \
             the claim faster and helps you recover the full value."
        ),
        Some(Topic::Recommend) => format!(
            "For {items} totaling {total}, consider replacement cost coverage rather than actual \
             cash value, a personal articles floater for your most valuable items, and a yearly \
             review of this inventory so your limits keep pace with new purchases."
        ),
        None => format!(
            "You have {items} in your catalog with a total value of {total}. Ask me about \
             coverage, premiums, deductibles, claims or recommendations for more specific \
             guidance."
        ),
    }
}
