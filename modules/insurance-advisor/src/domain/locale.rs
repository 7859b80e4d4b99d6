//! Localized system prompts and the "configure the API key" notices.
#![allow(clippy::non_ascii_literal)]

use assets_sdk::UNCATEGORIZED;

use super::currency::format_currency;
use super::language::Language;
use super::models::{AdvisedAsset, CatalogTotals};

/// One inventory line per asset, e.g. `- Sony A7 (Electronics): $1,999.99`.
#[must_use]
pub fn inventory_lines(assets: &[AdvisedAsset]) -> Vec<String> {
    assets
        .iter()
        .map(|a| {
            format!(
                "- {} {} ({}): {}",
                a.make.trim(),
                a.model.trim(),
                a.category
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(UNCATEGORIZED),
                format_currency(a.value)
            )
        })
        .collect()
}

#[must_use]
pub fn system_prompt(language: Language, assets: &[AdvisedAsset]) -> String {
    let totals = CatalogTotals::of(assets);
    let count = totals.count;
    let total = format_currency(totals.total_value);
    let lines = inventory_lines(assets);
    let inventory = if lines.is_empty() {
        empty_inventory(language).to_owned()
    } else {
        lines.join("\n")
    };

    match language {
        Language::English => format!(
            "You are a knowledgeable home insurance advisor. The user has {count} items \
             in their household inventory with a total value of {total}.\n\n\
             Inventory:\n{inventory}\n\n\
             Give practical, concise insurance advice based on this inventory. \
             Respond in English."
        ),
        Language::French => format!(
            "Vous êtes un conseiller expert en assurance habitation. L'utilisateur possède \
             {count} objets dans son inventaire, d'une valeur totale de {total}.\n\n\
             Inventaire :\n{inventory}\n\n\
             Donnez des conseils d'assurance pratiques et concis en fonction de cet \
             inventaire. Répondez en français."
        ),
        Language::Spanish => format!(
            "Eres un asesor experto en seguros del hogar. El usuario tiene {count} artículos \
             en su inventario con un valor total de {total}.\n\n\
             Inventario:\n{inventory}\n\n\
             Ofrece consejos de seguros prácticos y concisos basados en este inventario. \
             Responde en español."
        ),
        Language::German => format!(
            "Sie sind ein erfahrener Berater für Hausratversicherungen. Der Nutzer hat \
             {count} Gegenstände in seinem Inventar mit einem Gesamtwert von {total}.\n\n\
             Inventar:\n{inventory}\n\n\
             Geben Sie praktische, prägnante Versicherungsratschläge auf Grundlage dieses \
             Inventars. Antworten Sie auf Deutsch."
        ),
    }
}

fn empty_inventory(language: Language) -> &'static str {
    match language {
        Language::English => "(no items recorded)",
        Language::French => "(aucun objet enregistré)",
        Language::Spanish => "(ningún artículo registrado)",
        Language::German => "(keine Gegenstände erfasst)",
    }
}

/// Fixed reply for languages without canned advice. `None` for English.
#[must_use]
pub fn api_key_notice(language: Language) -> Option<&'static str> {
    match language {
        Language::English => None,
        Language::French => Some(
            "Pour obtenir des conseils d'assurance personnalisés, veuillez configurer la clé API OpenAI.",
        ),
        Language::Spanish => Some(
            "Para obtener asesoramiento de seguros personalizado, configure la clave API de OpenAI.",
        ),
        Language::German => Some(
            "Um personalisierte Versicherungsberatung zu erhalten, konfigurieren Sie bitte den OpenAI-API-Schlüssel.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<AdvisedAsset> {
        vec![
            AdvisedAsset {
                make: "Sony".to_owned(),
                model: "A7".to_owned(),
                category: Some("Electronics".to_owned()),
                value: 1999.99,
            },
            AdvisedAsset {
                make: "Fender".to_owned(),
                model: "Strat".to_owned(),
                category: None,
                value: 10_345.68,
            },
        ]
    }

    #[test]
    fn prompt_summarizes_the_catalog() {
        let prompt = system_prompt(Language::English, &catalog());
        assert!(prompt.contains("2 items"));
        assert!(prompt.contains("$12,345.67"));
        assert!(prompt.contains("- Sony A7 (Electronics): $1,999.99"));
        assert!(prompt.contains("- Fender Strat (Uncategorized): $10,345.68"));
    }

    #[test]
    fn prompt_is_localized() {
        let fr = system_prompt(Language::French, &catalog());
        assert!(fr.contains("Répondez en français"));
        assert!(fr.contains("$12,345.67"));
        assert!(system_prompt(Language::German, &[]).contains("(keine Gegenstände erfasst)"));
        assert!(system_prompt(Language::Spanish, &[]).contains("0 artículos"));
    }

    #[test]
    fn french_notice_is_exact() {
        assert_eq!(
            api_key_notice(Language::French),
            Some("Pour obtenir des conseils d'assurance personnalisés, veuillez configurer la clé API OpenAI.")
        );
        assert_eq!(api_key_notice(Language::English), None);
    }
}
