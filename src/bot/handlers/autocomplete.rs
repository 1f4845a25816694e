//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests catalog service names and product names as the operator types.

use crate::{
    bot::Context,
    core::{inventory, pricing},
};

/// Discord shows at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

fn matching_names(names: impl Iterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect();
    matching.sort();
    matching.dedup();
    matching
}

/// Provides autocomplete suggestions for catalog service names.
pub async fn autocomplete_service_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(services) = pricing::list_by_category(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_names(services.into_iter().map(|s| s.name), partial)
}

/// Provides autocomplete suggestions for product names.
pub async fn autocomplete_product_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(products) = inventory::list_products(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_names(products.into_iter().map(|p| p.name), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(ToString::to_string).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_matching_is_case_insensitive_and_sorted() {
        let found = matching_names(names(&["Sport Premium", "Naked Basic", "Sport Basic"]), "sport");
        assert_eq!(found, vec!["Sport Basic".to_string(), "Sport Premium".to_string()]);
    }

    #[test]
    fn test_matching_empty_partial_returns_all() {
        let found = matching_names(names(&["Wax", "Shampoo"]), "");
        assert_eq!(found, vec!["Shampoo".to_string(), "Wax".to_string()]);
    }

    #[test]
    fn test_matching_caps_suggestions() {
        let many: Vec<String> = (0..40).map(|i| format!("Service {i:02}")).collect();
        assert_eq!(matching_names(many.into_iter(), "service").len(), MAX_SUGGESTIONS);
    }
}
