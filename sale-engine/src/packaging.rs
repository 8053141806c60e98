//! Packaging Rule Matcher
//!
//! Picks the packaging rule for a sale's card count and expands it into
//! costed consumable selections.

use shared::models::{Consumable, ConsumableSelection, PackagingRule};

/// Find the packaging rule for a card count.
///
/// The most specific covering rule wins: highest `card_count_min`, earlier
/// rules winning ties. When nothing covers the count the default rule is
/// used, if there is one.
pub fn select_packaging_rule(rules: &[PackagingRule], card_count: i64) -> Option<&PackagingRule> {
    if card_count < 1 {
        return None;
    }

    let mut best: Option<&PackagingRule> = None;
    for rule in rules.iter().filter(|r| r.covers(card_count)) {
        match best {
            Some(b) if b.card_count_min >= rule.card_count_min => {}
            _ => best = Some(rule),
        }
    }

    best.or_else(|| rules.iter().find(|r| r.is_default))
}

/// Expand the matching rule into consumable selections.
///
/// Unit costs come from the catalog; a rule item whose consumable is no
/// longer in the catalog is kept at cost 0 rather than dropped.
pub fn suggest_consumables(
    rules: &[PackagingRule],
    catalog: &[Consumable],
    card_count: i64,
) -> Vec<ConsumableSelection> {
    let Some(rule) = select_packaging_rule(rules, card_count) else {
        return Vec::new();
    };

    rule.items
        .iter()
        .map(|item| {
            let unit_cost_pence = catalog
                .iter()
                .find(|c| c.id == item.consumable_id)
                .map(|c| c.avg_cost_pence_per_unit)
                .unwrap_or(0);
            ConsumableSelection {
                consumable_id: item.consumable_id,
                name: item.name.clone(),
                qty: item.qty,
                unit_cost_pence,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PackagingRuleItem;
    use uuid::Uuid;

    fn make_rule(n: u128, min: i64, max: Option<i64>, items: &[(u128, i64)]) -> PackagingRule {
        PackagingRule {
            id: Uuid::from_u128(n),
            name: format!("Rule {n}"),
            is_default: false,
            card_count_min: min,
            card_count_max: max,
            items: items
                .iter()
                .map(|&(id, qty)| PackagingRuleItem {
                    consumable_id: Uuid::from_u128(id),
                    name: format!("Consumable {id}"),
                    qty,
                    unit: "each".to_string(),
                })
                .collect(),
        }
    }

    fn make_consumable(n: u128, cost: i64) -> Consumable {
        Consumable {
            id: Uuid::from_u128(n),
            name: format!("Consumable {n}"),
            unit: "each".to_string(),
            avg_cost_pence_per_unit: cost,
        }
    }

    #[test]
    fn test_most_specific_rule_wins() {
        let rules = vec![
            make_rule(1, 1, None, &[(10, 1)]),
            make_rule(2, 5, Some(20), &[(11, 1)]),
            make_rule(3, 10, None, &[(12, 1)]),
        ];
        // 12 cards: rules 1, 2 and 3 all cover; 3 has the highest minimum
        let rule = select_packaging_rule(&rules, 12).unwrap();
        assert_eq!(rule.id, Uuid::from_u128(3));
        // 7 cards: rules 1 and 2 cover; 2 wins
        let rule = select_packaging_rule(&rules, 7).unwrap();
        assert_eq!(rule.id, Uuid::from_u128(2));
        // 2 cards: only rule 1
        let rule = select_packaging_rule(&rules, 2).unwrap();
        assert_eq!(rule.id, Uuid::from_u128(1));
    }

    #[test]
    fn test_tie_keeps_list_order() {
        let rules = vec![
            make_rule(1, 5, None, &[(10, 1)]),
            make_rule(2, 5, None, &[(11, 1)]),
        ];
        let rule = select_packaging_rule(&rules, 8).unwrap();
        assert_eq!(rule.id, Uuid::from_u128(1));
    }

    #[test]
    fn test_range_upper_bound_inclusive() {
        let rules = vec![make_rule(1, 1, Some(5), &[(10, 1)])];
        assert!(select_packaging_rule(&rules, 5).is_some());
        assert!(select_packaging_rule(&rules, 6).is_none());
    }

    #[test]
    fn test_default_rule_fallback() {
        let mut fallback = make_rule(9, 1, Some(1), &[(10, 1)]);
        fallback.is_default = true;
        let rules = vec![make_rule(1, 1, Some(5), &[(11, 2)]), fallback];
        // 50 cards is outside every range; the default steps in
        let rule = select_packaging_rule(&rules, 50).unwrap();
        assert_eq!(rule.id, Uuid::from_u128(9));
    }

    #[test]
    fn test_invalid_card_count() {
        let rules = vec![make_rule(1, 1, None, &[(10, 1)])];
        assert!(select_packaging_rule(&rules, 0).is_none());
        assert!(select_packaging_rule(&rules, -3).is_none());
    }

    #[test]
    fn test_suggest_consumables_joins_catalog_costs() {
        let rules = vec![make_rule(1, 1, None, &[(10, 1), (11, 2)])];
        let catalog = vec![make_consumable(10, 45), make_consumable(11, 15)];
        let selections = suggest_consumables(&rules, &catalog, 3);
        assert_eq!(selections.len(), 2);
        assert_eq!(selections[0].unit_cost_pence, 45);
        assert_eq!(selections[0].qty, 1);
        assert_eq!(selections[1].unit_cost_pence, 15);
        assert_eq!(selections[1].qty, 2);
    }

    #[test]
    fn test_suggest_keeps_uncatalogued_item_at_zero_cost() {
        let rules = vec![make_rule(1, 1, None, &[(10, 1), (99, 1)])];
        let catalog = vec![make_consumable(10, 45)];
        let selections = suggest_consumables(&rules, &catalog, 3);
        assert_eq!(selections.len(), 2);
        assert_eq!(selections[1].consumable_id, Uuid::from_u128(99));
        assert_eq!(selections[1].unit_cost_pence, 0);
    }

    #[test]
    fn test_suggest_empty_without_matching_rule() {
        let rules = vec![make_rule(1, 10, None, &[(10, 1)])];
        assert!(suggest_consumables(&rules, &[], 3).is_empty());
        assert!(suggest_consumables(&[], &[], 3).is_empty());
    }
}
