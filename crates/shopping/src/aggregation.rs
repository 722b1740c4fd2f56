use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::prelude::FromRow;

/// One ingredient amount of a recipe in the cart.
#[derive(Debug, Clone, FromRow)]
pub struct IngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: u64,
}

/// Sums amounts per (name, measurement unit), ordered by name then unit.
pub fn aggregate(lines: impl IntoIterator<Item = IngredientLine>) -> Vec<ShoppingItem> {
    let mut groups = BTreeMap::<(String, String), u64>::new();

    for line in lines {
        *groups
            .entry((line.name, line.measurement_unit))
            .or_default() += u64::from(line.amount);
    }

    groups
        .into_iter()
        .map(|((name, measurement_unit), total)| ShoppingItem {
            name,
            measurement_unit,
            total,
        })
        .collect()
}

/// Plain text shopping list, one `"{name} ({unit}) — {total}"` line per item.
pub fn render(items: &[ShoppingItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} ({}) — {}", item.name, item.measurement_unit, item.total))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, unit: &str, amount: u32) -> IngredientLine {
        IngredientLine {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
            amount,
        }
    }

    #[test]
    fn sums_same_ingredient_and_unit() {
        let items = aggregate(vec![line("Flour", "g", 200), line("Flour", "g", 300)]);
        assert_eq!(render(&items), "Flour (g) — 500");
    }

    #[test]
    fn keeps_units_apart() {
        let items = aggregate(vec![
            line("Milk", "ml", 200),
            line("Milk", "cup", 1),
            line("Milk", "ml", 50),
        ]);

        assert_eq!(render(&items), "Milk (cup) — 1\nMilk (ml) — 250");
    }

    #[test]
    fn sorts_by_name() {
        let items = aggregate(vec![
            line("Sugar", "g", 10),
            line("Apple", "pcs", 2),
            line("Eggs", "pcs", 3),
        ]);

        let names = items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Apple", "Eggs", "Sugar"]);
    }

    #[test]
    fn empty_cart_renders_empty_text() {
        assert!(aggregate(vec![]).is_empty());
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn totals_do_not_overflow_u32() {
        let items = aggregate(vec![line("Salt", "g", u32::MAX), line("Salt", "g", 1)]);
        assert_eq!(items[0].total, u64::from(u32::MAX) + 1);
    }
}
