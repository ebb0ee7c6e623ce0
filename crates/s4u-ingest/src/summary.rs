//! Per-category product counts for the admin category list.

use s4u_core::{Category, CategorySummary, Product};

/// Summarizes every top-level category that has at least one product.
///
/// A category's count includes products filed under any of its direct
/// subcategories. Product categories must equal the category name exactly,
/// so products resolved through a breadcrumb or alias (upper-cased names)
/// only count toward a category spelled the same way.
#[must_use]
pub fn summarize_categories(categories: &[Category], products: &[Product]) -> Vec<CategorySummary> {
    let count_named = |name: &str| {
        products
            .iter()
            .filter(|p| p.category == name)
            .count()
    };

    categories
        .iter()
        .filter(|c| c.is_top_level())
        .filter_map(|parent| {
            let children: Vec<&Category> = categories
                .iter()
                .filter(|c| c.parent == parent.id)
                .collect();
            let product_count = count_named(&parent.name)
                + children.iter().map(|c| count_named(&c.name)).sum::<usize>();

            (product_count > 0).then(|| CategorySummary {
                category: parent.clone(),
                product_count,
                subcategory_count: children.len(),
            })
        })
        .collect()
}
