//! Category reconciliation against the storefront's top-level navigation.
//!
//! The allow-list and alias table are fixed at compile time; the storefront
//! menu only knows these names.

use std::sync::LazyLock;

use regex::Regex;

/// Category assigned when an export row carries no taxonomy at all.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Top-level categories recognized by the storefront menu, upper-cased.
pub const MAIN_CATEGORIES: [&str; 17] = [
    "ORAL STEROIDS",
    "INJECTABLE STEROIDS",
    "GROWTH HORMONES (HGH) AND PEPTIDES",
    "ANTIESTROGENS AND PCT",
    "ANTIBIOTICS",
    "MEDICAL EQUIPMENTS",
    "STEROID CYCLES",
    "FAT LOSS",
    "SEXUAL HEALTH",
    "ANTIANXIETY, SLEEP AID - INSOMNIA",
    "PAIN KILLERS",
    "LIVER AID",
    "DIURETICS",
    "SARMS",
    "ACNE",
    "HIGH BLOOD PRESSURE",
    "ORIGINAL PHARMACY PRODUCTS",
];

/// Brand and subcategory names that map onto a top-level category.
pub const CATEGORY_ALIASES: [(&str, &str); 2] = [
    ("CANADA PEPTIDES", "GROWTH HORMONES (HGH) AND PEPTIDES"),
    ("PEPTIDES", "GROWTH HORMONES (HGH) AND PEPTIDES"),
];

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid slug regex"));

/// Which rule produced a [`ResolvedCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    /// Candidate equals an allow-listed name, ignoring case.
    Direct,
    /// Candidate is a `Parent > Child` breadcrumb with an allow-listed parent.
    Breadcrumb,
    /// Candidate appears in [`CATEGORY_ALIASES`].
    Alias,
    /// Nothing matched; the first non-empty candidate is used verbatim.
    Fallback,
    /// No candidates at all.
    Uncategorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub name: String,
    pub rule: CategoryRule,
}

/// Resolves a pipe-delimited taxonomy value to one main category.
///
/// Candidates are tried left to right; for each, the direct, breadcrumb and
/// alias rules are checked in that order and the first hit wins. A direct
/// hit keeps the candidate's own casing; breadcrumb and alias hits return
/// the upper-cased allow-list name.
#[must_use]
pub fn resolve_category(taxonomy: Option<&str>) -> ResolvedCategory {
    let Some(taxonomy) = taxonomy.filter(|t| !t.is_empty()) else {
        return ResolvedCategory {
            name: UNCATEGORIZED.to_string(),
            rule: CategoryRule::Uncategorized,
        };
    };

    let candidates: Vec<&str> = taxonomy.split('|').map(str::trim).collect();

    for candidate in &candidates {
        if let Some(resolved) = match_candidate(candidate) {
            return resolved;
        }
    }

    match candidates.iter().find(|c| !c.is_empty()) {
        Some(first) => ResolvedCategory {
            name: (*first).to_string(),
            rule: CategoryRule::Fallback,
        },
        None => ResolvedCategory {
            name: UNCATEGORIZED.to_string(),
            rule: CategoryRule::Uncategorized,
        },
    }
}

fn match_candidate(candidate: &str) -> Option<ResolvedCategory> {
    let upper = candidate.to_uppercase();

    if is_main_category(&upper) {
        return Some(ResolvedCategory {
            name: candidate.to_string(),
            rule: CategoryRule::Direct,
        });
    }

    if let Some((head, _)) = upper.split_once('>') {
        let head = head.trim();
        if is_main_category(head) {
            return Some(ResolvedCategory {
                name: head.to_string(),
                rule: CategoryRule::Breadcrumb,
            });
        }
    }

    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, canonical)| ResolvedCategory {
            name: (*canonical).to_string(),
            rule: CategoryRule::Alias,
        })
}

fn is_main_category(upper: &str) -> bool {
    MAIN_CATEGORIES.contains(&upper)
}

/// URL slug for a category name as used by storefront links, e.g.
/// `"Fat Loss"` → `"fat-loss"`, `"GROWTH HORMONES (HGH) AND PEPTIDES"` →
/// `"growth-hormones-hgh-and-peptides"`.
#[must_use]
pub fn category_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let hyphenated = WHITESPACE_RE.replace_all(&lower, "-");
    NON_SLUG_RE.replace_all(&hyphenated, "").into_owned()
}
