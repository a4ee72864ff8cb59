//! Keyword taxonomy mapping from a free-text title to a (category,
//! intent) pair. Group order is the tie-break: the first group with any
//! keyword hit wins, so earlier niches outrank later ones on overlapping
//! titles.

use crate::domain::values::category::{NicheCategory, ProductIntent};
use serde::Serialize;

/// One niche with its trigger keywords.
#[derive(Debug, Clone)]
pub struct KeywordGroup {
    pub category: NicheCategory,
    pub intent: ProductIntent,
    pub keywords: Vec<String>,
}

/// Result of mapping a title. `matched` is false for the generic
/// commercial bucket and the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMatch {
    pub category: NicheCategory,
    pub intent: ProductIntent,
    pub matched: bool,
}

/// Maps titles into the niche taxonomy. The keyword lists are data, not
/// logic: swap them via [`CategoryMapper::with_groups`] without touching
/// the matching algorithm.
pub struct CategoryMapper {
    groups: Vec<KeywordGroup>,
    commercial_triggers: Vec<String>,
}

fn group(category: NicheCategory, intent: ProductIntent, keywords: &[&str]) -> KeywordGroup {
    KeywordGroup {
        category,
        intent,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self {
            groups: vec![
                group(
                    NicheCategory::Beauty,
                    ProductIntent::Skincare,
                    &[
                        "serum", "skin", "glow", "wrinkle", "acne", "face", "korean", "sunscreen",
                        "moisturizer", "retinol", "collagen", "niacinamide", "vitamin c",
                        "hyaluronic",
                    ],
                ),
                group(
                    NicheCategory::Haircare,
                    ProductIntent::Haircare,
                    &[
                        "hair", "frizz", "dry hair", "keratin", "curl", "straightener",
                        "leave in", "hair oil",
                    ],
                ),
                group(
                    NicheCategory::MassageDevices,
                    ProductIntent::PainRelief,
                    &[
                        "massage", "tension", "back", "neck", "muscle", "sciatica", "relief",
                        "massager", "gun",
                    ],
                ),
                group(
                    NicheCategory::Pets,
                    ProductIntent::Pets,
                    &[
                        "cat", "dog", "pet", "fur", "bark", "scratching", "litter",
                        "automatic feeder",
                    ],
                ),
                group(
                    NicheCategory::SmartHome,
                    ProductIntent::HomeCleaning,
                    &[
                        "vacuum", "robot", "cleaner", "mop", "smart", "air purifier", "camera",
                        "security", "doorbell",
                    ],
                ),
                group(
                    NicheCategory::Kitchen,
                    ProductIntent::Cooking,
                    &[
                        "kitchen", "cook", "air fryer", "blender", "coffee", "juicer", "knife",
                        "nonstick",
                    ],
                ),
                group(
                    NicheCategory::Fitness,
                    ProductIntent::Fitness,
                    &[
                        "fitness", "gym", "exercise", "workout", "dumbbell", "yoga", "pilates",
                        "resistance band",
                    ],
                ),
                group(
                    NicheCategory::Gadgets,
                    ProductIntent::Tech,
                    &[
                        "gadget", "device", "projector", "mini projector", "tech", "smartwatch",
                        "charger", "usb", "led",
                    ],
                ),
            ],
            commercial_triggers: ["best", "deal", "review", "amazon", "viral", "trending"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl CategoryMapper {
    pub fn with_groups(groups: Vec<KeywordGroup>, commercial_triggers: Vec<String>) -> Self {
        Self {
            groups,
            commercial_triggers,
        }
    }

    /// Map a title to its niche. Evaluation order is fixed: direct
    /// identifier prefix, keyword groups in list order (short-circuit on
    /// the first hit), commercial triggers, fallback.
    pub fn map(&self, title: &str) -> CategoryMatch {
        let cleaned = clean_title(title);

        if cleaned.is_empty() {
            return CategoryMatch {
                category: NicheCategory::General,
                intent: ProductIntent::None,
                matched: false,
            };
        }

        if cleaned.starts_with("asin") {
            return CategoryMatch {
                category: NicheCategory::General,
                intent: ProductIntent::AmazonProduct,
                matched: true,
            };
        }

        for g in &self.groups {
            if g.keywords.iter().any(|k| cleaned.contains(k.as_str())) {
                return CategoryMatch {
                    category: g.category,
                    intent: g.intent,
                    matched: true,
                };
            }
        }

        if self
            .commercial_triggers
            .iter()
            .any(|k| cleaned.contains(k.as_str()))
        {
            return CategoryMatch {
                category: NicheCategory::General,
                intent: ProductIntent::Commercial,
                matched: false,
            };
        }

        CategoryMatch {
            category: NicheCategory::General,
            intent: ProductIntent::None,
            matched: false,
        }
    }
}

/// Lowercase and strip everything but ascii alphanumerics and spaces.
fn clean_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
