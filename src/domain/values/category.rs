use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product niche a candidate title maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NicheCategory {
    Beauty,
    Haircare,
    MassageDevices,
    Pets,
    SmartHome,
    Kitchen,
    Fitness,
    Gadgets,
    General,
}

impl fmt::Display for NicheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NicheCategory::Beauty => write!(f, "beauty"),
            NicheCategory::Haircare => write!(f, "haircare"),
            NicheCategory::MassageDevices => write!(f, "massage_devices"),
            NicheCategory::Pets => write!(f, "pets"),
            NicheCategory::SmartHome => write!(f, "smart_home"),
            NicheCategory::Kitchen => write!(f, "kitchen"),
            NicheCategory::Fitness => write!(f, "fitness"),
            NicheCategory::Gadgets => write!(f, "gadgets"),
            NicheCategory::General => write!(f, "general"),
        }
    }
}

impl FromStr for NicheCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beauty" => Ok(NicheCategory::Beauty),
            "haircare" => Ok(NicheCategory::Haircare),
            "massage_devices" => Ok(NicheCategory::MassageDevices),
            "pets" => Ok(NicheCategory::Pets),
            "smart_home" => Ok(NicheCategory::SmartHome),
            "kitchen" => Ok(NicheCategory::Kitchen),
            "fitness" => Ok(NicheCategory::Fitness),
            "gadgets" => Ok(NicheCategory::Gadgets),
            "general" => Ok(NicheCategory::General),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}

impl Default for NicheCategory {
    fn default() -> Self {
        NicheCategory::General
    }
}

/// Commercial intent inferred from a candidate title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductIntent {
    Skincare,
    Haircare,
    PainRelief,
    Pets,
    HomeCleaning,
    Cooking,
    Fitness,
    Tech,
    /// Direct marketplace identifier in the title
    AmazonProduct,
    /// Generic commercial trigger words, no niche match
    Commercial,
    None,
}

impl fmt::Display for ProductIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductIntent::Skincare => write!(f, "skincare"),
            ProductIntent::Haircare => write!(f, "haircare"),
            ProductIntent::PainRelief => write!(f, "pain-relief"),
            ProductIntent::Pets => write!(f, "pets"),
            ProductIntent::HomeCleaning => write!(f, "home-cleaning"),
            ProductIntent::Cooking => write!(f, "cooking"),
            ProductIntent::Fitness => write!(f, "fitness"),
            ProductIntent::Tech => write!(f, "tech"),
            ProductIntent::AmazonProduct => write!(f, "amazon-product"),
            ProductIntent::Commercial => write!(f, "commercial"),
            ProductIntent::None => write!(f, "none"),
        }
    }
}

impl FromStr for ProductIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skincare" => Ok(ProductIntent::Skincare),
            "haircare" => Ok(ProductIntent::Haircare),
            "pain-relief" => Ok(ProductIntent::PainRelief),
            "pets" => Ok(ProductIntent::Pets),
            "home-cleaning" => Ok(ProductIntent::HomeCleaning),
            "cooking" => Ok(ProductIntent::Cooking),
            "fitness" => Ok(ProductIntent::Fitness),
            "tech" => Ok(ProductIntent::Tech),
            "amazon-product" => Ok(ProductIntent::AmazonProduct),
            "commercial" => Ok(ProductIntent::Commercial),
            "none" => Ok(ProductIntent::None),
            _ => Err(format!("Unknown product intent: {s}")),
        }
    }
}

impl Default for ProductIntent {
    fn default() -> Self {
        ProductIntent::None
    }
}
