//! Immutable startup catalogs: goods, price multipliers, factions, name banks
//!
//! Loaded once at startup and passed by reference into each component.
//! Nothing here is mutated at runtime.

use serde::{Deserialize, Serialize};

use crate::core::types::{Credits, EconomyType};

/// A tradeable good and its baseline economics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Good {
    pub name: String,
    pub base_price: Credits,
    /// Economy category where this good is produced (drives discounts)
    pub home_economy: EconomyType,
    /// Restricted goods trade only where a black market operates
    pub restricted: bool,
}

/// One entry of the (economy, good) -> multiplier price table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierRule {
    pub economy: EconomyType,
    pub good: String,
    pub multiplier: f64,
}

/// Faction roster. The protector faction polices space (no bounties in its
/// territory); the neutral faction posts no missions at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionCatalog {
    pub factions: Vec<String>,
    pub neutral: String,
    pub protector: String,
}

impl FactionCatalog {
    /// Factions a procedural system may roll (everything incl. neutral)
    pub fn spawnable(&self) -> &[String] {
        &self.factions
    }
}

/// Word banks for procedural system names (prefix + suffix concatenation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameBanks {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

/// All read-only startup data bundled together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogs {
    pub goods: Vec<Good>,
    pub multipliers: Vec<MultiplierRule>,
    pub factions: FactionCatalog,
    pub name_banks: NameBanks,
    pub pirate_names: Vec<String>,
}

impl Catalogs {
    pub fn get_good(&self, name: &str) -> Option<&Good> {
        self.goods.iter().find(|g| g.name == name)
    }

    pub fn base_price(&self, name: &str) -> Option<Credits> {
        self.get_good(name).map(|g| g.base_price)
    }

    pub fn legal_goods(&self) -> impl Iterator<Item = &Good> {
        self.goods.iter().filter(|g| !g.restricted)
    }

    pub fn restricted_goods(&self) -> impl Iterator<Item = &Good> {
        self.goods.iter().filter(|g| g.restricted)
    }

    /// Price multiplier for a good in a given economy.
    ///
    /// Matching home economies discount (<1.0), listed mismatches mark up
    /// (>1.0), every unlisted pair is exactly 1.0.
    pub fn economy_multiplier(&self, economy: EconomyType, good: &str) -> f64 {
        self.multipliers
            .iter()
            .find(|r| r.economy == economy && r.good == good)
            .map(|r| r.multiplier)
            .unwrap_or(1.0)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        let good = |name: &str, base_price: Credits, home: EconomyType, restricted: bool| Good {
            name: name.to_string(),
            base_price,
            home_economy: home,
            restricted,
        };
        let rule = |economy: EconomyType, good: &str, multiplier: f64| MultiplierRule {
            economy,
            good: good.to_string(),
            multiplier,
        };

        Self {
            goods: vec![
                good("Food", 40, EconomyType::Agricultural, false),
                good("Textiles", 60, EconomyType::Agricultural, false),
                good("Ore", 80, EconomyType::Mining, false),
                good("Fuel", 70, EconomyType::Mining, false),
                good("Machinery", 150, EconomyType::Industrial, false),
                good("Medicine", 120, EconomyType::HighTech, false),
                good("Electronics", 200, EconomyType::HighTech, false),
                good("Weapons", 250, EconomyType::Industrial, true),
                good("Narcotics", 300, EconomyType::Agricultural, true),
            ],
            multipliers: vec![
                // Home-economy discounts
                rule(EconomyType::Agricultural, "Food", 0.6),
                rule(EconomyType::Agricultural, "Textiles", 0.7),
                rule(EconomyType::Mining, "Ore", 0.65),
                rule(EconomyType::Mining, "Fuel", 0.7),
                rule(EconomyType::Industrial, "Machinery", 0.7),
                rule(EconomyType::HighTech, "Medicine", 0.75),
                rule(EconomyType::HighTech, "Electronics", 0.7),
                // Mismatch markups
                rule(EconomyType::Industrial, "Food", 1.4),
                rule(EconomyType::Mining, "Food", 1.3),
                rule(EconomyType::Agricultural, "Machinery", 1.3),
                rule(EconomyType::Agricultural, "Electronics", 1.4),
                rule(EconomyType::Mining, "Medicine", 1.35),
                rule(EconomyType::Industrial, "Ore", 1.25),
            ],
            factions: FactionCatalog {
                factions: vec![
                    "Federation".to_string(),
                    "Consortium".to_string(),
                    "Outer Rim Coalition".to_string(),
                    "Crimson Banner".to_string(),
                    "Unaligned".to_string(),
                ],
                neutral: "Unaligned".to_string(),
                protector: "Federation".to_string(),
            },
            name_banks: NameBanks {
                prefixes: [
                    "Alde", "Bara", "Cyg", "Della", "Eri", "Fomal", "Gany",
                    "Hyper", "Ixi", "Kep", "Lyra", "Mira", "Nym", "Ophi",
                    "Proxi", "Rigel", "Sada", "Tau", "Vela", "Zau",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                suffixes: [
                    "bar", "can", "dar", "gol", "lin", "mus", "nar", "phon",
                    "ris", "thos", "tune", "vax", "wen", "xis", "zar",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            pirate_names: [
                "Redbeard Okonkwo",
                "Mad Vex Tarn",
                "Silent Ghorra",
                "Captain Ixmal",
                "The Widow of Vela",
                "Two-Knife Dmitri",
                "Hollow-Eye Senn",
                "Blackout Reyes",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_pair_defaults_to_one() {
        let catalogs = Catalogs::default();
        assert_eq!(
            catalogs.economy_multiplier(EconomyType::HighTech, "Food"),
            1.0
        );
    }

    #[test]
    fn test_home_economy_discounts() {
        let catalogs = Catalogs::default();
        assert!(catalogs.economy_multiplier(EconomyType::Agricultural, "Food") < 1.0);
        assert!(catalogs.economy_multiplier(EconomyType::Mining, "Ore") < 1.0);
    }

    #[test]
    fn test_mismatch_marks_up() {
        let catalogs = Catalogs::default();
        assert!(catalogs.economy_multiplier(EconomyType::Industrial, "Food") > 1.0);
    }

    #[test]
    fn test_restricted_goods_partition() {
        let catalogs = Catalogs::default();
        assert_eq!(catalogs.legal_goods().count(), 7);
        assert_eq!(catalogs.restricted_goods().count(), 2);
        assert!(catalogs.get_good("Narcotics").unwrap().restricted);
    }

    #[test]
    fn test_base_price_lookup() {
        let catalogs = Catalogs::default();
        assert_eq!(catalogs.base_price("Electronics"), Some(200));
        assert_eq!(catalogs.base_price("Unobtainium"), None);
    }
}
