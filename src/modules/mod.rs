//! Module catalog: composable ship parts and their stat contributions

pub mod catalog;
pub mod module;
pub mod stats;

pub use catalog::ModuleCatalog;
pub use module::{
    specials, AmmoKind, AmmoSpec, DefenseCategory, DefenseSpec, EngineSpec, HullSpec, Module,
    ModuleKind, ModuleVariant, PowerSpec, UtilityCategory, UtilitySpec, WeaponCategory,
    WeaponSpec,
};
pub use stats::StatBlock;
