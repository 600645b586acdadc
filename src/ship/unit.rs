//! Runtime ship: a design brought to life with crew, damage and supplies
//!
//! The design is shared read-only through an `Arc`. Everything that changes
//! in play (hit points, module condition, stores, morale) lives here.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::core::config::CombatConfig;
use crate::core::types::{FactionId, ShipId};
use crate::design::ship_design::ShipDesign;
use crate::modules::module::{specials, DefenseCategory};
use crate::ship::constants::{ENERGY_PER_POWER, FOOD_PER_CREW};
use crate::ship::damage::Damage;
use crate::ship::status::ModuleStatus;
use crate::ship::supplies::{Magazines, ShipSupplies};
use crate::ship::weapons::{self, VolleyReport};

/// What one hit did to a ship
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HitReport {
    pub shield_absorbed: f32,
    pub armor_absorbed: f32,
    pub hull_damage: f32,
    pub crew_killed: u32,
    pub modules_hit: usize,
    pub destroyed: bool,
}

/// What happened during one ship upkeep turn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShipTurnReport {
    pub fuel_exhausted: bool,
    pub food_shortage: bool,
    pub energy_shortage: bool,
    pub destroyed: bool,
}

/// A combat unit built from a design
#[derive(Debug, Clone)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub faction: FactionId,
    design: Arc<ShipDesign>,

    hit_points: f32,
    shield: f32,
    armor: f32,
    /// 0-100
    integrity: f32,
    crew: u32,
    /// 0-100
    morale: f32,
    /// 0-100, derived each turn
    readiness: f32,
    fuel: f32,
    in_combat: bool,
    moving: bool,
    /// 0-1, share of last turn's energy need that was met
    energy_sufficiency: f32,
    destroyed: bool,

    statuses: Vec<ModuleStatus>,
    magazines: Magazines,
    supplies: ShipSupplies,
}

impl Ship {
    /// Fresh ship at full strength
    pub fn new(name: impl Into<String>, design: Arc<ShipDesign>, faction: FactionId) -> Self {
        let stats = *design.stats();
        let statuses = (0..design.modules().len()).map(ModuleStatus::new).collect();
        let magazines = Magazines::for_design(&design);
        let supplies = ShipSupplies::for_design(&design, FOOD_PER_CREW, ENERGY_PER_POWER);

        Self {
            id: ShipId::new(),
            name: name.into(),
            faction,
            design,
            hit_points: stats.hit_points,
            shield: stats.shield,
            armor: stats.armor,
            integrity: 100.0,
            crew: stats.crew_capacity,
            morale: 100.0,
            readiness: 100.0,
            fuel: stats.fuel_capacity,
            in_combat: false,
            moving: false,
            energy_sufficiency: 1.0,
            destroyed: false,
            statuses,
            magazines,
            supplies,
        }
    }

    // === DAMAGE ===

    /// Resolve one incoming hit through shield, armor and hull
    pub fn take_damage<R: Rng + ?Sized>(
        &mut self,
        damage: &Damage,
        config: &CombatConfig,
        rng: &mut R,
    ) -> HitReport {
        let mut report = HitReport::default();
        if self.destroyed {
            report.destroyed = true;
            return report;
        }

        self.in_combat = true;
        let mut remaining = damage.amount.max(0.0);

        // Shield
        let absorbed = remaining.min(self.shield);
        self.shield -= absorbed;
        remaining -= absorbed;
        report.shield_absorbed = absorbed;

        // Armor
        if remaining > 0.0 && self.armor > 0.0 {
            let armor_damage = remaining.min(self.armor);
            self.armor -= armor_damage;
            remaining -= armor_damage;
            report.armor_absorbed = armor_damage;

            if armor_damage > config.armor_module_damage_threshold * self.armor {
                report.modules_hit +=
                    self.damage_random_modules(armor_damage * config.armor_module_damage_factor, config, rng);
            }
        }

        // Hull
        if remaining > 0.0 {
            let hull_damage = remaining.min(self.hit_points);
            self.hit_points -= hull_damage;
            report.hull_damage = hull_damage;

            let max_hp = self.max_hit_points();
            if max_hp > 0.0 {
                self.integrity =
                    (self.integrity - remaining / max_hp * config.integrity_loss_factor).max(0.0);
            }

            report.modules_hit +=
                self.damage_random_modules(remaining * config.hull_module_damage_factor, config, rng);

            let casualties =
                (remaining / 100.0 * self.crew as f32 * config.crew_casualty_factor).floor() as u32;
            let casualties = casualties.min(self.crew);
            self.crew -= casualties;
            report.crew_killed = casualties;
        }

        tracing::debug!(
            "{} hit for {:.1}: shield {:.1}, armor {:.1}, hull {:.1}",
            self.name,
            damage.amount,
            report.shield_absorbed,
            report.armor_absorbed,
            report.hull_damage
        );

        report.destroyed = self.check_destroyed();
        report
    }

    /// Damage straight to hit points, bypassing shield and armor
    ///
    /// Used by the aggregate resolvers. Returns the amount absorbed, which
    /// never exceeds the remaining hit points.
    pub fn take_direct_damage(&mut self, amount: f32) -> f32 {
        if self.destroyed || amount <= 0.0 {
            return 0.0;
        }
        self.in_combat = true;
        let absorbed = amount.min(self.hit_points);
        self.hit_points -= absorbed;
        self.check_destroyed();
        absorbed
    }

    /// Damage 1-3 distinct modules, each by `magnitude` times a random spread
    fn damage_random_modules<R: Rng + ?Sized>(
        &mut self,
        magnitude: f32,
        config: &CombatConfig,
        rng: &mut R,
    ) -> usize {
        if magnitude <= 0.0 || self.statuses.is_empty() {
            return 0;
        }

        let count = rng
            .gen_range(config.module_hits_min..=config.module_hits_max)
            .min(self.statuses.len());
        let picked = rand::seq::index::sample(rng, self.statuses.len(), count);
        for idx in picked.iter() {
            let spread =
                rng.gen_range(config.module_damage_variance_min..=config.module_damage_variance_max);
            self.statuses[idx].damage(magnitude * spread);
        }
        count
    }

    fn check_destroyed(&mut self) -> bool {
        if !self.destroyed
            && (self.hit_points <= 0.0 || self.integrity <= 0.0 || self.crew == 0)
        {
            self.destroyed = true;
            tracing::info!("{} ({}) destroyed", self.name, self.faction);
        }
        self.destroyed
    }

    // === FIRE ===

    /// Fire every active weapon once at `target`
    ///
    /// Ammunition is spent per attempt, hit or miss.
    pub fn fire_at<R: Rng + ?Sized>(
        &mut self,
        target: &mut Ship,
        distance: f32,
        config: &CombatConfig,
        rng: &mut R,
    ) -> VolleyReport {
        let mut report = VolleyReport::default();
        if self.destroyed || target.destroyed {
            return report;
        }

        self.in_combat = true;
        let design = Arc::clone(&self.design);
        let readiness = self.readiness;
        let target_evasion = target.evasion();

        for (idx, spec) in design.weapons() {
            let effectiveness = self.module_effectiveness(idx);
            if effectiveness <= 0.0 {
                continue;
            }

            if let Some(ammo) = &spec.ammo {
                if !self.magazines.take(ammo.kind, ammo.per_shot) {
                    report.dry += 1;
                    continue;
                }
            }

            report.shots += 1;
            let chance = match weapons::hit_chance(spec, effectiveness, distance, target_evasion, config) {
                Some(chance) => chance,
                None => {
                    report.out_of_range += 1;
                    report.misses += 1;
                    continue;
                }
            };

            if rng.gen::<f32>() >= chance {
                report.misses += 1;
                continue;
            }

            report.hits += 1;
            let damage = weapons::shot_damage(spec, effectiveness, readiness);
            report.damage_sent += damage.amount;

            let hit = target.take_damage(&damage, config, rng);
            report.shield_absorbed += hit.shield_absorbed;
            report.armor_absorbed += hit.armor_absorbed;
            report.hull_damage += hit.hull_damage;
            report.crew_killed += hit.crew_killed;

            if hit.destroyed {
                report.target_destroyed = true;
                break;
            }
        }

        report
    }

    /// Expected damage per turn across all working weapons
    pub fn damage_output(&self) -> f32 {
        if self.destroyed {
            return 0.0;
        }
        self.design
            .weapons()
            .map(|(idx, spec)| {
                weapons::sustained_output(spec, self.module_effectiveness(idx), self.readiness)
            })
            .sum()
    }

    // === TURN ===

    /// Per-turn upkeep: recovery, consumption, morale and readiness
    pub fn turn(&mut self, config: &CombatConfig) -> ShipTurnReport {
        let mut report = ShipTurnReport::default();
        if self.destroyed {
            report.destroyed = true;
            return report;
        }

        let crew_ratio = self.crew_ratio();

        if !self.in_combat {
            self.recharge_defenses();
            self.integrity = (self.integrity
                + config.integrity_recovery_rate * crew_ratio * self.morale / 100.0)
                .min(100.0);
        }

        if self.moving {
            self.fuel -= self.design.fuel_consumption();
            if self.fuel <= 0.0 {
                self.fuel = 0.0;
                self.moving = false;
                report.fuel_exhausted = true;
            }
        }

        let draw = self.supplies.consume(
            self.crew as f32 * config.food_per_crew,
            self.design.power_draw() * config.energy_per_power,
        );
        if draw.food_shortage() {
            self.morale -= config.food_shortage_morale_penalty * (1.0 - draw.food_ratio);
            report.food_shortage = true;
        }
        self.energy_sufficiency = draw.energy_ratio;

        let mut target = crew_ratio * 30.0 + self.integrity / 100.0 * 30.0 + draw.food_ratio * 40.0;
        if self.in_combat {
            target -= config.combat_morale_stress;
        }
        self.morale = (self.morale + (target - self.morale) * config.morale_blend).clamp(0.0, 100.0);

        self.readiness = (self.integrity / 100.0
            * self.morale / 100.0
            * crew_ratio
            * self.energy_sufficiency
            * 100.0)
            .clamp(0.0, 100.0);
        if draw.energy_shortage() {
            report.energy_shortage = true;
            self.apply_readiness_penalty(
                config.energy_shortage_readiness_penalty * (1.0 - draw.energy_ratio),
            );
        }

        if !self.in_combat {
            for status in &mut self.statuses {
                status.repair(config.module_repair_rate);
            }
        }

        report.destroyed = self.check_destroyed();
        self.in_combat = false;
        report
    }

    /// Regenerate shield and armor from defense modules, out of combat only
    fn recharge_defenses(&mut self) {
        let mut shield_rate = 0.0;
        let mut armor_rate = 0.0;
        for (idx, spec) in self.design.defenses() {
            let rate = spec.recharge_rate * self.module_effectiveness(idx);
            match spec.category {
                DefenseCategory::Shield => shield_rate += rate,
                DefenseCategory::Armor => armor_rate += rate,
                DefenseCategory::PointDefense | DefenseCategory::Ecm => {}
            }
        }

        let factor = self.energy_sufficiency * self.integrity / 100.0;
        let stats = self.design.stats();
        self.shield = (self.shield + shield_rate * factor).min(stats.shield);
        self.armor = (self.armor + armor_rate * factor).min(stats.armor);
    }

    // === LOGISTICS ===

    /// Load food and energy, returning what fit
    pub fn resupply(&mut self, food: f32, energy: f32) -> (f32, f32) {
        self.supplies.resupply(food, energy)
    }

    /// Add fuel up to capacity, returning what fit
    pub fn refuel(&mut self, amount: f32) -> f32 {
        let loaded = amount.max(0.0).min(self.max_fuel() - self.fuel);
        self.fuel += loaded;
        loaded
    }

    /// Refill every magazine
    pub fn rearm(&mut self) {
        self.magazines.refill();
    }

    /// Restore hit points (dockyard work), returning what was restored
    pub fn repair_hull(&mut self, amount: f32) -> f32 {
        if self.destroyed {
            return 0.0;
        }
        let restored = amount.max(0.0).min(self.max_hit_points() - self.hit_points);
        self.hit_points += restored;
        restored
    }

    pub fn apply_morale_penalty(&mut self, amount: f32) {
        self.morale = (self.morale - amount).clamp(0.0, 100.0);
    }

    pub fn apply_readiness_penalty(&mut self, amount: f32) {
        self.readiness = (self.readiness - amount).clamp(0.0, 100.0);
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving && self.fuel > 0.0;
    }

    // === ACCESSORS ===

    pub fn design(&self) -> &Arc<ShipDesign> {
        &self.design
    }

    pub fn hit_points(&self) -> f32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> f32 {
        self.design.stats().hit_points
    }

    pub fn shield(&self) -> f32 {
        self.shield
    }

    pub fn armor(&self) -> f32 {
        self.armor
    }

    pub fn integrity(&self) -> f32 {
        self.integrity
    }

    pub fn crew(&self) -> u32 {
        self.crew
    }

    pub fn crew_ratio(&self) -> f32 {
        let capacity = self.design.stats().crew_capacity;
        if capacity == 0 {
            return 0.0;
        }
        (self.crew as f32 / capacity as f32).min(1.0)
    }

    pub fn morale(&self) -> f32 {
        self.morale
    }

    pub fn readiness(&self) -> f32 {
        self.readiness
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn max_fuel(&self) -> f32 {
        self.design.stats().fuel_capacity
    }

    pub fn evasion(&self) -> f32 {
        self.design.stats().evasion
    }

    pub fn warp_speed(&self) -> f32 {
        self.design.stats().warp_speed
    }

    pub fn detection_range(&self) -> f32 {
        self.design.special(specials::DETECTION_RANGE)
    }

    pub fn fuel_burn_rate(&self) -> f32 {
        self.design.fuel_consumption()
    }

    pub fn power_draw(&self) -> f32 {
        self.design.power_draw()
    }

    pub fn energy_sufficiency(&self) -> f32 {
        self.energy_sufficiency
    }

    pub fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn module_statuses(&self) -> &[ModuleStatus] {
        &self.statuses
    }

    pub fn module_effectiveness(&self, index: usize) -> f32 {
        self.statuses.get(index).map_or(0.0, ModuleStatus::effectiveness)
    }

    pub fn magazines(&self) -> &Magazines {
        &self.magazines
    }

    pub fn supplies(&self) -> &ShipSupplies {
        &self.supplies
    }

    pub fn health_percentage(&self) -> f32 {
        let max_hp = self.max_hit_points();
        if max_hp <= 0.0 {
            return 0.0;
        }
        self.hit_points / max_hp * 100.0
    }

    pub fn status_label(&self) -> &'static str {
        if self.destroyed {
            return "Destroyed";
        }
        match self.health_percentage() {
            h if h < 25.0 => "Critical",
            h if h < 75.0 => "Damaged",
            _ => "Operational",
        }
    }
}
