//! Asset bindings the player controller plays and emits.

use std::sync::Arc;

use log::info;

use crate::fsm::{ArmsState, LegsState, RotationState};
use crate::resources::assetregistry::{ActionBinding, AssetRegistry, AudioClip};

pub const CHARACTER_MODEL: &str = "CerealArmature";

#[derive(Debug, Clone)]
pub struct PlayerAssets {
    pub legs_run: ActionBinding,
    pub arms_run: ActionBinding,
    pub legs_idle: ActionBinding,
    pub arms_idle: ActionBinding,
    pub legs_turn_back: ActionBinding,
    pub legs_turn_forward: ActionBinding,
    pub legs_facing_forward: ActionBinding,
    pub legs_facing_back: ActionBinding,
    pub legs_falling: ActionBinding,
    pub legs_fast_falling: ActionBinding,
    pub legs_hanging: ActionBinding,
    pub arms_hanging: ActionBinding,
    pub arms_launch: ActionBinding,
    pub arms_dying: ActionBinding,
    pub arms_damage_landing: ActionBinding,
    pub legs_damage_landing: ActionBinding,
    pub footsteps: Vec<AudioClip>,
    pub damage_impact: AudioClip,
}

impl PlayerAssets {
    /// Resolve every action and clip by name. Fails on the first missing one.
    pub fn configure(registry: &AssetRegistry) -> Result<Self, String> {
        if !registry.has_model(CHARACTER_MODEL) {
            return Err(format!("Missing character model '{}'", CHARACTER_MODEL));
        }
        let footsteps = ["Footstep01", "Footstep02", "Footstep03", "Footstep04"]
            .iter()
            .map(|name| registry.audio_clip(name))
            .collect::<Result<Vec<_>, _>>()?;

        let assets = Self {
            legs_run: registry.action("LegsRun")?,
            arms_run: registry.action("ArmsRun")?,
            legs_idle: registry.action("LegsIdle")?,
            arms_idle: registry.action("ArmsIdle")?,
            legs_turn_back: registry.action("LegsTurnBack")?,
            legs_turn_forward: registry.action("LegsTurnForward")?,
            legs_facing_forward: registry.action("LegsFacingForward")?,
            legs_facing_back: registry.action("LegsFacingBack")?,
            legs_falling: registry.action("LegsFalling")?,
            legs_fast_falling: registry.action("LegsFastFalling")?,
            legs_hanging: registry.action("LegsHanging")?,
            arms_hanging: registry.action("ArmsHanging")?,
            arms_launch: registry.action("ArmsLaunch")?,
            arms_dying: registry.action("ArmsDying")?,
            arms_damage_landing: registry.action("ArmsDamageLanding")?,
            legs_damage_landing: registry.action("LegsDamageLanding")?,
            footsteps,
            damage_impact: registry.audio_clip("DamageImpact")?,
        };
        info!("Player assets configured");
        Ok(assets)
    }

    pub fn legs_action(&self, state: LegsState) -> Option<&ActionBinding> {
        match state {
            LegsState::Running => Some(&self.legs_run),
            LegsState::Idle => Some(&self.legs_idle),
            LegsState::Falling => Some(&self.legs_falling),
            LegsState::FastFalling => Some(&self.legs_fast_falling),
            LegsState::Hanging => Some(&self.legs_hanging),
            LegsState::ImpactDamage => Some(&self.legs_damage_landing),
            LegsState::Undefined => None,
        }
    }

    pub fn arms_action(&self, state: ArmsState) -> Option<&ActionBinding> {
        match state {
            ArmsState::Idle => Some(&self.arms_idle),
            ArmsState::Running => Some(&self.arms_run),
            ArmsState::Hanging => Some(&self.arms_hanging),
            ArmsState::ImpactDamage => Some(&self.arms_damage_landing),
            ArmsState::Launching => Some(&self.arms_launch),
            ArmsState::Dying => Some(&self.arms_dying),
            ArmsState::Undefined => None,
        }
    }

    pub fn rotation_action(&self, state: RotationState) -> Option<&ActionBinding> {
        match state {
            RotationState::Forward => Some(&self.legs_facing_forward),
            RotationState::Back => Some(&self.legs_facing_back),
            RotationState::TurningBack => Some(&self.legs_turn_back),
            RotationState::TurningForward => Some(&self.legs_turn_forward),
            RotationState::Undefined => None,
        }
    }

    pub fn random_footstep(&self) -> Option<Arc<str>> {
        if self.footsteps.is_empty() {
            return None;
        }
        let index = fastrand::usize(..self.footsteps.len());
        Some(self.footsteps[index].name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_resolves_defaults() {
        let assets = PlayerAssets::configure(&AssetRegistry::with_defaults()).expect("defaults");
        assert_eq!(assets.footsteps.len(), 4);
        assert_eq!(&*assets.legs_run.name, "LegsRun");
        assert_eq!(
            assets.arms_action(ArmsState::Dying).map(|a| a.id),
            Some(assets.arms_dying.id)
        );
        assert!(assets.legs_action(LegsState::Undefined).is_none());
    }

    #[test]
    fn configure_reports_missing_action() {
        let mut registry = AssetRegistry::new();
        registry.register_model(CHARACTER_MODEL);
        let err = PlayerAssets::configure(&registry).unwrap_err();
        assert!(err.starts_with("Missing"));
    }

    #[test]
    fn configure_requires_character_model() {
        let err = PlayerAssets::configure(&AssetRegistry::new()).unwrap_err();
        assert!(err.contains(CHARACTER_MODEL));
    }

    #[test]
    fn footsteps_come_from_the_four_clips() {
        let assets = PlayerAssets::configure(&AssetRegistry::with_defaults()).expect("defaults");
        for _ in 0..20 {
            let clip = assets.random_footstep().expect("clip");
            assert!(clip.starts_with("Footstep0"));
        }
    }
}
