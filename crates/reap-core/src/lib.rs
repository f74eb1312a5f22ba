//! Right-click harvesting of crops in a voxel world.
//!
//! On a qualifying interaction the engine checks that the clicked crop is
//! fully grown, harvests it (drops minus one seed, age reset), and, when the
//! held tool is of a high enough tier, repeats the process over a square
//! area around it. External listeners observe and steer every step through
//! the buses in [`reap_events`].
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `reap-config.yaml` into
//!   strongly-typed structs.
//! - [`tier`] -- [`TierResolver`]: tool tier levels and the multi-harvest
//!   threshold.
//! - [`area`] -- Half-extent computation and the square [`HarvestArea`].
//! - [`quirks`] -- Per-crop behavioural overrides.
//! - [`eligibility`] -- [`EligibilityChecker`]: crop recognition, maturity,
//!   and hand selection.
//! - [`drops`] -- Drop computation with seed removal.
//! - [`harvest`] -- [`Harvester`], the interaction orchestrator.
//!
//! [`TierResolver`]: tier::TierResolver
//! [`HarvestArea`]: area::HarvestArea
//! [`EligibilityChecker`]: eligibility::EligibilityChecker
//! [`Harvester`]: harvest::Harvester

pub mod area;
pub mod config;
pub mod drops;
pub mod eligibility;
pub mod harvest;
pub mod quirks;
pub mod tier;

pub use config::{ConfigError, HarvestConfig, ReapConfig};
pub use harvest::{Harvester, HarvestReport, Interaction, InteractionOutcome, PassReason};
