//! One reward shaper per scenario

pub mod arms_dealer;
pub mod chainsaw;
pub mod floor_is_lava;
pub mod health_gathering;
pub mod hide_and_seek;
pub mod parkour;
pub mod pitfall;
pub mod raise_the_roof;
pub mod run_and_gun;

pub use arms_dealer::{ArmsDealer, ArmsDealerConfig};
pub use chainsaw::{Chainsaw, ChainsawConfig};
pub use floor_is_lava::{FloorIsLava, FloorIsLavaConfig};
pub use health_gathering::{HealthGathering, HealthGatheringConfig};
pub use hide_and_seek::{HideAndSeek, HideAndSeekConfig};
pub use parkour::{Parkour, ParkourConfig};
pub use pitfall::{Pitfall, PitfallConfig};
pub use raise_the_roof::{RaiseTheRoof, RaiseTheRoofConfig};
pub use run_and_gun::{RunAndGun, RunAndGunConfig};
