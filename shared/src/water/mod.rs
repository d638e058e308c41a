//! Swimming.
//!
//! ```text
//!   WaterRegions ──edges──▶ SwimController ◀── Stamina (gates dive/sprint)
//!        ▲                       │
//!   actor position               ├─ buoyancy toward float / hold-breath target
//!                                ├─ dive / ascend on the jump edge
//!                                └─ pointer steering while submerged
//! ```
//!
//! Entering a volume hands control from
//! [`GroundLocomotion`](crate::physics::GroundLocomotion) to the
//! [`SwimController`]; leaving it hands control back.

pub mod pointer;
pub mod stamina;
pub mod swim;
pub mod volume;

pub use pointer::PinholeProjection;
pub use stamina::Stamina;
pub use swim::{SwimController, SwimState};
pub use volume::{WaterMembership, WaterRegions, WaterTransition, WaterVolume};
