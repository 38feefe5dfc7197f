//! Turn resolution: type chart, hit checks, damage, and status handling.

pub mod damage;
pub mod effectiveness;
pub mod hit;
pub mod resolver;
pub mod result;
pub mod status;

pub use damage::{DamageInput, calculate_damage, residual_damage};
pub use effectiveness::{effectiveness, effectiveness_by_name};
pub use hit::{check_accuracy, check_critical, check_dodge};
pub use resolver::resolve_turn;
pub use result::{BattleEvent, TurnReport};
pub use status::{GateOutcome, roll_infliction, status_gate};
