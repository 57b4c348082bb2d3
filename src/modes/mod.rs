pub mod clock;
pub mod human;

pub use clock::StepClock;
pub use human::HumanMode;
