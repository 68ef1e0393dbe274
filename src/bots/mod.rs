pub mod easy;
pub mod hard;
pub mod human;
pub mod random;
pub mod registry;
pub(crate) mod rules;
pub mod seven_zero;

pub use easy::EasyBot;
pub use hard::HardBot;
pub use human::HumanBot;
pub use random::RandomBot;
pub use seven_zero::SevenZeroBot;
