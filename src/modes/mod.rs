pub mod human;

pub use human::{GridSizing, HumanMode};
