//! Domain Models - The vocabulary of gridbot
//!
//! Grid and Position are two views of the same fact: where the robot is.
//! Nothing outside this module can make them disagree.

pub mod direction;
pub mod grid;
pub mod position;
pub mod session;
