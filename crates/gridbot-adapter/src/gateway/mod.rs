//! Outbound Adapters - What the robot talks to

pub mod clock;
