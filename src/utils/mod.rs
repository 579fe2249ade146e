//! Small helpers shared by the robot and the binary

pub mod path;
pub mod timing;
