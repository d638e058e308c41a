use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    /// Jump on land, dive or ascend in water
    Jump,
    Sprint,
    HoldBreath,
    SwimUp,
    SwimDown,
    ToggleCursor,
}
