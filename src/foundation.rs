//! Foundation model states carried by configuration messages.
use core::convert::TryFrom;

#[derive(Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash, Debug)]
pub struct FoundationStateError(pub ());

/// GATT Proxy feature state of a node. `ConfigGATTProxySet` only sends
/// `Disabled`/`Enabled`; `NotSupported` shows up in statuses.
#[derive(Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum GATTProxyState {
    Disabled = 0x00,
    Enabled = 0x01,
    NotSupported = 0x02,
}
impl From<GATTProxyState> for u8 {
    #[must_use]
    fn from(state: GATTProxyState) -> Self {
        state as u8
    }
}
impl TryFrom<u8> for GATTProxyState {
    type Error = FoundationStateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(GATTProxyState::Disabled),
            0x01 => Ok(GATTProxyState::Enabled),
            0x02 => Ok(GATTProxyState::NotSupported),
            _ => Err(FoundationStateError(())),
        }
    }
}
impl Default for GATTProxyState {
    fn default() -> Self {
        GATTProxyState::Disabled
    }
}

/// Status code of a Scene Register Status message.
#[derive(Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SceneStatusCode {
    Success = 0x00,
    SceneRegisterFull = 0x01,
    SceneNotFound = 0x02,
}
impl From<SceneStatusCode> for u8 {
    #[must_use]
    fn from(code: SceneStatusCode) -> Self {
        code as u8
    }
}
impl TryFrom<u8> for SceneStatusCode {
    type Error = FoundationStateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(SceneStatusCode::Success),
            0x01 => Ok(SceneStatusCode::SceneRegisterFull),
            0x02 => Ok(SceneStatusCode::SceneNotFound),
            _ => Err(FoundationStateError(())),
        }
    }
}
