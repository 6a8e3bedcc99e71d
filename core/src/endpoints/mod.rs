//! Endpoint groups.
//!
//! Each submodule holds the `Operation` table for one resource family and a
//! borrowed facade over [`FastPix`](crate::FastPix) that turns typed
//! arguments into a [`Call`](crate::request::Call). The facades hold no state
//! of their own; every method is one remote call.

use crate::http::ApiResponse;
use crate::types::Envelope;

pub mod ai;
pub mod drm;
pub mod live_streams;
pub mod media;
pub mod playback;
pub mod playlists;
pub mod signing_keys;
pub mod simulcast;
pub mod uploads;
pub mod views;

/// What every endpoint method resolves to: the wire response with its
/// `data` envelope decoded.
pub type Response<T> = ApiResponse<Envelope<T>>;

pub use ai::MediaAiEndpoints;
pub use drm::DrmConfigurationEndpoints;
pub use live_streams::LiveStreamEndpoints;
pub use media::MediaEndpoints;
pub use playback::PlaybackEndpoints;
pub use playlists::PlaylistEndpoints;
pub use signing_keys::SigningKeyEndpoints;
pub use simulcast::SimulcastEndpoints;
pub use uploads::UploadEndpoints;
pub use views::ViewEndpoints;
