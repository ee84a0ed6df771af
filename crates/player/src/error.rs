/// Errors raised by the media backend behind the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// The host refused to start playback (e.g. autoplay blocked).
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// The host refused a fullscreen request.
    #[error("Fullscreen rejected: {0}")]
    FullscreenRejected(String),
}
