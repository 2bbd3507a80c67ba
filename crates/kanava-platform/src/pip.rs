#![forbid(unsafe_code)]

use async_trait::async_trait;

use crate::error::PlatformResult;

/// Picture-in-Picture host bound to one media element.
///
/// The platform allows at most one PiP target system-wide, so the trait
/// distinguishes "this element is the target" from "some element is".
/// Implementations publish [`kanava_events::MediaEvent::EnteredPictureInPicture`]
/// and [`LeftPictureInPicture`] on the session bus as the element's PiP
/// membership changes.
///
/// [`LeftPictureInPicture`]: kanava_events::MediaEvent::LeftPictureInPicture
#[async_trait]
pub trait PipHost: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    /// Whether the bound element is the current system PiP target.
    fn is_active_target(&self) -> bool;

    /// Whether any element is a PiP target system-wide.
    fn has_active_target(&self) -> bool;

    /// Request PiP for the bound element.
    async fn request(&self) -> PlatformResult<()>;

    /// Exit whatever PiP session is active, regardless of which element
    /// holds it.
    async fn exit(&self) -> PlatformResult<()>;
}
