use std::sync::Arc;

use kanava_core::{Channel, ChannelDirectory, ChannelId, StreamKind};
use tracing::debug;

use crate::types::SwipeDirection;

/// Which ordered channel list next/previous operate over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Full catalog order.
    All,
    /// One category, in catalog order.
    Category(String),
}

/// List context carried through every channel switch so wrap-around keeps
/// operating on the same list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationContext {
    pub list: ListKind,
}

impl NavigationContext {
    #[must_use]
    pub fn all() -> Self {
        Self {
            list: ListKind::All,
        }
    }

    #[must_use]
    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            list: ListKind::Category(slug.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Next,
    Previous,
}

/// Request to switch the watch view to another channel.
///
/// The player core only computes the target; the host owns the actual
/// navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    pub channel: ChannelId,
    pub context: NavigationContext,
}

/// Computes next/previous channels within a navigation context.
pub struct NavigationCoordinator {
    directory: Arc<dyn ChannelDirectory>,
    context: NavigationContext,
}

impl NavigationCoordinator {
    #[must_use]
    pub fn new(directory: Arc<dyn ChannelDirectory>, context: NavigationContext) -> Self {
        Self { directory, context }
    }

    #[must_use]
    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    fn list(&self) -> Vec<Channel> {
        match &self.context.list {
            ListKind::All => self.directory.channels(None),
            ListKind::Category(slug) => self.directory.channels(Some(slug)),
        }
    }

    /// Compute the wrap-around neighbor of `current`.
    ///
    /// Returns `None` — no navigation — when `current` is not in the
    /// computed list (stale list context) or the list is empty.
    #[must_use]
    pub fn target(&self, current: &ChannelId, direction: NavDirection) -> Option<NavigationRequest> {
        let list = self.list();
        let len = list.len();
        let Some(index) = list.iter().position(|c| &c.id == current) else {
            debug!(channel = %current, "current channel absent from list context; not navigating");
            return None;
        };
        let next = match direction {
            NavDirection::Next => (index + 1) % len,
            NavDirection::Previous => (index + len - 1) % len,
        };
        Some(NavigationRequest {
            channel: list[next].id.clone(),
            context: self.context.clone(),
        })
    }

    /// Map a swipe gesture onto navigation.
    ///
    /// Swipe-left moves forward, swipe-right backward. Disabled entirely
    /// for iframe channels: the embedded player is opaque, so gestures over
    /// it cannot be trusted.
    #[must_use]
    pub fn swipe_target(
        &self,
        current: &Channel,
        direction: SwipeDirection,
    ) -> Option<NavigationRequest> {
        if current.kind == StreamKind::Iframe {
            return None;
        }
        let direction = match direction {
            SwipeDirection::Left => NavDirection::Next,
            SwipeDirection::Right => NavDirection::Previous,
        };
        self.target(&current.id, direction)
    }
}
