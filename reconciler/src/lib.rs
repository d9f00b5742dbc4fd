//! Reconciler: keeps the user's viewing position stable across live
//! content updates.
//!
//! The reconciler owns the single piece of mutable client state - the
//! last-known position marker - and the rendered surface it is anchored
//! in. It reconciles two kinds of stream events:
//!
//! - a `position` event overwrites the stored marker (last writer wins)
//!   and scrolls its anchor into view;
//! - a `file_changed` event swaps the entire rendered content in one
//!   operation and then re-anchors using the *stored* marker against the
//!   *new* content.
//!
//! The re-anchoring step is the core correctness property: a content swap
//! must not strand the user at the top of the document. The marker is
//! retained independently of the content precisely so it survives the
//! swap - the same document is being re-rendered, so the anchor token
//! stays structurally valid in the new content.
//!
//! All surface access goes through the [`RenderSurface`] capability trait,
//! so the reconciliation logic is testable against an in-memory fake.
//! [`HtmlSurface`] is the concrete surface used by the terminal client.

pub mod surface;

pub use surface::{HtmlAnchor, HtmlSurface, RenderSurface, SurfaceError};

use async_trait::async_trait;
use events::{EventHandler, StreamEvent};
use log::*;
use std::sync::Mutex;

/// Reconciles stream events against a rendered surface.
///
/// One instance per active view. State lives behind a `Mutex` held only
/// for the duration of a single event, matching the stream's
/// one-event-at-a-time handling model.
pub struct Reconciler<S> {
    inner: Mutex<Inner<S>>,
}

struct Inner<S> {
    surface: S,
    sourcepos: Option<String>,
}

impl<S: RenderSurface> Reconciler<S> {
    pub fn new(surface: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                surface,
                sourcepos: None,
            }),
        }
    }

    /// Handles a position update: stores `marker` unconditionally (last
    /// writer wins) and scrolls its anchor into view.
    ///
    /// A marker with no matching anchor is non-fatal: the scroll is
    /// skipped with a warning, but the marker still updates - the surface
    /// may be momentarily out of sync during a race with an in-flight
    /// content swap.
    pub fn on_position(&self, marker: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.sourcepos = Some(marker.to_owned());
        inner.scroll_to(marker);
    }

    /// Handles a content replacement: swaps the full rendered content in a
    /// single operation, then re-anchors to the stored marker, if any,
    /// against the new content.
    ///
    /// A surface without a mount point skips the swap (and the re-anchor)
    /// entirely; the stored marker is retained either way.
    pub fn on_file_changed(&self, html: &str) {
        let mut inner = self.inner.lock().unwrap();

        if let Err(e) = inner.surface.replace_content(html) {
            warn!("skipping content swap: {e}");
            return;
        }
        debug!("applied content update ({} bytes)", html.len());

        if let Some(marker) = inner.sourcepos.clone() {
            inner.scroll_to(&marker);
        }
    }

    /// The currently stored position marker.
    pub fn position(&self) -> Option<String> {
        self.inner.lock().unwrap().sourcepos.clone()
    }

    /// Runs `f` against the underlying surface.
    pub fn inspect_surface<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.inner.lock().unwrap().surface)
    }
}

impl<S: RenderSurface> Inner<S> {
    fn scroll_to(&mut self, marker: &str) {
        match self.surface.find_anchor(marker) {
            Some(anchor) => self.surface.scroll_into_view(&anchor),
            None => warn!("no anchor found for position {marker}, skipping scroll"),
        }
    }
}

#[async_trait]
impl<S> EventHandler for Reconciler<S>
where
    S: RenderSurface + Send,
{
    async fn handle(&self, event: &StreamEvent) {
        match event {
            StreamEvent::Position { sourcepos } => self.on_position(sourcepos),
            StreamEvent::FileChanged { html } => self.on_file_changed(html),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory fake surface: an anchor "exists" when the content
    /// contains the marker string, and scrolls are recorded for
    /// inspection.
    struct FakeSurface {
        content: String,
        scrolls: Vec<String>,
        mounted: bool,
    }

    impl FakeSurface {
        fn with_content(content: &str) -> Self {
            Self {
                content: content.to_string(),
                scrolls: Vec::new(),
                mounted: true,
            }
        }

        fn unmounted() -> Self {
            Self {
                content: String::new(),
                scrolls: Vec::new(),
                mounted: false,
            }
        }
    }

    impl RenderSurface for FakeSurface {
        type Anchor = String;

        fn find_anchor(&self, marker: &str) -> Option<String> {
            self.content.contains(marker).then(|| marker.to_string())
        }

        fn replace_content(&mut self, html: &str) -> Result<(), SurfaceError> {
            if !self.mounted {
                return Err(SurfaceError::MountMissing);
            }
            self.content = html.to_string();
            Ok(())
        }

        fn scroll_into_view(&mut self, anchor: &String) {
            self.scrolls.push(anchor.clone());
        }
    }

    #[test]
    fn test_position_scrolls_to_matching_anchor() {
        let reconciler = Reconciler::new(FakeSurface::with_content("P1 P2"));

        reconciler.on_position("P1");

        assert_eq!(reconciler.position(), Some("P1".to_string()));
        reconciler.inspect_surface(|s| assert_eq!(s.scrolls, vec!["P1"]));
    }

    #[test]
    fn test_last_writer_wins_for_position() {
        let reconciler = Reconciler::new(FakeSurface::with_content("P1 P2"));

        reconciler.on_position("P1");
        reconciler.on_position("P2");

        assert_eq!(
            reconciler.position(),
            Some("P2".to_string()),
            "stored anchor should be the latest marker"
        );
        reconciler.inspect_surface(|s| {
            assert_eq!(
                s.scrolls,
                vec!["P1", "P2"],
                "exactly one scroll should target P2"
            )
        });
    }

    #[test]
    fn test_anchor_persists_across_content_replacement() {
        let reconciler = Reconciler::new(FakeSurface::with_content("old P1"));

        reconciler.on_position("P1");
        reconciler.on_file_changed("new content with P1");

        assert_eq!(reconciler.position(), Some("P1".to_string()));
        reconciler.inspect_surface(|s| {
            assert_eq!(s.content, "new content with P1");
            assert_eq!(
                s.scrolls,
                vec!["P1", "P1"],
                "the swap should re-anchor to the stored marker in the new content"
            );
        });
    }

    #[test]
    fn test_missing_anchor_skips_scroll_but_updates_marker() {
        let reconciler = Reconciler::new(FakeSurface::with_content("P1"));

        reconciler.on_position("PX");

        assert_eq!(
            reconciler.position(),
            Some("PX".to_string()),
            "position state still updates even though the scroll is skipped"
        );
        reconciler.inspect_surface(|s| assert!(s.scrolls.is_empty()));

        // Subsequent events are still processed normally.
        reconciler.on_position("P1");
        reconciler.inspect_surface(|s| assert_eq!(s.scrolls, vec!["P1"]));
    }

    #[test]
    fn test_replacement_without_prior_position_does_not_scroll() {
        let reconciler = Reconciler::new(FakeSurface::with_content(""));

        reconciler.on_file_changed("fresh content");

        assert_eq!(reconciler.position(), None);
        reconciler.inspect_surface(|s| {
            assert_eq!(s.content, "fresh content");
            assert!(s.scrolls.is_empty(), "no marker means no re-anchor attempt");
        });
    }

    #[test]
    fn test_missing_mount_point_skips_swap() {
        let reconciler = Reconciler::new(FakeSurface::unmounted());

        reconciler.on_position("P1");
        reconciler.on_file_changed("content that will not land");

        assert_eq!(
            reconciler.position(),
            Some("P1".to_string()),
            "the marker is retained even when the swap is skipped"
        );
        reconciler.inspect_surface(|s| assert_eq!(s.content, ""));
    }

    #[tokio::test]
    async fn test_handles_stream_events() {
        let reconciler = Reconciler::new(FakeSurface::with_content(""));

        reconciler
            .handle(&StreamEvent::FileChanged {
                html: "body with 2:1-3:4".to_string(),
            })
            .await;
        reconciler
            .handle(&StreamEvent::Position {
                sourcepos: "2:1-3:4".to_string(),
            })
            .await;

        assert_eq!(reconciler.position(), Some("2:1-3:4".to_string()));
        reconciler.inspect_surface(|s| assert_eq!(s.scrolls, vec!["2:1-3:4"]));
    }
}
