//! The rendering surface capability trait and the in-memory HTML surface.

use std::fmt;

/// Attribute carrying the position marker on rendered elements. The server
/// renders markdown with source position tracking enabled, so every block
/// element carries one.
pub const SOURCEPOS_ATTR: &str = "data-sourcepos";

/// Errors a surface can report. None of them are fatal to the view; the
/// reconciler logs and degrades to the last successfully applied state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface has no mount point for content replacement.
    MountMissing,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SurfaceError::MountMissing => write!(f, "no mount point for rendered content"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Capability interface over the rendered document.
///
/// The reconciler only ever talks to the surface through these three
/// operations, so its logic can be exercised against an in-memory fake.
/// The surface contract expects at most one anchor per distinct marker
/// value; zero or multiple matches are tolerated (lookup returns the
/// first match, or `None`).
pub trait RenderSurface {
    /// Owned handle to an anchored element.
    type Anchor;

    /// Looks up the element anchored at `marker`.
    fn find_anchor(&self, marker: &str) -> Option<Self::Anchor>;

    /// Replaces the entire rendered content in a single atomic swap.
    fn replace_content(&mut self, html: &str) -> Result<(), SurfaceError>;

    /// Brings an anchored element into view.
    fn scroll_into_view(&mut self, anchor: &Self::Anchor);
}

/// Handle to an element in an [`HtmlSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAnchor {
    marker: String,
    offset: usize,
}

impl HtmlAnchor {
    /// The position marker this anchor was resolved from.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Byte offset of the anchored element's `data-sourcepos` attribute
    /// within the rendered content.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// In-memory rendering surface backed by the rendered HTML string.
///
/// The held content *is* the Rendered Content; there is no separate copy.
/// The viewport is the last anchor scrolled into view, which is what a
/// terminal client can usefully report. The mount point always exists for
/// this surface, so `replace_content` cannot fail.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    content: String,
    viewport: Option<HtmlAnchor>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The anchor most recently scrolled into view, if any.
    pub fn viewport(&self) -> Option<&HtmlAnchor> {
        self.viewport.as_ref()
    }
}

impl RenderSurface for HtmlSurface {
    type Anchor = HtmlAnchor;

    fn find_anchor(&self, marker: &str) -> Option<HtmlAnchor> {
        let needle = format!("{SOURCEPOS_ATTR}=\"{marker}\"");
        self.content.find(&needle).map(|offset| HtmlAnchor {
            marker: marker.to_string(),
            offset,
        })
    }

    fn replace_content(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.content = html.to_string();
        Ok(())
    }

    fn scroll_into_view(&mut self, anchor: &HtmlAnchor) {
        self.viewport = Some(anchor.clone());
    }
}
