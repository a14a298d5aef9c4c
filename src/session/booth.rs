use crate::assets::photo::CapturedPhoto;
use crate::caption::provider::{CaptionProvider, caption_or_fallback};
use crate::effects::filter::{Filter, filter_by_id};
use crate::encode::png::export_file_name;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::catalog::layout_by_id;
use crate::layout::spec::LayoutSpec;
use crate::render::compositor::{CompositeResult, Compositor};

/// Countdown lengths offered by the booth, in seconds.
pub const TIMER_CHOICES: [u32; 3] = [3, 5, 10];

/// Branding line drawn under every collage unless the caller supplies another.
pub const DEFAULT_BRANDING: &str = "Tiệm Chụp Ảnh Cute 📸";

/// Where the booth is in its capture workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoothMode {
    /// Choosing layout, filter and timer.
    Setup,
    /// Waiting for the next shot.
    Capturing,
    /// A shot was taken and awaits confirm or retake.
    Review,
    /// Every slot is filled; the collage can be rendered and exported.
    Decorate,
}

/// An exported collage ready to be saved or shared.
#[derive(Clone, Debug)]
pub struct BoothExport {
    /// Suggested download name (`photobooth-<millis>.png`).
    pub file_name: String,
    /// PNG bytes.
    pub png: Vec<u8>,
    /// Caption from the provider, or the fallback.
    pub caption: String,
    /// The rendered composite the PNG was encoded from.
    pub composite: CompositeResult,
}

/// Explicit booth state with one method per user action.
///
/// Transitions that do not apply to the current mode fail with
/// [`BoothError::Validation`] and leave the session unchanged.
#[derive(Clone, Debug)]
pub struct BoothSession {
    mode: BoothMode,
    layout: LayoutSpec,
    filter: Filter,
    timer_seconds: u32,
    mirror: bool,
    shots: Vec<CapturedPhoto>,
    pending: Option<CapturedPhoto>,
}

impl BoothSession {
    /// A session in [`BoothMode::Setup`] with the given layout and filter.
    pub fn new(layout: LayoutSpec, filter: Filter) -> BoothResult<Self> {
        layout.validate()?;
        Ok(Self {
            mode: BoothMode::Setup,
            layout,
            filter,
            timer_seconds: TIMER_CHOICES[0],
            mirror: true,
            shots: Vec::new(),
            pending: None,
        })
    }

    /// A session on the `strip-4` layout with the `normal` filter.
    pub fn with_defaults() -> BoothResult<Self> {
        Self::new(layout_by_id("strip-4")?, filter_by_id("normal")?)
    }

    /// Current mode.
    pub fn mode(&self) -> BoothMode {
        self.mode
    }

    /// Selected layout.
    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Selected capture filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Selected countdown length.
    pub fn timer_seconds(&self) -> u32 {
        self.timer_seconds
    }

    /// Whether frames are mirrored at capture.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Confirmed shots in slot order.
    pub fn shots(&self) -> &[CapturedPhoto] {
        &self.shots
    }

    /// The shot awaiting review, if any.
    pub fn pending_shot(&self) -> Option<&CapturedPhoto> {
        self.pending.as_ref()
    }

    /// Slots still to fill.
    pub fn remaining_shots(&self) -> usize {
        self.layout.capacity().saturating_sub(self.shots.len())
    }

    /// Clear all shots and begin capturing.
    pub fn start_session(&mut self) -> BoothResult<()> {
        self.shots.clear();
        self.pending = None;
        self.mode = BoothMode::Capturing;
        tracing::debug!(layout = %self.layout.id, capacity = self.layout.capacity(), "session started");
        Ok(())
    }

    /// Pick a layout. Only allowed during setup.
    pub fn select_layout(&mut self, layout: LayoutSpec) -> BoothResult<()> {
        self.require(&[BoothMode::Setup], "select a layout")?;
        layout.validate()?;
        self.layout = layout;
        Ok(())
    }

    /// Pick the filter used for subsequent shots.
    pub fn select_filter(&mut self, filter: Filter) -> BoothResult<()> {
        self.require(&[BoothMode::Setup, BoothMode::Capturing], "select a filter")?;
        self.filter = filter;
        Ok(())
    }

    /// Pick the countdown length; must be one of [`TIMER_CHOICES`].
    pub fn set_timer(&mut self, seconds: u32) -> BoothResult<()> {
        if !TIMER_CHOICES.contains(&seconds) {
            return Err(BoothError::validation(format!(
                "timer must be one of {TIMER_CHOICES:?} seconds, got {seconds}"
            )));
        }
        self.timer_seconds = seconds;
        Ok(())
    }

    /// Toggle the selfie mirror applied at capture.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    /// Capture `frame` with the selected filter and hold it for review.
    pub fn take_shot(&mut self, frame: &image::RgbaImage) -> BoothResult<()> {
        self.require(&[BoothMode::Capturing], "take a shot")?;
        let shot = CapturedPhoto::capture(frame, &self.filter, self.mirror)?;
        self.pending = Some(shot);
        self.mode = BoothMode::Review;
        Ok(())
    }

    /// Keep the reviewed shot. Moves to [`BoothMode::Decorate`] once every slot is filled.
    pub fn confirm_shot(&mut self) -> BoothResult<()> {
        self.require(&[BoothMode::Review], "confirm a shot")?;
        let shot = self
            .pending
            .take()
            .ok_or_else(|| BoothError::validation("no shot is waiting for review"))?;
        self.shots.push(shot);
        self.mode = if self.shots.len() >= self.layout.capacity() {
            BoothMode::Decorate
        } else {
            BoothMode::Capturing
        };
        tracing::debug!(shots = self.shots.len(), mode = ?self.mode, "shot confirmed");
        Ok(())
    }

    /// Discard the reviewed shot and go back to capturing.
    pub fn retake_shot(&mut self) -> BoothResult<()> {
        self.require(&[BoothMode::Review], "retake a shot")?;
        self.pending = None;
        self.mode = BoothMode::Capturing;
        Ok(())
    }

    /// Return to setup and drop every shot. Layout, filter and timer are kept.
    pub fn reset(&mut self) {
        self.shots.clear();
        self.pending = None;
        self.mode = BoothMode::Setup;
    }

    /// Render the confirmed shots into the selected layout.
    pub fn render(&self, compositor: &Compositor, branding: &str) -> BoothResult<CompositeResult> {
        compositor.render(&self.layout, &self.shots, branding)
    }

    /// Render from the source shots, encode PNG and fetch a caption.
    ///
    /// Only available in [`BoothMode::Decorate`]. A failing caption provider yields
    /// `fallback_caption` instead of an error.
    pub fn export(
        &self,
        compositor: &Compositor,
        branding: &str,
        captions: &dyn CaptionProvider,
        fallback_caption: &str,
        unix_millis: u128,
    ) -> BoothResult<BoothExport> {
        self.require(&[BoothMode::Decorate], "export")?;
        let composite = self.render(compositor, branding)?;
        let png = composite.encode_png()?;
        let caption = caption_or_fallback(captions, &png, fallback_caption);
        Ok(BoothExport {
            file_name: export_file_name(unix_millis),
            png,
            caption,
            composite,
        })
    }

    fn require(&self, allowed: &[BoothMode], action: &str) -> BoothResult<()> {
        if allowed.contains(&self.mode) {
            Ok(())
        } else {
            Err(BoothError::validation(format!(
                "cannot {action} while in {:?} mode",
                self.mode
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/booth.rs"]
mod tests;
