//! Self-similarity upscaler: configuration and the per-pixel scheduler.
//!
//! Every interior source pixel (at least `padding` from each edge) is
//! upscaled independently: its neighborhood is matched against a downscaled
//! copy of the same image, and the full-resolution blocks behind the best
//! matches are averaged into its `scale x scale` output block. Border pixels
//! are handled by [`BorderPolicy`].

mod border;
mod config;
#[cfg(feature = "rayon")]
mod rayon;
mod rows;

pub use border::{fill_border, is_border};
pub use config::{BorderPolicy, UpscaleConfig};

use crate::image::reference::build_reference;
use crate::image::{ImageView, OwnedImage, Rgb};
use crate::patch::PatchPlan;
use crate::search::SearchParams;
use crate::trace::{trace_event, trace_span};
use crate::util::{UpscaleError, UpscaleResult};
use rows::RowJob;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Rows between progress events.
const PROGRESS_EVERY: usize = 16;

/// Validated configuration plus its precomputed patch plan.
#[derive(Clone, Debug)]
pub struct Upscaler {
    config: UpscaleConfig,
    plan: PatchPlan,
}

impl Upscaler {
    /// Validates `config` and normalizes its context weights.
    pub fn new(config: UpscaleConfig) -> UpscaleResult<Self> {
        let weights = config.validate()?;
        let plan = PatchPlan::new(weights);
        Ok(Self { config, plan })
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &UpscaleConfig {
        &self.config
    }

    /// Returns the compiled patch plan.
    pub fn plan(&self) -> &PatchPlan {
        &self.plan
    }

    /// Upscales `image` by `config.scale`.
    pub fn upscale(&self, image: ImageView<'_, Rgb>) -> UpscaleResult<OwnedImage> {
        let reference = build_reference(image, self.config.scale)?;
        self.upscale_with_reference(image, reference.view())
    }

    /// Upscales `image` against a caller-provided reference image.
    ///
    /// `reference` must not exceed `image / scale` on either axis so every
    /// candidate block maps inside `image`.
    pub fn upscale_with_reference(
        &self,
        image: ImageView<'_, Rgb>,
        reference: ImageView<'_, Rgb>,
    ) -> UpscaleResult<OwnedImage> {
        let scale = self.config.scale;
        let width = image.width();
        let height = image.height();
        if reference.width() > width / scale || reference.height() > height / scale {
            return Err(UpscaleError::InvalidDimensions {
                width: reference.width(),
                height: reference.height(),
            });
        }

        let out_width = width
            .checked_mul(scale)
            .ok_or(UpscaleError::InvalidDimensions { width, height })?;
        let out_height = height
            .checked_mul(scale)
            .ok_or(UpscaleError::InvalidDimensions { width, height })?;
        let mut out = OwnedImage::zeroed(out_width, out_height)?;

        let _span = trace_span!(
            "upscale",
            width = width,
            height = height,
            scale = scale,
            parallel = self.config.parallel
        )
        .entered();

        let job = RowJob {
            full: image,
            reference,
            plan: &self.plan,
            params: SearchParams {
                scale,
                half_extent: self.config.half_extent(),
                stop_threshold: self.config.stop_threshold,
                top_k: self.config.top_k,
            },
            color_preservation: self.config.color_preservation,
            border: self.config.border,
        };

        let rows_done = AtomicUsize::new(0);
        let on_row_done = || {
            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_EVERY == 0 || done == height {
                trace_event!("rows_done", done = done, total = height);
            }
        };

        #[cfg(feature = "rayon")]
        if self.config.parallel {
            rayon::run_parallel(&job, out.data_mut(), on_row_done);
            trace_event!("upscale_done", width = out_width, height = out_height);
            return Ok(out);
        }

        rows::run_sequential(&job, out.data_mut(), on_row_done);
        trace_event!("upscale_done", width = out_width, height = out_height);
        Ok(out)
    }
}

/// Upscales `image` with `config` in one call.
pub fn upscale(image: ImageView<'_, Rgb>, config: UpscaleConfig) -> UpscaleResult<OwnedImage> {
    Upscaler::new(config)?.upscale(image)
}
