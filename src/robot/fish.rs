//! Fishing: cast, find the bobber, watch it for a bite and reel in

use std::path::PathBuf;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use once_cell::sync::Lazy;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::action::{Action, ActionContext, ActionOutcome};
use super::builder::{merge_params, parse_bool, parse_color, parse_duration, parse_u64, parse_u8};
use super::gate::{should_perform, Frequency};
use crate::config::Params;
use crate::error::{ActionError, ImageError, ParamError};
use crate::input::MouseButton;
use crate::input::is_known_key;
use crate::screen_reader::pixels::{
    centered_crop, closest_pixel_to_color, find_region_with_color, toggle_pixels,
    CLOSEST_SCAN_MARGIN, WHITE,
};
use crate::screen_reader::{
    image_diff_files, save_image, BluePixelFilter, CaptureSession, PixelMatch,
};
use crate::utils::timing::rand_sleep;

pub const DEFAULT_SPELL_KEY: &str = "f6";
/// 20 second catch window + cast time + loot animation time
pub const FISHING_MAX_DURATION: Duration = Duration::from_secs(21);
/// Side of the square watched around the cursor while waiting for a bite
pub const SCREEN_CAPTURE_BOX: u32 = 30;
/// Size of the centered screen area searched for the bobber
pub const BOBBER_SEARCH_WIDTH: u32 = 1000;
pub const BOBBER_SEARCH_HEIGHT: u32 = 600;
/// Nudge from the detected marker onto the bobber body
pub const BOBBER_CURSOR_OFFSET: (i32, i32) = (3, 3);

const PRESS_DELAY_MS: std::ops::Range<u64> = 50..100;
/// Lets the cast animation finish before looking for the bobber
const SETTLE_DELAY_MS: std::ops::Range<u64> = 2000..2500;
const COOLDOWN_MS: std::ops::Range<u64> = 1000..2000;

static FISHING_DEFAULT_PARAMS: Lazy<Params> = Lazy::new(|| {
    let mut m = Params::new();
    m.insert("happens".to_string(), "always".to_string());
    m.insert("spell_key".to_string(), DEFAULT_SPELL_KEY.to_string());
    m.insert("captures_dir".to_string(), "./captures".to_string());
    m.insert("catch_threshold".to_string(), "2000".to_string());
    m.insert("toggle_blue_threshold".to_string(), "100".to_string());
    m.insert("check_catch_period".to_string(), "150".to_string());
    m.insert("bobber_locator".to_string(), "blue".to_string());
    m.insert("bobber_color".to_string(), "183,119,88".to_string());
    m.insert("keep_captures".to_string(), "false".to_string());
    m
});

/// How the bobber is picked out of the search screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BobberLocator {
    /// Densest cluster of saturated blue pixels
    Blue(BluePixelFilter),
    /// Neighbourhood closest to a reference bobber colour
    Color(Rgba<u8>),
}

/// Result of one bobber search
#[derive(Debug, Clone)]
pub struct BobberSearch {
    pub found: Option<PixelMatch>,
    /// Binary projection the blue locator searched, kept for inspection
    pub projection: Option<RgbaImage>,
}

impl BobberLocator {
    /// Both locator settings are validated, whichever locator is picked
    fn from_params(p: &Params) -> Result<Self, ParamError> {
        let blue = BluePixelFilter::new(parse_u8(p, "toggle_blue_threshold")?);
        let color = parse_color(p, "bobber_color")?;

        let kind = p.get("bobber_locator").map(String::as_str).unwrap_or_default();
        match kind.trim().to_lowercase().as_str() {
            "blue" => Ok(BobberLocator::Blue(blue)),
            "color" => Ok(BobberLocator::Color(color)),
            _ => Err(ParamError::UnknownLocator {
                key: "bobber_locator".to_string(),
                value: kind.to_string(),
            }),
        }
    }

    /// Search `area`; coordinates of the match are relative to it
    pub fn locate(&self, area: &RgbaImage) -> BobberSearch {
        match self {
            BobberLocator::Blue(filter) => {
                let projection = toggle_pixels(area, filter);
                BobberSearch {
                    found: find_region_with_color(&projection, WHITE),
                    projection: Some(projection),
                }
            }
            BobberLocator::Color(color) => BobberSearch {
                found: closest_pixel_to_color(area, *color, CLOSEST_SCAN_MARGIN),
                projection: None,
            },
        }
    }
}

/// Decides from the poll frames of a cast whether a fish bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiteDetector {
    catch_threshold: u64,
}

impl BiteDetector {
    /// Samples before this one never count as a bite
    pub const FIRST_DECISIVE_SAMPLE: u32 = 3;

    pub fn new(catch_threshold: u64) -> Self {
        Self { catch_threshold }
    }

    pub fn catch_threshold(&self) -> u64 {
        self.catch_threshold
    }

    /// Compare frame `sample` with the first frame of the cast. Returns the
    /// difference magnitude when it reaches the catch threshold.
    pub fn check(&self, sample: u32, captures: &CaptureSession) -> Result<Option<u64>, ImageError> {
        if sample < Self::FIRST_DECISIVE_SAMPLE {
            return Ok(None);
        }

        let diff = image_diff_files(&captures.frame_path(1), &captures.frame_path(sample))?;
        tracing::debug!("[FISH] Diff 1-{}: {}", sample, diff);
        Ok((diff >= self.catch_threshold).then_some(diff))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FishAction {
    spell_key: String,
    happens: Frequency,
    captures_dir: PathBuf,
    detector: BiteDetector,
    locator: BobberLocator,
    check_catch_period: Duration,
    keep_captures: bool,
}

impl FishAction {
    /// Build from user parameters merged over the fishing defaults
    pub fn from_params(params: &Params) -> Result<Self, ParamError> {
        let p = merge_params(&FISHING_DEFAULT_PARAMS, params);
        let text = |key: &str| p.get(key).cloned().unwrap_or_default();

        let check_catch_period = parse_duration(&p, "check_catch_period")?;
        if check_catch_period.is_zero() {
            return Err(ParamError::InvalidDuration {
                key: "check_catch_period".to_string(),
                value: text("check_catch_period"),
            });
        }

        let spell_key = text("spell_key");
        if !is_known_key(&spell_key) {
            return Err(ParamError::UnknownKey {
                key: "spell_key".to_string(),
                value: spell_key,
            });
        }

        Ok(Self {
            spell_key,
            happens: Frequency::parse(&text("happens")),
            captures_dir: PathBuf::from(text("captures_dir")),
            detector: BiteDetector::new(parse_u64(&p, "catch_threshold")?),
            locator: BobberLocator::from_params(&p)?,
            check_catch_period,
            keep_captures: parse_bool(&p, "keep_captures")?,
        })
    }

    pub fn build_action(params: &Params) -> Result<Action, ParamError> {
        Ok(Self::from_params(params)?.into())
    }

    pub fn spell_key(&self) -> &str {
        &self.spell_key
    }

    pub fn happens(&self) -> Frequency {
        self.happens
    }

    pub fn captures_dir(&self) -> &std::path::Path {
        &self.captures_dir
    }

    pub fn catch_threshold(&self) -> u64 {
        self.detector.catch_threshold()
    }

    pub fn check_catch_period(&self) -> Duration {
        self.check_catch_period
    }

    /// Performs the fishing action
    pub async fn perform(&self, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if !should_perform(self.happens, ctx.rng) {
            tracing::info!("[FISH] Skipping action: fishing");
            return Ok(ActionOutcome::Skipped);
        }
        tracing::info!("[FISH] Doing action: fishing");

        let captures = CaptureSession::create(&self.captures_dir, self.keep_captures)?;

        rand_sleep(ctx.rng, PRESS_DELAY_MS).await;
        ctx.desktop.press_key(&self.spell_key)?;
        let deadline = Instant::now() + FISHING_MAX_DURATION;

        self.move_to_bobber(ctx, &captures).await?;

        let outcome = self.wait_for_bite(ctx, &captures, deadline).await?;
        match outcome {
            ActionOutcome::Caught { sample, magnitude } => {
                tracing::info!("[FISH] Fish caught at sample {} (diff {})", sample, magnitude);
                ctx.desktop.click(MouseButton::Right, false)?;
            }
            ActionOutcome::TimedOut { samples } => {
                tracing::info!("[FISH] Action fishing: TIMEOUT after {} samples", samples);
            }
            _ => {}
        }

        if self.keep_captures {
            tracing::debug!("[FISH] Captures kept in {:?}", captures.path());
        }

        // Sleep between 1 and 2 seconds after each cast
        rand_sleep(ctx.rng, COOLDOWN_MS).await;
        Ok(outcome)
    }

    async fn move_to_bobber(
        &self,
        ctx: &mut ActionContext<'_>,
        captures: &CaptureSession,
    ) -> Result<(), ActionError> {
        rand_sleep(ctx.rng, SETTLE_DELAY_MS).await;

        let screen = ctx.desktop.capture_screen()?;
        let (area, (left, top)) = centered_crop(&screen, BOBBER_SEARCH_WIDTH, BOBBER_SEARCH_HEIGHT);
        save_image(&captures.lookup_path(), &area)?;

        let search = self.locator.locate(&area);
        if let Some(projection) = &search.projection {
            save_image(&captures.filtered_lookup_path(), projection)?;
        }

        match search.found {
            Some(found) => {
                let x = (left + found.x) as i32 + BOBBER_CURSOR_OFFSET.0;
                let y = (top + found.y) as i32 + BOBBER_CURSOR_OFFSET.1;
                tracing::debug!("[FISH] Bobber at ({}, {}), score {}", x, y, found.score);
                ctx.desktop.move_cursor_smooth(x, y)?;
            }
            None => {
                tracing::warn!("[FISH] Bobber not found, watching the current cursor position");
            }
        }
        Ok(())
    }

    /// Poll the box under the cursor until a bite or the deadline, whichever
    /// comes first. A tick in flight when the deadline fires is dropped.
    async fn wait_for_bite(
        &self,
        ctx: &mut ActionContext<'_>,
        captures: &CaptureSession,
        deadline: Instant,
    ) -> Result<ActionOutcome, ActionError> {
        let timeout = time::sleep_until(deadline);
        tokio::pin!(timeout);

        let period = self.check_catch_period;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut sample = 0u32;
        loop {
            tokio::select! {
                biased;
                _ = &mut timeout => {
                    return Ok(ActionOutcome::TimedOut { samples: sample });
                }
                _ = ticker.tick() => {
                    sample += 1;
                    let (x, y) = ctx.desktop.cursor_position()?;
                    let frame =
                        ctx.desktop.capture_region(x, y, SCREEN_CAPTURE_BOX, SCREEN_CAPTURE_BOX)?;
                    save_image(&captures.frame_path(sample), &frame)?;

                    if let Some(magnitude) = self.detector.check(sample, captures)? {
                        return Ok(ActionOutcome::Caught { sample, magnitude });
                    }
                }
            }
        }
    }
}
