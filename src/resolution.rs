use crate::config::AppSettings;

// ── Tiers ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_WIDTH: i32 = 1920;
pub const DEFAULT_HEIGHT: i32 = 1080;

/// Adaptive resolution picker. Discriminants are the picker indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionTier {
    Off = 0,
    Auto = 1,
    #[default]
    P1080 = 2,
    P1440 = 3,
    K4 = 4,
    Custom = 5,
}

pub const RESOLUTION_TIERS: &[ResolutionTier] = &[
    ResolutionTier::Off,
    ResolutionTier::Auto,
    ResolutionTier::P1080,
    ResolutionTier::P1440,
    ResolutionTier::K4,
    ResolutionTier::Custom,
];

impl ResolutionTier {
    /// Unknown indices behave like `Off`.
    pub fn from_index(idx: usize) -> Self {
        RESOLUTION_TIERS.get(idx).copied().unwrap_or(Self::Off)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Auto => "Auto",
            Self::P1080 => "1080p",
            Self::P1440 => "1440p",
            Self::K4 => "4K",
            Self::Custom => "Custom",
        }
    }

    /// Fixed output height for the preset tiers.
    pub fn preset_height(self) -> Option<i32> {
        match self {
            Self::P1080 => Some(1080),
            Self::P1440 => Some(1440),
            Self::K4 => Some(2160),
            _ => None,
        }
    }

    pub fn uses_aspect_ratio(self) -> bool {
        self.preset_height().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioTier {
    FourThree = 0,
    #[default]
    SixteenNine = 1,
    SixteenTen = 2,
}

pub const ASPECT_RATIO_TIERS: &[AspectRatioTier] = &[
    AspectRatioTier::FourThree,
    AspectRatioTier::SixteenNine,
    AspectRatioTier::SixteenTen,
];

impl AspectRatioTier {
    /// Unknown indices behave like 16:9.
    pub fn from_index(idx: usize) -> Self {
        ASPECT_RATIO_TIERS
            .get(idx)
            .copied()
            .unwrap_or(Self::SixteenNine)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FourThree => "4:3",
            Self::SixteenNine => "16:9",
            Self::SixteenTen => "16:10",
        }
    }

    /// `(width_ratio, height_ratio)`
    pub fn ratio(self) -> (i32, i32) {
        match self {
            Self::FourThree => (4, 3),
            Self::SixteenNine => (16, 9),
            Self::SixteenTen => (16, 10),
        }
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Width for `height` at the given aspect ratio.
///
/// The height is divided by the height ratio *before* multiplying, so the
/// truncation happens on the intermediate value. `1081` at 16:9 gives `1920`,
/// not `1921`.
pub fn derive_width(height: i32, aspect: AspectRatioTier) -> i32 {
    let (width_ratio, height_ratio) = aspect.ratio();
    (height / height_ratio) * width_ratio
}

/// Target window size for the selected tiers.
///
/// `Auto` fills both dimensions from the screen width. `Custom` passes the
/// custom values through untouched, zero and negatives included.
pub fn resolve(
    tier: ResolutionTier,
    aspect: AspectRatioTier,
    custom_width: i32,
    custom_height: i32,
    screen_width: i32,
) -> (i32, i32) {
    match tier {
        ResolutionTier::Off => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        ResolutionTier::Auto => (screen_width, screen_width),
        ResolutionTier::P1080 | ResolutionTier::P1440 | ResolutionTier::K4 => {
            let height = tier.preset_height().unwrap_or(DEFAULT_HEIGHT);
            (derive_width(height, aspect), height)
        }
        ResolutionTier::Custom => (custom_width, custom_height),
    }
}

/// Resolve and commit the result into the settings record.
pub fn apply_resolution(
    settings: &mut AppSettings,
    tier: ResolutionTier,
    aspect: AspectRatioTier,
    custom_width: i32,
    custom_height: i32,
    screen_width: i32,
) -> (i32, i32) {
    let (width, height) = resolve(tier, aspect, custom_width, custom_height, screen_width);
    settings.window_width = width;
    settings.window_height = height;
    tracing::debug!(
        tier = tier.label(),
        aspect = aspect.label(),
        width,
        height,
        "window resolution updated"
    );
    (width, height)
}
