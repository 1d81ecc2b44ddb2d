use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Packing strategies and container configuration.
/// Key notes:
///   - `strategy` selects Guillotine/Shelf; both share the same `Bin` contract
///   - `choice`/`split` tune the guillotine search, `shelf_policy` the shelf
///     Top-level strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Guillotine free-rectangle splitting (default; best quality on mixed sizes).
    Guillotine,
    /// Shelf rows (fast and simple; good for similar heights).
    Shelf,
}

impl FromStr for Strategy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "guillotine" => Ok(Self::Guillotine),
            "shelf" => Ok(Self::Shelf),
            _ => Err(()),
        }
    }
}

/// Free-rectangle choice heuristics for the guillotine strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitChoice {
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    WorstAreaFit,
    WorstShortSideFit,
    WorstLongSideFit,
}

impl FromStr for FitChoice {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "waf" | "worstareafit" => Ok(Self::WorstAreaFit),
            "wssf" | "worstshortsidefit" => Ok(Self::WorstShortSideFit),
            "wlsf" | "worstlongsidefit" => Ok(Self::WorstLongSideFit),
            _ => Err(()),
        }
    }
}

/// Split-axis rules for the guillotine strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitRule {
    /// Cut along the axis whose two residuals are jointly most square.
    SquarerLeftover,
    ShorterLeftoverAxis,
    LongerLeftoverAxis,
    MinimizeArea,
    MaximizeArea,
    ShorterAxis,
    LongerAxis,
}

impl FromStr for SplitRule {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squarer" | "squarerleftover" => Ok(Self::SquarerLeftover),
            "slas" | "shorterleftoveraxis" => Ok(Self::ShorterLeftoverAxis),
            "llas" | "longerleftoveraxis" => Ok(Self::LongerLeftoverAxis),
            "minas" | "minimizearea" => Ok(Self::MinimizeArea),
            "maxas" | "maximizearea" => Ok(Self::MaximizeArea),
            "sas" | "shorteraxis" => Ok(Self::ShorterAxis),
            "las" | "longeraxis" => Ok(Self::LongerAxis),
            _ => Err(()),
        }
    }
}

/// Shelf placement policies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShelfPolicy {
    FirstFit,
    NextFit,
}

impl FromStr for ShelfPolicy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ff" | "firstfit" => Ok(Self::FirstFit),
            "nf" | "nextfit" => Ok(Self::NextFit),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,

    // strategy selection
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,
    #[serde(default = "default_choice")]
    pub choice: FitChoice,
    #[serde(default = "default_split")]
    pub split: SplitRule,
    #[serde(default = "default_shelf_policy")]
    pub shelf_policy: ShelfPolicy,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            strategy: default_strategy(),
            choice: default_choice(),
            split: default_split(),
            shelf_policy: default_shelf_policy(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if either canvas dimension is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PackError;

        if self.width == 0 || self.height == 0 {
            return Err(PackError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }
}

fn default_strategy() -> Strategy {
    Strategy::Guillotine
}
fn default_choice() -> FitChoice {
    FitChoice::BestAreaFit
}
fn default_split() -> SplitRule {
    SplitRule::SquarerLeftover
}
fn default_shelf_policy() -> ShelfPolicy {
    ShelfPolicy::FirstFit
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.width = w;
        self.cfg.height = h;
        self
    }
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn choice(mut self, v: FitChoice) -> Self {
        self.cfg.choice = v;
        self
    }
    pub fn split(mut self, v: SplitRule) -> Self {
        self.cfg.split = v;
        self
    }
    pub fn shelf_policy(mut self, v: ShelfPolicy) -> Self {
        self.cfg.shelf_policy = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
