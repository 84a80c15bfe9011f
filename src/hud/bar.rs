/// Colors a boss bar can be rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarColor {
    Pink,
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    White,
}

/// Segmentation of the rendered bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarOverlay {
    #[default]
    Progress,
    Notched6,
    Notched10,
    Notched12,
    Notched20,
}

/// Display handle for a single player's boss bar: a label, a completion
/// fraction and a color. The fraction is clamped to [0.0, 1.0] on every
/// write, out-of-range input is never an error.
#[derive(Clone, Debug, PartialEq)]
pub struct BossBar {
    name: String,
    progress: f32,
    color: BarColor,
    overlay: BarOverlay,
}

impl BossBar {
    pub fn new(
        name: impl Into<String>,
        progress: f32,
        color: BarColor,
        overlay: BarOverlay,
    ) -> Self {
        Self {
            name: name.into(),
            progress: progress.clamp(0.0, 1.0),
            color,
            overlay,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn color(&self) -> BarColor {
        self.color
    }

    pub fn set_color(&mut self, color: BarColor) {
        self.color = color;
    }

    pub fn overlay(&self) -> BarOverlay {
        self.overlay
    }
}
